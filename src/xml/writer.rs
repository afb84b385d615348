//! Writer für Snake-XML-Dateien.

use anyhow::{bail, Result};

use super::SnakeRecord;

/// Serialisiert eine Snake als XML-String.
pub fn write_snake_record(record: &SnakeRecord) -> Result<String> {
    if !record.has_consistent_count() {
        bail!(
            "M = {} passt nicht zu {} Kontrollpunkten",
            record.m,
            record.control_points.len()
        );
    }

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    output.push_str("<root>\n");
    output.push_str(&format!("    <name>{}</name>\n", escape_xml(&record.name)));
    output.push_str("    <rois>\n");
    output.push_str("        <roi>\n");
    output.push_str("            <snake_parameters>\n");
    output.push_str(&format!("                <M>{}</M>\n", record.m));
    output.push_str("                <control_points>\n");
    for node in &record.control_points {
        output.push_str("                    <control_point>\n");
        output.push_str(&format!(
            "                        <x>{}</x>\n",
            format_float(node.x)
        ));
        output.push_str(&format!(
            "                        <y>{}</y>\n",
            format_float(node.y)
        ));
        output.push_str(&format!(
            "                        <frozen>{}</frozen>\n",
            node.frozen
        ));
        output.push_str(&format!(
            "                        <hidden>{}</hidden>\n",
            node.hidden
        ));
        output.push_str("                    </control_point>\n");
    }
    output.push_str("                </control_points>\n");
    output.push_str("            </snake_parameters>\n");
    output.push_str("        </roi>\n");
    output.push_str("    </rois>\n");
    output.push_str("</root>\n");

    Ok(output)
}

/// Höchstens 4 Nachkommastellen, ohne nachlaufende Nullen.
fn format_float(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "" | "-" | "-0" => "0".to_string(),
        _ => text.to_string(),
    }
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ControlNode;

    #[test]
    fn test_format_float_precision() {
        assert_eq!(format_float(123.456_79), "123.4568");
        assert_eq!(format_float(100.0), "100");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(-0.000_01), "0");
        assert_eq!(format_float(-50.25), "-50.25");
    }

    #[test]
    fn test_writer_rejects_inconsistent_record() {
        let record = SnakeRecord {
            name: "x".into(),
            m: 3,
            control_points: vec![ControlNode::default(); 4],
        };
        assert!(write_snake_record(&record).is_err());
    }

    #[test]
    fn test_writer_escapes_name() {
        let record = SnakeRecord {
            name: "a<b>&c".into(),
            m: 1,
            control_points: vec![ControlNode::new(1.0, 2.0)],
        };
        let xml = write_snake_record(&record).expect("Record ist konsistent");
        assert!(xml.contains("<name>a&lt;b&gt;&amp;c</name>"));
        assert!(xml.contains("<M>1</M>"));
        assert!(xml.contains("<frozen>false</frozen>"));
    }
}
