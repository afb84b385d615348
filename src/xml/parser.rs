//! Parser für Snake-XML-Dateien.

use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;

use super::SnakeRecord;
use crate::core::ControlNode;

/// Felder eines `<control_point>` während des Lesens.
#[derive(Default)]
struct PendingPoint {
    x: Option<f64>,
    y: Option<f64>,
    frozen: bool,
    hidden: bool,
}

/// Parsed die erste `<roi>` einer Snake-XML-Datei.
///
/// Die Anzahl der Kontrollpunkte muss `M` (L-Modell) oder `2M` (H-Modell)
/// entsprechen.
pub fn parse_snake_record(xml_content: &str) -> Result<SnakeRecord> {
    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut name: Option<String> = None;
    let mut m: Option<usize> = None;
    let mut control_points: Vec<ControlNode> = Vec::new();

    let mut roi_depth = 0usize;
    let mut rois_seen = 0usize;
    let mut current_tag: Option<String> = None;
    let mut pending: Option<PendingPoint> = None;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) => {
                let qname = e.name();
                let tag = reader.decoder().decode(qname.as_ref())?;
                match tag.as_ref() {
                    "roi" => {
                        rois_seen += 1;
                        roi_depth += 1;
                    }
                    "control_point" if roi_depth > 0 && rois_seen == 1 => {
                        pending = Some(PendingPoint::default());
                    }
                    _ => current_tag = Some(tag.to_string()),
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.xml_content()?.into_owned();
                let in_first_roi = roi_depth > 0 && rois_seen == 1;
                match (current_tag.as_deref(), pending.as_mut()) {
                    (Some("name"), _) if roi_depth == 0 && name.is_none() => name = Some(text),
                    (Some("M"), _) if in_first_roi => {
                        let value = text
                            .trim()
                            .parse::<usize>()
                            .with_context(|| format!("Ungueltiges M: '{}'", text))?;
                        m = Some(value);
                    }
                    (Some("x"), Some(point)) => point.x = Some(parse_coordinate(&text)?),
                    (Some("y"), Some(point)) => point.y = Some(parse_coordinate(&text)?),
                    (Some("frozen"), Some(point)) => point.frozen = parse_flag(&text),
                    (Some("hidden"), Some(point)) => point.hidden = parse_flag(&text),
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let qname = e.name();
                let tag = reader.decoder().decode(qname.as_ref())?;
                match tag.as_ref() {
                    "roi" => roi_depth = roi_depth.saturating_sub(1),
                    "control_point" => {
                        if let Some(point) = pending.take() {
                            let index = control_points.len();
                            let (Some(x), Some(y)) = (point.x, point.y) else {
                                bail!("Kontrollpunkt {} ohne x/y-Koordinate", index);
                            };
                            control_points.push(ControlNode {
                                x,
                                y,
                                frozen: point.frozen,
                                hidden: point.hidden,
                            });
                        }
                    }
                    _ => {
                        if current_tag.as_deref() == Some(tag.as_ref()) {
                            current_tag = None;
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
            _ => {}
        }

        buffer.clear();
    }

    if rois_seen == 0 {
        bail!("Keine <roi> gefunden");
    }
    let Some(m) = m else {
        bail!("Parameter M fehlt");
    };
    let record = SnakeRecord {
        name: name.unwrap_or_default(),
        m,
        control_points,
    };
    if !record.has_consistent_count() {
        bail!(
            "Parameter M = {} passt nicht zu {} Kontrollpunkten",
            record.m,
            record.control_points.len()
        );
    }
    if rois_seen > 1 {
        log::warn!("{} ROIs gefunden, nur die erste wird gelesen", rois_seen);
    }
    Ok(record)
}

/// Zahl mit optional fehlender Vorkomma-Null (`.5`).
fn parse_coordinate(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let normalized = match trimmed.strip_prefix("-.") {
        Some(rest) => format!("-0.{}", rest),
        None => match trimmed.strip_prefix('.') {
            Some(rest) => format!("0.{}", rest),
            None => trimmed.to_string(),
        },
    };
    normalized
        .parse::<f64>()
        .with_context(|| format!("Ungueltige Koordinate: '{}'", text))
}

/// `true` nur für "true" (Groß-/Kleinschreibung egal), sonst `false`.
fn parse_flag(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests;
