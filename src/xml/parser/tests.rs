use super::*;

const TWO_POINTS: &str = r#"
<root>
    <name>blobs.gif</name>
    <rois>
        <roi>
            <snake_parameters>
                <M>1</M>
                <control_points>
                    <control_point>
                        <x>12.5</x>
                        <y>.25</y>
                        <frozen>true</frozen>
                        <hidden>false</hidden>
                    </control_point>
                    <control_point>
                        <x>-.5</x>
                        <y>3</y>
                        <frozen>FALSE</frozen>
                        <hidden>True</hidden>
                    </control_point>
                </control_points>
            </snake_parameters>
        </roi>
    </rois>
</root>
"#;

#[test]
fn test_parse_coordinate_accepts_leading_dot() {
    assert_eq!(parse_coordinate(".5").ok(), Some(0.5));
    assert_eq!(parse_coordinate("-.25").ok(), Some(-0.25));
    assert_eq!(parse_coordinate(" 17 ").ok(), Some(17.0));
    assert!(parse_coordinate("abc").is_err());
}

#[test]
fn test_parse_two_m_points_with_flags() {
    let record = parse_snake_record(TWO_POINTS).expect("XML sollte gültig sein");
    assert_eq!(record.name, "blobs.gif");
    assert_eq!(record.m, 1);
    assert_eq!(record.control_points.len(), 2);
    assert_eq!(record.control_points[0].y, 0.25);
    assert!(record.control_points[0].frozen);
    assert_eq!(record.control_points[1].x, -0.5);
    assert!(!record.control_points[1].frozen);
    assert!(record.control_points[1].hidden);
}

#[test]
fn test_parse_fails_for_count_mismatch() {
    let xml = TWO_POINTS.replace("<M>1</M>", "<M>3</M>");
    let err = parse_snake_record(&xml).expect_err("Parser sollte fehlschlagen");
    assert!(format!("{err:#}").contains("passt nicht"));
}

#[test]
fn test_parse_fails_for_invalid_coordinate() {
    let xml = TWO_POINTS.replace("<x>12.5</x>", "<x>zwölf</x>");
    let err = parse_snake_record(&xml).expect_err("Parser sollte fehlschlagen");
    assert!(format!("{err:#}").contains("Ungueltige Koordinate"));
}

#[test]
fn test_parse_fails_without_roi() {
    assert!(parse_snake_record("<root><name>x</name></root>").is_err());
}
