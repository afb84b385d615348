/// Integration-Tests für das Lesen von Snake-XML-Dateien
use interactive_snake_editor::xml::parse_snake_record;
use interactive_snake_editor::{LinearSplineModel, Snake};

#[test]
fn test_parse_snake_config() {
    let xml_content = include_str!("fixtures/snake_config.xml");
    let record = parse_snake_record(xml_content).unwrap();

    assert_eq!(record.name, "cell_07.tif");
    assert_eq!(record.m, 4);
    assert_eq!(record.control_points.len(), 4);
}

#[test]
fn test_parse_snake_config_coordinates_and_flags() {
    let xml_content = include_str!("fixtures/snake_config.xml");
    let record = parse_snake_record(xml_content).unwrap();
    let points = &record.control_points;

    assert_eq!((points[0].x, points[0].y), (120.5, 80.0));
    assert_eq!(points[1].y, 0.25);
    assert_eq!(points[3].x, -0.5);

    assert!(points[1].frozen, "TRUE gilt als gesetzt");
    assert!(!points[3].frozen, "alles außer true gilt als false");
    assert!(points[2].hidden);
    assert!(!points[0].hidden);
}

#[test]
fn test_parsed_record_applies_to_linear_model() {
    let xml_content = include_str!("fixtures/snake_config.xml");
    let record = parse_snake_record(xml_content).unwrap();

    let mut model = LinearSplineModel::new(4, 256, 256, None).unwrap();
    record.apply_to(&mut model).unwrap();

    assert_eq!(model.nodes(), record.control_points.as_slice());
}

#[test]
fn test_parsed_record_rejected_by_model_of_other_size() {
    let xml_content = include_str!("fixtures/snake_config.xml");
    let record = parse_snake_record(xml_content).unwrap();

    let mut model = LinearSplineModel::new(5, 256, 256, None).unwrap();
    let before = model.nodes().to_vec();
    assert!(record.apply_to(&mut model).is_err());
    assert_eq!(model.nodes(), before.as_slice());
}
