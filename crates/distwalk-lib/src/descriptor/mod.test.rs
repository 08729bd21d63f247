use super::*;

fn sample() -> Descriptor {
    Descriptor {
        name: "sample".to_string(),
        version: "1.0.0".to_string(),
        format: 2,
        buildtool_depends: vec![Dependency::new("ament_cmake")],
        build_depends: vec![Dependency::new("rclcpp"), Dependency::new("std_msgs")],
        run_depends: vec![Dependency::new("rclcpp")],
        test_depends: vec![],
    }
}

#[test]
fn test_depends_maps_every_kind_to_its_list() {
    let descriptor = sample();
    assert_eq!(descriptor.depends(DependencyKind::Buildtool).len(), 1);
    assert_eq!(descriptor.depends(DependencyKind::Build).len(), 2);
    assert_eq!(descriptor.depends(DependencyKind::Run).len(), 1);
    assert!(descriptor.depends(DependencyKind::Test).is_empty());
}

#[test]
fn test_depend_names_keep_document_order() {
    let descriptor = sample();
    let names: Vec<&str> = descriptor.depend_names(DependencyKind::Build).collect();
    assert_eq!(names, vec!["rclcpp", "std_msgs"]);
}

#[test]
fn test_parser_reference_delegates() {
    let parser = PackageXmlParser::new();
    let by_ref = &parser;
    let xml = "<package><name>a</name><version>1</version></package>";
    assert_eq!(by_ref.parse(xml).unwrap().name, "a");
}

#[test]
fn test_invalid_helper_builds_reason() {
    let err = DescriptorError::invalid("broken");
    assert_eq!(err.to_string(), "Invalid descriptor: broken");
}
