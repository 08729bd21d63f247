// Tests for package.xml parsing

use super::*;
use crate::primitives::DependencyKind;

fn names(descriptor: &Descriptor, kind: DependencyKind) -> Vec<&str> {
    descriptor.depend_names(kind).collect()
}

const FORMAT_1: &str = r#"<?xml version="1.0"?>
<package>
  <name>roscpp</name>
  <version>1.16.0</version>
  <description>C++ client library, see <a href="http://wiki.ros.org">the wiki</a></description>
  <maintainer email="someone@example.com">Someone</maintainer>
  <license>BSD</license>

  <buildtool_depend>catkin</buildtool_depend>
  <build_depend>cpp_common</build_depend>
  <run_depend>cpp_common</run_depend>
  <build_depend version_gte="1.11">message_generation</build_depend>
  <run_depend>rosgraph_msgs</run_depend>
  <test_depend>gtest</test_depend>

  <export>
    <rosdoc config="rosdoc.yaml"/>
  </export>
</package>
"#;

const FORMAT_2: &str = r#"<?xml version="1.0"?>
<?xml-model href="http://download.ros.org/schema/package_format2.xsd" schematypens="http://www.w3.org/2001/XMLSchema"?>
<package format="2">
  <name>tf2_ros</name>
  <version>0.25.2</version>
  <description>ROS bindings for tf2</description>
  <maintainer email="someone@example.com">Someone</maintainer>
  <license>BSD</license>

  <buildtool_depend>ament_cmake</buildtool_depend>
  <depend>tf2</depend>
  <build_depend>rclcpp</build_depend>
  <exec_depend>rclcpp</exec_depend>
  <depend>geometry_msgs</depend>
  <build_export_depend>message_filters</build_export_depend>
  <test_depend>ament_lint_auto</test_depend>
</package>
"#;

#[test]
fn test_parse_format_1_lists() {
    let descriptor = PackageXmlParser::new().parse(FORMAT_1).unwrap();

    assert_eq!(descriptor.name, "roscpp");
    assert_eq!(descriptor.version, "1.16.0");
    assert_eq!(descriptor.format, 1);
    assert_eq!(names(&descriptor, DependencyKind::Buildtool), vec!["catkin"]);
    assert_eq!(
        names(&descriptor, DependencyKind::Build),
        vec!["cpp_common", "message_generation"]
    );
    assert_eq!(
        names(&descriptor, DependencyKind::Run),
        vec!["cpp_common", "rosgraph_msgs"]
    );
    assert_eq!(names(&descriptor, DependencyKind::Test), vec!["gtest"]);
}

#[test]
fn test_version_constraints_are_kept() {
    let descriptor = PackageXmlParser::new().parse(FORMAT_1).unwrap();
    let generation = &descriptor.build_depends[1];
    assert_eq!(generation.name, "message_generation");
    assert_eq!(generation.version_gte.as_deref(), Some("1.11"));
    assert_eq!(generation.version_lt, None);
}

#[test]
fn test_parse_format_2_expands_depend() {
    let descriptor = PackageXmlParser::new().parse(FORMAT_2).unwrap();

    assert_eq!(descriptor.format, 2);
    assert_eq!(names(&descriptor, DependencyKind::Buildtool), vec!["ament_cmake"]);
    assert_eq!(
        names(&descriptor, DependencyKind::Build),
        vec!["rclcpp", "tf2", "geometry_msgs"]
    );
    // exec (+depend) followed by build_export (+depend), duplicates collapsed
    assert_eq!(
        names(&descriptor, DependencyKind::Run),
        vec!["rclcpp", "tf2", "geometry_msgs", "message_filters"]
    );
    assert_eq!(names(&descriptor, DependencyKind::Test), vec!["ament_lint_auto"]);
}

#[test]
fn test_format_3_condition_is_preserved() {
    let xml = r#"<package format="3">
  <name>demo</name>
  <version>0.1.0</version>
  <exec_depend condition="$ROS_VERSION == 2">rclpy</exec_depend>
</package>"#;
    let descriptor = PackageXmlParser::new().parse(xml).unwrap();
    assert_eq!(descriptor.format, 3);
    assert_eq!(
        descriptor.run_depends[0].condition.as_deref(),
        Some("$ROS_VERSION == 2")
    );
}

#[test]
fn test_package_without_dependencies() {
    let xml = "<package format=\"2\"><name>leaf</name><version>1.0.0</version></package>";
    let descriptor = PackageXmlParser::new().parse(xml).unwrap();
    for kind in DependencyKind::ALL {
        assert!(descriptor.depends(kind).is_empty());
    }
}

#[test]
fn test_missing_name_is_invalid() {
    let xml = "<package><version>1.0.0</version></package>";
    let err = PackageXmlParser::new().parse(xml).unwrap_err();
    assert!(matches!(err, DescriptorError::Invalid { .. }));
    assert!(err.to_string().contains("<name>"));
}

#[test]
fn test_missing_version_is_invalid() {
    let xml = "<package><name>foo</name></package>";
    let err = PackageXmlParser::new().parse(xml).unwrap_err();
    assert!(err.to_string().contains("<version>"));
}

#[test]
fn test_unsupported_format_is_invalid() {
    let xml = "<package format=\"7\"><name>foo</name><version>1.0.0</version></package>";
    let err = PackageXmlParser::new().parse(xml).unwrap_err();
    assert!(err.to_string().contains("unsupported package format '7'"));
}

#[test]
fn test_format_1_rejects_format_2_tags() {
    let xml = "<package><name>foo</name><version>1.0.0</version><depend>bar</depend></package>";
    let err = PackageXmlParser::new().parse(xml).unwrap_err();
    assert!(err.to_string().contains("<depend>"));
}

#[test]
fn test_format_2_rejects_run_depend() {
    let xml = "<package format=\"2\"><name>foo</name><version>1.0.0</version><run_depend>bar</run_depend></package>";
    let err = PackageXmlParser::new().parse(xml).unwrap_err();
    assert!(err.to_string().contains("<run_depend>"));
}

#[test]
fn test_empty_dependency_element_is_invalid() {
    let xml = "<package format=\"2\"><name>foo</name><version>1.0.0</version><build_depend></build_depend></package>";
    let err = PackageXmlParser::new().parse(xml).unwrap_err();
    assert!(err.to_string().contains("empty <build_depend>"));
}

#[test]
fn test_mismatched_tags_are_malformed() {
    let xml = "<package><name>foo</nam><version>1.0.0</version></package>";
    let err = PackageXmlParser::new().parse(xml).unwrap_err();
    assert!(!err.to_string().is_empty());
}
