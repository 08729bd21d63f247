//! Test support shared by unit tests and the end-to-end test crate
//!
//! - [`package_xml`] renders a minimal format 2 descriptor
//! - [`DistributionFixture`] lays out a release snapshot on disk

pub mod filesystem;

pub use filesystem::DistributionFixture;

use crate::primitives::DependencyKind;

/// Render a format 2 `package.xml` with the given dependencies
///
/// Run dependencies are written as `exec_depend`.
pub fn package_xml(name: &str, deps: &[(DependencyKind, &str)]) -> String {
    let mut body = String::new();
    for (kind, dep) in deps {
        let tag = match kind {
            DependencyKind::Buildtool => "buildtool_depend",
            DependencyKind::Build => "build_depend",
            DependencyKind::Run => "exec_depend",
            DependencyKind::Test => "test_depend",
        };
        body.push_str(&format!("  <{tag}>{dep}</{tag}>\n"));
    }

    format!(
        r#"<?xml version="1.0"?>
<package format="2">
  <name>{name}</name>
  <version>1.0.0</version>
  <description>{name} test package</description>
  <maintainer email="maintainer@example.com">Maintainer</maintainer>
  <license>BSD</license>
{body}</package>
"#
    )
}
