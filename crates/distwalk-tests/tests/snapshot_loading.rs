//! E2E tests for loading release snapshots from disk

use anyhow::Result;
use distwalk_lib::descriptor::{DescriptorParser, PackageXmlParser};
use distwalk_lib::primitives::RELEASE_TAG;
use distwalk_lib::{Catalog, CatalogError};
use distwalk_tests::SampleDistribution;

#[test]
fn e2e_snapshot_maps_packages_to_repositories() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;

    assert_eq!(catalog.name.as_deref(), Some("noetic"));
    assert_eq!(catalog.packages().len(), 7);
    assert_eq!(catalog.repositories().len(), 4);

    assert_eq!(catalog.repository_of("rostest")?.name, "ros_comm");
    assert_eq!(catalog.repository_of("catkin")?.name, "catkin");

    let rviz = catalog.repository_of("rviz")?;
    assert_eq!(rviz.version.as_deref(), Some("1.14.20-1"));
    assert!(rviz.has_tag(RELEASE_TAG));
    assert!(rviz.has_tag("gui"));

    let experimental = catalog.repository_of("exp_tool")?;
    assert!(!experimental.is_released());
    Ok(())
}

#[test]
fn e2e_descriptors_keep_constraints_and_conditions() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let parser = PackageXmlParser::new();

    let roscpp = parser.parse(catalog.get_descriptor_text("roscpp")?)?;
    assert_eq!(roscpp.format, 2);
    assert_eq!(roscpp.build_depends[0].name, "rosconsole");
    assert_eq!(roscpp.build_depends[0].version_gte.as_deref(), Some("1.14"));

    let rospy = parser.parse(catalog.get_descriptor_text("rospy")?)?;
    assert_eq!(rospy.format, 3);
    assert_eq!(
        rospy.run_depends[0].condition.as_deref(),
        Some("$ROS_PYTHON_VERSION == 3")
    );
    Ok(())
}

#[test]
fn e2e_missing_descriptor_file_fails_load() -> Result<()> {
    let dist = SampleDistribution::write()?;
    std::fs::remove_file(dist.path().join("rviz/package.xml"))?;

    let err = Catalog::from_snapshot_file(&dist.snapshot_path()).unwrap_err();
    assert!(matches!(err, CatalogError::Io { ref path, .. } if path.ends_with("rviz/package.xml")));
    Ok(())
}

#[test]
fn e2e_package_in_two_repositories_fails_load() -> Result<()> {
    let dist = SampleDistribution::write()?;
    dist.overwrite(
        "release.yaml",
        r#"repositories:
  ros_comm:
    version: 1.16.0-1
    tags: [release]
    packages:
      roscpp: ros_comm/clients/roscpp/package.xml
  roscpp:
    version: 1.16.0-1
    tags: [release]
    packages:
      roscpp: ros_comm/clients/roscpp/package.xml
"#,
    )?;

    let err = Catalog::from_snapshot_file(&dist.snapshot_path()).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicatePackage { ref package, .. } if package == "roscpp"));
    Ok(())
}

#[test]
fn e2e_malformed_snapshot_fails_load() -> Result<()> {
    let dist = SampleDistribution::write()?;
    dist.overwrite("release.yaml", "repositories: [not, a, map]\n")?;

    let err = Catalog::from_snapshot_file(&dist.snapshot_path()).unwrap_err();
    assert!(matches!(err, CatalogError::Snapshot { .. }));
    Ok(())
}
