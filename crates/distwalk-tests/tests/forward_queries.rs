//! E2E tests for forward dependency queries over a loaded snapshot

use anyhow::Result;
use distwalk_lib::DependencyKind::{Build, Buildtool, Run, Test};
use distwalk_lib::{Catalog, CatalogError, DependencyWalker, WalkerError};
use distwalk_tests::SampleDistribution;
use std::collections::BTreeSet;

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn e2e_direct_depends_per_kind() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    assert_eq!(walker.get_depends("rviz", Buildtool, false)?, set(&["catkin"]));
    assert_eq!(
        walker.get_depends("rviz", Build, false)?,
        set(&["qtbase5-dev", "roscpp"])
    );
    assert_eq!(walker.get_depends("rviz", Build, true)?, set(&["roscpp"]));
    assert_eq!(walker.get_depends("rviz", Run, false)?, set(&["roscpp", "rospy"]));
    assert_eq!(walker.get_depends("rviz", Test, false)?, set(&["rostest"]));

    // Only rviz has been parsed
    assert_eq!(walker.cached_descriptor_count(), 1);
    Ok(())
}

#[test]
fn e2e_format_one_run_depends() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    assert_eq!(walker.get_depends("rosconsole", Run, false)?, set(&["log4cxx"]));
    assert!(walker.get_depends("rosconsole", Run, true)?.is_empty());
    Ok(())
}

#[test]
fn e2e_recursive_depends_restricted_to_distribution() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    let deps = walker.get_recursive_depends("rviz", &[Build, Run], true, &BTreeSet::new())?;
    assert_eq!(deps, set(&["rosconsole", "roscpp", "rospy"]));

    let deps = walker.get_recursive_depends(
        "rviz",
        &[Buildtool, Build, Run],
        true,
        &BTreeSet::new(),
    )?;
    assert_eq!(deps, set(&["catkin", "rosconsole", "roscpp", "rospy"]));
    Ok(())
}

#[test]
fn e2e_recursive_depends_ignore_stops_expansion() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    let deps = walker.get_recursive_depends("rviz", &[Build, Run], true, &set(&["roscpp"]))?;
    assert_eq!(deps, set(&["roscpp", "rospy"]));
    Ok(())
}

#[test]
fn e2e_unrestricted_recursion_into_external_package_fails() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    let err = walker
        .get_recursive_depends("rviz", &[Build], false, &BTreeSet::new())
        .unwrap_err();
    assert!(matches!(
        err,
        WalkerError::Catalog(CatalogError::UnknownPackage { ref package }) if package == "qtbase5-dev"
    ));
    Ok(())
}

#[test]
fn e2e_unreleased_package_is_rejected() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    let err = walker.get_depends("exp_tool", Build, false).unwrap_err();
    assert!(err.is_precondition_violation());
    assert_eq!(
        err.to_string(),
        "Package 'exp_tool' in repository 'experimental' has no version set"
    );
    Ok(())
}

#[test]
fn e2e_corrupt_descriptor_names_package() -> Result<()> {
    let dist = SampleDistribution::write()?;
    dist.overwrite(
        "ros_comm/clients/rospy/package.xml",
        "<package format=\"2\"><name>rospy</name></package>",
    )?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    // rviz itself is fine; rospy fails once the walk reaches it
    assert_eq!(walker.get_depends("rviz", Run, true)?, set(&["roscpp", "rospy"]));
    let err = walker
        .get_recursive_depends("rviz", &[Run], true, &BTreeSet::new())
        .unwrap_err();
    assert!(matches!(err, WalkerError::InvalidDescriptor { ref package, .. } if package == "rospy"));
    assert!(err.to_string().starts_with("rospy: "));
    Ok(())
}
