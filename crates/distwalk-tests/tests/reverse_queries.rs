//! E2E tests for reverse dependency queries over a loaded snapshot

use anyhow::Result;
use distwalk_lib::DependencyKind::{Build, Buildtool, Run, Test};
use distwalk_lib::testing::DistributionFixture;
use distwalk_lib::{Catalog, DependencyWalker, WalkerError};
use distwalk_tests::SampleDistribution;
use std::collections::BTreeSet;

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn e2e_direct_dependents_skip_unreleased_repositories() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    // exp_tool uses catkin too, but its repository has no version
    assert_eq!(
        walker.get_depends_on("catkin", Buildtool)?,
        set(&["rosconsole", "roscpp", "rospy", "rostest", "rviz"])
    );
    assert!(walker.get_depends_on("rviz", Build)?.is_empty());
    assert_eq!(walker.get_depends_on("rostest", Test)?, set(&["rviz"]));

    // Every released package was parsed during the scan
    assert_eq!(walker.cached_descriptor_count(), 6);
    Ok(())
}

#[test]
fn e2e_recursive_dependents() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    assert_eq!(
        walker.get_recursive_depends_on("rosconsole", &[Build], &BTreeSet::new())?,
        set(&["roscpp", "rostest", "rviz"])
    );
    assert_eq!(
        walker.get_recursive_depends_on("rospy", &[Run], &BTreeSet::new())?,
        set(&["rostest", "rviz"])
    );
    assert_eq!(
        walker.get_recursive_depends_on("rosconsole", &[Build], &set(&["roscpp"]))?,
        set(&["roscpp"])
    );
    Ok(())
}

#[test]
fn e2e_forward_and_reverse_agree() -> Result<()> {
    let dist = SampleDistribution::write()?;
    let catalog = Catalog::from_snapshot_file(&dist.snapshot_path())?;
    let mut walker = DependencyWalker::new(&catalog);

    let released: Vec<String> = ["catkin", "rosconsole", "roscpp", "rospy", "rostest", "rviz"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    for kind in [Buildtool, Build, Run, Test] {
        for target in &released {
            let dependents = walker.get_depends_on(target, kind)?;
            for candidate in &released {
                let forward = walker.get_depends(candidate, kind, false)?;
                assert_eq!(
                    dependents.contains(candidate),
                    forward.contains(target),
                    "{candidate} -> {target} ({kind})"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn e2e_untagged_repository_breaks_reverse_scan() -> Result<()> {
    let fixture = DistributionFixture::new()?
        .released("A", &[(Build, "B")])
        .released("B", &[])
        .untagged("C", &[(Build, "B")]);
    let catalog = Catalog::from_snapshot_file(&fixture.write()?)?;
    let mut walker = DependencyWalker::new(&catalog);

    let err = walker.get_depends_on("B", Build).unwrap_err();
    assert!(matches!(err, WalkerError::MissingReleaseTag { ref package, .. } if package == "C"));

    // Forward queries that never reach C are unaffected
    assert_eq!(walker.get_depends("A", Build, true)?, set(&["B"]));
    Ok(())
}
