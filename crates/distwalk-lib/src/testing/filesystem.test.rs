use super::*;
use crate::catalog::Catalog;

#[test]
fn test_fixture_round_trips_through_snapshot_loader() {
    let fixture = DistributionFixture::new()
        .unwrap()
        .released("a", &[(DependencyKind::Build, "b")])
        .unreleased("b", &[])
        .untagged("c", &[]);
    let snapshot = fixture.write().unwrap();

    let catalog = Catalog::from_snapshot_file(&snapshot).unwrap();
    assert_eq!(catalog.packages().len(), 3);
    assert!(catalog.repository_of("a").unwrap().has_tag(RELEASE_TAG));
    assert!(!catalog.repository_of("b").unwrap().is_released());
    assert!(!catalog.repository_of("c").unwrap().has_tag(RELEASE_TAG));
    assert!(catalog.get_descriptor_text("a").unwrap().contains("<build_depend>b</build_depend>"));
}

#[test]
fn test_empty_fixture_writes_loadable_snapshot() {
    let fixture = DistributionFixture::new().unwrap();
    let snapshot = fixture.write().unwrap();
    let catalog = Catalog::from_snapshot_file(&snapshot).unwrap();
    assert!(catalog.packages().is_empty());
}
