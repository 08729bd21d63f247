// Tests for catalog construction and lookup

use super::*;

fn sample_catalog() -> Catalog {
    Catalog::builder()
        .name("testdistro")
        .repository(
            Repository::released("geometry", "1.0.0-1")
                .with_descriptor("tf2", "<package/>")
                .with_descriptor("tf2_ros", "<package/>"),
        )
        .unwrap()
        .repository(Repository::new("drafts").with_descriptor("wip", "<package/>"))
        .unwrap()
        .build()
}

#[test]
fn test_builder_registers_packages_of_each_repository() {
    let catalog = sample_catalog();
    let names: Vec<&str> = catalog.package_names().collect();
    assert_eq!(names, vec!["tf2", "tf2_ros", "wip"]);
    assert_eq!(catalog.package("tf2").unwrap().repository_name, "geometry");
    assert_eq!(catalog.name.as_deref(), Some("testdistro"));
}

#[test]
fn test_released_repository_has_version_and_release_tag() {
    let repo = Repository::released("geometry", "1.0.0-1");
    assert!(repo.is_released());
    assert!(repo.has_tag(RELEASE_TAG));

    let draft = Repository::new("drafts");
    assert!(!draft.is_released());
    assert!(!draft.has_tag(RELEASE_TAG));
}

#[test]
fn test_descriptor_text_lookup_goes_through_repository() {
    let catalog = sample_catalog();
    assert_eq!(catalog.get_descriptor_text("tf2_ros").unwrap(), "<package/>");
    assert_eq!(catalog.repository_of("wip").unwrap().name, "drafts");
}

#[test]
fn test_unknown_package_is_reported() {
    let catalog = sample_catalog();
    let err = catalog.get_descriptor_text("nav2").unwrap_err();
    assert!(matches!(err, CatalogError::UnknownPackage { ref package } if package == "nav2"));
}

#[test]
fn test_dangling_repository_reference_is_reported() {
    let catalog = Catalog::builder().package_ref("orphan", "gone").build();
    assert!(catalog.contains_package("orphan"));
    let err = catalog.repository_of("orphan").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Package 'orphan' refers to unknown repository 'gone'"
    );
}

#[test]
fn test_missing_descriptor_is_reported() {
    let catalog = Catalog::builder()
        .repository(Repository::released("geometry", "1.0.0-1"))
        .unwrap()
        .package_ref("tf2", "geometry")
        .build();
    let err = catalog.get_descriptor_text("tf2").unwrap_err();
    assert!(matches!(err, CatalogError::MissingDescriptor { .. }));
}

#[test]
fn test_duplicate_package_across_repositories_is_rejected() {
    let result = Catalog::builder()
        .repository(Repository::released("a", "1").with_descriptor("shared", ""))
        .unwrap()
        .repository(Repository::released("b", "1").with_descriptor("shared", ""));

    match result {
        Err(CatalogError::DuplicatePackage {
            package,
            first,
            second,
        }) => {
            assert_eq!(package, "shared");
            assert_eq!(first, "a");
            assert_eq!(second, "b");
        }
        other => panic!("expected duplicate package error, got {other:?}"),
    }
}
