// Tests for loading release snapshots from disk

use super::*;
use std::fs;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_load_snapshot_with_explicit_packages() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "geometry/tf2/package.xml", "<tf2/>");
    write(dir.path(), "geometry/tf2_ros/package.xml", "<tf2_ros/>");
    write(
        dir.path(),
        "release.yaml",
        r#"
name: testdistro
repositories:
  geometry:
    version: 0.25.2-1
    tags: [release]
    packages:
      tf2: geometry/tf2/package.xml
      tf2_ros: geometry/tf2_ros/package.xml
"#,
    );

    let catalog = Catalog::from_snapshot_file(&dir.path().join("release.yaml")).unwrap();

    assert_eq!(catalog.name.as_deref(), Some("testdistro"));
    assert_eq!(catalog.packages().len(), 2);
    assert_eq!(catalog.get_descriptor_text("tf2").unwrap(), "<tf2/>");
    let repo = catalog.repository_of("tf2_ros").unwrap();
    assert_eq!(repo.version.as_deref(), Some("0.25.2-1"));
    assert!(repo.has_tag("release"));
}

#[test]
fn test_repository_without_packages_ships_itself() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ament_cmake/package.xml", "<ament_cmake/>");
    write(
        dir.path(),
        "release.yaml",
        "repositories:\n  ament_cmake:\n    version: 1.3.5-1\n    tags: [release]\n",
    );

    let catalog = Catalog::from_snapshot_file(&dir.path().join("release.yaml")).unwrap();
    assert_eq!(
        catalog.package("ament_cmake").unwrap().repository_name,
        "ament_cmake"
    );
    assert_eq!(catalog.get_descriptor_text("ament_cmake").unwrap(), "<ament_cmake/>");
}

#[test]
fn test_unreleased_repository_keeps_no_version() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "draft/package.xml", "<draft/>");
    write(dir.path(), "release.yaml", "repositories:\n  draft: {}\n");

    let catalog = Catalog::from_snapshot_file(&dir.path().join("release.yaml")).unwrap();
    let repo = catalog.repository_of("draft").unwrap();
    assert!(!repo.is_released());
    assert!(repo.tags.is_empty());
}

#[test]
fn test_missing_descriptor_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "release.yaml",
        "repositories:\n  geometry:\n    version: '1'\n    packages:\n      tf2: nowhere/package.xml\n",
    );

    let err = Catalog::from_snapshot_file(&dir.path().join("release.yaml")).unwrap_err();
    match err {
        CatalogError::Io { path, .. } => assert!(path.ends_with("nowhere/package.xml")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_malformed_yaml_is_snapshot_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "release.yaml", "repositories: [unclosed\n");

    let err = Catalog::from_snapshot_file(&dir.path().join("release.yaml")).unwrap_err();
    assert!(matches!(err, CatalogError::Snapshot { .. }));
    assert!(err.to_string().contains("release.yaml"));
}

#[test]
fn test_missing_snapshot_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = Catalog::from_snapshot_file(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}
