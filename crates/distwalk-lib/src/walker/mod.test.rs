// Tests for forward and reverse dependency walking

use super::*;
use crate::catalog::Repository;
use crate::primitives::DependencyKind::{Build, Buildtool, Run, Test};
use crate::testing::package_xml;
use std::cell::Cell;

// ============================================================================
// Test Utilities
// ============================================================================

/// Parser double counting how many descriptors were parsed
#[derive(Default)]
struct CountingParser {
    calls: Cell<usize>,
}

impl DescriptorParser for CountingParser {
    fn parse(&self, text: &str) -> Result<Descriptor, DescriptorError> {
        self.calls.set(self.calls.get() + 1);
        PackageXmlParser::new().parse(text)
    }
}

fn released(name: &str, deps: &[(DependencyKind, &str)]) -> Repository {
    Repository::released(name, "1.0.0-1").with_descriptor(name, package_xml(name, deps))
}

fn catalog_of(repositories: Vec<Repository>) -> Catalog {
    let mut builder = Catalog::builder();
    for repo in repositories {
        builder = builder.repository(repo).unwrap();
    }
    builder.build()
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// A -> B -> C chain of build dependencies
fn chain_catalog() -> Catalog {
    catalog_of(vec![
        released("A", &[(Build, "B")]),
        released("B", &[(Build, "C")]),
        released("C", &[]),
    ])
}

// ============================================================================
// Direct Dependencies
// ============================================================================

#[test]
fn test_get_depends_returns_names_of_requested_kind() {
    let catalog = catalog_of(vec![released(
        "talker",
        &[
            (Buildtool, "ament_cmake"),
            (Build, "rclcpp"),
            (Build, "std_msgs"),
            (Run, "rclcpp"),
            (Test, "ament_lint_auto"),
        ],
    )]);
    let mut walker = DependencyWalker::new(&catalog);

    assert_eq!(
        walker.get_depends("talker", Build, false).unwrap(),
        set(&["rclcpp", "std_msgs"])
    );
    assert_eq!(
        walker.get_depends("talker", Buildtool, false).unwrap(),
        set(&["ament_cmake"])
    );
    assert_eq!(walker.get_depends("talker", Run, false).unwrap(), set(&["rclcpp"]));
    assert_eq!(
        walker.get_depends("talker", Test, false).unwrap(),
        set(&["ament_lint_auto"])
    );
}

#[test]
fn test_get_depends_collapses_duplicates() {
    let catalog = catalog_of(vec![released("dup", &[(Build, "x"), (Build, "x")])]);
    let mut walker = DependencyWalker::new(&catalog);
    assert_eq!(walker.get_depends("dup", Build, false).unwrap(), set(&["x"]));
}

#[test]
fn test_restrict_to_catalog_drops_external_dependencies() {
    let catalog = catalog_of(vec![
        released("app", &[(Build, "lib"), (Build, "boost"), (Build, "cmake")]),
        released("lib", &[]),
    ]);
    let mut walker = DependencyWalker::new(&catalog);

    let all = walker.get_depends("app", Build, false).unwrap();
    let restricted = walker.get_depends("app", Build, true).unwrap();

    assert_eq!(all, set(&["boost", "cmake", "lib"]));
    assert_eq!(restricted, set(&["lib"]));
    assert!(restricted.is_subset(&all));
    assert!(restricted.iter().all(|p| catalog.contains_package(p)));
}

#[test]
fn test_repeated_queries_parse_each_descriptor_once() {
    let catalog = chain_catalog();
    let parser = CountingParser::default();
    let mut walker = DependencyWalker::with_parser(&catalog, &parser);

    let first = walker.get_depends("A", Build, false).unwrap();
    let second = walker.get_depends("A", Build, false).unwrap();
    let other_kind = walker.get_depends("A", Run, true).unwrap();

    assert_eq!(first, second);
    assert!(other_kind.is_empty());
    assert_eq!(parser.calls.get(), 1);
    assert_eq!(walker.cached_descriptor_count(), 1);
}

// ============================================================================
// Release Preconditions and Descriptor Errors
// ============================================================================

#[test]
fn test_unversioned_package_is_precondition_violation() {
    let catalog = catalog_of(vec![
        Repository::new("B")
            .with_tag(RELEASE_TAG)
            .with_descriptor("B", package_xml("B", &[(Build, "C")])),
    ]);
    let mut walker = DependencyWalker::new(&catalog);

    let err = walker.get_depends("B", Build, false).unwrap_err();
    assert!(err.is_precondition_violation());
    assert_eq!(
        err.to_string(),
        "Package 'B' in repository 'B' has no version set"
    );
}

#[test]
fn test_untagged_package_is_precondition_violation() {
    let catalog = catalog_of(vec![
        Repository::new("repo_b")
            .with_version("1.0.0-1")
            .with_descriptor("B", package_xml("B", &[])),
    ]);
    let mut walker = DependencyWalker::new(&catalog);

    let err = walker.get_depends("B", Build, false).unwrap_err();
    assert!(matches!(
        err,
        WalkerError::MissingReleaseTag { ref package, ref repository }
            if package == "B" && repository == "repo_b"
    ));
    assert!(err.to_string().contains("'release' tag"));
}

#[test]
fn test_malformed_descriptor_names_the_package() {
    let catalog = catalog_of(vec![
        Repository::released("D", "1.0.0-1").with_descriptor("D", "<package><name>D</nam>"),
    ]);
    let mut walker = DependencyWalker::new(&catalog);

    let err = walker.get_depends("D", Build, false).unwrap_err();
    assert!(matches!(err, WalkerError::InvalidDescriptor { .. }));
    assert!(!err.is_precondition_violation());
    assert!(err.to_string().starts_with("D: "));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_invalid_descriptor_is_not_cached() {
    let catalog = catalog_of(vec![
        Repository::released("D", "1.0.0-1").with_descriptor("D", "<package/>"),
    ]);
    let parser = CountingParser::default();
    let mut walker = DependencyWalker::with_parser(&catalog, &parser);

    assert!(walker.get_depends("D", Build, false).is_err());
    assert!(walker.get_depends("D", Build, false).is_err());
    assert_eq!(parser.calls.get(), 2);
    assert_eq!(walker.cached_descriptor_count(), 0);
}

#[test]
fn test_unknown_package_is_catalog_error() {
    let catalog = chain_catalog();
    let mut walker = DependencyWalker::new(&catalog);
    let err = walker.get_depends("Z", Build, false).unwrap_err();
    assert!(matches!(
        err,
        WalkerError::Catalog(CatalogError::UnknownPackage { .. })
    ));
}

// ============================================================================
// Forward Closure
// ============================================================================

#[test]
fn test_recursive_depends_follows_chain() {
    let catalog = chain_catalog();
    let mut walker = DependencyWalker::new(&catalog);
    let deps = walker
        .get_recursive_depends("A", &[Build], false, &BTreeSet::new())
        .unwrap();
    assert_eq!(deps, set(&["B", "C"]));
}

#[test]
fn test_recursive_depends_is_superset_of_direct_depends() {
    let catalog = catalog_of(vec![
        released("app", &[(Build, "lib"), (Run, "rt")]),
        released("lib", &[(Build, "core"), (Run, "rt")]),
        released("rt", &[(Run, "core")]),
        released("core", &[]),
    ]);
    let mut walker = DependencyWalker::new(&catalog);
    let kinds = [Build, Run];

    let closure = walker
        .get_recursive_depends("app", &kinds, false, &BTreeSet::new())
        .unwrap();
    assert_eq!(closure, set(&["core", "lib", "rt"]));

    for kind in kinds {
        let direct = walker.get_depends("app", kind, false).unwrap();
        assert!(direct.is_subset(&closure));
    }
    // Closed under one more expansion step
    for pkg in &closure {
        for kind in kinds {
            let next = walker.get_depends(pkg, kind, false).unwrap();
            assert!(next.is_subset(&closure), "{pkg} has unexplored {kind} deps");
        }
    }
}

#[test]
fn test_recursive_depends_only_follows_requested_kinds() {
    let catalog = catalog_of(vec![
        released("A", &[(Build, "B"), (Test, "T")]),
        released("B", &[(Run, "R")]),
        released("R", &[]),
        released("T", &[]),
    ]);
    let mut walker = DependencyWalker::new(&catalog);
    let deps = walker
        .get_recursive_depends("A", &[Build], false, &BTreeSet::new())
        .unwrap();
    assert_eq!(deps, set(&["B"]));
}

#[test]
fn test_recursive_depends_restricted_to_catalog_never_expands_externals() {
    let catalog = catalog_of(vec![
        released("A", &[(Build, "B"), (Build, "external")]),
        released("B", &[(Build, "also_external")]),
    ]);
    let mut walker = DependencyWalker::new(&catalog);

    let restricted = walker
        .get_recursive_depends("A", &[Build], true, &BTreeSet::new())
        .unwrap();
    assert_eq!(restricted, set(&["B"]));
}

#[test]
fn test_recursive_depends_on_external_package_without_restriction_fails() {
    let catalog = catalog_of(vec![released("A", &[(Build, "external")])]);
    let mut walker = DependencyWalker::new(&catalog);

    let err = walker
        .get_recursive_depends("A", &[Build], false, &BTreeSet::new())
        .unwrap_err();
    assert!(matches!(
        err,
        WalkerError::Catalog(CatalogError::UnknownPackage { ref package }) if package == "external"
    ));
}

#[test]
fn test_ignored_packages_appear_but_are_not_expanded() {
    let catalog = chain_catalog();
    let mut walker = DependencyWalker::new(&catalog);

    let deps = walker
        .get_recursive_depends("A", &[Build], false, &set(&["B"]))
        .unwrap();
    assert_eq!(deps, set(&["B"]));
}

#[test]
fn test_ignoring_the_start_package_yields_nothing() {
    let catalog = chain_catalog();
    let parser = CountingParser::default();
    let mut walker = DependencyWalker::with_parser(&catalog, &parser);

    let deps = walker
        .get_recursive_depends("A", &[Build], false, &set(&["A"]))
        .unwrap();
    assert!(deps.is_empty());
    assert_eq!(parser.calls.get(), 0);
}

#[test]
fn test_recursive_depends_terminates_on_cycles() {
    let catalog = catalog_of(vec![
        released("A", &[(Build, "B")]),
        released("B", &[(Build, "C")]),
        released("C", &[(Build, "A")]),
    ]);
    let parser = CountingParser::default();
    let mut walker = DependencyWalker::with_parser(&catalog, &parser);

    let deps = walker
        .get_recursive_depends("A", &[Build], false, &BTreeSet::new())
        .unwrap();
    // The start package shows up because the cycle reaches it
    assert_eq!(deps, set(&["A", "B", "C"]));
    assert_eq!(parser.calls.get(), 3);
}

// ============================================================================
// Reverse Lookups
// ============================================================================

#[test]
fn test_depends_on_mirrors_depends() {
    let catalog = catalog_of(vec![
        released("A", &[(Build, "B"), (Run, "C")]),
        released("B", &[(Build, "C")]),
        released("C", &[]),
    ]);
    let mut walker = DependencyWalker::new(&catalog);

    for kind in [Build, Run] {
        for a in ["A", "B", "C"] {
            for b in ["A", "B", "C"] {
                let forward = walker.get_depends(a, kind, false).unwrap().contains(b);
                let reverse = walker.get_depends_on(b, kind).unwrap().contains(a);
                assert_eq!(forward, reverse, "{a} -> {b} ({kind})");
            }
        }
    }
}

#[test]
fn test_depends_on_skips_unversioned_repositories() {
    let catalog = catalog_of(vec![
        released("A", &[(Build, "X")]),
        Repository::new("B")
            .with_tag(RELEASE_TAG)
            .with_descriptor("B", package_xml("B", &[(Build, "X")])),
        released("X", &[]),
    ]);
    let mut walker = DependencyWalker::new(&catalog);

    assert_eq!(walker.get_depends_on("X", Build).unwrap(), set(&["A"]));
    // Asking for B directly is still a precondition violation
    assert!(
        walker
            .get_depends("B", Build, false)
            .unwrap_err()
            .is_precondition_violation()
    );
}

#[test]
fn test_depends_on_untagged_repository_is_precondition_violation() {
    let catalog = catalog_of(vec![
        released("A", &[(Build, "X")]),
        Repository::new("B")
            .with_version("1.0.0-1")
            .with_descriptor("B", package_xml("B", &[(Build, "X")])),
        released("X", &[]),
    ]);
    let mut walker = DependencyWalker::new(&catalog);

    let err = walker.get_depends_on("X", Build).unwrap_err();
    assert!(matches!(err, WalkerError::MissingReleaseTag { .. }));
}

#[test]
fn test_depends_on_unknown_name_is_empty() {
    let catalog = chain_catalog();
    let mut walker = DependencyWalker::new(&catalog);
    assert!(walker.get_depends_on("nobody", Build).unwrap().is_empty());
}

#[test]
fn test_depends_on_reuses_cached_descriptors() {
    let catalog = chain_catalog();
    let parser = CountingParser::default();
    let mut walker = DependencyWalker::with_parser(&catalog, &parser);

    walker.get_depends_on("C", Build).unwrap();
    walker.get_depends_on("B", Build).unwrap();
    walker.get_depends_on("A", Run).unwrap();
    assert_eq!(parser.calls.get(), 3);
}

// ============================================================================
// Reverse Closure
// ============================================================================

#[test]
fn test_recursive_depends_on_follows_chain_backwards() {
    let catalog = chain_catalog();
    let mut walker = DependencyWalker::new(&catalog);

    let dependents = walker
        .get_recursive_depends_on("C", &[Build], &BTreeSet::new())
        .unwrap();
    assert_eq!(dependents, set(&["A", "B"]));
}

#[test]
fn test_recursive_depends_on_respects_ignore() {
    let catalog = chain_catalog();
    let mut walker = DependencyWalker::new(&catalog);

    let dependents = walker
        .get_recursive_depends_on("C", &[Build], &set(&["B"]))
        .unwrap();
    assert_eq!(dependents, set(&["B"]));
}

#[test]
fn test_recursive_depends_on_unions_kinds() {
    let catalog = catalog_of(vec![
        released("app", &[(Run, "lib")]),
        released("tool", &[(Buildtool, "lib")]),
        released("lib", &[(Build, "core")]),
        released("core", &[]),
    ]);
    let mut walker = DependencyWalker::new(&catalog);

    assert_eq!(
        walker
            .get_recursive_depends_on("core", &[Build], &BTreeSet::new())
            .unwrap(),
        set(&["lib"])
    );
    assert_eq!(
        walker
            .get_recursive_depends_on("core", &[Build, Run, Buildtool], &BTreeSet::new())
            .unwrap(),
        set(&["app", "lib", "tool"])
    );
}

#[test]
fn test_catalog_accessor_returns_bound_catalog() {
    let catalog = chain_catalog();
    let walker = DependencyWalker::new(&catalog);
    assert!(std::ptr::eq(walker.catalog(), &catalog));
}
