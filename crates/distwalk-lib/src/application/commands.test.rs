use super::*;
use crate::primitives::DependencyKind::{Build, Run, Test};
use crate::testing::DistributionFixture;

fn fixture() -> DistributionFixture {
    DistributionFixture::new()
        .unwrap()
        .released("A", &[(Build, "B"), (Test, "gtest")])
        .released("B", &[(Build, "C"), (Run, "D")])
        .released("C", &[])
        .released("D", &[])
        .unreleased("E", &[(Build, "C")])
}

fn config_for(fixture: &DistributionFixture, output: OutputFormat) -> AppConfig {
    AppConfig {
        snapshot: Some(fixture.write().unwrap()),
        output,
        ..AppConfig::default()
    }
}

fn run(command: Commands, config: &AppConfig) -> Result<String> {
    let mut out = Vec::new();
    execute_command_with_writer(command, config, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_depends_text_output_is_sorted_lines() {
    let fixture = fixture();
    let config = config_for(&fixture, OutputFormat::Text);

    let output = run(
        Commands::Depends {
            package: "A".to_string(),
            kinds: vec![Build, Run],
            recursive: true,
            restrict: false,
            ignore: vec![],
        },
        &config,
    )
    .unwrap();
    assert_eq!(output, "B\nC\nD\n");
}

#[test]
fn test_direct_depends_unions_kinds() {
    let fixture = fixture();
    let config = config_for(&fixture, OutputFormat::Text);

    let output = run(
        Commands::Depends {
            package: "A".to_string(),
            kinds: vec![Build, Test],
            recursive: false,
            restrict: false,
            ignore: vec![],
        },
        &config,
    )
    .unwrap();
    assert_eq!(output, "B\ngtest\n");
}

#[test]
fn test_direct_depends_restricted_drops_external() {
    let fixture = fixture();
    let config = config_for(&fixture, OutputFormat::Text);

    let output = run(
        Commands::Depends {
            package: "A".to_string(),
            kinds: vec![Build, Test],
            recursive: false,
            restrict: true,
            ignore: vec![],
        },
        &config,
    )
    .unwrap();
    assert_eq!(output, "B\n");
}

#[test]
fn test_dependents_json_output() {
    let fixture = fixture();
    let config = config_for(&fixture, OutputFormat::Json);

    let output = run(
        Commands::Dependents {
            package: "C".to_string(),
            kinds: vec![Build],
            recursive: true,
            ignore: vec![],
        },
        &config,
    )
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["package"], "C");
    assert_eq!(value["direction"], "dependents");
    assert_eq!(value["kinds"], serde_json::json!(["build"]));
    assert_eq!(value["recursive"], true);
    // E is unreleased and therefore never scanned
    assert_eq!(value["packages"], serde_json::json!(["A", "B"]));
}

#[test]
fn test_packages_listing_filters_unreleased() {
    let fixture = fixture();
    let config = config_for(&fixture, OutputFormat::Text);

    let all = run(Commands::Packages { released_only: false }, &config).unwrap();
    assert_eq!(all, "A\nB\nC\nD\nE\n");

    let released = run(Commands::Packages { released_only: true }, &config).unwrap();
    assert_eq!(released, "A\nB\nC\nD\n");
}

#[test]
fn test_depends_on_unreleased_package_fails_with_context() {
    let fixture = fixture();
    let config = config_for(&fixture, OutputFormat::Text);

    let err = run(
        Commands::Depends {
            package: "E".to_string(),
            kinds: vec![Build],
            recursive: false,
            restrict: false,
            ignore: vec![],
        },
        &config,
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "Failed to resolve dependencies of 'E'");
    let walker_error = err.downcast_ref::<WalkerError>().unwrap();
    assert!(walker_error.is_precondition_violation());
}

#[test]
fn test_missing_snapshot_is_reported() {
    let err = run(
        Commands::Packages {
            released_only: false,
        },
        &AppConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("no release snapshot given"));
}
