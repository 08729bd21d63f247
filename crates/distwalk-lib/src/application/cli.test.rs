use super::*;
use crate::primitives::OutputFormat;
use std::path::PathBuf;

#[test]
fn test_parse_depends_command() {
    let cli = Cli::try_parse_from([
        "distwalk",
        "--snapshot",
        "release.yaml",
        "depends",
        "tf2_ros",
        "--kind",
        "build",
        "-k",
        "run",
        "--recursive",
        "--restrict",
        "--ignore",
        "rclcpp",
    ])
    .unwrap();

    assert_eq!(cli.config.snapshot, Some(PathBuf::from("release.yaml")));
    assert_eq!(
        cli.command,
        Some(Commands::Depends {
            package: "tf2_ros".to_string(),
            kinds: vec![DependencyKind::Build, DependencyKind::Run],
            recursive: true,
            restrict: true,
            ignore: vec!["rclcpp".to_string()],
        })
    );
}

#[test]
fn test_parse_dependents_command_with_alias_kind() {
    let cli = Cli::try_parse_from(["distwalk", "dependents", "tf2", "-k", "exec"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Dependents {
            package: "tf2".to_string(),
            kinds: vec![DependencyKind::Run],
            recursive: false,
            ignore: vec![],
        })
    );
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "distwalk",
        "packages",
        "--released-only",
        "--output",
        "json",
    ])
    .unwrap();
    assert_eq!(cli.config.output, OutputFormat::Json);
    assert_eq!(
        cli.command,
        Some(Commands::Packages {
            released_only: true
        })
    );
}

#[test]
fn test_kind_is_required() {
    assert!(Cli::try_parse_from(["distwalk", "depends", "tf2"]).is_err());
}

#[test]
fn test_unknown_kind_is_rejected() {
    let err = Cli::try_parse_from(["distwalk", "depends", "tf2", "--kind", "doc"]).unwrap_err();
    assert!(err.to_string().contains("doc"));
}

#[test]
fn test_no_command_is_accepted() {
    let cli = Cli::try_parse_from(["distwalk"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_from_cli_validates_snapshot_only_for_commands() {
    let environment = EnvironmentConfig::default();

    let bare = CliConfig::from_cli(Cli::default(), &environment);
    assert!(bare.is_ok());

    let cli = Cli::try_parse_from(["distwalk", "packages"]).unwrap();
    let err = CliConfig::from_cli(cli, &environment).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_every_command_requires_snapshot() {
    let commands = [
        Commands::Depends {
            package: "a".to_string(),
            kinds: vec![DependencyKind::Build],
            recursive: false,
            restrict: false,
            ignore: vec![],
        },
        Commands::Dependents {
            package: "a".to_string(),
            kinds: vec![DependencyKind::Build],
            recursive: false,
            ignore: vec![],
        },
        Commands::Packages {
            released_only: false,
        },
    ];
    assert!(commands.iter().all(Commands::requires_snapshot));
}
