//! E2E tests driving parsed command lines through command execution

use anyhow::Result;
use clap::Parser;
use distwalk_lib::application::{
    Cli, CliConfig, EnvironmentConfig, QueryReport, execute_command_with_writer,
};
use distwalk_tests::SampleDistribution;

fn run(dist: &SampleDistribution, args: &[&str]) -> Result<String> {
    let snapshot = dist.snapshot_path();
    let mut argv = vec![
        "distwalk".to_string(),
        "--snapshot".to_string(),
        snapshot.display().to_string(),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));

    let cli = Cli::try_parse_from(argv)?;
    let config = CliConfig::from_cli(cli, &EnvironmentConfig::default())?;
    let command = config.command.expect("subcommand given");

    let mut out = Vec::new();
    execute_command_with_writer(command, &config.app_config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn e2e_depends_workflow() -> Result<()> {
    let dist = SampleDistribution::write()?;

    let output = run(&dist, &["depends", "rviz", "-k", "build", "-k", "run", "-r", "--restrict"])?;
    assert_eq!(output, "rosconsole\nroscpp\nrospy\n");
    Ok(())
}

#[test]
fn e2e_dependents_json_workflow() -> Result<()> {
    let dist = SampleDistribution::write()?;

    let output = run(&dist, &["-o", "json", "dependents", "catkin", "-k", "buildtool"])?;
    let report: serde_json::Value = serde_json::from_str(&output)?;
    assert_eq!(report["package"], "catkin");
    assert_eq!(report["direction"], "dependents");
    assert_eq!(report["recursive"], false);
    assert_eq!(
        report["packages"],
        serde_json::json!(["rosconsole", "roscpp", "rospy", "rostest", "rviz"])
    );
    Ok(())
}

#[test]
fn e2e_kind_aliases_accepted() -> Result<()> {
    let dist = SampleDistribution::write()?;

    let output = run(&dist, &["depends", "rosconsole", "-k", "run_depend"])?;
    assert_eq!(output, "log4cxx\n");
    Ok(())
}

#[test]
fn e2e_packages_workflow() -> Result<()> {
    let dist = SampleDistribution::write()?;

    let all = run(&dist, &["packages"])?;
    assert_eq!(all.lines().count(), 7);

    let released = run(&dist, &["packages", "--released-only"])?;
    assert!(!released.lines().any(|l| l == "exp_tool"));
    assert_eq!(released.lines().count(), 6);
    Ok(())
}

#[test]
fn e2e_query_report_shape() -> Result<()> {
    let report = QueryReport {
        package: "rviz".to_string(),
        direction: distwalk_lib::application::Direction::Depends,
        kinds: vec![distwalk_lib::DependencyKind::Test],
        recursive: false,
        packages: ["rostest".to_string()].into_iter().collect(),
    };
    let value = serde_json::to_value(&report)?;
    assert_eq!(
        value,
        serde_json::json!({
            "package": "rviz",
            "direction": "depends",
            "kinds": ["test"],
            "recursive": false,
            "packages": ["rostest"]
        })
    );
    Ok(())
}
