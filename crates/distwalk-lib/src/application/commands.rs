//! Command execution handlers
//!
//! Every query loads the release snapshot once, builds a single walker bound
//! to it, and renders the resulting package set.

use crate::application::{AppConfig, CliConfig, Commands};
use crate::catalog::Catalog;
use crate::primitives::{DependencyKind, OutputFormat, RELEASE_TAG};
use crate::walker::{DependencyWalker, WalkerError};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use tracing::{info, warn};

/// Which relation a query followed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Depends,
    Dependents,
}

/// Result of a dependency query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub package: String,
    pub direction: Direction,
    pub kinds: Vec<DependencyKind>,
    pub recursive: bool,
    pub packages: BTreeSet<String>,
}

/// Execute the parsed command line, writing results to stdout
pub fn execute_command(config: CliConfig) -> Result<()> {
    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            println!("distwalk - dependency queries over a distribution release snapshot");
            println!("Run 'distwalk --help' for usage information");
            return Ok(());
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute_command_with_writer(command, &config.app_config, &mut out)
}

/// Execute a specific command, writing results to `out` (for testing)
pub fn execute_command_with_writer(
    command: Commands,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    let snapshot = config.snapshot_path()?;
    let catalog = Catalog::from_snapshot_file(snapshot)
        .with_context(|| format!("Failed to load release snapshot {}", snapshot.display()))?;
    info!(
        snapshot = %snapshot.display(),
        packages = catalog.packages().len(),
        "Release snapshot loaded"
    );

    match command {
        Commands::Depends {
            package,
            kinds,
            recursive,
            restrict,
            ignore,
        } => {
            let report = handle_depends(&catalog, package, kinds, recursive, restrict, ignore)?;
            render_report(&report, config.output, out)
        }
        Commands::Dependents {
            package,
            kinds,
            recursive,
            ignore,
        } => {
            let report = handle_dependents(&catalog, package, kinds, recursive, ignore)?;
            render_report(&report, config.output, out)
        }
        Commands::Packages { released_only } => {
            let names = handle_packages(&catalog, released_only);
            render_names(&names, config.output, out)
        }
    }
}

/// Forward query: direct (union over kinds) or transitive
pub fn handle_depends(
    catalog: &Catalog,
    package: String,
    kinds: Vec<DependencyKind>,
    recursive: bool,
    restrict: bool,
    ignore: Vec<String>,
) -> Result<QueryReport> {
    let mut walker = DependencyWalker::new(catalog);
    let ignore: BTreeSet<String> = ignore.into_iter().collect();

    let packages = if recursive {
        walker.get_recursive_depends(&package, &kinds, restrict, &ignore)
    } else {
        warn_unused_ignore(&ignore);
        kinds.iter().try_fold(BTreeSet::new(), |mut acc, &kind| -> Result<_, WalkerError> {
            acc.extend(walker.get_depends(&package, kind, restrict)?);
            Ok(acc)
        })
    }
    .with_context(|| format!("Failed to resolve dependencies of '{package}'"))?;

    Ok(QueryReport {
        package,
        direction: Direction::Depends,
        kinds,
        recursive,
        packages,
    })
}

/// Reverse query: direct (union over kinds) or transitive
pub fn handle_dependents(
    catalog: &Catalog,
    package: String,
    kinds: Vec<DependencyKind>,
    recursive: bool,
    ignore: Vec<String>,
) -> Result<QueryReport> {
    let mut walker = DependencyWalker::new(catalog);
    let ignore: BTreeSet<String> = ignore.into_iter().collect();

    let packages = if recursive {
        walker.get_recursive_depends_on(&package, &kinds, &ignore)
    } else {
        warn_unused_ignore(&ignore);
        kinds.iter().try_fold(BTreeSet::new(), |mut acc, &kind| -> Result<_, WalkerError> {
            acc.extend(walker.get_depends_on(&package, kind)?);
            Ok(acc)
        })
    }
    .with_context(|| format!("Failed to resolve dependents of '{package}'"))?;

    Ok(QueryReport {
        package,
        direction: Direction::Dependents,
        kinds,
        recursive,
        packages,
    })
}

/// Package names of the catalog, optionally only release-eligible ones
pub fn handle_packages(catalog: &Catalog, released_only: bool) -> Vec<String> {
    catalog
        .package_names()
        .filter(|name| {
            !released_only
                || catalog
                    .repository_of(name)
                    .is_ok_and(|repo| repo.is_released() && repo.has_tag(RELEASE_TAG))
        })
        .map(str::to_string)
        .collect()
}

fn warn_unused_ignore(ignore: &BTreeSet<String>) {
    if !ignore.is_empty() {
        warn!("--ignore only affects --recursive queries; ignoring {:?}", ignore);
    }
}

fn render_report(report: &QueryReport, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for name in &report.packages {
                writeln!(out, "{name}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn render_names(names: &[String], format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for name in names {
                writeln!(out, "{name}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, names)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
