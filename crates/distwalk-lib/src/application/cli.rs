use crate::primitives::{ConfigError, DependencyKind};
use clap::{Parser, Subcommand};

use super::config::AppConfig;
use super::env::EnvironmentConfig;

/// distwalk CLI - dependency queries over a distribution release snapshot
#[derive(Debug, Clone, Parser)]
#[command(name = "distwalk")]
#[command(about = "Walk build, run and test dependencies of released packages")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// distwalk commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration: defaults -> .env -> env vars -> CLI args
    pub fn load() -> Result<Self, ConfigError> {
        // .env files first so clap's `env = ...` fallbacks can see them
        AppConfig::load_env_files()?;
        let cli = Cli::parse();
        let environment = EnvironmentConfig::load()?;
        Self::from_cli(cli, &environment)
    }

    /// Resolve a parsed command line against the environment and validate it
    pub fn from_cli(cli: Cli, environment: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let app_config = AppConfig::resolve(cli.config, environment);
        let needs_snapshot = cli
            .command
            .as_ref()
            .is_some_and(Commands::requires_snapshot);
        app_config.validate(needs_snapshot)?;

        Ok(Self {
            app_config,
            command: cli.command,
        })
    }
}

/// Available distwalk commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// List packages this package depends on
    Depends {
        /// Package to start from
        package: String,

        /// Dependency kinds to follow
        #[arg(short, long = "kind", value_enum, required = true, help = "Dependency kind: buildtool, build, run, test (repeatable)")]
        kinds: Vec<DependencyKind>,

        /// Follow dependencies transitively
        #[arg(short, long, help = "Follow dependencies transitively")]
        recursive: bool,

        /// Drop dependencies not released in this distribution
        #[arg(long, help = "Only report packages known to the release snapshot")]
        restrict: bool,

        /// Packages not to expand further
        #[arg(short, long = "ignore", help = "Package to report but not expand (repeatable)")]
        ignore: Vec<String>,
    },

    /// List packages that depend on this package
    Dependents {
        /// Package to start from
        package: String,

        /// Dependency kinds to follow
        #[arg(short, long = "kind", value_enum, required = true, help = "Dependency kind: buildtool, build, run, test (repeatable)")]
        kinds: Vec<DependencyKind>,

        /// Follow dependents transitively
        #[arg(short, long, help = "Follow dependents transitively")]
        recursive: bool,

        /// Packages not to expand further
        #[arg(short, long = "ignore", help = "Package to report but not expand (repeatable)")]
        ignore: Vec<String>,
    },

    /// List packages in the release snapshot
    Packages {
        /// Only packages whose repository is versioned and release-tagged
        #[arg(long, help = "Only list release-eligible packages")]
        released_only: bool,
    },
}

impl Commands {
    /// Check if command needs a release snapshot
    pub fn requires_snapshot(&self) -> bool {
        match self {
            Commands::Depends { .. } => true,
            Commands::Dependents { .. } => true,
            Commands::Packages { .. } => true,
        }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
