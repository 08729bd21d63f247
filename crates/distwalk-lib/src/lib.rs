//! # distwalk Library
//!
//! Dependency queries over a software distribution release snapshot.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`logger`] - Structured logging setup
//! - [`catalog`] - Release catalog and snapshot loading
//! - [`descriptor`] - Package descriptor model and `package.xml` parsing
//! - [`walker`] - Forward and reverse dependency resolution
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! use distwalk_lib::{Catalog, DependencyKind, DependencyWalker};
//!
//! let catalog = Catalog::from_snapshot_file(std::path::Path::new("release.yaml"))?;
//! let mut walker = DependencyWalker::new(&catalog);
//! let deps = walker.get_recursive_depends(
//!     "rviz",
//!     &[DependencyKind::Build, DependencyKind::Run],
//!     true,
//!     &Default::default(),
//! )?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod application;
pub mod catalog;
pub mod descriptor;
pub mod logger;
pub mod primitives;
pub mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use catalog::{Catalog, CatalogBuilder, CatalogError, PackageRef, Repository};
pub use descriptor::{Dependency, Descriptor, DescriptorError, DescriptorParser, PackageXmlParser};
pub use logger::Logger;
pub use primitives::{
    ConfigError, DependencyKind, LogFormat, LogLevel, LogOutput, LoggerError, OutputFormat,
};
pub use walker::{DependencyWalker, WalkerError};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    Logger::init(config.app_config.to_logger_config())?;

    // Execute the command
    execute_command(config)
}
