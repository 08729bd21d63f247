//! Configuration loading
//!
//! Coordinates loading configuration from `.env` files, standard environment
//! variables and the command line.

use crate::primitives::ConfigError;
use tracing::trace;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Environment files read before parsing the command line, highest priority first
const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Load `.env.local` and `.env` into the process environment, if present
    ///
    /// Variables already set are not overridden.
    pub fn load_env_files() -> Result<(), ConfigError> {
        for env_file in ENV_FILES {
            match dotenvy::from_filename(env_file) {
                Ok(path) => trace!("Loaded environment file {}", path.display()),
                Err(e) if e.not_found() => {}
                Err(e) => {
                    return Err(ConfigError::EnvFileError {
                        file: env_file.to_string(),
                        source: e,
                    });
                }
            }
        }
        Ok(())
    }

    /// Combine defaults, standard environment variables and CLI values
    pub fn resolve(cli: AppConfig, environment: &EnvironmentConfig) -> AppConfig {
        let mut config = Self::default();
        config.color = environment.apply_color_config(config.color);
        config.merge_with(cli)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
