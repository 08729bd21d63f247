//! Release catalog of a distribution
//!
//! A catalog maps package names to the repository hosting them, and
//! repositories to their release version, tags, and raw package descriptors.
//! It is an immutable snapshot: nothing in this crate mutates a catalog once
//! it has been built.

use crate::primitives::RELEASE_TAG;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use thiserror::Error;

pub mod snapshot;

pub use snapshot::{RepositoryEntry, SnapshotFile};

/// Errors raised while building or querying a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown package: {package}")]
    UnknownPackage { package: String },

    #[error("Package '{package}' refers to unknown repository '{repository}'")]
    UnknownRepository { package: String, repository: String },

    #[error("Repository '{repository}' has no descriptor for package '{package}'")]
    MissingDescriptor { package: String, repository: String },

    #[error("Package '{package}' is provided by both '{first}' and '{second}'")]
    DuplicatePackage {
        package: String,
        first: String,
        second: String,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse release snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        source: serde_saphyr::Error,
    },
}

/// Which repository hosts a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    pub name: String,
    pub repository_name: String,
}

/// A released (or not yet released) source repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    /// Release version; `None` means the repository has not been released
    pub version: Option<String>,
    pub tags: BTreeSet<String>,
    /// Raw descriptor text keyed by package name
    descriptors: BTreeMap<String, String>,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Shorthand for a versioned repository carrying the `release` tag
    pub fn released(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(name).with_version(version).with_tag(RELEASE_TAG)
    }

    pub fn with_descriptor(mut self, package: impl Into<String>, text: impl Into<String>) -> Self {
        self.descriptors.insert(package.into(), text.into());
        self
    }

    pub fn is_released(&self) -> bool {
        self.version.is_some()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Names of the packages this repository carries descriptors for
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.keys().map(String::as_str)
    }

    /// Raw descriptor text of a package hosted here
    pub fn descriptor_text(&self, package: &str) -> Result<&str, CatalogError> {
        self.descriptors
            .get(package)
            .map(String::as_str)
            .ok_or_else(|| CatalogError::MissingDescriptor {
                package: package.to_string(),
                repository: self.name.clone(),
            })
    }
}

/// Snapshot of one distribution's release metadata
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub name: Option<String>,
    packages: BTreeMap<String, PackageRef>,
    repositories: BTreeMap<String, Repository>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn packages(&self) -> &BTreeMap<String, PackageRef> {
        &self.packages
    }

    pub fn repositories(&self) -> &BTreeMap<String, Repository> {
        &self.repositories
    }

    /// Every package name known to this distribution
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn contains_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    pub fn package(&self, package: &str) -> Result<&PackageRef, CatalogError> {
        self.packages
            .get(package)
            .ok_or_else(|| CatalogError::UnknownPackage {
                package: package.to_string(),
            })
    }

    /// Repository hosting `package`
    pub fn repository_of(&self, package: &str) -> Result<&Repository, CatalogError> {
        let pkg = self.package(package)?;
        self.repositories
            .get(&pkg.repository_name)
            .ok_or_else(|| CatalogError::UnknownRepository {
                package: package.to_string(),
                repository: pkg.repository_name.clone(),
            })
    }

    /// Raw descriptor text of `package`, looked up through its repository
    pub fn get_descriptor_text(&self, package: &str) -> Result<&str, CatalogError> {
        self.repository_of(package)?.descriptor_text(package)
    }
}

/// Incremental catalog construction
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    name: Option<String>,
    packages: BTreeMap<String, PackageRef>,
    repositories: BTreeMap<String, Repository>,
}

impl CatalogBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a repository and register every package it carries a descriptor for
    pub fn repository(mut self, repository: Repository) -> Result<Self, CatalogError> {
        for package in repository.package_names() {
            if let Some(existing) = self.packages.get(package) {
                return Err(CatalogError::DuplicatePackage {
                    package: package.to_string(),
                    first: existing.repository_name.clone(),
                    second: repository.name.clone(),
                });
            }
            self.packages.insert(
                package.to_string(),
                PackageRef {
                    name: package.to_string(),
                    repository_name: repository.name.clone(),
                },
            );
        }
        self.repositories.insert(repository.name.clone(), repository);
        Ok(self)
    }

    /// Register a package reference without a descriptor; lookups of its text fail
    pub fn package_ref(mut self, package: impl Into<String>, repository: impl Into<String>) -> Self {
        let name = package.into();
        self.packages.insert(
            name.clone(),
            PackageRef {
                name,
                repository_name: repository.into(),
            },
        );
        self
    }

    pub fn build(self) -> Catalog {
        Catalog {
            name: self.name,
            packages: self.packages,
            repositories: self.repositories,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
