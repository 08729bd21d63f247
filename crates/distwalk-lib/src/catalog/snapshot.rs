//! YAML release snapshots
//!
//! A snapshot file lists a distribution's repositories with their release
//! version, tags, and the package descriptors they ship:
//!
//! ```yaml
//! name: humble
//! repositories:
//!   geometry2:
//!     version: 0.25.2-1
//!     tags: [release]
//!     packages:
//!       tf2: geometry2/tf2/package.xml
//!       tf2_ros: geometry2/tf2_ros/package.xml
//!   ament_cmake:
//!     version: 1.3.5-1
//!     tags: [release]
//! ```
//!
//! Descriptor paths are relative to the snapshot file. A repository without a
//! `packages` map ships a single package named after itself, described by
//! `<repository>/package.xml`. All descriptors are read at load time so that
//! walking the catalog never touches the filesystem.

use super::{Catalog, CatalogError, Repository};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// On-disk form of a release snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryEntry>,
}

/// One repository in a release snapshot
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryEntry {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Package name -> descriptor path relative to the snapshot file
    #[serde(default)]
    pub packages: Option<BTreeMap<String, PathBuf>>,
}

impl SnapshotFile {
    pub fn from_yaml(path: &Path, content: &str) -> Result<Self, CatalogError> {
        serde_saphyr::from_str(content).map_err(|source| CatalogError::Snapshot {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve descriptor paths against `base_dir` and read them into a catalog
    pub fn into_catalog(self, base_dir: &Path) -> Result<Catalog, CatalogError> {
        let mut builder = Catalog::builder();
        if let Some(name) = self.name {
            builder = builder.name(name);
        }

        for (repo_name, entry) in self.repositories {
            let mut repository = Repository::new(repo_name.clone());
            repository.version = entry.version;
            repository.tags = entry.tags.into_iter().collect();

            let packages = entry.packages.unwrap_or_else(|| {
                BTreeMap::from([(repo_name.clone(), Path::new(&repo_name).join("package.xml"))])
            });

            for (package, relative) in packages {
                let path = base_dir.join(&relative);
                trace!("Reading descriptor for {} from {}", package, path.display());
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| CatalogError::Io { path, source })?;
                repository = repository.with_descriptor(package, text);
            }

            builder = builder.repository(repository)?;
        }

        Ok(builder.build())
    }
}

impl Catalog {
    /// Load a catalog from a YAML release snapshot on disk
    pub fn from_snapshot_file(path: &Path) -> Result<Self, CatalogError> {
        debug!("Loading release snapshot: {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot = SnapshotFile::from_yaml(path, &content)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let catalog = snapshot.into_catalog(base_dir)?;

        debug!(
            packages = catalog.packages().len(),
            repositories = catalog.repositories().len(),
            "Release snapshot loaded"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    include!("snapshot.test.rs");
}
