//! On-disk release snapshot fixtures
//!
//! Each package gets its own repository so release state can be set per
//! package. The snapshot and descriptors live in a temporary directory that is
//! removed when the fixture is dropped.

use super::package_xml;
use crate::primitives::{DependencyKind, RELEASE_TAG};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct FixtureRepository {
    name: String,
    version: Option<String>,
    tags: Vec<String>,
    descriptor: String,
}

/// Temporary distribution with a `release.yaml` snapshot
pub struct DistributionFixture {
    temp_dir: TempDir,
    repositories: Vec<FixtureRepository>,
}

impl DistributionFixture {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
            repositories: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path the snapshot is written to by [`DistributionFixture::write`]
    pub fn snapshot_path(&self) -> PathBuf {
        self.path().join("release.yaml")
    }

    /// Versioned, release-tagged package
    pub fn released(self, name: &str, deps: &[(DependencyKind, &str)]) -> Self {
        self.raw(name, Some("1.0.0-1"), &[RELEASE_TAG], package_xml(name, deps))
    }

    /// Package whose repository has no version
    pub fn unreleased(self, name: &str, deps: &[(DependencyKind, &str)]) -> Self {
        self.raw(name, None, &[RELEASE_TAG], package_xml(name, deps))
    }

    /// Versioned package whose repository lacks the release tag
    pub fn untagged(self, name: &str, deps: &[(DependencyKind, &str)]) -> Self {
        self.raw(name, Some("1.0.0-1"), &[], package_xml(name, deps))
    }

    /// Package with arbitrary descriptor text and release state
    pub fn raw(
        mut self,
        name: &str,
        version: Option<&str>,
        tags: &[&str],
        descriptor: impl Into<String>,
    ) -> Self {
        self.repositories.push(FixtureRepository {
            name: name.to_string(),
            version: version.map(str::to_string),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            descriptor: descriptor.into(),
        });
        self
    }

    /// Write descriptors and the snapshot; returns the snapshot path
    pub fn write(&self) -> std::io::Result<PathBuf> {
        let mut yaml = String::from("name: fixture\n");
        if self.repositories.is_empty() {
            yaml.push_str("repositories: {}\n");
        } else {
            yaml.push_str("repositories:\n");
        }

        for repo in &self.repositories {
            let relative = format!("{}/package.xml", repo.name);
            let descriptor_path = self.path().join(&relative);
            if let Some(parent) = descriptor_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&descriptor_path, &repo.descriptor)?;

            yaml.push_str(&format!("  {}:\n", repo.name));
            if let Some(version) = &repo.version {
                yaml.push_str(&format!("    version: \"{version}\"\n"));
            }
            let tags = repo
                .tags
                .iter()
                .map(|t| format!("\"{t}\""))
                .collect::<Vec<_>>()
                .join(", ");
            yaml.push_str(&format!("    tags: [{tags}]\n"));
            yaml.push_str(&format!(
                "    packages:\n      {}: \"{}\"\n",
                repo.name, relative
            ));
        }

        let snapshot = self.snapshot_path();
        fs::write(&snapshot, yaml)?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
