//! # Dependency walker
//!
//! Answers "what does this package depend on" and "what depends on this
//! package", directly or transitively, for one release catalog.
//!
//! The dependency graph is never materialized. Each query parses the
//! descriptors it needs on first use and keeps them for the lifetime of the
//! walker; reverse queries rescan every package of the catalog at each step.
//!
//! A walker borrows exactly one [`Catalog`] and is single-threaded: share it
//! behind a mutex, or warm its cache before handing out read access.

use crate::catalog::{Catalog, CatalogError};
use crate::descriptor::{Descriptor, DescriptorError, DescriptorParser, PackageXmlParser};
use crate::primitives::{DependencyKind, RELEASE_TAG};
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while walking dependencies
#[derive(Debug, Error)]
pub enum WalkerError {
    /// The requested package is not release-eligible. This is a caller bug:
    /// only released packages may be queried, and the query must not be retried.
    #[error("Package '{package}' in repository '{repository}' has no version set")]
    MissingVersion { package: String, repository: String },

    /// Same contract as [`WalkerError::MissingVersion`]
    #[error("Package '{package}' in repository '{repository}' has no 'release' tag set")]
    MissingReleaseTag { package: String, repository: String },

    #[error("{package}: {source}")]
    InvalidDescriptor {
        package: String,
        #[source]
        source: DescriptorError,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl WalkerError {
    /// True for the release-eligibility failures that signal a caller bug
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            WalkerError::MissingVersion { .. } | WalkerError::MissingReleaseTag { .. }
        )
    }
}

/// Lazily parsing dependency walker over one catalog
pub struct DependencyWalker<'a, P = PackageXmlParser> {
    catalog: &'a Catalog,
    parser: P,
    /// Parsed descriptors by package name; grows monotonically
    packages: HashMap<String, Descriptor>,
}

impl<'a> DependencyWalker<'a> {
    /// Walker reading `package.xml` descriptors
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_parser(catalog, PackageXmlParser::new())
    }
}

impl<'a, P: DescriptorParser> DependencyWalker<'a, P> {
    pub fn with_parser(catalog: &'a Catalog, parser: P) -> Self {
        Self {
            catalog,
            parser,
            packages: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Number of descriptors parsed so far
    pub fn cached_descriptor_count(&self) -> usize {
        self.packages.len()
    }

    /// Parsed descriptor of `pkg_name`, parsing it on first access
    fn get_package(&mut self, pkg_name: &str) -> Result<&Descriptor, WalkerError> {
        match self.packages.entry(pkg_name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let repo = self.catalog.repository_of(pkg_name)?;
                if repo.version.is_none() {
                    return Err(WalkerError::MissingVersion {
                        package: pkg_name.to_string(),
                        repository: repo.name.clone(),
                    });
                }
                if !repo.has_tag(RELEASE_TAG) {
                    return Err(WalkerError::MissingReleaseTag {
                        package: pkg_name.to_string(),
                        repository: repo.name.clone(),
                    });
                }

                let text = repo.descriptor_text(pkg_name)?;
                let descriptor =
                    self.parser
                        .parse(text)
                        .map_err(|source| WalkerError::InvalidDescriptor {
                            package: pkg_name.to_string(),
                            source,
                        })?;
                debug!(package = pkg_name, repository = %repo.name, "Parsed descriptor");
                Ok(entry.insert(descriptor))
            }
        }
    }

    /// Names in the `kind` list of `pkg_name`'s descriptor
    fn get_dependencies(
        &mut self,
        pkg_name: &str,
        kind: DependencyKind,
    ) -> Result<BTreeSet<String>, WalkerError> {
        Ok(self
            .get_package(pkg_name)?
            .depend_names(kind)
            .map(str::to_string)
            .collect())
    }

    /// Packages `pkg_name` directly depends on through `kind`
    ///
    /// With `ros_packages_only`, dependencies not known to the catalog are dropped.
    pub fn get_depends(
        &mut self,
        pkg_name: &str,
        kind: DependencyKind,
        ros_packages_only: bool,
    ) -> Result<BTreeSet<String>, WalkerError> {
        let mut deps = self.get_dependencies(pkg_name, kind)?;
        if ros_packages_only {
            let catalog = self.catalog;
            deps.retain(|dep| catalog.contains_package(dep));
        }
        Ok(deps)
    }

    /// Packages `pkg_name` transitively depends on through any of `kinds`
    ///
    /// Packages in `ignore_pkgs` may appear in the result but are never expanded.
    /// `pkg_name` itself only appears when a cycle leads back to it.
    pub fn get_recursive_depends(
        &mut self,
        pkg_name: &str,
        kinds: &[DependencyKind],
        ros_packages_only: bool,
        ignore_pkgs: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, WalkerError> {
        let mut depends = BTreeSet::new();
        let mut pkgs_to_check = vec![pkg_name.to_string()];

        while let Some(next_pkg) = pkgs_to_check.pop() {
            if ignore_pkgs.contains(&next_pkg) {
                trace!(package = %next_pkg, "Skipping ignored package");
                continue;
            }
            for &kind in kinds {
                for dep in self.get_depends(&next_pkg, kind, ros_packages_only)? {
                    if depends.insert(dep.clone()) {
                        pkgs_to_check.push(dep);
                    }
                }
            }
        }

        debug!(
            package = pkg_name,
            kinds = ?kinds,
            found = depends.len(),
            cached = self.packages.len(),
            "Resolved recursive dependencies"
        );
        Ok(depends)
    }

    /// Packages of the catalog that directly depend on `pkg_name` through `kind`
    ///
    /// Packages whose repository has no version are skipped silently.
    pub fn get_depends_on(
        &mut self,
        pkg_name: &str,
        kind: DependencyKind,
    ) -> Result<BTreeSet<String>, WalkerError> {
        let catalog = self.catalog;
        let mut depends_on = BTreeSet::new();

        for name in catalog.package_names() {
            let repo = catalog.repository_of(name)?;
            if repo.version.is_none() {
                trace!(package = name, repository = %repo.name, "Skipping unreleased package");
                continue;
            }
            if self
                .get_package(name)?
                .depend_names(kind)
                .any(|dep| dep == pkg_name)
            {
                depends_on.insert(name.to_string());
            }
        }
        Ok(depends_on)
    }

    /// Packages of the catalog that transitively depend on `pkg_name` through any of `kinds`
    pub fn get_recursive_depends_on(
        &mut self,
        pkg_name: &str,
        kinds: &[DependencyKind],
        ignore_pkgs: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, WalkerError> {
        let mut depends_on = BTreeSet::new();
        let mut pkgs_to_check = vec![pkg_name.to_string()];

        while let Some(next_pkg) = pkgs_to_check.pop() {
            if ignore_pkgs.contains(&next_pkg) {
                trace!(package = %next_pkg, "Skipping ignored package");
                continue;
            }
            for &kind in kinds {
                for dependent in self.get_depends_on(&next_pkg, kind)? {
                    if depends_on.insert(dependent.clone()) {
                        pkgs_to_check.push(dependent);
                    }
                }
            }
        }

        debug!(
            package = pkg_name,
            kinds = ?kinds,
            found = depends_on.len(),
            cached = self.packages.len(),
            "Resolved recursive dependents"
        );
        Ok(depends_on)
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
