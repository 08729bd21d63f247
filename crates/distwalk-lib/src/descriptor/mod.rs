//! # Package descriptors
//!
//! Parsed package metadata exposing one dependency list per
//! [`DependencyKind`]. Parsing is behind the [`DescriptorParser`] trait; the
//! default implementation reads ROS-style `package.xml` documents.

use crate::primitives::DependencyKind;
use thiserror::Error;

pub mod package_xml;

pub use package_xml::PackageXmlParser;

/// Errors produced while turning descriptor text into a [`Descriptor`]
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Malformed descriptor: {source}")]
    Malformed {
        #[from]
        source: quick_xml::DeError,
    },

    #[error("Invalid descriptor: {reason}")]
    Invalid { reason: String },
}

impl DescriptorError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        DescriptorError::Invalid {
            reason: reason.into(),
        }
    }
}

/// A single dependency reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub version_lt: Option<String>,
    pub version_lte: Option<String>,
    pub version_eq: Option<String>,
    pub version_gte: Option<String>,
    pub version_gt: Option<String>,
    /// Format 3 conditional expression, kept verbatim
    pub condition: Option<String>,
}

impl Dependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Parsed package document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub version: String,
    pub format: u8,
    pub buildtool_depends: Vec<Dependency>,
    pub build_depends: Vec<Dependency>,
    pub run_depends: Vec<Dependency>,
    pub test_depends: Vec<Dependency>,
}

impl Descriptor {
    /// Dependency list for `kind`
    pub fn depends(&self, kind: DependencyKind) -> &[Dependency] {
        match kind {
            DependencyKind::Buildtool => &self.buildtool_depends,
            DependencyKind::Build => &self.build_depends,
            DependencyKind::Run => &self.run_depends,
            DependencyKind::Test => &self.test_depends,
        }
    }

    /// Names in the `kind` list, in document order
    pub fn depend_names(&self, kind: DependencyKind) -> impl Iterator<Item = &str> {
        self.depends(kind).iter().map(|dep| dep.name.as_str())
    }
}

/// Turns raw descriptor text into a [`Descriptor`]
pub trait DescriptorParser {
    fn parse(&self, text: &str) -> Result<Descriptor, DescriptorError>;
}

impl<P: DescriptorParser + ?Sized> DescriptorParser for &P {
    fn parse(&self, text: &str) -> Result<Descriptor, DescriptorError> {
        (**self).parse(text)
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
