//! `package.xml` descriptor parsing (formats 1, 2 and 3)
//!
//! Format 1 lists `run_depend` directly. Formats 2 and 3 split run time
//! needs into `exec_depend` and `build_export_depend`, and add `depend` as a
//! shorthand for build + build_export + exec.

use super::{Dependency, Descriptor, DescriptorError, DescriptorParser};
use serde::Deserialize;
use tracing::trace;

#[derive(Debug, Deserialize)]
struct RawPackage {
    #[serde(rename = "@format", default)]
    format: Option<String>,
    #[serde(default)]
    name: Option<RawText>,
    #[serde(default)]
    version: Option<RawText>,
    #[serde(default)]
    buildtool_depend: Vec<RawDependency>,
    #[serde(default)]
    build_depend: Vec<RawDependency>,
    #[serde(default)]
    build_export_depend: Vec<RawDependency>,
    #[serde(default)]
    exec_depend: Vec<RawDependency>,
    #[serde(default)]
    run_depend: Vec<RawDependency>,
    #[serde(default)]
    test_depend: Vec<RawDependency>,
    #[serde(default)]
    depend: Vec<RawDependency>,
}

#[derive(Debug, Deserialize)]
struct RawText {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    #[serde(rename = "$text", default)]
    name: String,
    #[serde(rename = "@version_lt", default)]
    version_lt: Option<String>,
    #[serde(rename = "@version_lte", default)]
    version_lte: Option<String>,
    #[serde(rename = "@version_eq", default)]
    version_eq: Option<String>,
    #[serde(rename = "@version_gte", default)]
    version_gte: Option<String>,
    #[serde(rename = "@version_gt", default)]
    version_gt: Option<String>,
    #[serde(rename = "@condition", default)]
    condition: Option<String>,
}

/// Parser for ROS-style `package.xml` documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageXmlParser;

impl PackageXmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorParser for PackageXmlParser {
    fn parse(&self, text: &str) -> Result<Descriptor, DescriptorError> {
        let raw: RawPackage = quick_xml::de::from_str(text)?;

        let format = parse_format(raw.format.as_deref())?;
        let name = required_text(raw.name, "name")?;
        let version = required_text(raw.version, "version")?;
        trace!(package = %name, format, "Parsed package.xml");

        let buildtool_depends = convert("buildtool_depend", raw.buildtool_depend)?;
        let test_depends = convert("test_depend", raw.test_depend)?;

        let (build_depends, run_depends) = if format == 1 {
            for (tag, present) in [
                ("depend", !raw.depend.is_empty()),
                ("exec_depend", !raw.exec_depend.is_empty()),
                ("build_export_depend", !raw.build_export_depend.is_empty()),
            ] {
                if present {
                    return Err(DescriptorError::invalid(format!(
                        "format 1 manifests must not contain <{tag}>"
                    )));
                }
            }
            (
                convert("build_depend", raw.build_depend)?,
                convert("run_depend", raw.run_depend)?,
            )
        } else {
            if !raw.run_depend.is_empty() {
                return Err(DescriptorError::invalid(format!(
                    "format {format} manifests must not contain <run_depend>"
                )));
            }
            let depend = convert("depend", raw.depend)?;
            let build = merge(convert("build_depend", raw.build_depend)?, &depend);
            let exec = merge(convert("exec_depend", raw.exec_depend)?, &depend);
            let build_export = merge(
                convert("build_export_depend", raw.build_export_depend)?,
                &depend,
            );
            (build, merge(exec, &build_export))
        };

        Ok(Descriptor {
            name,
            version,
            format,
            buildtool_depends,
            build_depends,
            run_depends,
            test_depends,
        })
    }
}

fn parse_format(value: Option<&str>) -> Result<u8, DescriptorError> {
    match value.map(str::trim) {
        None => Ok(1),
        Some("1") => Ok(1),
        Some("2") => Ok(2),
        Some("3") => Ok(3),
        Some(other) => Err(DescriptorError::invalid(format!(
            "unsupported package format '{other}'"
        ))),
    }
}

fn required_text(value: Option<RawText>, tag: &str) -> Result<String, DescriptorError> {
    let text = value.map(|t| t.value.trim().to_string()).unwrap_or_default();
    if text.is_empty() {
        return Err(DescriptorError::invalid(format!(
            "missing or empty <{tag}>"
        )));
    }
    Ok(text)
}

fn convert(tag: &str, raw: Vec<RawDependency>) -> Result<Vec<Dependency>, DescriptorError> {
    raw.into_iter()
        .map(|dep| {
            let name = dep.name.trim();
            if name.is_empty() {
                return Err(DescriptorError::invalid(format!("empty <{tag}> element")));
            }
            Ok(Dependency {
                name: name.to_string(),
                version_lt: dep.version_lt,
                version_lte: dep.version_lte,
                version_eq: dep.version_eq,
                version_gte: dep.version_gte,
                version_gt: dep.version_gt,
                condition: dep.condition,
            })
        })
        .collect()
}

/// Append entries of `extra` not already present, keeping order
fn merge(mut base: Vec<Dependency>, extra: &[Dependency]) -> Vec<Dependency> {
    for dep in extra {
        if !base.contains(dep) {
            base.push(dep.clone());
        }
    }
    base
}

#[cfg(test)]
mod tests {
    include!("package_xml.test.rs");
}
