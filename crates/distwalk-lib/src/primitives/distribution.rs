use serde::{Deserialize, Serialize};
use std::fmt;

/// Dependency relationship carried by a package descriptor
///
/// The set is closed: every variant maps onto exactly one dependency list of a
/// parsed descriptor, so a walker can never be asked for a list that does not
/// exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    /// Tools needed on the build host (`buildtool_depend`)
    Buildtool,
    /// Packages needed to compile (`build_depend`, `depend`)
    Build,
    /// Packages needed at run time (`run_depend`, `exec_depend`, `build_export_depend`, `depend`)
    Run,
    /// Packages needed only to run the tests (`test_depend`)
    Test,
}

impl DependencyKind {
    /// Every kind, in descriptor order
    pub const ALL: [DependencyKind; 4] = [
        DependencyKind::Buildtool,
        DependencyKind::Build,
        DependencyKind::Run,
        DependencyKind::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Buildtool => "buildtool",
            DependencyKind::Build => "build",
            DependencyKind::Run => "run",
            DependencyKind::Test => "test",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag a repository must carry before its packages can be walked
pub const RELEASE_TAG: &str = "release";
