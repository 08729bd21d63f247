//! Fixture infrastructure for E2E tests
//!
//! [`SampleDistribution`] writes a small but realistic distribution to a
//! temporary directory: multi-package repositories, all three manifest
//! formats, external system dependencies, and one unreleased repository.
//!
//! ```text
//! rviz ──depend──▶ roscpp ──depend──▶ rosconsole ──▶ log4cxx (external)
//!   │                ▲
//!   ├─exec──▶ rospy  │
//!   ├─test──▶ rostest┘ (+ exec rospy)
//!   └─build─▶ qtbase5-dev (external)
//!
//! exp_tool ──depend──▶ rviz          (repository has no version)
//! everything except catkin ──buildtool──▶ catkin
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SNAPSHOT: &str = r#"name: noetic
repositories:
  catkin:
    version: 0.8.10-1
    tags: [release]
  ros_comm:
    version: 1.16.0-1
    tags: [release]
    packages:
      rosconsole: ros_comm/rosconsole/package.xml
      roscpp: ros_comm/clients/roscpp/package.xml
      rospy: ros_comm/clients/rospy/package.xml
      rostest: ros_comm/tools/rostest/package.xml
  rviz:
    version: 1.14.20-1
    tags: [release, gui]
  experimental:
    tags: [release]
    packages:
      exp_tool: experimental/package.xml
"#;

const CATKIN: &str = r#"<?xml version="1.0"?>
<package format="2">
  <name>catkin</name>
  <version>0.8.10</version>
  <description>Low-level build system macros and infrastructure</description>
  <maintainer email="maintainer@example.com">Maintainer</maintainer>
  <license>BSD</license>
  <exec_depend>python3-empy</exec_depend>
</package>
"#;

const ROSCONSOLE: &str = r#"<package>
  <name>rosconsole</name>
  <version>1.14.3</version>
  <description>Console output and logging</description>
  <maintainer email="maintainer@example.com">Maintainer</maintainer>
  <license>BSD</license>
  <buildtool_depend>catkin</buildtool_depend>
  <build_depend>log4cxx</build_depend>
  <run_depend>log4cxx</run_depend>
</package>
"#;

const ROSCPP: &str = r#"<?xml version="1.0"?>
<package format="2">
  <name>roscpp</name>
  <version>1.16.0</version>
  <description>C++ client library</description>
  <maintainer email="maintainer@example.com">Maintainer</maintainer>
  <license>BSD</license>
  <buildtool_depend>catkin</buildtool_depend>
  <depend version_gte="1.14">rosconsole</depend>
  <test_depend>gtest</test_depend>
</package>
"#;

const ROSPY: &str = r#"<?xml version="1.0"?>
<package format="3">
  <name>rospy</name>
  <version>1.16.0</version>
  <description>Python client library</description>
  <maintainer email="maintainer@example.com">Maintainer</maintainer>
  <license>BSD</license>
  <buildtool_depend>catkin</buildtool_depend>
  <exec_depend condition="$ROS_PYTHON_VERSION == 3">python3-yaml</exec_depend>
</package>
"#;

const ROSTEST: &str = r#"<?xml version="1.0"?>
<package format="2">
  <name>rostest</name>
  <version>1.16.0</version>
  <description>Integration test suite</description>
  <maintainer email="maintainer@example.com">Maintainer</maintainer>
  <license>BSD</license>
  <buildtool_depend>catkin</buildtool_depend>
  <depend>roscpp</depend>
  <exec_depend>rospy</exec_depend>
</package>
"#;

const RVIZ: &str = r#"<?xml version="1.0"?>
<package format="2">
  <name>rviz</name>
  <version>1.14.20</version>
  <description>3D visualization tool</description>
  <maintainer email="maintainer@example.com">Maintainer</maintainer>
  <license>BSD</license>
  <buildtool_depend>catkin</buildtool_depend>
  <build_depend>qtbase5-dev</build_depend>
  <depend>roscpp</depend>
  <exec_depend>rospy</exec_depend>
  <test_depend>rostest</test_depend>
</package>
"#;

const EXP_TOOL: &str = r#"<?xml version="1.0"?>
<package format="2">
  <name>exp_tool</name>
  <version>0.0.1</version>
  <description>Not yet released</description>
  <maintainer email="maintainer@example.com">Maintainer</maintainer>
  <license>BSD</license>
  <buildtool_depend>catkin</buildtool_depend>
  <depend>rviz</depend>
</package>
"#;

/// Sample distribution written to a temporary directory
pub struct SampleDistribution {
    temp_dir: TempDir,
}

impl SampleDistribution {
    pub fn write() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        for (relative, content) in [
            ("release.yaml", SNAPSHOT),
            ("catkin/package.xml", CATKIN),
            ("ros_comm/rosconsole/package.xml", ROSCONSOLE),
            ("ros_comm/clients/roscpp/package.xml", ROSCPP),
            ("ros_comm/clients/rospy/package.xml", ROSPY),
            ("ros_comm/tools/rostest/package.xml", ROSTEST),
            ("rviz/package.xml", RVIZ),
            ("experimental/package.xml", EXP_TOOL),
        ] {
            write_file(root, relative, content)?;
        }

        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.path().join("release.yaml")
    }

    /// Replace a file of the distribution, e.g. to corrupt a descriptor
    pub fn overwrite(&self, relative: &str, content: &str) -> Result<()> {
        write_file(self.path(), relative, content)
    }
}

fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}
