//! Setup configuration stored in `sispo-setup.toml` at the project root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up relative to the project root.
pub const CONFIG_FILE_NAME: &str = "sispo-setup.toml";

/// Setup configuration (TOML).
///
/// Every table is optional; missing fields fall back to the layout the
/// reconstruction pipeline expects (`software/openMVG/build_openMVG`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SetupConfig {
    pub layout: LayoutConfig,
    pub source: SourceConfig,
    pub build: BuildConfig,
    pub teardown: TeardownConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Directory below the root holding third-party software.
    pub software_dir: String,
    /// Directory name of the dependency inside `software_dir`.
    pub dependency: String,
    /// Out-of-source build directory inside the dependency directory.
    pub build_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            software_dir: "software".to_string(),
            dependency: "openMVG".to_string(),
            build_dir: "build_openMVG".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourceConfig {
    /// Repository cloned (with submodules) into the dependency directory.
    pub repository: String,
    /// Subdirectory of the checkout holding the top-level `CMakeLists.txt`.
    pub source_subdir: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repository: "https://github.com/openMVG/openMVG.git".to_string(),
            source_subdir: "src".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuildConfig {
    pub git: String,
    pub cmake: String,
    /// Relative paths are resolved against the project root.
    pub toolchain_file: PathBuf,
    pub install_prefix: PathBuf,
    pub include_dir: PathBuf,
    /// Interpreter passed to CMake. `None` means `python` from `PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            cmake: "cmake".to_string(),
            toolchain_file: PathBuf::from("software/vcpkg/scripts/buildsystems/vcpkg.cmake"),
            install_prefix: PathBuf::from("software/openMVG/install"),
            include_dir: PathBuf::from("software/openMVG/install/include"),
            python: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TeardownConfig {
    /// Directory deleted by `teardown`, relative to the root.
    pub target: PathBuf,
}

impl Default for TeardownConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("env"),
        }
    }
}

impl SetupConfig {
    pub fn validate(&self) -> Result<()> {
        require_component("layout.software_dir", &self.layout.software_dir)?;
        require_component("layout.dependency", &self.layout.dependency)?;
        require_component("layout.build_dir", &self.layout.build_dir)?;
        if self.layout.build_dir == self.layout.dependency {
            bail!("layout.build_dir must differ from layout.dependency (clone target)");
        }
        if self.source.repository.trim().is_empty() {
            return Err(anyhow!("source.repository must be non-empty"));
        }
        if self.build.git.trim().is_empty() {
            return Err(anyhow!("build.git must be non-empty"));
        }
        if self.build.cmake.trim().is_empty() {
            return Err(anyhow!("build.cmake must be non-empty"));
        }
        if self.teardown.target.as_os_str().is_empty() {
            return Err(anyhow!("teardown.target must be non-empty"));
        }
        let target = &self.teardown.target;
        let escapes = target.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        let names_subdir = target
            .components()
            .any(|c| matches!(c, Component::Normal(_)));
        if escapes || !names_subdir {
            return Err(anyhow!(
                "teardown.target must stay below the root: {}",
                self.teardown.target.display()
            ));
        }
        Ok(())
    }
}

/// A layout name must be exactly one normal path component.
fn require_component(field: &str, value: &str) -> Result<()> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(anyhow!(
            "{field} must be a single directory name, got '{value}'"
        )),
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `SetupConfig::default()`.
pub fn load_config(path: &Path) -> Result<SetupConfig> {
    if !path.exists() {
        let cfg = SetupConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: SetupConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &SetupConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
