//! Tool invocations performed by `provision`.
//!
//! The flags are fixed; only the paths come from config.

use std::path::{Path, PathBuf};

use super::layout::Layout;
use super::types::{Step, ToolInvocation};
use crate::io::config::SetupConfig;

/// Fully resolved inputs for the CMake configure step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub toolchain_file: PathBuf,
    pub install_prefix: PathBuf,
    pub include_dir: PathBuf,
    pub python: PathBuf,
}

impl BuildSettings {
    /// Resolve configured paths against the layout root.
    pub fn resolve(layout: &Layout, cfg: &SetupConfig, python: PathBuf) -> Self {
        Self {
            toolchain_file: layout.resolve(&cfg.build.toolchain_file),
            install_prefix: layout.resolve(&cfg.build.install_prefix),
            include_dir: layout.resolve(&cfg.build.include_dir),
            python,
        }
    }
}

/// Ordered provisioning plan: clone, configure, build+install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionPlan {
    pub invocations: Vec<ToolInvocation>,
}

pub fn provision_plan(layout: &Layout, cfg: &SetupConfig, settings: &BuildSettings) -> ProvisionPlan {
    ProvisionPlan {
        invocations: vec![
            clone_invocation(layout, cfg),
            configure_invocation(layout, cfg, settings),
            install_invocation(layout, cfg),
        ],
    }
}

fn clone_invocation(layout: &Layout, cfg: &SetupConfig) -> ToolInvocation {
    ToolInvocation {
        step: Step::Clone,
        program: cfg.build.git.clone(),
        args: vec![
            "clone".to_string(),
            "--recursive".to_string(),
            cfg.source.repository.clone(),
        ],
        workdir: layout.dependency_dir.clone(),
    }
}

fn configure_invocation(
    layout: &Layout,
    cfg: &SetupConfig,
    settings: &BuildSettings,
) -> ToolInvocation {
    ToolInvocation {
        step: Step::Configure,
        program: cfg.build.cmake.clone(),
        args: vec![
            define("CMAKE_TOOLCHAIN_FILE", &settings.toolchain_file),
            define("CMAKE_INSTALL_PREFIX", &settings.install_prefix),
            define("INCLUDE_INSTALL_DIR", &settings.include_dir),
            define("PYTHON_EXECUTABLE", &settings.python),
            layout.source_dir.display().to_string(),
        ],
        workdir: layout.build_dir.clone(),
    }
}

fn install_invocation(layout: &Layout, cfg: &SetupConfig) -> ToolInvocation {
    ToolInvocation {
        step: Step::Install,
        program: cfg.build.cmake.clone(),
        args: vec![
            "--build".to_string(),
            ".".to_string(),
            "--target".to_string(),
            "install".to_string(),
        ],
        workdir: layout.build_dir.clone(),
    }
}

fn define(name: &str, value: &Path) -> String {
    format!("-D{name}={}", value.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_for(root: &str) -> ProvisionPlan {
        let cfg = SetupConfig::default();
        let layout = Layout::new(root, &cfg);
        let settings = BuildSettings::resolve(&layout, &cfg, PathBuf::from("/usr/bin/python3"));
        provision_plan(&layout, &cfg, &settings)
    }

    #[test]
    fn plan_orders_clone_configure_install() {
        let steps: Vec<Step> = plan_for("/proj")
            .invocations
            .iter()
            .map(|inv| inv.step)
            .collect();
        assert_eq!(steps, vec![Step::Clone, Step::Configure, Step::Install]);
    }

    #[test]
    fn clone_is_recursive_in_dependency_dir() {
        let plan = plan_for("/proj");
        let clone = &plan.invocations[0];
        assert_eq!(
            clone.command_line(),
            "git clone --recursive https://github.com/openMVG/openMVG.git"
        );
        assert_eq!(clone.workdir, PathBuf::from("/proj/software/openMVG"));
    }

    #[test]
    fn configure_passes_fixed_flags_and_source_dir() {
        let plan = plan_for("/proj");
        let configure = &plan.invocations[1];
        assert_eq!(configure.program, "cmake");
        assert_eq!(
            configure.args,
            vec![
                "-DCMAKE_TOOLCHAIN_FILE=/proj/software/vcpkg/scripts/buildsystems/vcpkg.cmake",
                "-DCMAKE_INSTALL_PREFIX=/proj/software/openMVG/install",
                "-DINCLUDE_INSTALL_DIR=/proj/software/openMVG/install/include",
                "-DPYTHON_EXECUTABLE=/usr/bin/python3",
                "/proj/software/openMVG/openMVG/src",
            ]
        );
        assert_eq!(
            configure.workdir,
            PathBuf::from("/proj/software/openMVG/build_openMVG")
        );
    }

    #[test]
    fn install_builds_install_target_in_build_dir() {
        let plan = plan_for("/proj");
        let install = &plan.invocations[2];
        assert_eq!(install.command_line(), "cmake --build . --target install");
        assert_eq!(
            install.workdir,
            PathBuf::from("/proj/software/openMVG/build_openMVG")
        );
    }
}
