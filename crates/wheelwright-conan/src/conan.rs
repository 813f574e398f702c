//! Conan CLI driver.

use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

use wheelwright_core::DEFAULT_PROFILE;

use crate::tool::{BuildRequest, BuildTool, PYTHON_VERSION_ENV};
use crate::{ToolError, ToolResult};

/// Drives the `conan` executable through its CLI.
///
/// Conan's recipe language, profile templating and compiler invocation
/// are opaque to this engine; the driver only sequences CLI invocations,
/// forwards the interpreter-version environment variable, and captures
/// output for diagnostics.
#[derive(Debug, Clone)]
pub struct ConanCli {
    program: String,
}

impl ConanCli {
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "conan".to_string(),
        }
    }

    /// Use an alternate executable (wrapper scripts, pinned versions).
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[String], request: &BuildRequest<'_>) -> ToolResult<()> {
        let rendered = format!("{} {}", self.program, args.join(" "));
        debug!(command = %rendered, "running external build tool");

        let mut command = Command::new(&self.program);
        command.args(args).current_dir(request.project_dir);
        if let Ok(python_version) = std::env::var(PYTHON_VERSION_ENV) {
            // opaque passthrough for templated profiles
            command.env(PYTHON_VERSION_ENV, python_version);
        }

        let output = command.output().map_err(|source| ToolError::Launch {
            command: rendered.clone(),
            source,
        })?;

        if !output.status.success() {
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(ToolError::Failed {
                command: rendered,
                status: output.status.to_string(),
                output: captured,
            });
        }
        Ok(())
    }

    /// Arguments shared by the install and build invocations: output
    /// folder, redirected compile tree, disabled user presets, and both
    /// profile contexts.
    fn lifecycle_args(request: &BuildRequest<'_>) -> Vec<String> {
        vec![
            ".".to_string(),
            "--output-folder".to_string(),
            request.prefix.display().to_string(),
            "-c".to_string(),
            format!(
                "tools.cmake.cmake_layout:build_folder={}",
                request.build_folder.display()
            ),
            "-c".to_string(),
            "tools.cmake.cmaketoolchain:user_presets=".to_string(),
            format!("-pr:h={}", request.contexts.host_profile),
            format!("-pr:b={}", request.contexts.build_profile),
        ]
    }
}

impl Default for ConanCli {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildTool for ConanCli {
    fn configure(&self, request: &BuildRequest<'_>) -> ToolResult<()> {
        // auto-detect the default profile the first time around
        if request.contexts.host_profile == DEFAULT_PROFILE
            || request.contexts.build_profile == DEFAULT_PROFILE
        {
            info!("detecting default conan profile");
            self.run(
                &[
                    "profile".to_string(),
                    "detect".to_string(),
                    "--force".to_string(),
                ],
                request,
            )?;
        }

        let mut args = vec!["install".to_string()];
        args.extend(Self::lifecycle_args(request));
        args.push("--build=missing".to_string());
        self.run(&args, request)
    }

    fn build(&self, request: &BuildRequest<'_>) -> ToolResult<()> {
        let mut args = vec!["build".to_string()];
        args.extend(Self::lifecycle_args(request));
        self.run(&args, request)
    }

    fn install(&self, request: &BuildRequest<'_>) -> ToolResult<PathBuf> {
        // the recipe's own install step populated the prefix during
        // `build` (the output folder is the package folder); all that
        // remains is locating it
        if !request.prefix.is_dir() {
            return Err(ToolError::MissingPrefix(request.prefix.clone()));
        }
        Ok(request.prefix.clone())
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::tool::BuildContexts;
    use std::path::Path;

    fn request<'a>(contexts: &'a BuildContexts, dir: &'a Path) -> BuildRequest<'a> {
        BuildRequest {
            project_dir: dir,
            build_folder: dir.join("build"),
            prefix: dir.join("prefix"),
            contexts,
        }
    }

    #[test]
    fn ConanCli___lifecycle_args___carry_both_profiles() {
        let contexts = BuildContexts::new("linux-armv8", "ci");
        let temp_dir = tempfile::TempDir::new().unwrap();
        let request = request(&contexts, temp_dir.path());

        let args = ConanCli::lifecycle_args(&request);

        assert!(args.contains(&"-pr:h=linux-armv8".to_string()));
        assert!(args.contains(&"-pr:b=ci".to_string()));
        assert!(args.contains(&"--output-folder".to_string()));
        assert!(
            args.iter()
                .any(|a| a.starts_with("tools.cmake.cmake_layout:build_folder="))
        );
    }

    #[test]
    fn ConanCli___run___missing_binary_is_a_launch_error() {
        let cli = ConanCli::with_program("wheelwright-no-such-binary");
        let contexts = BuildContexts::new("default", "default");
        let temp_dir = tempfile::TempDir::new().unwrap();
        let request = request(&contexts, temp_dir.path());

        let result = cli.run(&["--version".to_string()], &request);

        assert!(matches!(result, Err(ToolError::Launch { .. })));
    }

    #[test]
    fn ConanCli___install___fails_without_prefix_output() {
        let cli = ConanCli::new();
        let contexts = BuildContexts::new("default", "default");
        let temp_dir = tempfile::TempDir::new().unwrap();
        let request = request(&contexts, temp_dir.path());

        let result = cli.install(&request);

        assert!(matches!(result, Err(ToolError::MissingPrefix(_))));
    }

    #[test]
    fn ConanCli___install___returns_populated_prefix() {
        let cli = ConanCli::new();
        let contexts = BuildContexts::new("default", "default");
        let temp_dir = tempfile::TempDir::new().unwrap();
        let request = request(&contexts, temp_dir.path());
        std::fs::create_dir_all(&request.prefix).unwrap();

        let prefix = cli.install(&request).unwrap();

        assert_eq!(prefix, request.prefix);
    }
}
