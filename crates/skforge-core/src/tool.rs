use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// One external tool invocation: program, arguments, working directory, and
/// an optional directory prepended to PATH for just this invocation. The
/// toolchain location is threaded through here explicitly instead of
/// mutating process-wide environment state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub path_prepend: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn prepend_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.path_prepend = Some(dir.into());
        self
    }

    /// The command line as shown to the operator in diagnostics.
    /// Whitespace-bearing arguments (like a multi-line `--args=` block) are
    /// single-quoted so the echoed command can be re-run as printed.
    pub fn render(&self) -> String {
        let mut parts = vec![quote(&self.program)];
        parts.extend(self.args.iter().map(|arg| quote(arg)));
        parts.join(" ")
    }
}

fn quote(value: &str) -> String {
    if !value.is_empty() && !value.chars().any(char::is_whitespace) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[derive(Debug)]
pub enum ToolError {
    Spawn {
        command: String,
        source: std::io::Error,
    },
    Status {
        command: String,
        code: Option<i32>,
    },
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::Spawn { command, source } => {
                write!(f, "failed to run '{}': {}", command, source)
            }
            ToolError::Status {
                command,
                code: Some(code),
            } => {
                write!(f, "'{}' exited with status {}", command, code)
            }
            ToolError::Status {
                command,
                code: None,
            } => {
                write!(f, "'{}' terminated by signal", command)
            }
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolError::Spawn { source, .. } => Some(source),
            ToolError::Status { .. } => None,
        }
    }
}

/// Seam for all external processes. Orchestration code only sees this trait;
/// tests substitute recording fakes.
pub trait ToolRunner {
    fn run(&self, command: &ToolCommand) -> Result<(), ToolError>;
}

/// Blocking runner over `std::process::Command` with inherited stdio, so
/// tool output streams straight to the operator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, command: &ToolCommand) -> Result<(), ToolError> {
        let mut child = Command::new(&command.program);
        child
            .args(&command.args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(cwd) = &command.cwd {
            child.current_dir(cwd);
        }
        if let Some(prefix) = &command.path_prepend {
            let existing = std::env::var_os("PATH").unwrap_or_default();
            let mut paths = vec![prefix.clone()];
            paths.extend(std::env::split_paths(&existing));
            let joined = std::env::join_paths(paths).map_err(|error| ToolError::Spawn {
                command: command.render(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, error),
            })?;
            child.env("PATH", joined);
        }
        let status = child.status().map_err(|source| ToolError::Spawn {
            command: command.render(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Status {
                command: command.render(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_joins_program_and_args() {
        let command = ToolCommand::new("ninja")
            .arg("-C")
            .arg("out/mac_Release_arm64")
            .args(["skia", "skottie"]);
        assert_eq!(command.render(), "ninja -C out/mac_Release_arm64 skia skottie");
    }

    #[test]
    fn render_quotes_arguments_with_whitespace() {
        let command = ToolCommand::new("./bin/gn")
            .arg("gen")
            .arg("out/mac_Release_arm64")
            .arg("--args=is_official_build = true\ntarget_cpu = \"arm64\"");
        assert_eq!(
            command.render(),
            "./bin/gn gen out/mac_Release_arm64 \
             '--args=is_official_build = true\ntarget_cpu = \"arm64\"'"
        );
    }

    #[test]
    fn render_escapes_embedded_single_quotes() {
        let command = ToolCommand::new("sh").arg("-c").arg("echo 'hi'");
        assert_eq!(command.render(), "sh -c 'echo '\\''hi'\\'''");
    }

    #[test]
    fn builder_records_cwd_and_path_prepend() {
        let command = ToolCommand::new("python3")
            .arg("tools/git-sync-deps")
            .current_dir("/src/skia")
            .prepend_path("/build/tmp/depot_tools");
        assert_eq!(command.cwd.as_deref(), Some(std::path::Path::new("/src/skia")));
        assert_eq!(
            command.path_prepend.as_deref(),
            Some(std::path::Path::new("/build/tmp/depot_tools"))
        );
    }

    #[test]
    fn status_error_carries_command_line() {
        let error = ToolError::Status {
            command: "lipo -create a b -output c".to_string(),
            code: Some(1),
        };
        let message = error.to_string();
        assert!(message.contains("lipo -create a b -output c"));
        assert!(message.contains("status 1"));
    }
}
