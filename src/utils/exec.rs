//! External command execution utilities.
//!
//! Provides a macro and function for running commands with captured output
//! and uniform error reporting.

use anyhow::{Context, Result, bail};
use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Output, Stdio},
};

// ============================================================================
// Macros
// ============================================================================

/// Run an external command with arguments and capture its output.
///
/// # Examples
/// ```ignore
/// // Without working directory
/// exec!(["git"]; "--version")?;
///
/// // With working directory
/// exec!(root; ["git"]; "log", "-1", "--format=%cs", "--", path)?;
/// ```
#[macro_export]
macro_rules! exec {
    ($root:expr; $cmd:expr; $($arg:expr),* $(,)?) => {
        $crate::utils::exec::exec(
            Some($root),
            &$crate::utils::exec::to_cmd_vec($cmd),
            &[$($crate::utils::exec::to_os($arg)),*],
        )
    };
    ($cmd:expr; $($arg:expr),* $(,)?) => {
        $crate::utils::exec::exec(
            None,
            &$crate::utils::exec::to_cmd_vec($cmd),
            &[$($crate::utils::exec::to_os($arg)),*],
        )
    };
}

// ============================================================================
// Argument Conversion
// ============================================================================

/// Convert to `OsString`.
#[doc(hidden)]
#[inline]
pub fn to_os<S: Into<OsString>>(s: S) -> OsString {
    s.into()
}

/// Convert command to `Vec<OsString>`.
#[doc(hidden)]
#[inline]
pub fn to_cmd_vec<const N: usize>(cmd: [&str; N]) -> Vec<OsString> {
    cmd.into_iter().map(OsString::from).collect()
}

// ============================================================================
// Command Execution
// ============================================================================

/// Execute a command and capture its output.
///
/// stdin is closed so a command can never block waiting for input.
///
/// # Errors
/// Returns error if the command fails to start or exits non-zero; the error
/// message carries the command's stderr.
pub fn exec(root: Option<&Path>, cmd: &[OsString], args: &[OsString]) -> Result<Output> {
    let (name, mut command) = prepare(root, cmd, args)?;

    let output = command
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to execute `{name}`"))?;

    if !output.status.success() {
        bail!(format_error(&name, &output));
    }
    Ok(output)
}

/// Prepare a Command from components.
fn prepare(root: Option<&Path>, cmd: &[OsString], args: &[OsString]) -> Result<(String, Command)> {
    let (program, rest) = cmd.split_first().context("Empty command")?;
    let name = program.to_string_lossy().into_owned();

    let mut command = Command::new(program);
    command.args(rest).args(args);

    if let Some(dir) = root {
        command.current_dir(dir);
    }

    Ok((name, command))
}

fn format_error(name: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("Command `{name}` failed with {}", output.status)
    } else {
        format!("Command `{name}` failed with {}: {stderr}", output.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_empty_command() {
        let result = prepare(None, &[], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_prepare_splits_program_and_args() {
        let cmd = to_cmd_vec(["git", "-c", "core.quotepath=off"]);
        let (name, command) = prepare(None, &cmd, &[to_os("log")]).unwrap();

        assert_eq!(name, "git");
        assert_eq!(command.get_program(), "git");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, ["-c", "core.quotepath=off", "log"]);
    }

    #[test]
    fn test_prepare_sets_working_directory() {
        let (_, command) = prepare(Some(Path::new("/srv/site")), &to_cmd_vec(["git"]), &[]).unwrap();
        assert_eq!(command.get_current_dir(), Some(Path::new("/srv/site")));
    }

    #[test]
    fn test_exec_missing_program() {
        let result = exec!(["pagemap-definitely-not-a-real-binary"]; "--version");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to execute"));
    }
}
