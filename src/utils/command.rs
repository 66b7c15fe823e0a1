//! Command execution primitives with consistent error handling.

use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Run a command and return stdout on success.
///
/// Returns trimmed stdout if the command succeeds.
/// Returns an error with stderr (or stdout fallback) if it fails.
pub fn run(program: &str, args: &[&str], context: &str) -> Result<String> {
    let output = Command::new(program).args(args).output().map_err(|e| {
        Error::internal_io(
            format!("Failed to run {}: {}", context, e),
            Some(context.to_string()),
        )
    })?;

    if !output.status.success() {
        return Err(Error::command_failed(context, error_text(&output)));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Extract error text from command output.
///
/// Prefers stderr, falls back to stdout if stderr is empty.
pub fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        stderr.trim().to_string()
    } else {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_returns_trimmed_stdout() {
        let out = run("sh", &["-c", "echo hello"], "echo test").unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn run_maps_nonzero_exit_to_command_failed() {
        let err = run("sh", &["-c", "echo oops >&2; exit 3"], "failing test").unwrap_err();
        assert_eq!(err.code.as_str(), "command.failed");
        assert!(err.message.contains("oops"));
    }

    #[test]
    fn run_maps_missing_program_to_io_error() {
        let err = run("definitely-not-a-program", &[], "missing program").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }
}
