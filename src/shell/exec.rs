//! External command execution
//!
//! Spawns the resolved executable with the session's environment snapshot,
//! blocks until it terminates, and folds the OS status into a shell status
//! code: the exit code for a normal exit, 128+N for death by signal N.
//! Exactly one child is outstanding at a time and it is always reaped by the
//! blocking `wait`.

use std::io;
use std::os::unix::process::CommandExt;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{Command, ExitStatus};

use super::environ::Environ;
use super::error::ExecError;

/// Run `path` with `argv` (argv[0] included) and the session environment,
/// handed over as its flattened `NAME=VALUE` snapshot.
pub fn run_external(path: &Path, argv: &[String], env: &Environ) -> Result<i32, ExecError> {
    let mut cmd = Command::new(path);
    cmd.arg0(&argv[0]);
    cmd.args(&argv[1..]);
    cmd.env_clear();
    for entry in env.snapshot() {
        if let Some((name, value)) = entry.split_once('=') {
            cmd.env(name, value);
        }
    }

    let mut child = cmd.spawn().map_err(|err| match err.kind() {
        io::ErrorKind::PermissionDenied => ExecError::PermissionDenied,
        io::ErrorKind::NotFound => ExecError::NotFound,
        _ => ExecError::Spawn(err),
    })?;

    let status = child.wait().map_err(ExecError::Spawn)?;
    Ok(fold_status(&status))
}

fn fold_status(status: &ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    // Killed by a signal: 128+N by shell convention.
    status.signal().map(|sig| 128 + sig).unwrap_or(1)
}
