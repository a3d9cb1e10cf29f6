//! Command resolution - builtin table, literal paths, PATH search
//!
//! Resolution order: builtin table first (exact, case-sensitive), then a
//! literal path if the name contains `/`, then a PATH walk. The first PATH
//! directory holding the name governs; later directories are never probed,
//! even when the winning entry is not executable.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use super::builtin::Builtin;
use super::Session;

/// Outcome of resolving one command name. Produced fresh per sub-command.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Builtin(Builtin),
    Executable(PathBuf),
    /// The file exists but lacks execute permission.
    PermissionDenied(PathBuf),
    NotFound,
}

/// Resolve the first word of a sub-command.
pub fn resolve(argv0: &str, session: &Session) -> Resolution {
    if let Some(builtin) = Builtin::lookup(argv0) {
        return Resolution::Builtin(builtin);
    }

    if argv0.contains('/') {
        return resolve_literal(Path::new(argv0));
    }

    let path_var = session.env.get("PATH");
    for dir in path_var.unwrap_or("").split(':').filter(|d| !d.is_empty()) {
        let candidate = Path::new(dir).join(argv0);
        match resolve_literal(&candidate) {
            Resolution::NotFound => continue,
            // First match governs, executable or not.
            hit => return hit,
        }
    }

    // With no PATH hit, interactive input (or a PATH that is at least set)
    // gets one shot at the bare name as a path relative to the current
    // directory. Non-interactive input with no PATH at all stays not found.
    if session.interactive || path_var.is_some() {
        if let hit @ (Resolution::Executable(_) | Resolution::PermissionDenied(_)) =
            resolve_literal(Path::new(argv0))
        {
            return hit;
        }
    }

    Resolution::NotFound
}

fn resolve_literal(path: &Path) -> Resolution {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {
            if meta.permissions().mode() & 0o111 != 0 {
                Resolution::Executable(path.to_path_buf())
            } else {
                Resolution::PermissionDenied(path.to_path_buf())
            }
        }
        _ => Resolution::NotFound,
    }
}
