//! Host-shell subprocess execution and the tracked `cd` builtin.
//!
//! Every replayed or recorded command runs in a fresh `shell -c` subprocess,
//! so an OS-level `cd` inside one would not persist to the next. The engine
//! therefore interprets `cd` itself and threads the tracked directory into
//! each spawn; the helpers here are shared by playback and recording.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("failed to spawn shell '{shell}': {source}")]
    Spawn {
        shell: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why a `cd` target was rejected. Recoverable: the caller prints it and
/// keeps the tracked directory unchanged.
#[derive(Debug, thiserror::Error)]
pub enum CdError {
    #[error("no such directory: {0}")]
    Missing(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("no previous directory")]
    NoPrevious,
}

/// The operator's shell, falling back to `/bin/sh`.
pub fn default_shell() -> PathBuf {
    std::env::var_os("SHELL")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/bin/sh"))
}

/// Run one command line via `shell -c`, inheriting stdio, blocking until it
/// exits. `env` entries are overlaid on the process environment. A non-zero
/// exit is reported in the returned status, not as an error; only a failed
/// spawn is fatal.
pub fn run_command(
    shell: &Path,
    command: &str,
    cwd: &Path,
    env: &HashMap<String, String>,
) -> Result<ExitStatus, ShellError> {
    tracing::debug!(command, cwd = %cwd.display(), "spawning shell");
    Command::new(shell)
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .envs(env)
        .status()
        .map_err(|source| ShellError::Spawn {
            shell: shell.to_path_buf(),
            source,
        })
}

/// If `command` is the `cd` builtin, return its target. A bare `cd` means
/// the home directory.
pub fn cd_target(command: &str) -> Option<&str> {
    let mut parts = command.split_whitespace();
    match parts.next()? {
        "cd" => Some(parts.next().unwrap_or("~")),
        _ => None,
    }
}

/// Resolve a `cd` target against the tracked directory, expanding `~` and
/// supporting `-` (previous directory). The result is absolute and verified
/// to be an existing directory.
pub fn resolve_cd(cwd: &Path, oldpwd: Option<&Path>, target: &str) -> Result<PathBuf, CdError> {
    let candidate = if target == "-" {
        oldpwd.ok_or(CdError::NoPrevious)?.to_path_buf()
    } else {
        let expanded = expand_home(target);
        if expanded.is_absolute() {
            expanded
        } else {
            cwd.join(expanded)
        }
    };
    if !candidate.exists() {
        return Err(CdError::Missing(target.to_string()));
    }
    if !candidate.is_dir() {
        return Err(CdError::NotADirectory(target.to_string()));
    }
    candidate
        .canonicalize()
        .map_err(|_| CdError::Missing(target.to_string()))
}

fn expand_home(target: &str) -> PathBuf {
    if target == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = target.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(target)
}
