//! Playback engine: replays a parsed session as a fake live shell.
//!
//! One run walks the session's entries in order. Each command waits for an
//! operator keypress, is "typed" through the [`TypingSimulator`], then
//! executes in a fresh subprocess rooted at the engine's tracked working
//! directory. Directives encountered mid-session reconfigure the state for
//! the commands that follow, unless the matching CLI flag pinned the value.

use std::collections::HashMap;
use std::io::Write;
use std::mem;
use std::path::PathBuf;

use crate::config::Config;
use crate::input::KeySource;
use crate::prompt::{self, PromptContext, Theme};
use crate::session::{Entry, Session};
use crate::shell::{self, ShellError};
use crate::typing::{Outcome, TypingError, TypingSimulator};

/// How a playback run ended. Maps to the process exit code: `Finished` is
/// success, `Aborted` (operator pressed ESC) is a non-zero completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Finished,
    Aborted,
}

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("unknown prompt theme: {0}")]
    UnknownTheme(String),

    #[error("invalid speed factor: {0}")]
    InvalidSpeed(String),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Typing(#[from] TypingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// CLI-level overrides. A set field wins over session directives.
#[derive(Debug, Clone, Default)]
pub struct PlayOverrides {
    pub speed: Option<f64>,
    pub prompt: Option<String>,
    pub shell: Option<PathBuf>,
}

/// Replay state the engine tracks across commands.
///
/// `cwd` is authoritative: commands run in fresh subprocesses, so the
/// directory a `cd` selects must be carried here, never delegated to the
/// child. A failed `cd` leaves it unchanged.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    pub cwd: PathBuf,
    pub oldpwd: Option<PathBuf>,
    pub shell: PathBuf,
    pub theme: &'static Theme,
    pub speed: f64,
    pub env: HashMap<String, String>,
    pub user: String,
    pub host: String,
}

impl PlaybackState {
    /// Build the initial state from config and CLI overrides. Session
    /// directives are applied later, in order, as the run reaches them.
    pub fn prepare(config: &Config, overrides: &PlayOverrides) -> Result<Self, PlayError> {
        let speed = match overrides.speed.or(config.speed) {
            Some(s) if s > 0.0 => s,
            Some(s) => return Err(PlayError::InvalidSpeed(s.to_string())),
            None => 1.0,
        };
        let theme_name = overrides
            .prompt
            .as_deref()
            .or(config.prompt.as_deref())
            .unwrap_or("default");
        let theme = prompt::lookup(theme_name)
            .ok_or_else(|| PlayError::UnknownTheme(theme_name.to_string()))?;
        let shell = overrides
            .shell
            .clone()
            .or_else(|| config.shell.clone())
            .unwrap_or_else(shell::default_shell);
        Ok(PlaybackState {
            cwd: std::env::current_dir()?,
            oldpwd: None,
            shell,
            theme,
            speed,
            env: HashMap::new(),
            user: whoami::username(),
            host: whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string()),
        })
    }
}

/// Drives one session run against a key source and an output writer.
pub struct Player<'a> {
    state: PlaybackState,
    locked: PlayOverrides,
    typing: TypingSimulator,
    keys: &'a mut dyn KeySource,
    out: &'a mut dyn Write,
}

impl<'a> Player<'a> {
    pub fn new(
        state: PlaybackState,
        typing: TypingSimulator,
        keys: &'a mut dyn KeySource,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            state,
            locked: PlayOverrides::default(),
            typing,
            keys,
            out,
        }
    }

    /// Pin values so session directives cannot change them.
    pub fn with_locked(mut self, locked: PlayOverrides) -> Self {
        self.locked = locked;
        self
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Run the session to completion or abort.
    pub fn run(&mut self, session: &Session) -> Result<RunOutcome, PlayError> {
        for entry in session.entries() {
            match entry {
                Entry::Directive { key, value } => self.apply_directive(key, value)?,
                Entry::Command(command) => {
                    if self.keys.wait_key()?.is_cancel() {
                        writeln!(self.out)?;
                        return Ok(RunOutcome::Aborted);
                    }
                    let line = format!("{}{}", self.render_prompt(), command);
                    match self
                        .typing
                        .type_out(self.out, &line, self.state.speed, self.keys)?
                    {
                        Outcome::Cancelled => {
                            writeln!(self.out)?;
                            return Ok(RunOutcome::Aborted);
                        }
                        Outcome::Completed => {}
                    }
                    writeln!(self.out)?;
                    self.execute(command)?;
                }
            }
        }
        Ok(RunOutcome::Finished)
    }

    fn apply_directive(&mut self, key: &str, value: &str) -> Result<(), PlayError> {
        match key {
            "shell" if self.locked.shell.is_none() => {
                self.state.shell = PathBuf::from(value);
            }
            "prompt" if self.locked.prompt.is_none() => {
                self.state.theme = prompt::lookup(value)
                    .ok_or_else(|| PlayError::UnknownTheme(value.to_string()))?;
            }
            "speed" if self.locked.speed.is_none() => {
                self.state.speed = match value.parse::<f64>() {
                    Ok(s) if s > 0.0 => s,
                    _ => return Err(PlayError::InvalidSpeed(value.to_string())),
                };
            }
            "env" => {
                if let Some((name, val)) = value.split_once('=') {
                    self.state
                        .env
                        .insert(name.trim().to_string(), val.trim().to_string());
                }
            }
            _ => tracing::debug!(key, value, "ignoring directive"),
        }
        Ok(())
    }

    fn render_prompt(&self) -> String {
        let shell_name = self
            .state
            .shell
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        prompt::render(
            self.state.theme.template,
            &PromptContext {
                user: &self.state.user,
                host: &self.state.host,
                cwd: &self.state.cwd,
                shell: &shell_name,
            },
        )
    }

    fn execute(&mut self, command: &str) -> Result<(), PlayError> {
        if let Some(target) = shell::cd_target(command) {
            match shell::resolve_cd(&self.state.cwd, self.state.oldpwd.as_deref(), target) {
                Ok(dir) => {
                    tracing::debug!(to = %dir.display(), "tracked cwd changed");
                    self.state.oldpwd = Some(mem::replace(&mut self.state.cwd, dir));
                }
                Err(err) => writeln!(self.out, "cd: {err}")?,
            }
            return Ok(());
        }
        let status = shell::run_command(&self.state.shell, command, &self.state.cwd, &self.state.env)?;
        if !status.success() {
            // Not fatal to the session; the demo moves on.
            tracing::debug!(%status, command, "command exited non-zero");
        }
        Ok(())
    }
}
