//! Session recorder: captures a live command sequence into session text.
//!
//! Each line the operator types is executed immediately (so the recording
//! session behaves like a real one) and buffered. The `cd` builtin goes
//! through the same resolve/verify logic as playback, so the tracked
//! directory stays correct for subsequent commands. The buffer is written
//! out exactly once, when the finish sentinel ends the recording.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, Write};
use std::mem;
use std::path::PathBuf;

use crate::prompt::{self, PromptContext, Theme};
use crate::session::{self, Entry};
use crate::shell::{self, ShellError};

/// Typing this line (exactly) stops the recording.
pub const FINISH_SENTINEL: &str = "finish";

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("output path is a directory: {0}")]
    OutputIsDirectory(PathBuf),

    #[error("output file already exists: {0}")]
    OutputExists(PathBuf),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct Recorder<'a> {
    entries: Vec<Entry>,
    cwd: PathBuf,
    oldpwd: Option<PathBuf>,
    shell: PathBuf,
    theme: &'static Theme,
    /// Record a `prompt` directive only when the operator picked a theme.
    custom_theme: bool,
    output: PathBuf,
    user: String,
    host: String,
    input: &'a mut dyn BufRead,
    out: &'a mut dyn Write,
}

impl<'a> Recorder<'a> {
    pub fn new(
        output: PathBuf,
        shell: PathBuf,
        theme: &'static Theme,
        custom_theme: bool,
        input: &'a mut dyn BufRead,
        out: &'a mut dyn Write,
    ) -> Result<Self, RecordError> {
        Ok(Self {
            entries: Vec::new(),
            cwd: std::env::current_dir()?,
            oldpwd: None,
            shell,
            theme,
            custom_theme,
            output,
            user: whoami::username(),
            host: whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string()),
            input,
            out,
        })
    }

    /// Record until the finish sentinel (or end of input), then finalize.
    pub fn run(&mut self) -> Result<(), RecordError> {
        writeln!(
            self.out,
            "Recording session to {}. Type '{}' to stop.",
            self.output.display(),
            FINISH_SENTINEL
        )?;
        loop {
            write!(self.out, "{}", self.render_prompt())?;
            self.out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line == FINISH_SENTINEL {
                break;
            }
            if line.is_empty() {
                continue;
            }
            self.execute(line)?;
            self.entries.push(Entry::Command(line.to_string()));
        }
        self.finalize()
    }

    fn render_prompt(&self) -> String {
        let shell_name = self
            .shell
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        prompt::render(
            self.theme.template,
            &PromptContext {
                user: &self.user,
                host: &self.host,
                cwd: &self.cwd,
                shell: &shell_name,
            },
        )
    }

    fn execute(&mut self, command: &str) -> Result<(), RecordError> {
        if let Some(target) = shell::cd_target(command) {
            match shell::resolve_cd(&self.cwd, self.oldpwd.as_deref(), target) {
                Ok(dir) => self.oldpwd = Some(mem::replace(&mut self.cwd, dir)),
                Err(err) => writeln!(self.out, "cd: {err}")?,
            }
            return Ok(());
        }
        let env = HashMap::new();
        let status = shell::run_command(&self.shell, command, &self.cwd, &env)?;
        if !status.success() {
            tracing::debug!(%status, command, "recorded command exited non-zero");
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), RecordError> {
        if self.output.is_dir() {
            return Err(RecordError::OutputIsDirectory(self.output.clone()));
        }
        if self.output.exists() {
            write!(
                self.out,
                "{} already exists. Overwrite? [y/N] ",
                self.output.display()
            )?;
            self.out.flush()?;
            let mut answer = String::new();
            self.input.read_line(&mut answer)?;
            if !matches!(answer.trim(), "y" | "Y" | "yes") {
                return Err(RecordError::OutputExists(self.output.clone()));
            }
        }
        let mut entries = vec![Entry::Directive {
            key: "shell".to_string(),
            value: self.shell.display().to_string(),
        }];
        if self.custom_theme {
            entries.push(Entry::Directive {
                key: "prompt".to_string(),
                value: self.theme.name.to_string(),
            });
        }
        entries.append(&mut self.entries);
        fs::write(&self.output, session::serialize(&entries))?;
        tracing::debug!(path = %self.output.display(), "recording written");
        writeln!(self.out, "Session written to {}.", self.output.display())?;
        Ok(())
    }
}
