//! `record` subcommand handler.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};

use livedemo::{prompt, shell, Config, Recorder};

pub fn handle(
    file: PathBuf,
    shell_override: Option<PathBuf>,
    prompt_override: Option<String>,
) -> Result<ExitCode> {
    let config = Config::load()?;
    let shell = shell_override
        .or(config.shell)
        .unwrap_or_else(shell::default_shell);

    // Only an explicit -p ends up as a prompt directive in the recording.
    let custom_theme = prompt_override.is_some();
    let theme_name = prompt_override
        .as_deref()
        .or(config.prompt.as_deref())
        .unwrap_or("default");
    let Some(theme) = prompt::lookup(theme_name) else {
        bail!("unknown prompt theme: {theme_name}");
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let mut recorder = Recorder::new(file, shell, theme, custom_theme, &mut input, &mut out)?;
    recorder.run()?;
    Ok(ExitCode::SUCCESS)
}
