//! `play` subcommand handler.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};

use livedemo::input::TerminalKeys;
use livedemo::player::{PlayOverrides, PlaybackState, Player, RunOutcome};
use livedemo::typing::TypingSimulator;
use livedemo::{Config, Session};

pub fn handle(
    file: &Path,
    speed: Option<f64>,
    prompt: Option<String>,
    shell: Option<PathBuf>,
) -> Result<ExitCode> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read session file {}", file.display()))?;
    let session = Session::parse(&text);

    let config = Config::load()?;
    let overrides = PlayOverrides {
        speed,
        prompt,
        shell,
    };
    let state = PlaybackState::prepare(&config, &overrides)?;

    let mut keys = TerminalKeys::new();
    let mut out = io::stdout();
    let mut player = Player::new(state, TypingSimulator::new(), &mut keys, &mut out)
        .with_locked(overrides);

    match player.run(&session)? {
        RunOutcome::Finished => Ok(ExitCode::SUCCESS),
        RunOutcome::Aborted => {
            eprintln!("Aborted.");
            Ok(ExitCode::FAILURE)
        }
    }
}
