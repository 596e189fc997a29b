//! livedemo — replay scripted shell sessions as if typed live, and record
//! real sessions back into scripts.
//!
//! The core pipeline is `file → session::parse → Player::run`, with
//! [`prompt`] rendering the themed prompt, [`typing`] faking the
//! keystrokes, and [`shell`] running each command in a fresh subprocess
//! rooted at the engine's tracked working directory. [`Recorder`] is the
//! inverse: live input → tracked execution → `session::serialize` → file.

pub mod cli;
pub mod config;
pub mod input;
pub mod player;
pub mod prompt;
pub mod recorder;
pub mod session;
pub mod shell;
pub mod typing;

pub use config::Config;
pub use player::{PlayOverrides, PlaybackState, Player, RunOutcome};
pub use recorder::Recorder;
pub use session::{Entry, Session};
pub use typing::{Outcome, TypingSimulator};
