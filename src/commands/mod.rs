//! CLI subcommand handlers.

pub mod play;
pub mod record;
pub mod themes;
