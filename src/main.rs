mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use livedemo::cli::{Cli, Commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("livedemo: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Play {
            file,
            speed,
            prompt,
            shell,
        } => commands::play::handle(&file, speed, prompt, shell),
        Commands::Record {
            file,
            shell,
            prompt,
        } => commands::record::handle(file, shell, prompt),
        Commands::Themes { preview } => {
            commands::themes::handle(preview);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "livedemo", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}
