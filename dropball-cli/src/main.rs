mod cli;
mod commands;
mod project;
mod state;
mod ui;

use clap::Parser;

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Run {
            frames,
            dt,
            every,
            config,
        }) => commands::run_cmd::run(frames, dt, every, config),
        Some(Command::Config { config }) => commands::config_cmd::run(config),
        Some(Command::Watch { config }) => commands::watch_cmd::run(config),
        None => commands::watch_cmd::run(None),
    }
}
