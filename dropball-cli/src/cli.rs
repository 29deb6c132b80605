use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dropball",
    about = "Run the Dropball physics demo without a browser",
    version,
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Step the demo headlessly at a fixed timestep and print its state
    Run {
        /// Number of frames to simulate
        #[arg(long, default_value_t = 1000)]
        frames: u64,
        /// Seconds per frame
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Print a status line every N frames (resets are always printed)
        #[arg(long, default_value_t = 60)]
        every: u64,
        /// Config file (default: nearest dropball.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Live terminal view stepping with wall-clock time
    Watch {
        /// Config file (default: nearest dropball.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Config {
        /// Config file (default: nearest dropball.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["dropball", "run"]).unwrap();
        match cli.command {
            Some(Command::Run { frames, every, config, .. }) => {
                assert_eq!(frames, 1000);
                assert_eq!(every, 60);
                assert!(config.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_run_overrides() {
        let cli = Cli::try_parse_from([
            "dropball", "run", "--frames", "10", "--dt", "0.5", "--every", "2", "--config", "x.toml",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Run { frames, dt, every, config }) => {
                assert_eq!(frames, 10);
                assert_eq!(dt, 0.5);
                assert_eq!(every, 2);
                assert_eq!(config, Some(PathBuf::from("x.toml")));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["dropball"]).unwrap();
        assert!(cli.command.is_none());
    }
}
