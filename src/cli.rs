// Author: Dustin Pilgrim
// License: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "orrery",
    version = env!("CARGO_PKG_VERSION"),
    about = "Orrery countdown timer"
)]
pub struct Args {
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(about = "Start the countdown, or resume it after a pause")]
    Start,

    #[command(about = "Pause a running countdown")]
    Pause,

    #[command(about = "Resume a paused countdown")]
    Resume,

    #[command(about = "Stop the countdown and return to the configured duration")]
    Reset,

    #[command(
        about = "Set the countdown duration (idle only)",
        allow_negative_numbers = true
    )]
    Set {
        /// `SS`, `MM:SS`, `HH:MM:SS` or unit form such as `25m` / `1h30m`
        duration: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        hours: Option<i64>,

        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,

        #[arg(long, allow_negative_numbers = true)]
        seconds: Option<i64>,
    },

    #[command(about = "Follow a body with the camera")]
    Focus {
        id: String,
    },

    #[command(about = "Return the camera to the overview")]
    Unfocus,

    #[command(about = "Display current timer information")]
    Info {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "Display the latest animation frame")]
    Frame {
        #[arg(long)]
        json: bool,
    },

    #[command(about = "List the bodies of the scene")]
    Bodies,

    #[command(about = "Reload the configuration without restarting Orrery")]
    Reload,

    #[command(about = "Stop the running Orrery daemon")]
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_is_daemon_mode() {
        let args = Args::try_parse_from(["orrery", "-v"]).unwrap();
        assert!(args.verbose);
        assert!(args.command.is_none());
    }

    #[test]
    fn set_accepts_fields_and_negative_numbers() {
        let args = Args::try_parse_from(["orrery", "set", "--minutes", "-5", "--seconds", "90"])
            .unwrap();

        match args.command {
            Some(Command::Set { duration, hours, minutes, seconds }) => {
                assert_eq!(duration, None);
                assert_eq!(hours, None);
                assert_eq!(minutes, Some(-5));
                assert_eq!(seconds, Some(90));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn info_takes_json_flag() {
        let args = Args::try_parse_from(["orrery", "info", "--json"]).unwrap();
        assert!(matches!(args.command, Some(Command::Info { json: true })));
    }
}
