//! Command-line interface for the `oca` runner.

use clap::Parser;
use std::path::PathBuf;
use strictly_goose::{DoubleRollPolicy, UnderflowPolicy};

/// Strictly Goose - plays a goose game and writes its animation script
#[derive(Parser, Debug)]
#[command(name = "oca")]
#[command(about = "Plays a goose game on a board file and writes the animation script", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Board definition file (starts with `OCA TAVOLA`)
    pub input: PathBuf,

    /// Animation script to write
    pub output: PathBuf,

    /// Player names in turn order; prompted for when omitted
    pub names: Vec<String>,

    /// Number of players to prompt for when no names are given
    #[arg(short, long, default_value = "2")]
    pub players: usize,

    /// Rules file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dice seed, overrides the rules file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Behaviour of DOPPIO cells: roll-again or extra-turn
    #[arg(long)]
    pub double_roll: Option<DoubleRollPolicy>,

    /// Behaviour of INDIETRO cells that would leave the track: reject or clamp
    #[arg(long)]
    pub go_back_underflow: Option<UnderflowPolicy>,

    /// Also write the events as JSON lines to this file
    #[arg(long)]
    pub events_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_names() {
        let cli = Cli::parse_from(["oca", "board.txt", "out.txt", "Anna", "Bruno"]);
        assert_eq!(cli.input, PathBuf::from("board.txt"));
        assert_eq!(cli.names, ["Anna", "Bruno"]);
        assert_eq!(cli.players, 2);
        assert!(cli.double_roll.is_none());
    }

    #[test]
    fn test_policy_flags() {
        let cli = Cli::parse_from([
            "oca",
            "board.txt",
            "out.txt",
            "--double-roll",
            "extra-turn",
            "--go-back-underflow",
            "clamp",
            "--seed",
            "7",
        ]);
        assert_eq!(cli.double_roll, Some(DoubleRollPolicy::ExtraTurn));
        assert_eq!(cli.go_back_underflow, Some(UnderflowPolicy::Clamp));
        assert_eq!(cli.seed, Some(7));
        assert!(cli.names.is_empty());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = Cli::try_parse_from(["oca", "b", "o", "--double-roll", "twice"]);
        assert!(result.is_err());
    }
}
