//! Strictly Goose - command-line runner
//!
//! Loads a board file, plays a game with random dice and writes the
//! animation script for the viewer.

#![warn(missing_docs)]

mod cli;
mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::fs::File;
use std::io;
use strictly_goose::{
    Game, GameSummary, JsonLinesWriter, RandomDice, Roster, RulesConfig, ScriptWriter, Tee,
    load_board_file,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the prompts and the summary
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let input = cli.input.clone();
    let output = cli.output.clone();
    let (players, summary) = run(cli)?;
    println!("Tavola:    {}", input.display());
    println!("Copione:   {}", output.display());
    println!("Giocatori: {}", players.join(", "));
    println!(
        "Vincitore: {} (giocatore {}) dopo {} turni in {} giri",
        summary.winner_name, summary.winner_ordinal, summary.turns, summary.rounds
    );
    Ok(())
}

/// Plays one game as described by the command line.
#[instrument(skip_all, fields(input = %cli.input.display(), output = %cli.output.display()))]
fn run(cli: Cli) -> Result<(Vec<String>, GameSummary)> {
    let rules = load_rules(&cli)?;
    info!(?rules, "Rules in force");

    let board = load_board_file(&cli.input)
        .with_context(|| format!("Failed to load board {}", cli.input.display()))?
        .into_board(*rules.go_back_underflow())
        .with_context(|| format!("Invalid board {}", cli.input.display()))?;

    let roster = if cli.names.is_empty() {
        prompt::prompt_roster(cli.players, io::stdin().lock(), io::stdout())?
    } else {
        Roster::from_names(cli.names.iter().cloned())
    };

    let players: Vec<String> = roster.players().iter().map(|p| p.name().clone()).collect();
    let dice = RandomDice::from_seed(*rules.seed());
    let mut game = Game::new(board, roster, rules)?;

    let script = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let script = ScriptWriter::new(script);

    let summary = match &cli.events_json {
        Some(path) => {
            let json = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            game.play(dice, Tee::new(script, JsonLinesWriter::new(json)))?
        }
        None => game.play(dice, script)?,
    };

    info!(winner = %summary.winner_name, "Script written");
    Ok((players, summary))
}

/// Reads the rules file, if any, then applies command-line overrides.
fn load_rules(cli: &Cli) -> Result<RulesConfig> {
    let mut rules = match &cli.config {
        Some(path) => RulesConfig::from_file(path)
            .with_context(|| format!("Failed to load rules {}", path.display()))?,
        None => RulesConfig::new(),
    };

    if let Some(policy) = cli.double_roll {
        rules = rules.with_double_roll(policy);
    }
    if let Some(policy) = cli.go_back_underflow {
        rules = rules.with_go_back_underflow(policy);
    }
    if cli.seed.is_some() {
        rules = rules.with_seed(cli.seed);
    }
    Ok(rules)
}
