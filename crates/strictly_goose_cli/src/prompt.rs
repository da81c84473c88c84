//! Interactive roster entry.

use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use strictly_goose::Roster;
use tracing::{debug, instrument};

/// Asks for `count` player names, one per line.
///
/// A blank answer keeps the default name `Giocatore <n>`.
#[instrument(skip(input, output))]
pub fn prompt_roster(count: usize, mut input: impl BufRead, mut output: impl Write) -> Result<Roster> {
    if count == 0 {
        bail!("At least one player is needed");
    }

    let mut roster = Roster::new();
    for ordinal in 1..=count {
        write!(output, "Nome del giocatore {}: ", ordinal)?;
        output.flush()?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read player name")?;
        if read == 0 {
            bail!("Input ended after {} of {} players", ordinal - 1, count);
        }

        let name = match line.trim() {
            "" => format!("Giocatore {}", ordinal),
            name => name.to_string(),
        };
        debug!(ordinal, name = %name, "Name entered");
        roster.join(name);
    }
    Ok(roster)
}
