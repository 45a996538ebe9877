//! Text formatting for REPL output.

use std::collections::BTreeSet;
use std::io::{self, Write};

use pokepistemic_core::epistemic::{EngineError, HistoryEntry, KnowledgeReport, Verdict};
use pokepistemic_core::model::world::World;
use pokepistemic_core::session::ModelStatus;

pub fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "\
Commands:
  reveal <pokemon>               Opponent sends out a Pokemon
  move <pokemon> <move>          Observe a move being used
  item <pokemon> <item>          Observe an item (activated/seen)
  noitem <pokemon> <item>        Pokemon definitely lacks an item
  ability <pokemon> <ability>    Observe an ability activating

  know move <pokemon> <move>     Query: K(has move)?
  know item <pokemon> <item>     Query: K(has item)?
  know ability <pokemon> <ab>    Query: K(has ability)?

  status [pokemon]               Show epistemic state
  history                        Show observation log
  snapshot <pokemon>             Dump the model as JSON
  pokemon                        List available Pokemon
  help                           Show this help
  quit                           Exit"
    )
}

pub fn write_error(out: &mut impl Write, err: &EngineError) -> io::Result<()> {
    writeln!(out, "error[{}]: {}", err.kind(), err)
}

pub fn write_status(
    out: &mut impl Write,
    status: &ModelStatus,
    worlds: &[World],
    list_at_most: usize,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- {} ---", status.subject)?;
    writeln!(out, "Possible sets remaining: {}", status.surviving)?;
    writeln!(out, "Eliminated sets: {}", status.eliminated)?;

    if !status.known_moves.is_empty() {
        writeln!(out, "Known moves: {}", join(&status.known_moves))?;
    }

    let unsure: BTreeSet<String> = status
        .possible_moves
        .difference(&status.known_moves)
        .cloned()
        .collect();
    if !unsure.is_empty() {
        writeln!(out, "Possible moves: {}", join(&unsure))?;
    }

    match status.known_item.as_ref() {
        Some(item) => writeln!(out, "Known item: {item}")?,
        None => writeln!(out, "Possible items: {}", join(&status.possible_items))?,
    }

    match status.known_ability.as_ref() {
        Some(ability) => writeln!(out, "Known ability: {ability}")?,
        None => writeln!(
            out,
            "Possible abilities: {}",
            join(&status.possible_abilities)
        )?,
    }

    if !worlds.is_empty() && worlds.len() <= list_at_most {
        writeln!(out, "Remaining possible sets:")?;
        for world in worlds {
            writeln!(out, "  • {}", world.source())?;
        }
    }
    Ok(())
}

pub fn write_report(
    out: &mut impl Write,
    subject: &str,
    name: &str,
    report: &KnowledgeReport,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Query: Does {subject} have {name}? ===")?;
    match report.verdict() {
        Verdict::Known => {
            writeln!(out, "  K({name}): YES - We KNOW they have it (100%)")?;
        }
        Verdict::Possible => {
            writeln!(out, "  K({name}): NO - We don't know for certain")?;
            let percent = report.fraction.map(|f| f.percent()).unwrap_or(0.0);
            writeln!(
                out,
                "  ◇({name}): YES - It's possible ({percent:.0}% of remaining sets)"
            )?;
        }
        Verdict::KnownFalse => {
            writeln!(out, "  K(¬{name}): YES - We KNOW they DON'T have it (0%)")?;
        }
    }
    if !report.recognized {
        writeln!(
            out,
            "  note: {name} never appears in any catalog set for {subject}"
        )?;
    }
    Ok(())
}

pub fn write_history(out: &mut impl Write, history: &[HistoryEntry]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Observation History ===")?;
    if history.is_empty() {
        writeln!(out, "No observations yet.")?;
    }
    for entry in history {
        writeln!(
            out,
            "{}. {}: {} (eliminated {}, {} remaining)",
            entry.step, entry.subject, entry.proposition, entry.eliminated, entry.surviving_after
        )?;
    }
    Ok(())
}

fn join(values: &BTreeSet<String>) -> String {
    values
        .iter()
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(", ")
}
