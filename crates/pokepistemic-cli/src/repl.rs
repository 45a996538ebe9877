//! Line-oriented command surface driving a [`Session`].

use std::io::{self, BufRead, Write};

use pokepistemic_core::catalog::{Catalog, SetCatalog};
use pokepistemic_core::epistemic::EngineError;
use pokepistemic_core::model::proposition::FactKind;
use pokepistemic_core::session::{ModelSnapshot, Session};
use thiserror::Error;

use crate::config::DisplayConfig;
use crate::normalize::{resolve_or_title, resolve_species, title_case};
use crate::render;

/// Parsed user command. Names are kept as typed; resolution happens at execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reveal { pokemon: String },
    Observe { kind: Observed, pokemon: String, name: String },
    Know { kind: FactKind, pokemon: String, name: String },
    Status { pokemon: Option<String> },
    History,
    Snapshot { pokemon: String },
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    Move,
    Item,
    NoItem,
    Ability,
}

impl Observed {
    fn fact_kind(self) -> FactKind {
        match self {
            Observed::Move => FactKind::Move,
            Observed::Item | Observed::NoItem => FactKind::Item,
            Observed::Ability => FactKind::Ability,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Unknown command: {0}. Type 'help' for commands.")]
    Unknown(String),
}

impl Command {
    /// Parses one input line. Returns `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(action) = parts.first() else {
            return Ok(None);
        };

        let command = match action.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => Command::Quit,
            "help" | "h" | "?" => Command::Help,
            "pokemon" | "list" => Command::List,
            "history" => Command::History,
            "reveal" => {
                if parts.len() < 2 {
                    return Err(CommandError::Usage("reveal <pokemon>"));
                }
                Command::Reveal {
                    pokemon: parts[1..].join(" "),
                }
            }
            "snapshot" => {
                if parts.len() < 2 {
                    return Err(CommandError::Usage("snapshot <pokemon>"));
                }
                Command::Snapshot {
                    pokemon: parts[1..].join(" "),
                }
            }
            "status" => Command::Status {
                pokemon: (parts.len() > 1).then(|| parts[1..].join(" ")),
            },
            "move" => observe(&parts, Observed::Move, "move <pokemon> <move>")?,
            "item" => observe(&parts, Observed::Item, "item <pokemon> <item>")?,
            "noitem" => observe(&parts, Observed::NoItem, "noitem <pokemon> <item>")?,
            "ability" => observe(&parts, Observed::Ability, "ability <pokemon> <ability>")?,
            "know" => {
                const USAGE: &str = "know move|item|ability <pokemon> <name>";
                if parts.len() < 4 {
                    return Err(CommandError::Usage(USAGE));
                }
                let kind = match parts[1].to_ascii_lowercase().as_str() {
                    "move" => FactKind::Move,
                    "item" => FactKind::Item,
                    "ability" => FactKind::Ability,
                    _ => return Err(CommandError::Usage(USAGE)),
                };
                Command::Know {
                    kind,
                    pokemon: parts[2].to_string(),
                    name: parts[3..].join(" "),
                }
            }
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn observe(parts: &[&str], kind: Observed, usage: &'static str) -> Result<Command, CommandError> {
    if parts.len() < 3 {
        return Err(CommandError::Usage(usage));
    }
    Ok(Command::Observe {
        kind,
        pokemon: parts[1].to_string(),
        name: parts[2..].join(" "),
    })
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl {
    session: Session,
    catalog: SetCatalog,
    display: DisplayConfig,
}

impl Repl {
    pub fn new(catalog: SetCatalog, display: DisplayConfig) -> Self {
        Self {
            session: Session::new(),
            catalog,
            display,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads commands until EOF or `quit`. Command failures are reported and the loop continues.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        prompt: bool,
    ) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, ">>> ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                writeln!(out, "\nGoodbye!")?;
                return Ok(());
            };
            let line = line?;
            let trimmed = line.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            match Command::parse(trimmed) {
                Ok(Some(command)) => {
                    if self.execute(command, out)? == Flow::Quit {
                        writeln!(out, "Goodbye!")?;
                        return Ok(());
                    }
                }
                Ok(None) => {}
                Err(err) => writeln!(out, "{err}")?,
            }
        }
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => render::write_help(out)?,
            Command::List => self.list(out)?,
            Command::History => render::write_history(out, self.session.history())?,
            Command::Reveal { pokemon } => self.reveal(&pokemon, out)?,
            Command::Observe {
                kind,
                pokemon,
                name,
            } => self.observe(kind, &pokemon, &name, out)?,
            Command::Know {
                kind,
                pokemon,
                name,
            } => self.know(kind, &pokemon, &name, out)?,
            Command::Status { pokemon } => self.status(pokemon.as_deref(), out)?,
            Command::Snapshot { pokemon } => self.snapshot(&pokemon, out)?,
        }
        Ok(Flow::Continue)
    }

    fn species(&self, input: &str) -> String {
        resolve_species(input, &self.catalog.species())
    }

    /// Maps a typed name onto the spelling used by the subject's catalog entry.
    fn fact_name(&self, pokemon: &str, kind: FactKind, input: &str) -> String {
        match self.session.model(pokemon) {
            Ok(model) => resolve_or_title(
                input,
                model.vocabulary().names(kind).iter().map(String::as_str),
            ),
            Err(_) => title_case(input),
        }
    }

    fn list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Available Pokemon:")?;
        for species in self.catalog.species() {
            let sets = self.catalog.candidates(species).map_or(0, <[_]>::len);
            writeln!(out, "  • {species} ({sets} sets)")?;
        }
        Ok(())
    }

    fn reveal<W: Write>(&mut self, input: &str, out: &mut W) -> io::Result<()> {
        let pokemon = self.species(input);
        match self.session.reveal(&self.catalog, &pokemon) {
            Ok(outcome) if outcome.created => {
                writeln!(out)?;
                writeln!(
                    out,
                    "✓ {pokemon} revealed! Initialized with {} possible sets.",
                    outcome.worlds
                )?;
                self.write_status(&pokemon, out)
            }
            Ok(outcome) => writeln!(
                out,
                "{pokemon} already revealed ({} possible sets remain).",
                outcome.worlds
            ),
            Err(err) => {
                render::write_error(out, &err)?;
                let similar = self.catalog.search(input.trim());
                if similar.is_empty() {
                    writeln!(out, "Available: {}", self.catalog.species().join(", "))
                } else {
                    writeln!(out, "Did you mean: {}", similar.join(", "))
                }
            }
        }
    }

    fn observe<W: Write>(
        &mut self,
        kind: Observed,
        input: &str,
        name: &str,
        out: &mut W,
    ) -> io::Result<()> {
        let pokemon = self.species(input);
        let name = self.fact_name(&pokemon, kind.fact_kind(), name);
        let result = match kind {
            Observed::Move => self.session.observe_move(&pokemon, &name),
            Observed::Item => self.session.observe_item(&pokemon, &name),
            Observed::NoItem => self.session.observe_no_item(&pokemon, &name),
            Observed::Ability => self.session.observe_ability(&pokemon, &name),
        };
        match result {
            Ok(outcome) => {
                writeln!(out)?;
                let described = match kind {
                    Observed::Move => format!("{pokemon} used {name}"),
                    Observed::Item => format!("{pokemon} has {name}"),
                    Observed::NoItem => format!("{pokemon} does NOT have {name}"),
                    Observed::Ability => format!("{pokemon} has ability {name}"),
                };
                writeln!(out, "✓ Observed: {described}")?;
                writeln!(out, "  Eliminated {} world(s)", outcome.eliminated)?;
                self.write_status(&pokemon, out)
            }
            Err(err) => {
                render::write_error(out, &err)?;
                if matches!(
                    err,
                    EngineError::ContradictoryObservation { .. }
                        | EngineError::UnrecognizedProposition { .. }
                ) {
                    writeln!(out, "  This might be a non-standard set or typo.")?;
                }
                Ok(())
            }
        }
    }

    fn know<W: Write>(
        &self,
        kind: FactKind,
        input: &str,
        name: &str,
        out: &mut W,
    ) -> io::Result<()> {
        let pokemon = self.species(input);
        let name = self.fact_name(&pokemon, kind, name);
        let result = match kind {
            FactKind::Move => self.session.know_move(&pokemon, &name),
            FactKind::Item => self.session.know_item(&pokemon, &name),
            FactKind::Ability => self.session.know_ability(&pokemon, &name),
        };
        match result {
            Ok(report) => render::write_report(out, &pokemon, &name, &report),
            Err(err) => render::write_error(out, &err),
        }
    }

    fn status<W: Write>(&self, input: Option<&str>, out: &mut W) -> io::Result<()> {
        match input {
            Some(input) => {
                let pokemon = self.species(input);
                self.write_status(&pokemon, out)
            }
            None => {
                writeln!(out)?;
                writeln!(out, "{}", "=".repeat(50))?;
                writeln!(out, "BATTLE STATUS")?;
                writeln!(out, "{}", "=".repeat(50))?;
                if self.session.registry().is_empty() {
                    writeln!(out, "No Pokemon revealed yet.")?;
                }
                for model in self.session.registry().iter() {
                    self.write_status(model.subject(), out)?;
                }
                Ok(())
            }
        }
    }

    fn snapshot<W: Write>(&self, input: &str, out: &mut W) -> io::Result<()> {
        let pokemon = self.species(input);
        match self.session.model(&pokemon) {
            Ok(model) => {
                let json = ModelSnapshot::to_json(model).map_err(io::Error::other)?;
                writeln!(out, "{json}")
            }
            Err(err) => render::write_error(out, &err),
        }
    }

    fn write_status<W: Write>(&self, pokemon: &str, out: &mut W) -> io::Result<()> {
        let status = match self.session.status(pokemon) {
            Ok(status) => status,
            Err(err) => return render::write_error(out, &err),
        };
        let worlds = self
            .session
            .model(pokemon)
            .map(|model| model.worlds())
            .unwrap_or_default();
        render::write_status(out, &status, worlds, self.display.list_worlds_at_most)
    }
}
