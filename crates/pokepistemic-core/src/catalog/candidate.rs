use core::fmt;
use serde::Serialize;
use std::collections::BTreeSet;

/// Every alternative a catalog entry lists for a set, including slash options
/// that did not make it into the concrete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetOptions {
    pub moves: BTreeSet<String>,
    pub items: BTreeSet<String>,
    pub abilities: BTreeSet<String>,
}

/// One concrete configuration an opponent could be running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSet {
    pub species: String,
    pub name: String,
    pub moves: BTreeSet<String>,
    pub item: String,
    pub ability: String,
    #[serde(skip)]
    pub options: SetOptions,
}

impl CandidateSet {
    pub fn new<I, S>(
        species: impl Into<String>,
        name: impl Into<String>,
        moves: I,
        item: impl Into<String>,
        ability: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let moves: BTreeSet<String> = moves.into_iter().map(Into::into).collect();
        let item = item.into();
        let ability = ability.into();
        let options = SetOptions {
            moves: moves.clone(),
            items: BTreeSet::from([item.clone()]),
            abilities: BTreeSet::from([ability.clone()]),
        };
        Self {
            species: species.into(),
            name: name.into(),
            moves,
            item,
            ability,
            options,
        }
    }

    /// Merges additional alternatives into the option sets.
    pub fn with_options(mut self, extra: SetOptions) -> Self {
        self.options.moves.extend(extra.moves);
        self.options.items.extend(extra.items);
        self.options.abilities.extend(extra.abilities);
        self
    }

    pub fn has_move(&self, name: &str) -> bool {
        self.moves.contains(name)
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let moves: Vec<&str> = self.moves.iter().map(String::as_str).collect();
        write!(
            f,
            "{}[{} | {} | {}]",
            self.species,
            moves.join(", "),
            self.item,
            self.ability
        )
    }
}
