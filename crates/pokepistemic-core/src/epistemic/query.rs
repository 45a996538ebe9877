use super::{EngineError, EpistemicModel};
use crate::catalog::CandidateSet;
use crate::model::proposition::Proposition;
use core::fmt;
use serde::Serialize;
use std::collections::BTreeSet;

/// Share of surviving worlds satisfying a proposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fraction {
    pub matching: usize,
    pub total: usize,
}

impl Fraction {
    pub fn as_f64(self) -> f64 {
        self.matching as f64 / self.total as f64
    }

    pub fn percent(self) -> f64 {
        self.as_f64() * 100.0
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.0}%)", self.matching, self.total, self.percent())
    }
}

/// Three-way classification of a proposition against the surviving worlds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// K(φ): true in every surviving world.
    Known,
    /// ◇(φ) without K(φ).
    Possible,
    /// K(¬φ): false in every surviving world.
    KnownFalse,
}

/// Combined answer for a knowledge query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeReport {
    pub proposition: Proposition,
    pub knows: bool,
    pub possible: bool,
    pub fraction: Option<Fraction>,
    /// False when the subject's catalog entry never mentions the fact.
    pub recognized: bool,
}

impl KnowledgeReport {
    pub fn verdict(&self) -> Verdict {
        if self.knows {
            Verdict::Known
        } else if self.possible {
            Verdict::Possible
        } else {
            Verdict::KnownFalse
        }
    }
}

impl EpistemicModel {
    /// K(φ). Vacuously true when no worlds survive.
    pub fn knows(&self, proposition: &Proposition) -> bool {
        self.worlds()
            .iter()
            .all(|world| world.satisfies(proposition))
    }

    /// ◇(φ).
    pub fn possible(&self, proposition: &Proposition) -> bool {
        self.worlds()
            .iter()
            .any(|world| world.satisfies(proposition))
    }

    pub fn count_satisfying(&self, proposition: &Proposition) -> usize {
        self.worlds()
            .iter()
            .filter(|world| world.satisfies(proposition))
            .count()
    }

    /// Fraction of surviving worlds where φ holds; undefined on an empty model.
    pub fn fraction(&self, proposition: &Proposition) -> Result<Fraction, EngineError> {
        if self.is_empty() {
            return Err(EngineError::NoSurvivingWorlds {
                subject: self.subject().to_string(),
            });
        }
        Ok(Fraction {
            matching: self.count_satisfying(proposition),
            total: self.surviving_count(),
        })
    }

    pub fn report(&self, proposition: &Proposition) -> KnowledgeReport {
        KnowledgeReport {
            proposition: proposition.clone(),
            knows: self.knows(proposition),
            possible: self.possible(proposition),
            fraction: self.fraction(proposition).ok(),
            recognized: self.vocabulary().recognizes(proposition.fact()),
        }
    }

    /// Moves present in every surviving set.
    pub fn known_moves(&self) -> BTreeSet<String> {
        let mut worlds = self.worlds().iter();
        let Some(first) = worlds.next() else {
            return BTreeSet::new();
        };
        let mut known = first.source().moves.clone();
        for world in worlds {
            known.retain(|name| world.source().moves.contains(name));
        }
        known
    }

    /// Moves present in at least one surviving set.
    pub fn possible_moves(&self) -> BTreeSet<String> {
        self.worlds()
            .iter()
            .flat_map(|world| world.source().moves.iter().cloned())
            .collect()
    }

    pub fn possible_items(&self) -> BTreeSet<String> {
        self.possible_values(|set| set.item.as_str())
    }

    pub fn possible_abilities(&self) -> BTreeSet<String> {
        self.possible_values(|set| set.ability.as_str())
    }

    /// The item, when every surviving set agrees on it.
    pub fn known_item(&self) -> Option<String> {
        single(self.possible_items())
    }

    pub fn known_ability(&self) -> Option<String> {
        single(self.possible_abilities())
    }

    fn possible_values(&self, pick: impl Fn(&CandidateSet) -> &str) -> BTreeSet<String> {
        self.worlds()
            .iter()
            .map(|world| pick(world.source()).to_string())
            .collect()
    }
}

fn single(values: BTreeSet<String>) -> Option<String> {
    if values.len() == 1 {
        values.into_iter().next()
    } else {
        None
    }
}
