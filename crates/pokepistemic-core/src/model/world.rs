use crate::catalog::CandidateSet;
use crate::model::proposition::{Fact, FactKind, Proposition};
use core::fmt;
use std::sync::Arc;

/// One possible world: an immutable candidate configuration.
///
/// The valuation is evaluated lazily against the source fields and is total:
/// a fact the configuration does not mention is simply false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    id: usize,
    source: Arc<CandidateSet>,
}

impl World {
    pub fn new(id: usize, source: CandidateSet) -> Self {
        Self {
            id,
            source: Arc::new(source),
        }
    }

    /// Stable ordinal within the owning model.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn source(&self) -> &CandidateSet {
        &self.source
    }

    /// Truth value of an atomic fact in this world.
    pub fn holds(&self, fact: &Fact) -> bool {
        match fact.kind {
            FactKind::Move => self.source.moves.contains(&fact.value),
            FactKind::Item => self.source.item == fact.value,
            FactKind::Ability => self.source.ability == fact.value,
        }
    }

    /// Satisfaction relation `w ⊨ φ`.
    pub fn satisfies(&self, proposition: &Proposition) -> bool {
        self.holds(proposition.fact()) != proposition.is_negated()
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{} {}", self.id, self.source)
    }
}
