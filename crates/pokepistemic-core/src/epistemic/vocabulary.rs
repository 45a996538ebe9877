use crate::catalog::CandidateSet;
use crate::model::proposition::{Fact, FactKind};
use std::collections::BTreeSet;

/// Names a subject's catalog entry can mention, slash alternatives included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    moves: BTreeSet<String>,
    items: BTreeSet<String>,
    abilities: BTreeSet<String>,
}

impl Vocabulary {
    pub fn from_candidates(candidates: &[CandidateSet]) -> Self {
        let mut vocabulary = Self::default();
        for candidate in candidates {
            vocabulary.moves.extend(candidate.options.moves.iter().cloned());
            vocabulary.moves.extend(candidate.moves.iter().cloned());
            vocabulary.items.extend(candidate.options.items.iter().cloned());
            vocabulary.items.insert(candidate.item.clone());
            vocabulary
                .abilities
                .extend(candidate.options.abilities.iter().cloned());
            vocabulary.abilities.insert(candidate.ability.clone());
        }
        vocabulary
    }

    pub fn recognizes(&self, fact: &Fact) -> bool {
        self.names(fact.kind).contains(&fact.value)
    }

    pub fn names(&self, kind: FactKind) -> &BTreeSet<String> {
        match kind {
            FactKind::Move => &self.moves,
            FactKind::Item => &self.items,
            FactKind::Ability => &self.abilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SetOptions;

    #[test]
    fn includes_unselected_alternatives() {
        let candidate = CandidateSet::new(
            "Kingambit",
            "SD",
            ["Swords Dance", "Sucker Punch"],
            "Black Glasses",
            "Supreme Overlord",
        )
        .with_options(SetOptions {
            moves: BTreeSet::from(["Iron Head".to_string()]),
            items: BTreeSet::from(["Leftovers".to_string()]),
            abilities: BTreeSet::new(),
        });
        let vocabulary = Vocabulary::from_candidates(&[candidate]);

        assert!(vocabulary.recognizes(&Fact::new(FactKind::Move, "Iron Head")));
        assert!(vocabulary.recognizes(&Fact::new(FactKind::Item, "Leftovers")));
        assert!(vocabulary.recognizes(&Fact::new(FactKind::Ability, "Supreme Overlord")));
        assert!(!vocabulary.recognizes(&Fact::new(FactKind::Move, "Surf")));
    }
}
