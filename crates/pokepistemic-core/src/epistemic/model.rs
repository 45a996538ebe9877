use super::{EngineError, Vocabulary};
use crate::catalog::CandidateSet;
use crate::model::proposition::Proposition;
use crate::model::world::World;
use tracing::{Level, event};

/// A world removed by an announcement, kept for audit and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elimination {
    pub world: World,
    pub reason: Proposition,
    pub step: u64,
}

/// Unit handed to the announcement processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub subject: String,
    pub proposition: Proposition,
    pub step: u64,
}

/// Possible worlds for one tracked subject.
///
/// `worlds` and `eliminated` always partition the worlds built at creation.
/// Accessibility is the complete relation over `worlds`, so it is never stored.
#[derive(Debug, Clone)]
pub struct EpistemicModel {
    subject: String,
    worlds: Vec<World>,
    eliminated: Vec<Elimination>,
    vocabulary: Vocabulary,
}

impl EpistemicModel {
    /// Builds one world per candidate, in catalog order, with sequential ids.
    pub fn from_candidates(subject: impl Into<String>, candidates: &[CandidateSet]) -> Self {
        let worlds = candidates
            .iter()
            .enumerate()
            .map(|(id, candidate)| World::new(id, candidate.clone()))
            .collect();
        Self {
            subject: subject.into(),
            worlds,
            eliminated: Vec::new(),
            vocabulary: Vocabulary::from_candidates(candidates),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Surviving worlds, in original relative order.
    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub fn eliminated(&self) -> &[Elimination] {
        &self.eliminated
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn surviving_count(&self) -> usize {
        self.worlds.len()
    }

    pub fn eliminated_count(&self) -> usize {
        self.eliminated.len()
    }

    pub fn total_worlds(&self) -> usize {
        self.worlds.len() + self.eliminated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// Public announcement `[!φ]`: removes every world where φ is false.
    ///
    /// All-or-nothing: if no world satisfies φ the model is left unchanged and
    /// `ContradictoryObservation` is returned. Returns the number of worlds removed.
    pub fn announce(&mut self, proposition: &Proposition, step: u64) -> Result<usize, EngineError> {
        if !self.worlds.iter().any(|world| world.satisfies(proposition)) {
            event!(
                target: "pokepistemic_core::contradiction",
                Level::WARN,
                subject = %self.subject,
                proposition = %proposition,
                step,
                surviving = self.worlds.len(),
            );
            return Err(EngineError::ContradictoryObservation {
                subject: self.subject.clone(),
                proposition: proposition.clone(),
                surviving: self.worlds.len(),
            });
        }

        let (keep, drop): (Vec<World>, Vec<World>) = std::mem::take(&mut self.worlds)
            .into_iter()
            .partition(|world| world.satisfies(proposition));
        let removed = drop.len();
        self.worlds = keep;
        self.eliminated
            .extend(drop.into_iter().map(|world| Elimination {
                world,
                reason: proposition.clone(),
                step,
            }));

        event!(
            target: "pokepistemic_core::announcement",
            Level::INFO,
            subject = %self.subject,
            proposition = %proposition,
            step,
            eliminated = removed,
            surviving = self.worlds.len(),
        );
        Ok(removed)
    }

    /// Applies an [`Observation`] addressed to this model.
    pub fn apply(&mut self, observation: &Observation) -> Result<usize, EngineError> {
        debug_assert_eq!(observation.subject, self.subject);
        self.announce(&observation.proposition, observation.step)
    }
}
