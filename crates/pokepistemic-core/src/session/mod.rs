//! Session context: one registry plus one history log, exposing the operations the
//! command surface drives. Sessions are plain values, so independent battles can
//! each own one.

mod snapshot;

pub use snapshot::{EliminatedView, ModelSnapshot, WorldView};

use crate::catalog::Catalog;
use crate::epistemic::{
    EngineError, EpistemicModel, HistoryEntry, HistoryLog, KnowledgeReport, ModelRegistry,
    Observation,
};
use crate::model::proposition::Proposition;
use std::collections::BTreeSet;
use tracing::{Level, event};

/// Result of a reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealOutcome {
    pub subject: String,
    pub worlds: usize,
    /// False when the subject was already tracked and nothing changed.
    pub created: bool,
}

/// Result of a successful announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementOutcome {
    pub step: u64,
    pub eliminated: usize,
    pub surviving: usize,
}

/// Epistemic summary of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatus {
    pub subject: String,
    pub surviving: usize,
    pub eliminated: usize,
    pub known_moves: BTreeSet<String>,
    pub possible_moves: BTreeSet<String>,
    pub possible_items: BTreeSet<String>,
    pub known_item: Option<String>,
    pub possible_abilities: BTreeSet<String>,
    pub known_ability: Option<String>,
}

impl ModelStatus {
    pub fn capture(model: &EpistemicModel) -> Self {
        Self {
            subject: model.subject().to_string(),
            surviving: model.surviving_count(),
            eliminated: model.eliminated_count(),
            known_moves: model.known_moves(),
            possible_moves: model.possible_moves(),
            possible_items: model.possible_items(),
            known_item: model.known_item(),
            possible_abilities: model.possible_abilities(),
            known_ability: model.known_ability(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    registry: ModelRegistry,
    history: HistoryLog,
    steps: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the subject's model from the catalog, or returns the existing one unchanged.
    pub fn reveal<C>(&mut self, catalog: &C, subject: &str) -> Result<RevealOutcome, EngineError>
    where
        C: Catalog + ?Sized,
    {
        let (model, created) = self.registry.get_or_create(subject, catalog)?;
        Ok(RevealOutcome {
            subject: subject.to_string(),
            worlds: model.surviving_count(),
            created,
        })
    }

    /// Applies a public announcement to the subject's model and records it.
    ///
    /// A positive proposition about a fact outside the subject's vocabulary is
    /// rejected as `UnrecognizedProposition`; its negation is trivially true.
    pub fn observe(
        &mut self,
        subject: &str,
        proposition: Proposition,
    ) -> Result<AnnouncementOutcome, EngineError> {
        let model = self.registry.get_mut(subject)?;
        let recognized = model.vocabulary().recognizes(proposition.fact());
        if !recognized && !proposition.is_negated() {
            return Err(EngineError::UnrecognizedProposition {
                subject: subject.to_string(),
                proposition,
            });
        }
        if !recognized {
            event!(
                target: "pokepistemic_core::vocabulary",
                Level::DEBUG,
                subject = %subject,
                proposition = %proposition,
                "negated fact is outside the vocabulary",
            );
        }

        let observation = Observation {
            subject: subject.to_string(),
            proposition,
            step: self.steps + 1,
        };
        let eliminated = model.apply(&observation)?;
        let surviving = model.surviving_count();

        self.steps = observation.step;
        self.history.append(HistoryEntry {
            step: observation.step,
            subject: observation.subject,
            proposition: observation.proposition,
            eliminated,
            surviving_after: surviving,
        });

        Ok(AnnouncementOutcome {
            step: self.steps,
            eliminated,
            surviving,
        })
    }

    pub fn observe_move(
        &mut self,
        subject: &str,
        name: &str,
    ) -> Result<AnnouncementOutcome, EngineError> {
        self.observe(subject, Proposition::has_move(name))
    }

    pub fn observe_item(
        &mut self,
        subject: &str,
        name: &str,
    ) -> Result<AnnouncementOutcome, EngineError> {
        self.observe(subject, Proposition::has_item(name))
    }

    pub fn observe_no_item(
        &mut self,
        subject: &str,
        name: &str,
    ) -> Result<AnnouncementOutcome, EngineError> {
        self.observe(subject, Proposition::has_item(name).negate())
    }

    pub fn observe_ability(
        &mut self,
        subject: &str,
        name: &str,
    ) -> Result<AnnouncementOutcome, EngineError> {
        self.observe(subject, Proposition::has_ability(name))
    }

    /// Evaluates K, ◇ and the fraction for `proposition`. Never fails on unrecognized facts.
    pub fn query(
        &self,
        subject: &str,
        proposition: &Proposition,
    ) -> Result<KnowledgeReport, EngineError> {
        Ok(self.registry.get(subject)?.report(proposition))
    }

    pub fn know_move(&self, subject: &str, name: &str) -> Result<KnowledgeReport, EngineError> {
        self.query(subject, &Proposition::has_move(name))
    }

    pub fn know_item(&self, subject: &str, name: &str) -> Result<KnowledgeReport, EngineError> {
        self.query(subject, &Proposition::has_item(name))
    }

    pub fn know_ability(&self, subject: &str, name: &str) -> Result<KnowledgeReport, EngineError> {
        self.query(subject, &Proposition::has_ability(name))
    }

    pub fn status(&self, subject: &str) -> Result<ModelStatus, EngineError> {
        self.registry.get(subject).map(ModelStatus::capture)
    }

    /// Status of every tracked model, in reveal order.
    pub fn statuses(&self) -> Vec<ModelStatus> {
        self.registry.iter().map(ModelStatus::capture).collect()
    }

    pub fn snapshot(&self, subject: &str) -> Result<ModelSnapshot, EngineError> {
        self.registry.get(subject).map(ModelSnapshot::capture)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.all()
    }

    pub fn model(&self, subject: &str) -> Result<&EpistemicModel, EngineError> {
        self.registry.get(subject)
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }
}
