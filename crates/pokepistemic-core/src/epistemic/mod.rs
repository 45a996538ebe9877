//! Epistemic model engine: possible worlds per subject, public announcements and
//! knowledge queries over an S5 frame.
//!
//! This module is composed of:
//! - `model`: the per-subject world set (`EpistemicModel`) and the announcement update.
//! - `query`: K(φ), ◇(φ) and fraction evaluation plus derived summaries.
//! - `registry`: subject → model mapping with idempotent creation.
//! - `history`: append-only log of applied announcements.
//! - `vocabulary`: names a subject's catalog entry can mention.

mod error;
mod history;
mod model;
mod query;
mod registry;
mod vocabulary;

pub use error::{EngineError, ErrorKind};
pub use history::{HistoryEntry, HistoryLog};
pub use model::{Elimination, EpistemicModel, Observation};
pub use query::{Fraction, KnowledgeReport, Verdict};
pub use registry::ModelRegistry;
pub use vocabulary::Vocabulary;
