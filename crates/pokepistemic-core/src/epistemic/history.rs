use crate::model::proposition::Proposition;
use serde::{Deserialize, Serialize};

/// Record of one applied announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub step: u64,
    pub subject: String,
    pub proposition: Proposition,
    pub eliminated: usize,
    pub surviving_after: usize,
}

/// Append-only, step-ordered log shared by every model of a session.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        debug_assert!(
            self.entries
                .last()
                .is_none_or(|last| last.step < entry.step),
            "history steps must increase"
        );
        self.entries.push(entry);
    }

    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a HistoryEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.subject == subject)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
