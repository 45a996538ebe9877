use super::{EngineError, EpistemicModel};
use crate::catalog::Catalog;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{Level, event};

/// Owns every live model, keyed by the exact subject string supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, EpistemicModel>,
    order: Vec<String>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the model for `subject`, building it from the catalog on first use.
    ///
    /// An existing model is returned untouched, so re-revealing keeps accumulated
    /// knowledge. The flag reports whether a model was created by this call.
    pub fn get_or_create<C>(
        &mut self,
        subject: &str,
        catalog: &C,
    ) -> Result<(&mut EpistemicModel, bool), EngineError>
    where
        C: Catalog + ?Sized,
    {
        match self.models.entry(subject.to_string()) {
            Entry::Occupied(entry) => Ok((entry.into_mut(), false)),
            Entry::Vacant(entry) => {
                let candidates = catalog
                    .candidates(subject)
                    .filter(|sets| !sets.is_empty())
                    .ok_or_else(|| EngineError::UnknownSubject {
                        subject: subject.to_string(),
                    })?;
                let model = EpistemicModel::from_candidates(subject, candidates);
                event!(
                    target: "pokepistemic_core::reveal",
                    Level::INFO,
                    subject = %subject,
                    worlds = model.surviving_count(),
                );
                self.order.push(subject.to_string());
                Ok((entry.insert(model), true))
            }
        }
    }

    pub fn get(&self, subject: &str) -> Result<&EpistemicModel, EngineError> {
        self.models
            .get(subject)
            .ok_or_else(|| EngineError::NoActiveModel {
                subject: subject.to_string(),
            })
    }

    pub fn get_mut(&mut self, subject: &str) -> Result<&mut EpistemicModel, EngineError> {
        self.models
            .get_mut(subject)
            .ok_or_else(|| EngineError::NoActiveModel {
                subject: subject.to_string(),
            })
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.models.contains_key(subject)
    }

    /// Models in reveal order.
    pub fn iter(&self) -> impl Iterator<Item = &EpistemicModel> {
        self.order
            .iter()
            .filter_map(|subject| self.models.get(subject))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
