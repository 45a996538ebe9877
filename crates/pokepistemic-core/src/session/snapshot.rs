use crate::epistemic::EpistemicModel;
use crate::model::proposition::Proposition;
use crate::model::world::World;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Read-only view of a world for renderers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorldView {
    pub id: usize,
    pub set_name: String,
    pub moves: BTreeSet<String>,
    pub item: String,
    pub ability: String,
}

impl WorldView {
    fn from_world(world: &World) -> Self {
        let source = world.source();
        Self {
            id: world.id(),
            set_name: source.name.clone(),
            moves: source.moves.clone(),
            item: source.item.clone(),
            ability: source.ability.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EliminatedView {
    pub world: WorldView,
    pub reason: Proposition,
    pub step: u64,
}

/// Snapshot of one model: surviving worlds plus eliminated worlds with their reasons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelSnapshot {
    pub subject: String,
    pub surviving: Vec<WorldView>,
    pub eliminated: Vec<EliminatedView>,
}

impl ModelSnapshot {
    pub fn capture(model: &EpistemicModel) -> Self {
        ModelSnapshot {
            subject: model.subject().to_string(),
            surviving: model.worlds().iter().map(WorldView::from_world).collect(),
            eliminated: model
                .eliminated()
                .iter()
                .map(|elimination| EliminatedView {
                    world: WorldView::from_world(&elimination.world),
                    reason: elimination.reason.clone(),
                    step: elimination.step,
                })
                .collect(),
        }
    }

    pub fn to_json(model: &EpistemicModel) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(model))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
