//! Catalog of candidate sets per species.
//!
//! The engine treats the catalog as a read-only collaborator: it is consulted once
//! per reveal to build the initial world set and is never mutated.
//! - `candidate`: a single concrete set (`CandidateSet`) plus the alternatives it lists.
//! - `sets`: `SetCatalog`, loaded from Smogon-style JSON or the built-in fallback table.

mod candidate;
mod fallback;
mod sets;

pub use candidate::{CandidateSet, SetOptions};
pub use sets::{CatalogError, SetCatalog};

/// Lookup table of candidate configurations keyed by species name.
pub trait Catalog {
    /// Candidate sets for `species`, in catalog order. `None` when the species is absent.
    fn candidates(&self, species: &str) -> Option<&[CandidateSet]>;

    /// Species names in catalog order.
    fn species(&self) -> Vec<&str>;
}
