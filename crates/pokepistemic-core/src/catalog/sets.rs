use super::fallback::fallback_entries;
use super::{CandidateSet, Catalog, SetOptions};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

const UNKNOWN_FIELD: &str = "Unknown";

/// Catalog backed by Smogon-style set data:
/// `{ "<species>": { "<set name>": { "moves": [..], "item": .., "ability": .. } } }`.
#[derive(Debug, Clone, Default)]
pub struct SetCatalog {
    entries: Vec<(String, Vec<CandidateSet>)>,
}

impl SetCatalog {
    pub fn from_entries(entries: Vec<(String, Vec<CandidateSet>)>) -> Self {
        Self { entries }
    }

    /// Built-in table with a couple of species, used when no data file is available.
    pub fn fallback() -> Self {
        Self::from_entries(fallback_entries())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        let root: Map<String, Value> = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| CatalogError::Parse {
                source,
                origin: path.display().to_string(),
            })?;
        Self::from_root(root, &path.display().to_string())
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let root: Map<String, Value> =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                source,
                origin: "<inline>".to_string(),
            })?;
        Self::from_root(root, "<inline>")
    }

    fn from_root(root: Map<String, Value>, origin: &str) -> Result<Self, CatalogError> {
        let mut entries = Vec::with_capacity(root.len());
        for (species, sets) in root {
            let sets: Map<String, Value> =
                serde_json::from_value(sets).map_err(|source| CatalogError::Parse {
                    source,
                    origin: format!("{origin} ({species})"),
                })?;
            let mut candidates = Vec::with_capacity(sets.len());
            for (set_name, raw) in sets {
                let raw: RawSet =
                    serde_json::from_value(raw).map_err(|source| CatalogError::Parse {
                        source,
                        origin: format!("{origin} ({species}/{set_name})"),
                    })?;
                candidates.push(raw.into_candidate(&species, &set_name));
            }
            entries.push((species, candidates));
        }
        Ok(Self { entries })
    }

    /// Case-insensitive substring search over species names.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_sets(&self) -> usize {
        self.entries.iter().map(|(_, sets)| sets.len()).sum()
    }
}

impl Catalog for SetCatalog {
    fn candidates(&self, species: &str) -> Option<&[CandidateSet]> {
        self.entries
            .iter()
            .find(|(name, _)| name == species)
            .map(|(_, sets)| sets.as_slice())
    }

    fn species(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// A slot is either a single value or a list of interchangeable options.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Slot {
    One(String),
    Many(Vec<String>),
}

impl Slot {
    fn first(&self) -> Option<&str> {
        match self {
            Slot::One(value) => Some(value.as_str()),
            Slot::Many(values) => values.first().map(String::as_str),
        }
    }

    fn all(&self) -> impl Iterator<Item = &str> {
        let values: Vec<&str> = match self {
            Slot::One(value) => vec![value.as_str()],
            Slot::Many(values) => values.iter().map(String::as_str).collect(),
        };
        values.into_iter()
    }
}

#[derive(Debug, Deserialize)]
struct RawSet {
    #[serde(default)]
    moves: Vec<Slot>,
    #[serde(default)]
    item: Option<Slot>,
    #[serde(default)]
    ability: Option<Slot>,
}

impl RawSet {
    fn into_candidate(self, species: &str, set_name: &str) -> CandidateSet {
        let moves: Vec<&str> = self.moves.iter().filter_map(Slot::first).collect();
        let item = self
            .item
            .as_ref()
            .and_then(Slot::first)
            .unwrap_or(UNKNOWN_FIELD);
        let ability = self
            .ability
            .as_ref()
            .and_then(Slot::first)
            .unwrap_or(UNKNOWN_FIELD);

        let options = SetOptions {
            moves: self
                .moves
                .iter()
                .flat_map(Slot::all)
                .map(str::to_string)
                .collect(),
            items: self
                .item
                .iter()
                .flat_map(Slot::all)
                .map(str::to_string)
                .collect(),
            abilities: self
                .ability
                .iter()
                .flat_map(Slot::all)
                .map(str::to_string)
                .collect(),
        };

        CandidateSet::new(species, set_name, moves, item, ability).with_options(options)
    }
}

/// Errors surfaced when loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse catalog {origin}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        origin: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "Kingambit": {
            "Swords Dance": {
                "moves": ["Swords Dance", "Kowtow Cleave", ["Sucker Punch", "Iron Head"], "Low Kick"],
                "item": ["Black Glasses", "Leftovers"],
                "ability": "Supreme Overlord",
                "nature": "Adamant"
            },
            "Bulky": {
                "moves": ["Kowtow Cleave", "Iron Head"],
                "ability": ["Supreme Overlord", "Defiant"]
            }
        },
        "Dondozo": {
            "Curse": { "moves": ["Curse", "Rest"], "item": "Leftovers", "ability": "Unaware" }
        }
    }"#;

    #[test]
    fn slash_options_take_first_alternative() {
        let catalog = SetCatalog::from_json_str(SAMPLE).expect("parse");
        let sets = catalog.candidates("Kingambit").expect("species present");
        let sd = &sets[0];
        assert!(sd.has_move("Sucker Punch"));
        assert!(!sd.has_move("Iron Head"));
        assert_eq!(sd.item, "Black Glasses");
        assert!(sd.options.moves.contains("Iron Head"));
        assert!(sd.options.items.contains("Leftovers"));
    }

    #[test]
    fn missing_item_defaults_to_unknown() {
        let catalog = SetCatalog::from_json_str(SAMPLE).expect("parse");
        let bulky = &catalog.candidates("Kingambit").unwrap()[1];
        assert_eq!(bulky.item, UNKNOWN_FIELD);
        assert_eq!(bulky.ability, "Supreme Overlord");
        assert!(bulky.options.abilities.contains("Defiant"));
    }

    #[test]
    fn preserves_file_order() {
        let catalog = SetCatalog::from_json_str(SAMPLE).expect("parse");
        assert_eq!(catalog.species(), vec!["Kingambit", "Dondozo"]);
        let names: Vec<&str> = catalog
            .candidates("Kingambit")
            .unwrap()
            .iter()
            .map(|set| set.name.as_str())
            .collect();
        assert_eq!(names, vec!["Swords Dance", "Bulky"]);
        assert_eq!(catalog.total_sets(), 3);
    }

    #[test]
    fn lookup_is_exact_match() {
        let catalog = SetCatalog::from_json_str(SAMPLE).expect("parse");
        assert!(catalog.candidates("kingambit").is_none());
        assert_eq!(catalog.search("GAMB"), vec!["Kingambit"]);
    }

    #[test]
    fn from_path_reads_file_and_reports_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sets.json");
        let mut file = File::create(&path).expect("create");
        file.write_all(SAMPLE.as_bytes()).expect("write");

        let catalog = SetCatalog::from_path(&path).expect("load");
        assert_eq!(catalog.len(), 2);

        let missing = SetCatalog::from_path(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(CatalogError::Read { .. })));
    }

    #[test]
    fn rejects_malformed_set() {
        let err = SetCatalog::from_json_str(r#"{ "Dondozo": { "Curse": { "moves": 3 } } }"#)
            .expect_err("moves must be a list");
        assert!(err.to_string().contains("Dondozo/Curse"));
    }

    #[test]
    fn fallback_contains_two_species() {
        let catalog = SetCatalog::fallback();
        assert_eq!(catalog.species(), vec!["Garchomp", "Dragapult"]);
        assert_eq!(catalog.candidates("Dragapult").map(<[_]>::len), Some(2));
    }
}
