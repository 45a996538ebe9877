use super::CandidateSet;

/// Minimal built-in table used when no sets file is configured.
pub(super) fn fallback_entries() -> Vec<(String, Vec<CandidateSet>)> {
    vec![
        (
            "Garchomp".to_string(),
            vec![
                CandidateSet::new(
                    "Garchomp",
                    "TankChomp",
                    ["Earthquake", "Dragon Tail", "Stealth Rock", "Spikes"],
                    "Rocky Helmet",
                    "Rough Skin",
                ),
                CandidateSet::new(
                    "Garchomp",
                    "Swords Dance",
                    ["Swords Dance", "Scale Shot", "Earthquake", "Fire Fang"],
                    "Loaded Dice",
                    "Rough Skin",
                ),
            ],
        ),
        (
            "Dragapult".to_string(),
            vec![
                CandidateSet::new(
                    "Dragapult",
                    "Choice Specs",
                    ["Draco Meteor", "Shadow Ball", "Flamethrower", "U-turn"],
                    "Choice Specs",
                    "Infiltrator",
                ),
                CandidateSet::new(
                    "Dragapult",
                    "Choice Band",
                    ["Dragon Darts", "Tera Blast", "U-turn", "Sucker Punch"],
                    "Choice Band",
                    "Clear Body",
                ),
            ],
        ),
    ]
}
