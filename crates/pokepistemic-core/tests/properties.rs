use std::collections::BTreeSet;

use pokepistemic_core::catalog::CandidateSet;
use pokepistemic_core::epistemic::{EngineError, EpistemicModel};
use pokepistemic_core::model::proposition::Proposition;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const MOVES: [&str; 10] = [
    "Earthquake",
    "Dragon Claw",
    "Swords Dance",
    "Scale Shot",
    "Fire Fang",
    "Stealth Rock",
    "Outrage",
    "Stone Edge",
    "Spikes",
    "Dragon Tail",
];
const ITEMS: [&str; 4] = ["Focus Sash", "Rocky Helmet", "Life Orb", "Loaded Dice"];
const ABILITIES: [&str; 2] = ["Rough Skin", "Sand Veil"];

fn random_model(rng: &mut SmallRng) -> EpistemicModel {
    let count = rng.gen_range(1..=8);
    let sets: Vec<CandidateSet> = (0..count)
        .map(|index| {
            let moves: Vec<&str> = MOVES.choose_multiple(rng, 4).copied().collect();
            CandidateSet::new(
                "Garchomp",
                format!("set{index}"),
                moves,
                *ITEMS.choose(rng).unwrap(),
                *ABILITIES.choose(rng).unwrap(),
            )
        })
        .collect();
    EpistemicModel::from_candidates("Garchomp", &sets)
}

fn random_proposition(rng: &mut SmallRng) -> Proposition {
    let prop = match rng.gen_range(0..3) {
        0 => Proposition::has_move(*MOVES.choose(rng).unwrap()),
        1 => Proposition::has_item(*ITEMS.choose(rng).unwrap()),
        _ => Proposition::has_ability(*ABILITIES.choose(rng).unwrap()),
    };
    if rng.gen_bool(0.3) { prop.negate() } else { prop }
}

fn all_propositions() -> Vec<Proposition> {
    let mut props = Vec::new();
    for name in MOVES {
        props.push(Proposition::has_move(name));
    }
    for name in ITEMS {
        props.push(Proposition::has_item(name));
    }
    for name in ABILITIES {
        props.push(Proposition::has_ability(name));
    }
    let negated: Vec<Proposition> = props.iter().map(Proposition::negate).collect();
    props.extend(negated);
    props
}

fn world_ids(model: &EpistemicModel) -> (Vec<usize>, Vec<usize>) {
    let surviving = model.worlds().iter().map(|w| w.id()).collect();
    let eliminated = model.eliminated().iter().map(|e| e.world.id()).collect();
    (surviving, eliminated)
}

#[test]
fn announcement_sequences_preserve_invariants_randomised() {
    let mut rng = SmallRng::seed_from_u64(42);
    let universe = all_propositions();

    for _ in 0..64 {
        let mut model = random_model(&mut rng);
        let total = model.total_worlds();

        for step in 1..=12u64 {
            let known_before: Vec<&Proposition> =
                universe.iter().filter(|p| model.knows(p)).collect();
            let count_before = model.surviving_count();
            let ids_before = world_ids(&model);
            let prop = random_proposition(&mut rng);
            let was_known = model.knows(&prop);

            match model.announce(&prop, step) {
                Ok(removed) => {
                    // Monotonicity.
                    assert_eq!(model.surviving_count() + removed, count_before);
                    assert!(model.surviving_count() <= count_before);
                    // Idempotence.
                    if was_known {
                        assert_eq!(removed, 0);
                    }
                    // Knowledge persistence.
                    for known in &known_before {
                        assert!(model.knows(known), "lost knowledge of {known}");
                    }
                    // Survivors keep their relative order.
                    let ids: Vec<usize> = model.worlds().iter().map(|w| w.id()).collect();
                    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
                }
                Err(EngineError::ContradictoryObservation { surviving, .. }) => {
                    assert!(!was_known);
                    assert_eq!(surviving, count_before);
                    assert_eq!(world_ids(&model), ids_before);
                }
                Err(other) => panic!("unexpected error: {other}"),
            }

            // Partition invariant.
            let (surviving, eliminated) = world_ids(&model);
            let all: BTreeSet<usize> = surviving.iter().chain(&eliminated).copied().collect();
            assert_eq!(all.len(), surviving.len() + eliminated.len());
            assert_eq!(all, (0..total).collect::<BTreeSet<usize>>());

            // K → ◇ on non-empty frames.
            assert!(!model.is_empty());
            for prop in &universe {
                if model.knows(prop) {
                    assert!(model.possible(prop));
                }
            }
        }
    }
}

#[test]
fn known_impossible_is_knowledge_of_negation() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..32 {
        let model = random_model(&mut rng);
        for prop in all_propositions() {
            assert_eq!(model.knows(&prop.negate()), !model.possible(&prop));
            let fraction = model.fraction(&prop).expect("non-empty model");
            assert_eq!(fraction.matching == fraction.total, model.knows(&prop));
            assert_eq!(fraction.matching > 0, model.possible(&prop));
        }
    }
}
