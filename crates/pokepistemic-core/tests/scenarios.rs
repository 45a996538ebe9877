use pokepistemic_core::catalog::{CandidateSet, SetCatalog};
use pokepistemic_core::epistemic::{EngineError, ErrorKind, Verdict};
use pokepistemic_core::model::proposition::Proposition;
use pokepistemic_core::session::Session;

const SUBJECT: &str = "Dragapult";

fn four_set_catalog() -> SetCatalog {
    let sets = vec![
        CandidateSet::new(
            SUBJECT,
            "Specs",
            ["Draco Meteor", "Shadow Ball", "Flamethrower", "U-turn"],
            "Choice Specs",
            "Infiltrator",
        ),
        CandidateSet::new(
            SUBJECT,
            "Band",
            ["Dragon Darts", "Tera Blast", "U-turn", "Sucker Punch"],
            "Choice Band",
            "Clear Body",
        ),
        CandidateSet::new(
            SUBJECT,
            "Orb",
            ["Draco Meteor", "Shadow Ball", "Fire Blast", "Will-O-Wisp"],
            "Life Orb",
            "Infiltrator",
        ),
        CandidateSet::new(
            SUBJECT,
            "Hex",
            ["Hex", "Shadow Ball", "Will-O-Wisp", "Dragon Darts"],
            "Life Orb",
            "Cursed Body",
        ),
    ];
    SetCatalog::from_entries(vec![(SUBJECT.to_string(), sets)])
}

fn revealed() -> Session {
    let mut session = Session::new();
    session
        .reveal(&four_set_catalog(), SUBJECT)
        .expect("species in catalog");
    session
}

#[test]
fn scenario_a_reveal_builds_four_worlds() {
    let session = revealed();
    let status = session.status(SUBJECT).unwrap();
    assert_eq!(status.surviving, 4);
    assert_eq!(status.eliminated, 0);
}

#[test]
fn scenario_b_observed_move_eliminates_the_one_set_without_it() {
    let mut session = revealed();
    let outcome = session.observe_move(SUBJECT, "Shadow Ball").unwrap();
    assert_eq!(outcome.eliminated, 1);
    assert_eq!(outcome.surviving, 3);
    assert_eq!(session.status(SUBJECT).unwrap().surviving, 3);
}

#[test]
fn scenario_c_repeating_the_announcement_is_idempotent() {
    let mut session = revealed();
    session.observe_move(SUBJECT, "Shadow Ball").unwrap();
    let repeat = session.observe_move(SUBJECT, "Shadow Ball").unwrap();
    assert_eq!(repeat.eliminated, 0);
    assert_eq!(repeat.surviving, 3);
}

#[test]
fn scenario_d_knows_absent_item_and_rules_it_out() {
    let mut session = revealed();
    session.observe_move(SUBJECT, "Shadow Ball").unwrap();

    let band = Proposition::has_item("Choice Band");
    let model = session.model(SUBJECT).unwrap();
    assert!(model.knows(&band.negate()));
    assert!(!model.possible(&band));

    let report = session.know_item(SUBJECT, "Choice Band").unwrap();
    assert!(report.recognized);
    assert_eq!(report.verdict(), Verdict::KnownFalse);

    let orb = session.know_item(SUBJECT, "Life Orb").unwrap();
    assert_eq!(orb.verdict(), Verdict::Possible);
    let fraction = orb.fraction.expect("worlds survive");
    assert_eq!((fraction.matching, fraction.total), (2, 3));
}

#[test]
fn scenario_e_contradiction_is_rejected_and_nothing_changes() {
    let mut session = revealed();
    session.observe_move(SUBJECT, "Shadow Ball").unwrap();
    let before = session.snapshot(SUBJECT).unwrap();

    let err = session.observe_item(SUBJECT, "Choice Band").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ContradictoryObservation);
    assert!(matches!(
        err,
        EngineError::ContradictoryObservation { surviving: 3, .. }
    ));

    assert_eq!(session.status(SUBJECT).unwrap().surviving, 3);
    assert_eq!(session.snapshot(SUBJECT).unwrap(), before);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn history_records_each_applied_announcement() {
    let mut session = revealed();
    session.observe_move(SUBJECT, "Shadow Ball").unwrap();
    session.observe_move(SUBJECT, "Shadow Ball").unwrap();
    session.observe_item(SUBJECT, "Life Orb").unwrap();

    let history = session.history();
    let summary: Vec<(u64, usize, usize)> = history
        .iter()
        .map(|entry| (entry.step, entry.eliminated, entry.surviving_after))
        .collect();
    assert_eq!(summary, vec![(1, 1, 3), (2, 0, 3), (3, 1, 2)]);
    assert_eq!(history[2].proposition, Proposition::has_item("Life Orb"));
}
