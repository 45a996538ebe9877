use std::io::Cursor;

use pokepistemic_cli::config::DisplayConfig;
use pokepistemic_cli::repl::Repl;
use pokepistemic_core::catalog::SetCatalog;
use pokepistemic_core::session::ModelSnapshot;

const SCRIPT: &str = "\
# opening turn
reveal garchomp
reveal dragapult
move garchomp swords dance
know move garchomp earthquake
know item garchomp rocky helmet
noitem dragapult choice band
item dragapult choice band
move garchomp splash
reveal pikachu
reveal GARCHOMP
history
status
quit
move garchomp spikes
";

fn run_script(script: &str) -> (Repl, String) {
    let mut repl = Repl::new(SetCatalog::fallback(), DisplayConfig::default());
    let mut out = Vec::new();
    repl.run(Cursor::new(script), &mut out, false)
        .expect("script runs");
    (repl, String::from_utf8(out).expect("utf8 output"))
}

#[test]
fn scripted_session_narrows_sets_and_reports_errors() {
    let (repl, out) = run_script(SCRIPT);

    assert!(out.contains("✓ Garchomp revealed! Initialized with 2 possible sets."));
    assert!(out.contains("✓ Observed: Garchomp used Swords Dance"));
    assert!(out.contains("K(Earthquake): YES"));
    assert!(out.contains("K(¬Rocky Helmet): YES"));
    assert!(out.contains("✓ Observed: Dragapult does NOT have Choice Band"));
    assert!(out.contains("error[contradictory_observation]"));
    assert!(out.contains("error[unrecognized_proposition]"));
    assert!(out.contains("error[unknown_subject]"));
    assert!(out.contains("Garchomp already revealed (1 possible sets remain)."));
    assert!(out.contains("1. Garchomp: has_move:Swords Dance (eliminated 1, 1 remaining)"));
    assert!(out.contains("2. Dragapult: not_has_item:Choice Band (eliminated 1, 1 remaining)"));
    assert!(out.contains("BATTLE STATUS"));
    assert!(out.contains("Goodbye!"));

    // Nothing after `quit` runs; failures consume no step.
    let history = repl.session().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].step, 2);
    assert!(!out.contains("Garchomp used Spikes"));
}

#[test]
fn snapshot_command_prints_parseable_json() {
    let (_, out) = run_script("reveal dragapult\nmove dragapult shadow ball\nsnapshot dragapult\n");
    let start = out.find('{').expect("json start");
    let end = out.rfind('}').expect("json end");
    let snapshot = ModelSnapshot::from_json(&out[start..=end]).expect("snapshot json");
    assert_eq!(snapshot.subject, "Dragapult");
    assert_eq!(snapshot.surviving.len(), 1);
    assert_eq!(snapshot.eliminated.len(), 1);
    assert_eq!(snapshot.eliminated[0].step, 1);
}

#[test]
fn commands_before_reveal_report_missing_model() {
    let (_, out) = run_script("know move dragapult u-turn\nstatus dragapult\nbogus\nmove x\n");
    assert!(out.contains("error[no_active_model]"));
    assert!(out.contains("Unknown command: bogus"));
    assert!(out.contains("Usage: move <pokemon> <move>"));
    assert!(out.contains("Goodbye!"));
}

#[test]
fn ability_observations_settle_status_and_reject_unknown_abilities() {
    let (repl, out) = run_script(
        "reveal dragapult\n\
         ability dragapult levitate\n\
         ability dragapult clear body\n\
         know ability dragapult infiltrator\n\
         status dragapult\n",
    );

    assert!(out.contains("Possible abilities: Clear Body, Infiltrator"));
    assert!(out.contains("error[unrecognized_proposition]"));
    assert!(out.contains("✓ Observed: Dragapult has ability Clear Body"));
    assert!(out.contains("K(¬Infiltrator): YES"));
    assert!(out.contains("Known ability: Clear Body"));
    assert!(out.contains("Known item: Choice Band"));

    let history = repl.session().history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].proposition.to_string(), "has_ability:Clear Body");
}
