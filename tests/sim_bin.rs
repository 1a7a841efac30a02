use std::process::Command;

use battleship_arena::{LogEntry, MatchRecord, Replayer};

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "2"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let record: MatchRecord = serde_json::from_str(stdout.trim()).expect("invalid json");

    let winner = record.winner.clone().expect("no winner");
    assert_eq!(record.log.winner(), Some(&winner));
    assert!(matches!(
        record.log.entries().last(),
        Some(LogEntry::GameOver { .. })
    ));

    // the recorded log replays to the same ending: the loser has no ships
    let mut replayer = Replayer::new(record.log.clone()).unwrap();
    replayer.run_to_end();
    let loser = record.players.other(&winner).unwrap();
    assert!(!replayer.board_of(loser).unwrap().has_alive_ships());
    assert!(replayer.board_of(&winner).unwrap().has_alive_ships());
}
