use std::process::Command;

fn run_sim(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_duo-games"))
        .args(args)
        .env("DUO_GAMES_LOG", "warn")
        .output()
        .expect("failed to run simulator");
    assert!(output.status.success(), "simulator exited with {:?}", output.status);
    String::from_utf8(output.stdout).expect("non utf8 output")
}

#[test]
fn sim_battleship_smoke() {
    let stdout = run_sim(&["battleship", "--seed", "1"]);
    assert!(stdout.contains("Winner: "), "unexpected output: {}", stdout);
    assert!(stdout.contains("shots fired"));
}

#[test]
fn sim_dots_smoke() {
    let stdout = run_sim(&["dots", "--grid-size", "3", "--seed", "2"]);
    assert!(stdout.contains("Winner: ") || stdout.contains("Draw"), "unexpected output: {}", stdout);
}

#[test]
fn sim_is_reproducible_with_seed() {
    let first = run_sim(&["dots", "--seed", "42"]);
    let second = run_sim(&["dots", "--seed", "42"]);
    assert_eq!(first, second);
}
