//! Playback engine tests against real subprocesses in a temp directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use livedemo::input::{Key, ScriptedKeys};
use livedemo::player::{PlaybackState, Player, RunOutcome};
use livedemo::prompt;
use livedemo::typing::TypingSimulator;
use livedemo::Session;

fn state_in(cwd: &Path) -> PlaybackState {
    PlaybackState {
        cwd: cwd.canonicalize().unwrap(),
        oldpwd: None,
        shell: PathBuf::from("/bin/sh"),
        theme: prompt::lookup("bare").unwrap(),
        speed: 1000.0, // keep per-character delays in the microsecond range
        env: HashMap::new(),
        user: "tester".to_string(),
        host: "testhost".to_string(),
    }
}

fn play(session_text: &str, state: PlaybackState, keys: Vec<Key>) -> (RunOutcome, PlaybackState, String) {
    let session = Session::parse(session_text);
    let mut keys = ScriptedKeys::new(keys);
    let mut out = Vec::new();
    let mut player = Player::new(state, TypingSimulator::with_seed(7), &mut keys, &mut out);
    let outcome = player.run(&session).unwrap();
    let state = player.state().clone();
    (outcome, state, String::from_utf8(out).unwrap())
}

#[test]
fn cd_changes_tracked_directory_for_next_command() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();

    let text = "cd sub\npwd > marker.txt\n";
    let (outcome, state, _) = play(text, state_in(tmp.path()), vec![Key::Enter; 2]);

    assert_eq!(outcome, RunOutcome::Finished);
    let sub = tmp.path().join("sub").canonicalize().unwrap();
    assert_eq!(state.cwd, sub);
    let marker = sub.join("marker.txt");
    let recorded = fs::read_to_string(marker).unwrap();
    assert_eq!(Path::new(recorded.trim()), sub);
}

#[test]
fn failed_cd_keeps_cwd_and_session_continues() {
    let tmp = tempfile::tempdir().unwrap();

    let text = "cd /definitely/not/a/directory\npwd > after.txt\n";
    let (outcome, state, output) = play(text, state_in(tmp.path()), vec![Key::Enter; 2]);

    assert_eq!(outcome, RunOutcome::Finished);
    assert_eq!(state.cwd, tmp.path().canonicalize().unwrap());
    assert!(output.contains("cd:"));
    // The next command still ran in the original directory.
    let recorded = fs::read_to_string(tmp.path().join("after.txt")).unwrap();
    assert_eq!(Path::new(recorded.trim()), state.cwd);
}

#[test]
fn cd_dash_returns_to_previous_directory() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();

    let text = "cd sub\ncd -\n";
    let (outcome, state, _) = play(text, state_in(tmp.path()), vec![Key::Enter; 2]);

    assert_eq!(outcome, RunOutcome::Finished);
    assert_eq!(state.cwd, tmp.path().canonicalize().unwrap());
}

#[test]
fn esc_at_command_gate_aborts_without_executing() {
    let tmp = tempfile::tempdir().unwrap();

    let text = "echo oops > aborted.txt\n";
    let (outcome, _, _) = play(text, state_in(tmp.path()), vec![Key::Esc]);

    assert_eq!(outcome, RunOutcome::Aborted);
    assert!(!tmp.path().join("aborted.txt").exists());
}

#[test]
fn failing_command_does_not_abort_the_session() {
    let tmp = tempfile::tempdir().unwrap();

    let text = "false\necho survived > ok.txt\n";
    let (outcome, _, _) = play(text, state_in(tmp.path()), vec![Key::Enter; 2]);

    assert_eq!(outcome, RunOutcome::Finished);
    assert!(tmp.path().join("ok.txt").exists());
}

#[test]
fn env_directive_reaches_commands() {
    let tmp = tempfile::tempdir().unwrap();

    let text = "#livedemo env: DEMO_MARKER=42\necho $DEMO_MARKER > env.txt\n";
    let (outcome, _, _) = play(text, state_in(tmp.path()), vec![Key::Enter]);

    assert_eq!(outcome, RunOutcome::Finished);
    let recorded = fs::read_to_string(tmp.path().join("env.txt")).unwrap();
    assert_eq!(recorded.trim(), "42");
}

#[test]
fn speed_directive_mid_session_updates_state() {
    let tmp = tempfile::tempdir().unwrap();

    let text = "#livedemo speed: 500\ntrue\n";
    let (outcome, state, _) = play(text, state_in(tmp.path()), vec![Key::Enter]);

    assert_eq!(outcome, RunOutcome::Finished);
    assert_eq!(state.speed, 500.0);
}

#[test]
fn invalid_speed_directive_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let session = Session::parse("#livedemo speed: molasses\ntrue\n");
    let mut keys = ScriptedKeys::new(vec![Key::Enter]);
    let mut out = Vec::new();
    let mut player = Player::new(
        state_in(tmp.path()),
        TypingSimulator::with_seed(7),
        &mut keys,
        &mut out,
    );
    assert!(player.run(&session).is_err());
}

#[test]
fn unknown_prompt_directive_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let session = Session::parse("#livedemo prompt: thisisnotatheme\ntrue\n");
    let mut keys = ScriptedKeys::new(vec![Key::Enter]);
    let mut out = Vec::new();
    let mut player = Player::new(
        state_in(tmp.path()),
        TypingSimulator::with_seed(7),
        &mut keys,
        &mut out,
    );
    assert!(player.run(&session).is_err());
}

#[test]
fn typed_output_contains_prompt_and_command() {
    let tmp = tempfile::tempdir().unwrap();

    let text = "true\n";
    let (_, _, output) = play(text, state_in(tmp.path()), vec![Key::Enter]);

    // "bare" theme renders "$ " before the typed command.
    assert!(output.contains("$ true"));
}
