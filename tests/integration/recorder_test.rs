//! Recorder tests driving scripted operator input.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use livedemo::recorder::RecordError;
use livedemo::{prompt, Recorder, Session};

fn record(output: PathBuf, input: &str) -> (Result<(), RecordError>, String) {
    let mut input = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    let theme = prompt::lookup("bare").unwrap();
    let mut recorder = Recorder::new(
        output,
        PathBuf::from("/bin/sh"),
        theme,
        false,
        &mut input,
        &mut out,
    )
    .unwrap();
    let result = recorder.run();
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn records_commands_in_order_with_shell_directive() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("session.sh");

    let (result, _) = record(output.clone(), "echo \"foo\"\necho \"bar\"\nfinish\n");
    result.unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("#livedemo shell: /bin/sh\n"));
    let session = Session::parse(&text);
    let commands: Vec<_> = session.commands().collect();
    assert_eq!(commands, ["echo \"foo\"", "echo \"bar\""]);
}

#[test]
fn declining_overwrite_fails_and_preserves_file() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("session.sh");
    fs::write(&output, "original content\n").unwrap();

    let (result, printed) = record(output.clone(), "echo hi\nfinish\nn\n");

    assert!(matches!(result, Err(RecordError::OutputExists(_))));
    assert!(printed.contains("Overwrite?"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "original content\n");
}

#[test]
fn accepting_overwrite_replaces_file() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("session.sh");
    fs::write(&output, "original content\n").unwrap();

    let (result, _) = record(output.clone(), "echo hi\nfinish\ny\n");
    result.unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("echo hi\n"));
}

#[test]
fn output_directory_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();

    let (result, _) = record(tmp.path().to_path_buf(), "finish\n");

    assert!(matches!(result, Err(RecordError::OutputIsDirectory(_))));
}

#[test]
fn cd_is_tracked_while_recording() {
    let tmp = tempfile::tempdir().unwrap();
    let cwd = std::env::current_dir().unwrap();
    // The recorder starts in the process cwd; cd to the temp dir by
    // absolute path, then verify the next command ran there.
    let sub = tmp.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let output = tmp.path().join("session.sh");

    let input = format!("cd {}\npwd > rec_marker.txt\nfinish\n", sub.display());
    let (result, _) = record(output.clone(), &input);
    result.unwrap();

    // Recording never touched the process-wide cwd.
    assert_eq!(std::env::current_dir().unwrap(), cwd);
    let recorded = fs::read_to_string(sub.join("rec_marker.txt")).unwrap();
    assert_eq!(Path::new(recorded.trim()), sub.canonicalize().unwrap());

    let session = Session::parse(&fs::read_to_string(&output).unwrap());
    let commands: Vec<_> = session.commands().collect();
    assert_eq!(commands.len(), 2);
    assert!(commands[0].starts_with("cd "));
}

#[test]
fn failed_cd_while_recording_continues() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("session.sh");

    let (result, printed) = record(output.clone(), "cd /definitely/missing\nfinish\n");
    result.unwrap();

    assert!(printed.contains("cd:"));
    assert!(output.exists());
}

#[test]
fn custom_theme_is_recorded_as_prompt_directive() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("session.sh");

    let mut input = Cursor::new(b"finish\n".to_vec());
    let mut out = Vec::new();
    let theme = prompt::lookup("sorin").unwrap();
    let mut recorder = Recorder::new(
        output.clone(),
        PathBuf::from("/bin/sh"),
        theme,
        true,
        &mut input,
        &mut out,
    )
    .unwrap();
    recorder.run().unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("#livedemo prompt: sorin\n"));
}

#[test]
fn end_of_input_finalizes_like_the_sentinel() {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("session.sh");

    let (result, _) = record(output.clone(), "echo done\n");
    result.unwrap();

    assert!(fs::read_to_string(&output).unwrap().contains("echo done\n"));
}
