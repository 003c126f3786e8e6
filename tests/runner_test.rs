use std::fs;

use mkt::error::Error;
use mkt::parser::parse;
use mkt::runner::{run_options, run_script};
use tempfile::TempDir;

fn request(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_run_script_in_workdir() {
    let tmp = TempDir::new().unwrap();
    run_script("echo hello > greeting.txt", tmp.path()).unwrap();

    assert_eq!(fs::read_to_string(tmp.path().join("greeting.txt")).unwrap(), "hello\n");
}

#[test]
fn test_run_script_reports_failure() {
    let tmp = TempDir::new().unwrap();
    match run_script("exit 3", tmp.path()) {
        Err(Error::Command(message)) => assert!(message.contains("3")),
        other => panic!("expected command error, got {:?}", other),
    }
}

#[test]
fn test_options_run_in_request_order() {
    let tmp = TempDir::new().unwrap();
    let text = "a:\n    echo a >> log.txt\nb:\n    echo b >> log.txt\n";
    let (template, _) = parse(text).unwrap();

    run_options(&template, &request(&["b", "a"]), tmp.path()).unwrap();

    assert_eq!(fs::read_to_string(tmp.path().join("log.txt")).unwrap(), "b\na\n");
}

#[test]
fn test_unknown_options_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let text = "a:\n    echo a >> log.txt\n";
    let (template, _) = parse(text).unwrap();

    run_options(&template, &request(&["zzz"]), tmp.path()).unwrap();
    assert!(!tmp.path().join("log.txt").exists());
}

#[test]
fn test_multi_line_scripts_run_as_one_body() {
    let tmp = TempDir::new().unwrap();
    let text = "setup:\n    mkdir -p nested\n    echo done > nested/marker\n";
    let (template, _) = parse(text).unwrap();

    run_options(&template, &request(&["setup"]), tmp.path()).unwrap();
    assert_eq!(fs::read_to_string(tmp.path().join("nested/marker")).unwrap(), "done\n");
}

#[test]
fn test_failing_option_aborts_the_run() {
    let tmp = TempDir::new().unwrap();
    let text = "bad:\n    exit 1\ngood:\n    echo ok > after.txt\n";
    let (template, _) = parse(text).unwrap();

    assert!(run_options(&template, &request(&["bad", "good"]), tmp.path()).is_err());
    assert!(!tmp.path().join("after.txt").exists());
}
