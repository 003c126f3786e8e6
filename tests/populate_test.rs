use std::fs;
use std::path::Path;

use mkt::error::Error;
use mkt::parser::parse;
use mkt::populate::populate;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_populate_with_title_and_wd() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("srcs/hello.txt"), "hi");

    let (template, macros) = parse("title=demo\nwd=srcs\nhello.txt\n").unwrap();
    let out = tmp.path().join("out");
    let populated = populate(&template, &macros, tmp.path(), &out, false).unwrap();

    assert_eq!(populated, out.join("demo"));
    assert_eq!(fs::read_to_string(populated.join("hello.txt")).unwrap(), "hi");
}

#[test]
fn test_populate_renames_destination() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("config.yml"), "key: value");

    let (template, macros) = parse("config.yml>conf/settings.yml\n").unwrap();
    let out = tmp.path().join("out");
    populate(&template, &macros, tmp.path(), &out, false).unwrap();

    assert_eq!(fs::read_to_string(out.join("conf/settings.yml")).unwrap(), "key: value");
}

#[test]
fn test_populate_copies_directories_recursively() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("pkg/sub/mod.txt"), "deep");

    let (template, macros) = parse("pkg\n").unwrap();
    let out = tmp.path().join("out");
    populate(&template, &macros, tmp.path(), &out, false).unwrap();

    assert_eq!(fs::read_to_string(out.join("pkg/sub/mod.txt")).unwrap(), "deep");
}

#[test]
fn test_populate_expands_globbed_sources() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("files/a.txt"), "a");
    write(&tmp.path().join("files/b.txt"), "b");

    let (template, macros) = parse("files/*>new/*\n").unwrap();
    let out = tmp.path().join("out");
    populate(&template, &macros, tmp.path(), &out, false).unwrap();

    assert_eq!(fs::read_to_string(out.join("new/a.txt")).unwrap(), "a");
    assert_eq!(fs::read_to_string(out.join("new/b.txt")).unwrap(), "b");
}

#[test]
fn test_populate_fails_when_nothing_matches() {
    let tmp = TempDir::new().unwrap();
    let (template, macros) = parse("missing.txt\n").unwrap();
    let out = tmp.path().join("out");

    match populate(&template, &macros, tmp.path(), &out, false) {
        Err(Error::Populate(message)) => assert!(message.contains("missing.txt")),
        other => panic!("expected populate error, got {:?}", other),
    }
}

#[test]
fn test_populate_fails_when_glob_matches_nothing() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("files")).unwrap();
    let (template, macros) = parse("files/*>new/*\n").unwrap();
    let out = tmp.path().join("out");

    assert!(matches!(
        populate(&template, &macros, tmp.path(), &out, false),
        Err(Error::Populate(_))
    ));
}

#[test]
fn test_existing_destination_requires_overwrite() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("hello.txt"), "hi");
    let (template, macros) = parse("title=demo\nhello.txt\n").unwrap();
    let out = tmp.path().join("out");
    fs::create_dir_all(out.join("demo")).unwrap();

    assert!(matches!(
        populate(&template, &macros, tmp.path(), &out, false),
        Err(Error::Populate(_))
    ));

    let populated = populate(&template, &macros, tmp.path(), &out, true).unwrap();
    assert_eq!(fs::read_to_string(populated.join("hello.txt")).unwrap(), "hi");
}

#[test]
fn test_repopulating_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("hello.txt"), "hi");
    let (template, macros) = parse("title=demo\nhello.txt\n").unwrap();
    let out = tmp.path().join("out");

    populate(&template, &macros, tmp.path(), &out, false).unwrap();
    // second run skips the unchanged file instead of failing or rewriting
    let populated = populate(&template, &macros, tmp.path(), &out, true).unwrap();
    assert_eq!(fs::read_to_string(populated.join("hello.txt")).unwrap(), "hi");
}

#[test]
fn test_changed_source_is_copied_again() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("hello.txt");
    write(&source, "old");
    let (template, macros) = parse("title=demo\nhello.txt\n").unwrap();
    let out = tmp.path().join("out");

    populate(&template, &macros, tmp.path(), &out, false).unwrap();
    write(&source, "new");
    let populated = populate(&template, &macros, tmp.path(), &out, true).unwrap();

    assert_eq!(fs::read_to_string(populated.join("hello.txt")).unwrap(), "new");
}
