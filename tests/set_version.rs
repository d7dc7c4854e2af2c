//! Library-level tests for the full read → locate → splice → write pipeline.

use docopt_ver::{
    set_version, CallTarget, SetError, SetOptions, SetStatus, VersionError,
};
use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn go_file(call: &str) -> String {
    format!(
        "package main\n\nimport \"github.com/docopt/docopt-go\"\n\nfunc main() {{\n\targs, _ := {call}\n\t_ = args\n}}\n"
    )
}

fn setup(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("main.go");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn end_to_end_replaces_only_version() {
    let input = go_file(r#"docopt.Parse(usage, nil, true, "shadowc 1.1", false)"#);
    let (_dir, path) = setup(&input);

    let report = set_version(&path, "2.0.0", &SetOptions::default()).unwrap();

    assert_eq!(report.status, SetStatus::Applied);
    assert_eq!(report.update.replacement.value(), "\"shadowc 2.0.0\"");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        input.replace("\"shadowc 1.1\"", "\"shadowc 2.0.0\"")
    );
}

#[test]
fn bare_version_literal() {
    let input = go_file(r#"docopt.Parse(usage, nil, true, "1.0", false)"#);
    let (_dir, path) = setup(&input);

    set_version(&path, "2.0", &SetOptions::default()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        input.replace("\"1.0\"", "\"2.0\"")
    );
}

#[test]
fn backtick_literal_keeps_quote_style() {
    let input = go_file("docopt.Parse(usage, nil, true, `1.0`, false)");
    let (_dir, path) = setup(&input);

    set_version(&path, "2.0", &SetOptions::default()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        input.replace("`1.0`", "`2.0`")
    );
}

#[test]
fn three_arguments_leave_file_unchanged() {
    let input = go_file("docopt.Parse(usage, nil, true)");
    let (_dir, path) = setup(&input);

    let err = set_version(&path, "2.0", &SetOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        SetError::Version(VersionError::InsufficientArguments { found: 3, .. })
    ));
    assert_eq!(fs::read(&path).unwrap(), input.as_bytes());
}

#[test]
fn variable_argument_leaves_file_unchanged() {
    let input = go_file("docopt.Parse(usage, nil, true, version, false)");
    let (_dir, path) = setup(&input);

    let err = set_version(&path, "2.0", &SetOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        SetError::Version(VersionError::NotSimpleLiteral { .. })
    ));
    assert_eq!(fs::read(&path).unwrap(), input.as_bytes());
}

#[test]
fn missing_call_is_an_error() {
    let input = go_file("parse(usage)");
    let (_dir, path) = setup(&input);

    let err = set_version(&path, "2.0", &SetOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        SetError::Version(VersionError::CallNotFound { .. })
    ));
    assert_eq!(fs::read(&path).unwrap(), input.as_bytes());
}

#[test]
fn unsafe_version_leaves_file_unchanged() {
    let input = go_file(r#"docopt.Parse(usage, nil, true, "app 1.0", false)"#);
    let (_dir, path) = setup(&input);

    let err = set_version(&path, "2.0\" + evil", &SetOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        SetError::Version(VersionError::UnsafeVersion { .. })
    ));
    assert_eq!(fs::read(&path).unwrap(), input.as_bytes());
}

#[test]
fn syntax_errors_abort_before_locating() {
    let input = "package main\n\nfunc main() {\n\tdocopt.Parse(usage, nil, true, \"1.0\"\n";
    let (_dir, path) = setup(input);

    let err = set_version(&path, "2.0", &SetOptions::default()).unwrap_err();
    assert!(matches!(err, SetError::Parse(_)));
    assert_eq!(fs::read(&path).unwrap(), input.as_bytes());
}

#[test]
fn non_utf8_file_is_rejected() {
    let (_dir, path) = setup("");
    fs::write(&path, [0x70, 0xff, 0xfe]).unwrap();

    let err = set_version(&path, "2.0", &SetOptions::default()).unwrap_err();
    assert!(matches!(err, SetError::NotUtf8 { .. }));
}

#[test]
fn same_version_is_a_noop() {
    let input = go_file(r#"docopt.Parse(usage, nil, true, "app 1.0", false)"#);
    let (_dir, path) = setup(&input);

    let report = set_version(&path, "1.0", &SetOptions::default()).unwrap();
    assert_eq!(report.status, SetStatus::AlreadyApplied);
    assert_eq!(fs::read(&path).unwrap(), input.as_bytes());
}

#[test]
fn custom_call_target() {
    let input = go_file(r#"cli.New(name, usage, opts, "tool 0.1")"#);
    let (_dir, path) = setup(&input);

    let options = SetOptions {
        target: CallTarget::new("cli", "New"),
        dry_run: false,
    };
    set_version(&path, "0.2", &options).unwrap();

    assert!(fs::read_to_string(&path).unwrap().contains("\"tool 0.2\""));
}

#[test]
fn only_first_call_site_is_rewritten() {
    let input = "package main\n\nfunc a() {\n\tdocopt.Parse(u, nil, true, \"a 1.0\", false)\n}\n\nfunc b() {\n\tdocopt.Parse(u, nil, true, \"b 1.0\", false)\n}\n";
    let (_dir, path) = setup(input);

    set_version(&path, "2.0", &SetOptions::default()).unwrap();

    let patched = fs::read_to_string(&path).unwrap();
    assert!(patched.contains("\"a 2.0\""));
    assert!(patched.contains("\"b 1.0\""));
}

#[cfg(unix)]
#[test]
fn symlinked_path_writes_through_to_target() {
    let input = go_file(r#"docopt.Parse(usage, nil, true, "app 1.0", false)"#);
    let (dir, real) = setup(&input);
    let link = dir.path().join("link.go");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let report = set_version(&link, "2.0", &SetOptions::default()).unwrap();
    assert_eq!(report.status, SetStatus::Applied);

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&link).unwrap(), real);
    assert_eq!(
        fs::read_to_string(&real).unwrap(),
        input.replace("\"app 1.0\"", "\"app 2.0\"")
    );
}

fn version_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,3}\\.[0-9]{1,3}(\\.[0-9]{1,3})?(-[a-z]{1,5})?"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prefix_and_quote_survive(
        name in "[a-z][a-z0-9-]{0,8}( [a-z]{1,4}){0,2}",
        old in version_strategy(),
        new in version_strategy(),
        raw in any::<bool>(),
    ) {
        let quote = if raw { '`' } else { '"' };
        let literal = format!("{quote}{name} {old}{quote}");
        let input = go_file(&format!("docopt.Parse(usage, nil, true, {literal}, false)"));
        let (_dir, path) = setup(&input);

        set_version(&path, &new, &SetOptions::default()).unwrap();

        let expected = input.replace(&literal, &format!("{quote}{name} {new}{quote}"));
        prop_assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn sequential_updates_compose(
        first in version_strategy(),
        second in version_strategy(),
    ) {
        let input = go_file(r#"docopt.Parse(usage, nil, true, "app 1.0", false)"#);
        let (_dir_a, twice) = setup(&input);
        let (_dir_b, once) = setup(&input);

        set_version(&twice, &first, &SetOptions::default()).unwrap();
        set_version(&twice, &second, &SetOptions::default()).unwrap();
        set_version(&once, &second, &SetOptions::default()).unwrap();

        prop_assert_eq!(fs::read(&twice).unwrap(), fs::read(&once).unwrap());
    }
}
