use std::{cell::Cell, rc::Rc};

use expect_test::expect;
use pennon::{Command, Status};

use crate::{check, parse};

fn cargo() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.version("1.80.0");
    cmd.flag(Some('v'), Some("verbose"), "", false);

    let build = cmd.subcommand("build");
    build.flag(Some('v'), Some("verbose"), "", false);
    build.flag(Some('j'), Some("jobs"), "", 1i64);

    let remote = cmd.subcommand("remote");
    remote.subcommand("add").positional("url", "", String::new());
    cmd
}

#[test]
fn dispatch_to_child() {
    let mut cmd = cargo();
    check(
        &mut cmd,
        "build -v",
        expect![[r#"
            Done `cargo build`
            Warning: `-j --jobs` set to default because it's not referred
            -h --help = Boolean(false)
            -v --verbose = Boolean(true) *
            -j --jobs = Integer(1)
        "#]],
    );

    let root_verbose = cmd.flags().find_by_long("verbose").unwrap().record();
    assert_eq!(root_verbose.value(), pennon::Value::Boolean(false));
    assert!(!root_verbose.referred());
}

#[test]
fn nested_dispatch() {
    let mut cmd = cargo();
    let (res, diagnostics) = parse(&mut cmd, "remote add https://example.com extra");
    let parsed = res.unwrap();
    assert_eq!(parsed.path, vec!["cargo", "remote", "add"]);
    assert_eq!(parsed.remaining, vec!["extra"]);
    assert!(diagnostics.is_empty());

    let add = cmd.current();
    assert_eq!(add.name(), "add");
    assert_eq!(add.full_name(), "cargo remote add");
    assert_eq!(cmd.find_subcommand("remote").unwrap().current().name(), "add");
}

#[test]
fn subcommands_match_only_first() {
    let mut cmd = cargo();
    check(
        &mut cmd,
        "-v build",
        expect![[r#"
            Done `cargo`
            Warning: `-v --verbose` set to default because the value is invalid: not a boolean
            -h --help = Boolean(false)
            -v --verbose = Boolean(false) *
        "#]],
    );
    check(
        &mut cmd,
        "remote -v",
        expect![[r#"
            error: `-v` does not exist
            Error: `-v` does not exist
            -h --help = Boolean(false)
        "#]],
    );
    assert_eq!(cmd.current().full_name(), "cargo remote");
}

#[test]
fn unknown_flag_in_child() {
    let mut cmd = cargo();
    let (res, _) = parse(&mut cmd, "build --release");
    assert_eq!(res.unwrap_err().to_string(), "`--release` does not exist");
    assert_eq!(cmd.current().name(), "build");
}

#[test]
fn bare_invocation() {
    let root_bare = Rc::new(Cell::new(0));
    let child_bare = Rc::new(Cell::new(0));

    let mut cmd = cargo();
    cmd.on_bare_invocation({
        let root_bare = Rc::clone(&root_bare);
        move |_| root_bare.set(root_bare.get() + 1)
    });
    cmd.subcommand("doc").on_bare_invocation({
        let child_bare = Rc::clone(&child_bare);
        move |cmd| {
            assert_eq!(cmd.full_name(), "cargo doc");
            child_bare.set(child_bare.get() + 1)
        }
    });

    let (res, diagnostics) = parse(&mut cmd, "");
    let parsed = res.unwrap();
    assert_eq!(parsed.status, Status::Bare);
    assert_eq!(parsed.path, vec!["cargo"]);
    assert!(diagnostics.is_empty());
    assert_eq!((root_bare.get(), child_bare.get()), (1, 0));

    let parsed = parse(&mut cmd, "doc").0.unwrap();
    assert_eq!(parsed.status, Status::Bare);
    assert_eq!(parsed.path, vec!["cargo", "doc"]);
    assert_eq!((root_bare.get(), child_bare.get()), (1, 1));

    parse(&mut cmd, "-v").0.unwrap();
    assert_eq!((root_bare.get(), child_bare.get()), (1, 1));
}

#[test]
fn help_hook_of_the_dispatched_child() {
    let root_help = Rc::new(Cell::new(0));
    let child_help = Rc::new(Cell::new(0));

    let mut cmd = Command::new("cargo");
    cmd.on_help({
        let root_help = Rc::clone(&root_help);
        move |_| root_help.set(root_help.get() + 1)
    });
    cmd.subcommand("build").on_help({
        let child_help = Rc::clone(&child_help);
        move |cmd| {
            assert_eq!(cmd.full_name(), "cargo build");
            child_help.set(child_help.get() + 1)
        }
    });

    let (res, _) = parse(&mut cmd, "build -h");
    let parsed = res.unwrap();
    assert_eq!(parsed.status, Status::Help);
    assert_eq!(parsed.path, vec!["cargo", "build"]);
    assert_eq!((root_help.get(), child_help.get()), (0, 1));

    parse(&mut cmd, "--help").0.unwrap();
    assert_eq!((root_help.get(), child_help.get()), (1, 1));
}

#[test]
fn children_inherit_path_and_width() {
    let mut cmd = Command::new("git");
    cmd.width(60);
    let remote = cmd.subcommand("remote");
    remote.version("2.0");
    assert_eq!(remote.help_width(), 60);
    assert_eq!(remote.subcommand("add").path(), vec!["git", "remote", "add"]);
    assert_eq!(cmd.subcommands()[0].full_name(), "git remote 2.0");
}

#[test]
#[should_panic(expected = "subcommand `build` already exists in `cargo 1.80.0`")]
fn duplicate_subcommand() {
    let mut cmd = cargo();
    cmd.subcommand("build");
}
