use expect_test::expect;
use pennon::{Command, DiagnosticKind, Kind, Rejection};

use crate::{check, count, parse};

#[test]
fn overflow_is_kept_in_order() {
    let mut cmd = Command::new("cp");
    let src = cmd.positional("src", "", String::from("."));

    let (res, diagnostics) = parse(&mut cmd, "x y z");
    let parsed = res.unwrap();
    assert_eq!(src.get(), "x");
    assert_eq!(parsed.remaining, vec!["y", "z"]);
    assert!(diagnostics.is_empty());
}

#[test]
fn positionals_interleave_with_named_flags() {
    let mut cmd = Command::new("cp");
    cmd.flag(Some('r'), None, "", false);
    cmd.positional("src", "", String::from("."));
    cmd.positional("count", "", 1i64);
    cmd.positional("scale", "", 1.0f64);

    check(
        &mut cmd,
        "a -r yes 3 2.5 tail",
        expect![[r#"
            Done `cp`
            remaining: ["tail"]
            -h --help = Boolean(false)
            -r = Boolean(true) *
            [0] src = Text("a") *
            [1] count = Integer(3) *
            [2] scale = Decimal(2.5) *
        "#]],
    );
    check(
        &mut cmd,
        "a -r 3 2.5 tail",
        expect![[r#"
            Done `cp`
            Warning: `-r` set to default because the value is invalid: not a boolean
            Warning: `[1] count` set to default because the value is invalid: not an integer number
            Warning: `[2] scale` set to default because the value is invalid: not a decimal number
            -h --help = Boolean(false)
            -r = Boolean(false) *
            [0] src = Text("a") *
            [1] count = Integer(1) *
            [2] scale = Decimal(1.0) *
        "#]],
    );
}

#[test]
fn bad_positional_keeps_default_but_counts() {
    let mut cmd = Command::new("head");
    let lines = cmd.positional("lines", "", 10i64);
    let file = cmd.positional("file", "", String::from("-"));

    let (res, diagnostics) = parse(&mut cmd, "ten notes.txt");
    res.unwrap();
    assert_eq!(lines.get(), 10);
    assert_eq!(file.get(), "notes.txt");
    assert_eq!(
        count(&diagnostics, "[0] lines", |it| *it
            == DiagnosticKind::InvalidValue(Rejection::NotAnInteger)),
        1
    );
    assert!(cmd.flags().find_by_index(0).unwrap().record().referred());
}

#[test]
fn positional_validator() {
    let mut cmd = Command::new("sleep");
    let seconds = cmd.positional_validated("seconds", "", 1.0f64, |it| {
        if it.is_finite() && *it >= 0.0 {
            Ok(())
        } else {
            Err(format!("`{it}` is not a duration"))
        }
    });

    parse(&mut cmd, "0.5").0.unwrap();
    assert_eq!(seconds.get(), 0.5);

    let (_, diagnostics) = parse(&mut cmd, "inf");
    assert_eq!(seconds.get(), 1.0);
    let reason = "`inf` is not a duration".to_string();
    let rejected = DiagnosticKind::InvalidValue(Rejection::Invalid(reason));
    assert_eq!(count(&diagnostics, "[0] seconds", |it| *it == rejected), 1);
}

#[test]
fn indices_follow_declaration_order() {
    let mut cmd = Command::new("mv");
    cmd.positional("from", "", String::new());
    cmd.positional("to", "", String::new());

    let flags = cmd.flags();
    assert_eq!(flags.find_by_placeholder("to").unwrap().index(), 1);
    assert_eq!(flags.find_by_index(0).unwrap().placeholder(), "from");
    assert_eq!(flags.find_by_index(0).unwrap().record().kind(), Kind::Text);
    assert!(flags.find_by_index(2).is_none());
}

#[test]
#[should_panic(expected = "flag with placeholder `to` already exists")]
fn duplicate_placeholder() {
    let mut cmd = Command::new("mv");
    cmd.positional("to", "", String::new());
    cmd.positional("to", "", 0i64);
}
