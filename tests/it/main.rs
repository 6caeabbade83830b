mod positional;
mod subcommands;

use std::fmt::Write;

use expect_test::Expect;
use pennon::{Command, Diagnostic, DiagnosticKind};

macro_rules! w {
    ($($tt:tt)*) => {{
        let _ = write!($($tt)*);
    }};
}

/// Parses whitespace separated `args` and snapshots the outcome, every
/// diagnostic, and the flags of the command that handled the arguments.
fn check(cmd: &mut Command, args: &str, expect: Expect) {
    let (res, diagnostics) = parse(cmd, args);

    let mut buf = String::new();
    match res {
        Ok(parsed) => {
            w!(buf, "{:?} `{}`\n", parsed.status, parsed.path.join(" "));
            if !parsed.remaining.is_empty() {
                w!(buf, "remaining: {:?}\n", parsed.remaining);
            }
        }
        Err(err) => w!(buf, "error: {err}\n"),
    }
    for diagnostic in &diagnostics {
        w!(buf, "{:?}: {diagnostic}\n", diagnostic.severity);
    }

    let current = cmd.current();
    let flags = current.flags();
    let named = flags.named().iter().map(|it| (it.id(), it.record()));
    let positional = flags.positional().iter().map(|it| (it.id(), it.record()));
    for (id, record) in named.chain(positional) {
        let referred = if record.referred() { " *" } else { "" };
        w!(buf, "{id} = {:?}{referred}\n", record.value());
    }

    expect.assert_eq(&buf);
}

fn parse(cmd: &mut Command, args: &str) -> (pennon::Result<pennon::Parsed>, Vec<Diagnostic>) {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let res = cmd.parse_with(args.split_ascii_whitespace(), &mut diagnostics);
    (res, diagnostics)
}

fn count(diagnostics: &[Diagnostic], flag: &str, pred: impl Fn(&DiagnosticKind) -> bool) -> usize {
    diagnostics.iter().filter(|it| it.flag == flag && pred(&it.kind)).count()
}
