//! The token scan that feeds one command's flags.
use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Diagnostics},
    flag::NamedFlag,
    registry::FlagRegistry,
    token::Token,
    Error, Result,
};

/// Arguments not yet consumed, stored back to front so `pop` yields the next one.
pub(crate) struct Parser {
    rargs: Vec<String>,
}

impl Parser {
    pub(crate) fn new(mut args: Vec<String>) -> Self {
        args.reverse();
        Self { rargs: args }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rargs.is_empty()
    }

    pub(crate) fn peek(&self) -> Option<&str> {
        self.rargs.last().map(String::as_str)
    }

    pub(crate) fn next(&mut self) -> Option<String> {
        self.rargs.pop()
    }

    fn peek_value(&self) -> Option<&str> {
        self.peek().filter(|it| !Token::classify(it).is_flag())
    }

    /// Takes the next argument if it can serve as a value, i.e. is not flag-shaped.
    fn next_value(&mut self) -> Option<String> {
        self.peek_value()?;
        self.next()
    }
}

/// Scans all of `p` against `flags`, returning the positional arguments no
/// positional flag claimed.
///
/// Recoverable problems go to `sink` and leave the flag at its default; an
/// unknown flag or a misplaced non-boolean in a cluster aborts the scan.
pub(crate) fn scan(
    flags: &mut FlagRegistry,
    mut p: Parser,
    sink: &mut dyn Diagnostics,
) -> Result<Vec<String>> {
    let mut positional = 0;
    let mut remaining = Vec::new();

    while let Some(arg) = p.next() {
        match Token::classify(&arg) {
            Token::Long(long) => {
                let flag = match flags.long_mut(long) {
                    Some(it) => it,
                    None => return Err(fatal(sink, Error::UnknownFlag { flag: arg.clone() })),
                };
                resolve(flag, &mut p, sink);
            }
            Token::Short(shorts) => {
                let shorts = shorts.chars().collect::<Vec<_>>();
                let Some((&last, grouped)) = shorts.split_last() else { continue };
                for &short in grouped {
                    let Some(flag) = flags.short_mut(short) else {
                        let flag = format!("-{short}");
                        return Err(fatal(sink, Error::UnknownFlag { flag }));
                    };
                    if !flag.record.is_boolean() {
                        let flag = format!("-{short}");
                        return Err(fatal(sink, Error::GroupedNonBoolean { flag }));
                    }
                    flag.record.raise();
                    flag.record.referred = true;
                }
                let Some(flag) = flags.short_mut(last) else {
                    let flag = format!("-{last}");
                    return Err(fatal(sink, Error::UnknownFlag { flag }));
                };
                resolve(flag, &mut p, sink);
            }
            Token::Positional(value) => {
                match flags.index_mut(positional) {
                    Some(flag) => {
                        flag.record.referred = true;
                        if let Err(reason) = flag.record.assign(value) {
                            let kind = DiagnosticKind::InvalidValue(reason);
                            sink.report(&Diagnostic::warning(flag.id(), kind));
                        }
                    }
                    None => remaining.push(value.to_string()),
                }
                positional += 1;
            }
        }
    }

    for flag in flags.named().iter().filter(|it| !it.is_help && !it.record.referred()) {
        sink.report(&Diagnostic::warning(flag.id(), DiagnosticKind::NotReferred));
    }
    for flag in flags.positional().iter().filter(|it| !it.record.referred()) {
        sink.report(&Diagnostic::warning(flag.id(), DiagnosticKind::NotReferred));
    }

    Ok(remaining)
}

/// Matches one named flag: a following non-flag argument is always taken as
/// its value, otherwise booleans are raised by presence.
fn resolve(flag: &mut NamedFlag, p: &mut Parser, sink: &mut dyn Diagnostics) {
    flag.record.referred = true;
    match p.next_value() {
        Some(value) => {
            if let Err(reason) = flag.record.assign(&value) {
                let kind = DiagnosticKind::InvalidValue(reason);
                sink.report(&Diagnostic::warning(flag.id(), kind));
            }
        }
        None if flag.record.is_boolean() => flag.record.raise(),
        None => sink.report(&Diagnostic::warning(flag.id(), DiagnosticKind::MissingValue)),
    }
}

fn fatal(sink: &mut dyn Diagnostics, err: Error) -> Error {
    sink.report(&err.diagnostic());
    err
}
