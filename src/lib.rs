//! Command line flags declared at runtime.
//!
//! A [`Command`] owns named flags (`-v`, `--verbose`), positional flags and
//! nested subcommands. Declaring a flag hands back a [`Slot`] which holds the
//! flag's value once [`Command::parse`] has run:
//!
//! ```
//! let mut cmd = pennon::Command::new("hello");
//! let loud = cmd.flag(Some('l'), Some("loud"), "Shout the greeting.", false);
//! let times = cmd.flag(Some('n'), None, "How many times.", 1i64);
//! let name = cmd.positional("name", "Who to greet.", String::from("world"));
//!
//! let parsed = cmd.parse(["-ln", "3", "ferris"]).unwrap();
//! assert_eq!(parsed.status, pennon::Status::Done);
//! assert!(loud.get());
//! assert_eq!(times.get(), 3);
//! assert_eq!(name.get(), "ferris");
//! ```
//!
//! Bad values never abort a parse: the flag keeps its default and a
//! [`Diagnostic`] is reported. Only an unknown flag, or a non-boolean flag in
//! the middle of a `-abc` cluster, fails the parse with an [`Error`].
mod command;
mod diagnostic;
mod flag;
mod help;
mod registry;
mod rt;
mod token;
mod value;

pub use crate::{
    command::{Command, ErrorHook, Hook, Parsed, Status},
    diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Severity, TracingSink},
    flag::{FlagRecord, FlagValue, NamedFlag, PositionalFlag, Slot, Validator, ValueFlag},
    help::usage,
    registry::FlagRegistry,
    token::Token,
    value::{coerce, Coerce, Kind, Rejection, Value},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A parse that could not continue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("`{flag}` does not exist")]
    UnknownFlag { flag: String },
    #[error(
        "flag `{flag}` should be boolean because it's inside a group of flags \
         and it's not the last flag"
    )]
    GroupedNonBoolean { flag: String },
}

impl Error {
    pub fn flag(&self) -> &str {
        match self {
            Error::UnknownFlag { flag } | Error::GroupedNonBoolean { flag } => flag,
        }
    }

    pub(crate) fn diagnostic(&self) -> Diagnostic {
        let kind = match self {
            Error::UnknownFlag { .. } => DiagnosticKind::UnknownFlag,
            Error::GroupedNonBoolean { .. } => DiagnosticKind::GroupedNonBoolean,
        };
        Diagnostic::error(self.flag().to_string(), kind)
    }
}
