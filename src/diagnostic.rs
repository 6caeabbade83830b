//! Warnings and errors produced while parsing, and where they go.
use std::fmt;

use crate::value::Rejection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnknownFlag,
    GroupedNonBoolean,
    /// A non-boolean flag was not followed by a value.
    MissingValue,
    InvalidValue(Rejection),
    /// The flag never showed up on the command line.
    NotReferred,
}

/// One report about one flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The flag id (`-v --verbose`, `[0] input`) or the offending token.
    pub flag: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub(crate) fn warning(flag: String, kind: DiagnosticKind) -> Diagnostic {
        Diagnostic { severity: Severity::Warning, flag, kind }
    }

    pub(crate) fn error(flag: String, kind: DiagnosticKind) -> Diagnostic {
        Diagnostic { severity: Severity::Error, flag, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = &self.flag;
        match &self.kind {
            DiagnosticKind::UnknownFlag => write!(f, "`{flag}` does not exist"),
            DiagnosticKind::GroupedNonBoolean => write!(
                f,
                "flag `{flag}` should be boolean because it's inside a group of flags \
                 and it's not the last flag"
            ),
            DiagnosticKind::MissingValue => {
                write!(f, "`{flag}` set to default because the value is missing")
            }
            DiagnosticKind::InvalidValue(reason) => {
                write!(f, "`{flag}` set to default because the value is invalid: {reason}")
            }
            DiagnosticKind::NotReferred => {
                write!(f, "`{flag}` set to default because it's not referred")
            }
        }
    }
}

/// Receives every diagnostic a parse emits.
pub trait Diagnostics {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl Diagnostics for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn report(&mut self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic)
    }
}

/// Forwards diagnostics to `tracing`, warnings at `WARN` and errors at `ERROR`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Diagnostics for TracingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => {
                tracing::warn!(flag = %diagnostic.flag, "{diagnostic}")
            }
            Severity::Error => {
                tracing::error!(flag = %diagnostic.flag, "{diagnostic}")
            }
        }
    }
}
