//! Typed flag values and the conversion from raw argument text.
use std::fmt;

/// The value type a flag holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Text,
    Integer,
    Decimal,
    Boolean,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Text => "text",
            Kind::Integer => "integer",
            Kind::Decimal => "decimal",
            Kind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A dynamically typed flag value, as produced by [`coerce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Integer(_) => Kind::Integer,
            Value::Decimal(_) => Kind::Decimal,
            Value::Boolean(_) => Kind::Boolean,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(it) => f.write_str(it),
            Value::Integer(it) => fmt::Display::fmt(it, f),
            Value::Decimal(it) => fmt::Display::fmt(it, f),
            Value::Boolean(it) => fmt::Display::fmt(it, f),
        }
    }
}

/// Why a supplied value did not make it into a flag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("not an integer number")]
    NotAnInteger,
    #[error("not a decimal number")]
    NotADecimal,
    #[error("not a boolean")]
    NotABoolean,
    /// A validator refused an otherwise well-typed value.
    #[error("{0}")]
    Invalid(String),
}

/// Conversion of raw argument text into one flag value type.
pub trait Coerce: Sized {
    const KIND: Kind;

    fn coerce(raw: &str) -> Result<Self, Rejection>;

    fn into_value(self) -> Value;
}

impl Coerce for String {
    const KIND: Kind = Kind::Text;

    fn coerce(raw: &str) -> Result<Self, Rejection> {
        Ok(raw.to_string())
    }

    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl Coerce for i64 {
    const KIND: Kind = Kind::Integer;

    fn coerce(raw: &str) -> Result<Self, Rejection> {
        raw.parse().map_err(|_| Rejection::NotAnInteger)
    }

    fn into_value(self) -> Value {
        Value::Integer(self)
    }
}

impl Coerce for f64 {
    const KIND: Kind = Kind::Decimal;

    fn coerce(raw: &str) -> Result<Self, Rejection> {
        raw.parse().map_err(|_| Rejection::NotADecimal)
    }

    fn into_value(self) -> Value {
        Value::Decimal(self)
    }
}

impl Coerce for bool {
    const KIND: Kind = Kind::Boolean;

    fn coerce(raw: &str) -> Result<Self, Rejection> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" => Ok(true),
            "false" | "f" | "0" | "no" => Ok(false),
            _ => Err(Rejection::NotABoolean),
        }
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }
}

/// Converts `raw` into a value of `kind`.
pub fn coerce(kind: Kind, raw: &str) -> Result<Value, Rejection> {
    let table: fn(&str) -> Result<Value, Rejection> = match kind {
        Kind::Text => |raw| String::coerce(raw).map(Coerce::into_value),
        Kind::Integer => |raw| i64::coerce(raw).map(Coerce::into_value),
        Kind::Decimal => |raw| f64::coerce(raw).map(Coerce::into_value),
        Kind::Boolean => |raw| bool::coerce(raw).map(Coerce::into_value),
    };
    table(raw)
}
