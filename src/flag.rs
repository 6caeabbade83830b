//! Flag records and the typed handles handed back to callers.
use std::{cell::RefCell, fmt, rc::Rc};

use crate::value::{Coerce, Kind, Rejection, Value};

/// Shared handle to the value of a declared flag.
///
/// The handle is returned at declaration time and reads the value the last
/// parse left in place. Before parsing (or when the flag was not supplied) it
/// holds the declared default.
pub struct Slot<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Slot { cell: Rc::clone(&self.cell) }
    }
}

impl<T: Clone> Slot<T> {
    fn new(value: T) -> Self {
        Slot { cell: Rc::new(RefCell::new(value)) }
    }

    pub fn get(&self) -> T {
        self.cell.borrow().clone()
    }

    fn set(&self, value: T) {
        *self.cell.borrow_mut() = value;
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&*self.cell.borrow()).finish()
    }
}

pub type Validator<T> = Box<dyn Fn(&T) -> Result<(), String>>;

/// Slot, default and validator of one value type.
#[doc(hidden)]
pub struct Binding<T> {
    slot: Slot<T>,
    default: T,
    validator: Option<Validator<T>>,
}

impl<T: Coerce + Clone> Binding<T> {
    fn assign(&self, raw: &str) -> Result<(), Rejection> {
        let value = T::coerce(raw)?;
        if let Some(validator) = &self.validator {
            validator(&value).map_err(Rejection::Invalid)?;
        }
        self.slot.set(value);
        Ok(())
    }

    fn reset(&self) {
        self.slot.set(self.default.clone());
    }

    fn kind(&self) -> Kind {
        T::KIND
    }
}

/// Value types a flag can be declared with.
pub trait FlagValue: Coerce + Clone + 'static {
    #[doc(hidden)]
    fn storage(
        default: Self,
        validator: Option<Validator<Self>>,
    ) -> (Storage, Slot<Self>);
}

/// Value types that take a value token and may carry a validator.
///
/// Booleans are excluded: they are set by presence and never positional.
pub trait ValueFlag: FlagValue {}

impl ValueFlag for String {}
impl ValueFlag for i64 {}
impl ValueFlag for f64 {}

macro_rules! flag_value {
    ($ty:ty, $variant:ident) => {
        impl FlagValue for $ty {
            fn storage(
                default: Self,
                validator: Option<Validator<Self>>,
            ) -> (Storage, Slot<Self>) {
                let slot = Slot::new(default.clone());
                let binding = Binding { slot: slot.clone(), default, validator };
                (Storage::$variant(binding), slot)
            }
        }
    };
}

flag_value!(String, Text);
flag_value!(i64, Integer);
flag_value!(f64, Decimal);
flag_value!(bool, Boolean);

/// Tagged storage: the variant is the flag's kind, so the slot can never hold
/// a value of another type.
#[doc(hidden)]
pub enum Storage {
    Text(Binding<String>),
    Integer(Binding<i64>),
    Decimal(Binding<f64>),
    Boolean(Binding<bool>),
}

impl Storage {
    fn kind(&self) -> Kind {
        match self {
            Storage::Text(it) => it.kind(),
            Storage::Integer(it) => it.kind(),
            Storage::Decimal(it) => it.kind(),
            Storage::Boolean(it) => it.kind(),
        }
    }
}

/// The shape shared by named and positional flags.
pub struct FlagRecord {
    help: String,
    storage: Storage,
    pub(crate) referred: bool,
}

impl FlagRecord {
    pub(crate) fn new(help: &str, storage: Storage) -> FlagRecord {
        FlagRecord { help: help.trim().to_string(), storage, referred: false }
    }

    pub fn kind(&self) -> Kind {
        self.storage.kind()
    }

    pub fn is_boolean(&self) -> bool {
        self.kind() == Kind::Boolean
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    /// Whether the last parse matched this flag against a token.
    pub fn referred(&self) -> bool {
        self.referred
    }

    pub fn default_value(&self) -> Value {
        match &self.storage {
            Storage::Text(it) => it.default.clone().into_value(),
            Storage::Integer(it) => it.default.into_value(),
            Storage::Decimal(it) => it.default.into_value(),
            Storage::Boolean(it) => it.default.into_value(),
        }
    }

    pub fn value(&self) -> Value {
        match &self.storage {
            Storage::Text(it) => it.slot.get().into_value(),
            Storage::Integer(it) => it.slot.get().into_value(),
            Storage::Decimal(it) => it.slot.get().into_value(),
            Storage::Boolean(it) => it.slot.get().into_value(),
        }
    }

    /// Coerces, validates and stores `raw`. On failure the slot is untouched.
    pub(crate) fn assign(&mut self, raw: &str) -> Result<(), Rejection> {
        match &self.storage {
            Storage::Text(it) => it.assign(raw),
            Storage::Integer(it) => it.assign(raw),
            Storage::Decimal(it) => it.assign(raw),
            Storage::Boolean(it) => it.assign(raw),
        }
    }

    /// Sets a boolean flag by presence. No-op for other kinds.
    pub(crate) fn raise(&mut self) {
        if let Storage::Boolean(it) = &self.storage {
            it.slot.set(true);
        }
    }

    /// Restores the default and clears the referred mark.
    pub(crate) fn reset(&mut self) {
        self.referred = false;
        match &self.storage {
            Storage::Text(it) => it.reset(),
            Storage::Integer(it) => it.reset(),
            Storage::Decimal(it) => it.reset(),
            Storage::Boolean(it) => it.reset(),
        }
    }
}

impl fmt::Debug for FlagRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagRecord")
            .field("kind", &self.kind())
            .field("value", &self.value())
            .field("default", &self.default_value())
            .field("referred", &self.referred)
            .finish()
    }
}

/// A flag referenced as `-s` and/or `--long`.
#[derive(Debug)]
pub struct NamedFlag {
    pub(crate) record: FlagRecord,
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) is_help: bool,
}

impl NamedFlag {
    pub fn record(&self) -> &FlagRecord {
        &self.record
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// `-s --long`, `-s` or `--long`.
    pub fn id(&self) -> String {
        match (self.short, &self.long) {
            (Some(short), Some(long)) => format!("-{short} --{long}"),
            (Some(short), None) => format!("-{short}"),
            (None, Some(long)) => format!("--{long}"),
            (None, None) => String::new(),
        }
    }
}

/// A flag identified by its position among the non-flag tokens.
#[derive(Debug)]
pub struct PositionalFlag {
    pub(crate) record: FlagRecord,
    pub(crate) index: usize,
    pub(crate) placeholder: String,
}

impl PositionalFlag {
    pub fn record(&self) -> &FlagRecord {
        &self.record
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// `[0] input`.
    pub fn id(&self) -> String {
        format!("[{}] {}", self.index, self.placeholder)
    }
}
