use std::{ffi::OsString, fmt, process};

use crate::{
    diagnostic::{Diagnostics, TracingSink},
    flag::{FlagRecord, FlagValue, NamedFlag, PositionalFlag, Slot, ValueFlag},
    help,
    registry::FlagRegistry,
    rt::{self, Parser},
    value::Value,
    Error, Result,
};

pub type Hook = Box<dyn Fn(&Command)>;
pub type ErrorHook = Box<dyn Fn(&Command, &Error)>;

/// How a successful parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// All arguments were scanned.
    Done,
    /// `-h`/`--help` was given. The rest of the arguments were still scanned.
    Help,
    /// The command got no arguments at all; nothing was scanned.
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Names from the root down to the command that handled the arguments.
    pub path: Vec<String>,
    pub status: Status,
    /// Positional arguments beyond the declared positional flags.
    pub remaining: Vec<String>,
}

/// A node of the command tree: flags, subcommands and the hooks run on
/// bare invocation, error and help.
pub struct Command {
    name: String,
    version: Option<String>,
    about: Option<String>,
    parents: Vec<String>,
    width: usize,
    flags: FlagRegistry,
    subcommands: Vec<Command>,
    dispatched: Option<usize>,
    on_bare_invocation: Option<Hook>,
    on_error: Option<ErrorHook>,
    on_help: Option<Hook>,
}

impl Command {
    /// Creates a command with the `-h, --help` flag already declared.
    pub fn new(name: impl Into<String>) -> Command {
        let mut cmd = Command {
            name: name.into(),
            version: None,
            about: None,
            parents: Vec::new(),
            width: 80,
            flags: FlagRegistry::default(),
            subcommands: Vec::new(),
            dispatched: None,
            on_bare_invocation: None,
            on_error: None,
            on_help: None,
        };
        let (storage, _) = bool::storage(false, None);
        cmd.flags.add_named(NamedFlag {
            record: FlagRecord::new("Prints help information.", storage),
            short: Some('h'),
            long: Some("help".to_string()),
            is_help: true,
        });
        cmd
    }

    pub fn version(&mut self, version: impl Into<String>) -> &mut Command {
        self.version = Some(version.into());
        self
    }

    pub fn about(&mut self, about: impl Into<String>) -> &mut Command {
        self.about = Some(about.into());
        self
    }

    /// Column at which help text is wrapped. Subcommands created afterwards inherit it.
    pub fn width(&mut self, width: usize) -> &mut Command {
        self.width = width;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about_text(&self) -> Option<&str> {
        self.about.as_deref()
    }

    pub fn help_width(&self) -> usize {
        self.width
    }

    /// Names of all ancestors followed by this command's name.
    pub fn path(&self) -> Vec<String> {
        let mut path = self.parents.clone();
        path.push(self.name.clone());
        path
    }

    /// `git remote add 1.2.0`: the command path plus the version, if any.
    pub fn full_name(&self) -> String {
        let mut name = self.path().join(" ");
        if let Some(version) = &self.version {
            name.push(' ');
            name.push_str(version);
        }
        name
    }

    pub fn flags(&self) -> &FlagRegistry {
        &self.flags
    }

    pub fn subcommands(&self) -> &[Command] {
        &self.subcommands
    }

    pub fn find_subcommand(&self, name: &str) -> Option<&Command> {
        self.subcommands.iter().find(|it| it.name == name)
    }

    /// Declares a child command, selected when it is the first argument.
    ///
    /// # Panics
    ///
    /// If a subcommand with this name already exists.
    pub fn subcommand(&mut self, name: impl Into<String>) -> &mut Command {
        let name = name.into();
        if self.find_subcommand(&name).is_some() {
            panic!("subcommand `{name}` already exists in `{}`", self.full_name());
        }
        let mut child = Command::new(name);
        child.parents = self.path();
        child.width = self.width;
        self.subcommands.push(child);
        let last = self.subcommands.len() - 1;
        &mut self.subcommands[last]
    }

    /// The command that handled the last parse: this one or a nested subcommand.
    pub fn current(&self) -> &Command {
        match self.dispatched {
            Some(index) => self.subcommands[index].current(),
            None => self,
        }
    }

    /// Declares a named flag. At least one of `short` and `long` must be given.
    ///
    /// # Panics
    ///
    /// If both names are missing or either is already taken by this command.
    pub fn flag<T: FlagValue>(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        help: &str,
        default: T,
    ) -> Slot<T> {
        let (storage, slot) = T::storage(default, None);
        self.add_named(short, long, help, storage);
        slot
    }

    /// Like [`Command::flag`], but values rejected by `validator` leave the default in place.
    pub fn flag_validated<T: ValueFlag>(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        help: &str,
        default: T,
        validator: impl Fn(&T) -> Result<(), String> + 'static,
    ) -> Slot<T> {
        let (storage, slot) = T::storage(default, Some(Box::new(validator)));
        self.add_named(short, long, help, storage);
        slot
    }

    /// Declares the next positional flag.
    ///
    /// # Panics
    ///
    /// If the placeholder is already taken by this command.
    pub fn positional<T: ValueFlag>(
        &mut self,
        placeholder: &str,
        help: &str,
        default: T,
    ) -> Slot<T> {
        let (storage, slot) = T::storage(default, None);
        self.add_positional(placeholder, help, storage);
        slot
    }

    pub fn positional_validated<T: ValueFlag>(
        &mut self,
        placeholder: &str,
        help: &str,
        default: T,
        validator: impl Fn(&T) -> Result<(), String> + 'static,
    ) -> Slot<T> {
        let (storage, slot) = T::storage(default, Some(Box::new(validator)));
        self.add_positional(placeholder, help, storage);
        slot
    }

    fn add_named(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        help: &str,
        storage: crate::flag::Storage,
    ) {
        self.flags.add_named(NamedFlag {
            record: FlagRecord::new(help, storage),
            short,
            long: long.map(str::to_string),
            is_help: false,
        });
    }

    fn add_positional(&mut self, placeholder: &str, help: &str, storage: crate::flag::Storage) {
        self.flags.add_positional(PositionalFlag {
            record: FlagRecord::new(help, storage),
            index: 0,
            placeholder: placeholder.to_string(),
        });
    }

    /// Removes the built-in `-h, --help` flag, freeing both names.
    pub fn no_help_flag(&mut self) -> &mut Command {
        if let Some(index) = self.flags.help_index() {
            self.flags.remove_named(index);
        }
        self
    }

    pub fn on_bare_invocation(&mut self, hook: impl Fn(&Command) + 'static) -> &mut Command {
        self.on_bare_invocation = Some(Box::new(hook));
        self
    }

    pub fn on_error(&mut self, hook: impl Fn(&Command, &Error) + 'static) -> &mut Command {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub fn on_help(&mut self, hook: impl Fn(&Command) + 'static) -> &mut Command {
        self.on_help = Some(Box::new(hook));
        self
    }

    pub fn usage(&self) -> String {
        help::usage(self)
    }

    /// Parses `args` (without the program name), reporting diagnostics to `tracing`.
    pub fn parse<I, S>(&mut self, args: I) -> Result<Parsed>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_with(args, &mut TracingSink)
    }

    pub fn parse_with<I, S>(&mut self, args: I, sink: &mut dyn Diagnostics) -> Result<Parsed>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<String>>();
        self.dispatch(Parser::new(args), sink)
    }

    /// Parses the process arguments and applies the usual policy: usage and
    /// exit code 0 on help or bare invocation, error, usage and exit code 1
    /// on failure.
    pub fn parse_env_or_exit(&mut self) -> Parsed {
        let args = std::env::args_os().skip(1).map(lossy).collect::<Vec<_>>();
        let res = self.parse(args);
        let current = self.current();
        match res {
            Ok(parsed) => match parsed.status {
                Status::Done => parsed,
                Status::Help => {
                    println!("{}", current.usage());
                    process::exit(0)
                }
                Status::Bare => {
                    println!("{} ran without any arguments\n", current.name());
                    println!("{}", current.usage());
                    process::exit(0)
                }
            },
            Err(err) => {
                eprintln!("{err}\n");
                eprintln!("{}", current.usage());
                process::exit(1)
            }
        }
    }

    fn dispatch(&mut self, mut p: Parser, sink: &mut dyn Diagnostics) -> Result<Parsed> {
        self.reset();

        if p.is_empty() {
            if let Some(hook) = &self.on_bare_invocation {
                hook(self);
            }
            return Ok(self.parsed(Status::Bare, Vec::new()));
        }

        let sub =
            p.peek().and_then(|first| self.subcommands.iter().position(|it| it.name == first));
        if let Some(index) = sub {
            p.next();
            self.dispatched = Some(index);
            let child = &mut self.subcommands[index];
            tracing::debug!(command = %child.full_name(), "dispatching to subcommand");
            return child.dispatch(p, sink);
        }

        let remaining = match rt::scan(&mut self.flags, p, sink) {
            Ok(it) => it,
            Err(err) => {
                if let Some(hook) = &self.on_error {
                    hook(self, &err);
                }
                return Err(err);
            }
        };

        if self.help_requested() {
            if let Some(hook) = &self.on_help {
                hook(self);
            }
            return Ok(self.parsed(Status::Help, remaining));
        }
        Ok(self.parsed(Status::Done, remaining))
    }

    fn reset(&mut self) {
        self.dispatched = None;
        for flag in self.flags.named_mut() {
            flag.record.reset();
        }
        for flag in self.flags.positional_mut() {
            flag.record.reset();
        }
    }

    fn help_requested(&self) -> bool {
        self.flags
            .named()
            .iter()
            .any(|it| it.is_help && it.record.value() == Value::Boolean(true))
    }

    fn parsed(&self, status: Status, remaining: Vec<String>) -> Parsed {
        Parsed { path: self.path(), status, remaining }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.full_name())
            .field("flags", &self.flags)
            .field("subcommands", &self.subcommands)
            .finish_non_exhaustive()
    }
}

fn lossy(arg: OsString) -> String {
    match arg.into_string() {
        Ok(it) => it,
        Err(it) => it.to_string_lossy().into_owned(),
    }
}
