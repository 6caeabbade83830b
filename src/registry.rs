//! Named and positional flags owned by one command.
use crate::flag::{NamedFlag, PositionalFlag};

#[derive(Debug, Default)]
pub struct FlagRegistry {
    named: Vec<NamedFlag>,
    positional: Vec<PositionalFlag>,
}

impl FlagRegistry {
    /// # Panics
    ///
    /// If the short or long name is already taken, or if both are missing.
    pub(crate) fn add_named(&mut self, flag: NamedFlag) {
        assert!(
            flag.short.is_some() || flag.long.is_some(),
            "a named flag needs a short or a long name"
        );
        if let Some(short) = flag.short {
            if self.find_by_short(short).is_some() {
                panic!("flag `-{short}` already exists");
            }
        }
        if let Some(long) = &flag.long {
            if self.find_by_long(long).is_some() {
                panic!("flag `--{long}` already exists");
            }
        }
        self.named.push(flag);
    }

    /// The flag's index is overwritten with the next free position.
    ///
    /// # Panics
    ///
    /// If the placeholder is already taken.
    pub(crate) fn add_positional(&mut self, mut flag: PositionalFlag) {
        if self.find_by_placeholder(&flag.placeholder).is_some() {
            panic!("flag with placeholder `{}` already exists", flag.placeholder);
        }
        flag.index = self.positional.len();
        self.positional.push(flag);
    }

    pub(crate) fn remove_named(&mut self, index: usize) -> NamedFlag {
        self.named.remove(index)
    }

    pub fn named(&self) -> &[NamedFlag] {
        &self.named
    }

    pub fn positional(&self) -> &[PositionalFlag] {
        &self.positional
    }

    pub(crate) fn named_mut(&mut self) -> &mut [NamedFlag] {
        &mut self.named
    }

    pub(crate) fn positional_mut(&mut self) -> &mut [PositionalFlag] {
        &mut self.positional
    }

    pub fn find_by_short(&self, short: char) -> Option<&NamedFlag> {
        self.named.iter().find(|it| it.short == Some(short))
    }

    pub fn find_by_long(&self, long: &str) -> Option<&NamedFlag> {
        self.named.iter().find(|it| it.long.as_deref() == Some(long))
    }

    pub fn find_by_short_and_long(&self, short: char, long: &str) -> Option<&NamedFlag> {
        self.named
            .iter()
            .find(|it| it.short == Some(short) && it.long.as_deref() == Some(long))
    }

    pub fn find_by_index(&self, index: usize) -> Option<&PositionalFlag> {
        self.positional.iter().find(|it| it.index == index)
    }

    pub fn find_by_placeholder(&self, placeholder: &str) -> Option<&PositionalFlag> {
        self.positional.iter().find(|it| it.placeholder == placeholder)
    }

    pub(crate) fn short_mut(&mut self, short: char) -> Option<&mut NamedFlag> {
        self.named.iter_mut().find(|it| it.short == Some(short))
    }

    pub(crate) fn long_mut(&mut self, long: &str) -> Option<&mut NamedFlag> {
        self.named.iter_mut().find(|it| it.long.as_deref() == Some(long))
    }

    pub(crate) fn index_mut(&mut self, index: usize) -> Option<&mut PositionalFlag> {
        self.positional.iter_mut().find(|it| it.index == index)
    }

    pub(crate) fn help_index(&self) -> Option<usize> {
        self.named.iter().position(|it| it.is_help)
    }

    /// Width of the longest flag id, named and positional alike.
    pub fn max_id_width(&self) -> usize {
        let named = self.named.iter().map(|it| it.id().chars().count());
        let positional = self.positional.iter().map(|it| it.id().chars().count());
        named.chain(positional).max().unwrap_or(0)
    }
}
