/// What a single argument looks like, with the dashes stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `--name`.
    Long(&'a str),
    /// `-abc`: one short flag or a cluster of them.
    Short(&'a str),
    Positional(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(arg: &'a str) -> Token<'a> {
        if let Some(long) = arg.strip_prefix("--") {
            Token::Long(long)
        } else if let Some(shorts) = arg.strip_prefix('-').filter(|it| !it.is_empty()) {
            Token::Short(shorts)
        } else {
            // A lone `-` conventionally names stdin, so it is a value.
            Token::Positional(arg)
        }
    }

    pub fn is_flag(&self) -> bool {
        !matches!(self, Token::Positional(_))
    }
}
