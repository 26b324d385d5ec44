/// Syntactic category of a single argument, independent of any declared flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Positional(&'a str),
    /// `-x`
    Short(char),
    /// `--name`
    Long(&'a str),
    /// `--name=value`, split at the first `=`.
    LongWithValue(&'a str, &'a str),
    /// `-`, `--`, `-abc`, `--name=`, `--=value`
    Malformed,
}

impl<'a> Token<'a> {
    pub fn classify(arg: &'a str) -> Token<'a> {
        if let Some(long) = arg.strip_prefix("--") {
            if long.is_empty() {
                return Token::Malformed;
            }
            return match long.split_once('=') {
                Some((name, value)) if name.is_empty() || value.is_empty() => Token::Malformed,
                Some((name, value)) => Token::LongWithValue(name, value),
                None => Token::Long(long),
            };
        }
        if let Some(short) = arg.strip_prefix('-') {
            let mut chars = short.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Token::Short(c),
                _ => Token::Malformed,
            };
        }
        Token::Positional(arg)
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Token::Positional(_))
    }
}
