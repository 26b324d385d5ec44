use crate::{
    flag::{Arity, FlagValue},
    token::Token,
    tree::{CommandId, CommandTree},
    Error, Result,
};

struct Parser<'a> {
    rargs: Vec<(usize, &'a str)>,
}

impl<'a> Parser<'a> {
    fn new(args: &'a [String]) -> Self {
        let mut rargs = args.iter().map(String::as_str).enumerate().collect::<Vec<_>>();
        rargs.reverse();
        Self { rargs }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        self.rargs.pop()
    }

    fn peek_positional(&self) -> Option<&'a str> {
        self.rargs.last().map(|&(_, it)| it).filter(|it| Token::classify(it).is_positional())
    }

    fn next_value(&mut self) -> Option<String> {
        let value = self.peek_positional()?;
        self.next();
        Some(value.to_string())
    }

    fn next_values(&mut self) -> Vec<String> {
        let mut res = Vec::new();
        while let Some(value) = self.next_value() {
            res.push(value);
        }
        res
    }
}

impl CommandTree {
    /// Binds `args` to the flags of `cmd` in a single pass.
    ///
    /// Every flag of `cmd` is first reset to its declared default, so parsing the same
    /// arguments twice leaves the same values behind. Positional arguments not consumed
    /// by an option go to the command's default flag. Error indices point into `args`.
    pub fn parse_flags(&mut self, cmd: CommandId, args: &[String]) -> Result<()> {
        self.reset_flags(cmd);
        let mut p = Parser::new(args);
        let mut unclaimed = Vec::new();

        while let Some((index, arg)) = p.next() {
            let unknown = || Error::UnknownArgument { index, token: arg.to_string() };
            let flag = match Token::classify(arg) {
                Token::Positional(_) => {
                    unclaimed.push((index, arg));
                    continue;
                }
                Token::Malformed => return Err(unknown()),
                Token::Short(short) => self.find_short(cmd, short).ok_or_else(unknown)?,
                Token::Long(name) => self.find_flag(cmd, name).ok_or_else(unknown)?,
                Token::LongWithValue(name, value) => {
                    let flag = self.find_flag(cmd, name).ok_or_else(unknown)?;
                    if self[flag].arity() != Arity::Single {
                        return Err(Error::IllegalEquals { index, token: arg.to_string() });
                    }
                    self.flag_mut(flag).bind(FlagValue::Single(value.to_string()));
                    continue;
                }
            };

            let too_few = || Error::TooFewArguments { index, token: arg.to_string() };
            let value = match self[flag].arity() {
                Arity::NoArg => FlagValue::Provided,
                Arity::Single => FlagValue::Single(p.next_value().ok_or_else(too_few)?),
                Arity::Multiple => {
                    let values = p.next_values();
                    if values.is_empty() {
                        return Err(too_few());
                    }
                    FlagValue::Multiple(values)
                }
            };
            self.flag_mut(flag).bind(value);
        }

        self.bind_unclaimed(cmd, unclaimed)
    }

    fn bind_unclaimed(&mut self, cmd: CommandId, unclaimed: Vec<(usize, &str)>) -> Result<()> {
        let too_many = |(index, token): (usize, &str)| Error::TooManyArguments {
            index,
            token: token.to_string(),
        };

        let default = self[cmd].default_flag();
        match default.map(|it| (it, self[it].arity())) {
            Some((flag, Arity::Multiple)) => {
                let mut values = match self[flag].value() {
                    FlagValue::Multiple(explicit) => explicit.clone(),
                    _ => Vec::new(),
                };
                values.extend(unclaimed.into_iter().map(|(_, it)| it.to_string()));
                self.flag_mut(flag).bind(FlagValue::Multiple(values));
            }
            Some((flag, Arity::Single)) => {
                let mut unclaimed = unclaimed.into_iter();
                let first = unclaimed.next();
                if let Some(second) = unclaimed.next() {
                    return Err(too_many(second));
                }
                if let Some((_, value)) = first {
                    self.flag_mut(flag).bind(FlagValue::Single(value.to_string()));
                }
            }
            Some((_, Arity::NoArg)) | None => {
                if let Some(first) = unclaimed.into_iter().next() {
                    return Err(too_many(first));
                }
            }
        }
        Ok(())
    }
}
