use crate::{
    tree::{CommandId, CommandTree},
    Error, Result,
};

/// The command addressed by a token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub command: CommandId,
    /// Number of leading tokens naming the command path. Equal to the command's depth.
    pub consumed: usize,
}

impl Resolution {
    /// Tokens left for the resolved command's own flags and arguments.
    pub fn residual<'a>(&self, tokens: &'a [String]) -> &'a [String] {
        &tokens[self.consumed.min(tokens.len())..]
    }
}

impl CommandTree {
    /// Finds the deepest command named by a prefix of `tokens`.
    ///
    /// `tokens` excludes the program name: a command at depth `d` is matched against
    /// `tokens[d - 1]`. The walk stops at a command with subcommands once the tokens run
    /// out or the next token looks like an option. A token that names none of the
    /// subcommands is handed to the command as an argument if it has a default flag, and
    /// is an unknown command otherwise. Among siblings sharing a name, the first one
    /// attached wins.
    pub fn resolve(&self, tokens: &[String]) -> Result<Resolution> {
        let mut curr = self.root();
        let mut depth = 0;
        loop {
            let cmd = &self[curr];
            if cmd.children().is_empty() {
                return Ok(self.hit(curr, depth));
            }
            let token = match tokens.get(depth) {
                Some(token) if !token.starts_with('-') => token,
                _ => return Ok(self.hit(curr, depth)),
            };
            match cmd.children().iter().copied().find(|&it| self[it].name() == token.as_str()) {
                Some(next) => {
                    curr = next;
                    depth += 1;
                }
                None if cmd.default_flag().is_some() => {
                    tracing::debug!(
                        command = %cmd.name(),
                        %token,
                        "no subcommand matched, falling back to default flag"
                    );
                    return Ok(self.hit(curr, depth));
                }
                None => return Err(Error::UnknownCommand { index: depth, token: token.clone() }),
            }
        }
    }

    fn hit(&self, command: CommandId, consumed: usize) -> Resolution {
        tracing::debug!(command = %self[command].name(), consumed, "resolved");
        Resolution { command, consumed }
    }
}
