use std::fmt;

use crate::{
    flag::FlagValue,
    help,
    tree::{Command, CommandId, CommandTree},
    Error, Result, FAILURE,
};

/// How a command's residual tokens reach its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Tokens are bound to the command's flags before the handler runs.
    Flags,
    /// The handler gets the residual tokens as is.
    SelfParsed,
}

pub enum Handler {
    Flags(Box<dyn Fn(&Invocation<'_>) -> i32>),
    Raw(Box<dyn Fn(&Invocation<'_>, &[String]) -> i32>),
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Flags(_) => f.write_str("Handler::Flags"),
            Handler::Raw(_) => f.write_str("Handler::Raw"),
        }
    }
}

/// What a handler sees: the resolved command and the values bound to its flags.
#[derive(Clone, Copy)]
pub struct Invocation<'a> {
    tree: &'a CommandTree,
    command: CommandId,
}

impl<'a> Invocation<'a> {
    pub fn tree(&self) -> &'a CommandTree {
        self.tree
    }

    pub fn id(&self) -> CommandId {
        self.command
    }

    pub fn command(&self) -> &'a Command {
        &self.tree[self.command]
    }

    /// Value of the command's flag called `name`.
    pub fn value(&self, name: &str) -> Option<&'a FlagValue> {
        let flag = self.tree.find_flag(self.command, name)?;
        Some(self.tree[flag].value())
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.value(name).map_or(false, FlagValue::is_present)
    }

    /// Value of the default flag, the one that collects positional arguments.
    pub fn default_value(&self) -> Option<&'a FlagValue> {
        let flag = self.command().default_flag()?;
        Some(self.tree[flag].value())
    }
}

/// Terminal state of a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler ran and returned this code.
    Dispatched(i32),
    /// Help was rendered for the command instead of running a handler.
    Help(CommandId),
}

impl Outcome {
    pub fn code(&self) -> i32 {
        match self {
            Outcome::Dispatched(code) => *code,
            Outcome::Help(_) => 0,
        }
    }
}

/// Output side of dispatching.
pub trait Render {
    fn help(&mut self, tree: &CommandTree, cmd: CommandId);
    fn error(&mut self, tree: &CommandTree, err: &Error);
}

/// Help to stdout, errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdio;

impl Render for Stdio {
    fn help(&mut self, tree: &CommandTree, cmd: CommandId) {
        print!("{}", help::help_text(tree, cmd));
    }

    fn error(&mut self, tree: &CommandTree, err: &Error) {
        eprintln!("{}", help::error_text(tree, err));
    }
}

/// Collects everything into the string, handy in tests.
impl Render for String {
    fn help(&mut self, tree: &CommandTree, cmd: CommandId) {
        self.push_str(&help::help_text(tree, cmd));
    }

    fn error(&mut self, tree: &CommandTree, err: &Error) {
        self.push_str(&help::error_text(tree, err));
        self.push('\n');
    }
}

impl CommandTree {
    /// Resolves `tokens`, binds the residual tokens and runs the handler of the
    /// resolved command.
    ///
    /// `tokens` excludes the program name. Errors are passed to `render` before they are
    /// returned, with indices into `tokens`.
    pub fn dispatch(&mut self, tokens: &[String], render: &mut dyn Render) -> Result<Outcome> {
        let res = self.dispatch_(tokens, render);
        if let Err(err) = &res {
            tracing::debug!(%err, "dispatch failed");
            render.error(self, err);
        }
        res
    }

    /// Like [`CommandTree::dispatch`], but returns an exit code: the handler's code,
    /// `0` after help, and [`FAILURE`] on error.
    pub fn run(&mut self, tokens: &[String], render: &mut dyn Render) -> i32 {
        match self.dispatch(tokens, render) {
            Ok(outcome) => outcome.code(),
            Err(_) => FAILURE,
        }
    }

    fn dispatch_(&mut self, tokens: &[String], render: &mut dyn Render) -> Result<Outcome> {
        let resolution = self.resolve(tokens)?;
        let cmd = resolution.command;
        let residual = resolution.residual(tokens);

        if self[cmd].parse_mode() == ParseMode::Flags {
            self.parse_flags(cmd, residual).map_err(|err| err.shifted(resolution.consumed))?;
        }

        let inv = Invocation { tree: self, command: cmd };
        let help_requested = self[cmd].parse_mode() == ParseMode::Flags
            && self[cmd].flags().contains(&self.help_flag())
            && self[self.help_flag()].value().is_present();

        let code = match &self[cmd].handler {
            _ if help_requested => None,
            Some(Handler::Flags(f)) => Some(f(&inv)),
            Some(Handler::Raw(f)) => Some(f(&inv, residual)),
            None => None,
        };
        match code {
            Some(code) => {
                tracing::debug!(command = %self[cmd].name(), code, "dispatched");
                Ok(Outcome::Dispatched(code))
            }
            None => {
                render.help(self, cmd);
                Ok(Outcome::Help(cmd))
            }
        }
    }
}
