//! A command tree with per-command flags, and a parser that dispatches an argument
//! vector into it.
//!
//! Commands are registered into a [`CommandTree`], which owns every command and every
//! flag. Dispatching a token list walks the tree to find the addressed command, binds
//! the remaining tokens to that command's flags, and calls its handler:
//!
//! ```
//! use treeflags::{Arity, Command, CommandTree, Flag, FlagValue, Stdio};
//!
//! let mut tree = CommandTree::new(Command::new("app"));
//! let greet = tree
//!     .add_subcommand(
//!         tree.root(),
//!         Command::new("greet").run(|inv| match inv.value("name") {
//!             Some(FlagValue::Single(name)) => name.len() as i32,
//!             _ => 0,
//!         }),
//!     )
//!     .unwrap();
//! let name = tree.register_flag(Flag::new("name", Some('n'), "Who to greet", None));
//! tree.add_default_flag(greet, name).unwrap();
//! assert_eq!(tree[name].arity(), Arity::Single);
//!
//! let code = tree.run(&["greet".to_string(), "world".to_string()], &mut Stdio);
//! assert_eq!(code, 5);
//! ```
//!
//! Help and error text is produced through the [`Render`] hook; [`help::help_text`] is
//! the default formatting.

mod dispatch;
mod flag;
mod resolve;
mod rt;
mod token;
mod tree;

pub mod help;

use std::ffi::OsString;

pub use crate::{
    dispatch::{Handler, Invocation, Outcome, ParseMode, Render, Stdio},
    flag::{Arity, Flag, FlagId, FlagValue},
    resolve::Resolution,
    token::Token,
    tree::{Command, CommandId, CommandTree, Limits},
};

/// Exit code reported when resolution or flag parsing fails.
pub const FAILURE: i32 = -1;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown argument: `{token}`")]
    UnknownArgument { index: usize, token: String },
    #[error("too few arguments for `{token}`")]
    TooFewArguments { index: usize, token: String },
    #[error("too many arguments: `{token}`")]
    TooManyArguments { index: usize, token: String },
    #[error("`=` can only be used with a single-argument flag: `{token}`")]
    IllegalEquals { index: usize, token: String },
    #[error("unknown command: `{token}`")]
    UnknownCommand { index: usize, token: String },

    #[error("`{parent}` already has the maximum of {max} subcommands")]
    SubcommandLimitExceeded { parent: String, max: usize },
    #[error("attaching `{child}` under `{parent}` exceeds the maximum depth of {max}")]
    SubtreeDepthExceeded { parent: String, child: String, max: usize },
    #[error("`{command}` already has the maximum of {max} flags")]
    FlagLimitExceeded { command: String, max: usize },
    #[error("`{child}` is already attached to a parent")]
    AlreadyAttached { child: String },
    #[error("`{child}` is an ancestor of `{parent}`")]
    Cycle { parent: String, child: String },
    #[error("the root command `{root}` can't be attached as a subcommand")]
    RootAttach { root: String },

    #[error("argument {index} is not valid utf8: {arg:?}")]
    InvalidUtf8 { index: usize, arg: OsString },
}

impl Error {
    /// Index of the offending token, for resolution and parse errors.
    pub fn index(&self) -> Option<usize> {
        match self {
            Error::UnknownArgument { index, .. }
            | Error::TooFewArguments { index, .. }
            | Error::TooManyArguments { index, .. }
            | Error::IllegalEquals { index, .. }
            | Error::UnknownCommand { index, .. }
            | Error::InvalidUtf8 { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub(crate) fn shifted(self, by: usize) -> Error {
        match self {
            Error::UnknownArgument { index, token } => {
                Error::UnknownArgument { index: index + by, token }
            }
            Error::TooFewArguments { index, token } => {
                Error::TooFewArguments { index: index + by, token }
            }
            Error::TooManyArguments { index, token } => {
                Error::TooManyArguments { index: index + by, token }
            }
            Error::IllegalEquals { index, token } => {
                Error::IllegalEquals { index: index + by, token }
            }
            Error::UnknownCommand { index, token } => {
                Error::UnknownCommand { index: index + by, token }
            }
            it => it,
        }
    }
}

/// Process arguments without the program name.
pub fn args_from_env() -> Result<Vec<String>> {
    std::env::args_os()
        .skip(1)
        .enumerate()
        .map(|(index, arg)| arg.into_string().map_err(|arg| Error::InvalidUtf8 { index, arg }))
        .collect()
}
