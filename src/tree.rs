use std::{collections::VecDeque, fmt, ops};

use crate::{
    dispatch::{Handler, Invocation, ParseMode},
    flag::{Arity, Flag, FlagId},
    Error, Result,
};

/// Handle to a command registered in a [`CommandTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(pub(crate) usize);

/// Capacity bounds checked at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_children: usize,
    /// Maximum depth of any command below the root (the root is at depth 0).
    pub max_depth: usize,
    pub max_flags: usize,
}

impl Default for Limits {
    fn default() -> Limits {
        Limits { max_children: 5, max_depth: 5, max_flags: 10 }
    }
}

pub struct Command {
    name: String,
    short_desc: String,
    long_desc: String,
    pub(crate) handler: Option<Handler>,
    flags: Vec<FlagId>,
    default_flag: Option<FlagId>,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
    depth: usize,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Command {
        Command {
            name: name.into(),
            short_desc: String::new(),
            long_desc: String::new(),
            handler: None,
            flags: Vec::new(),
            default_flag: None,
            parent: None,
            children: Vec::new(),
            depth: 0,
        }
    }

    pub fn about(mut self, short_desc: impl Into<String>) -> Command {
        self.short_desc = short_desc.into();
        self
    }

    pub fn long_about(mut self, long_desc: impl Into<String>) -> Command {
        self.long_desc = long_desc.into();
        self
    }

    /// Sets a handler that runs after the residual tokens are bound to this command's
    /// flags.
    pub fn run<F>(mut self, f: F) -> Command
    where
        F: Fn(&Invocation<'_>) -> i32 + 'static,
    {
        self.handler = Some(Handler::Flags(Box::new(f)));
        self
    }

    /// Sets a handler that receives the residual tokens untouched.
    pub fn run_raw<F>(mut self, f: F) -> Command
    where
        F: Fn(&Invocation<'_>, &[String]) -> i32 + 'static,
    {
        self.handler = Some(Handler::Raw(Box::new(f)));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_desc(&self) -> &str {
        &self.short_desc
    }

    pub fn long_desc(&self) -> &str {
        &self.long_desc
    }

    pub fn parse_mode(&self) -> ParseMode {
        match self.handler {
            Some(Handler::Raw(_)) => ParseMode::SelfParsed,
            _ => ParseMode::Flags,
        }
    }

    pub fn flags(&self) -> &[FlagId] {
        &self.flags
    }

    pub fn default_flag(&self) -> Option<FlagId> {
        self.default_flag
    }

    pub fn parent(&self) -> Option<CommandId> {
        self.parent
    }

    pub fn children(&self) -> &[CommandId] {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("parse_mode", &self.parse_mode())
            .field("flags", &self.flags)
            .field("default_flag", &self.default_flag)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("depth", &self.depth)
            .finish()
    }
}

/// Owns every command and flag of one command line interface.
///
/// Commands are created detached with [`CommandTree::add`] and linked with
/// [`CommandTree::attach`]; only commands reachable from [`CommandTree::root`] take
/// part in resolution.
pub struct CommandTree {
    limits: Limits,
    commands: Vec<Command>,
    flags: Vec<Flag>,
    help: FlagId,
}

impl CommandTree {
    pub fn new(root: Command) -> CommandTree {
        CommandTree::with_limits(root, Limits::default())
    }

    pub fn with_limits(root: Command, limits: Limits) -> CommandTree {
        let help = Flag::new("help", Some('h'), "Prints help information", None)
            .with_arity(Arity::NoArg);
        let mut res =
            CommandTree { limits, commands: Vec::new(), flags: vec![help], help: FlagId(0) };
        res.add(root);
        res
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn root(&self) -> CommandId {
        CommandId(0)
    }

    /// The shared `--help` flag. It is only recognized on commands it was added to,
    /// see [`CommandTree::enable_help`].
    pub fn help_flag(&self) -> FlagId {
        self.help
    }

    /// Adds `--help` to every command reachable from the root, returning the number of
    /// commands that had no room for it.
    pub fn enable_help(&mut self) -> usize {
        self.add_persistent_flag(self.help)
    }

    /// Registers a detached command.
    pub fn add(&mut self, cmd: Command) -> CommandId {
        let id = CommandId(self.commands.len());
        self.commands.push(cmd);
        id
    }

    pub fn add_subcommand(&mut self, parent: CommandId, cmd: Command) -> Result<CommandId> {
        let child = self.add(cmd);
        match self.attach(parent, child) {
            Ok(()) => Ok(child),
            Err(err) => {
                self.commands.pop();
                Err(err)
            }
        }
    }

    /// Links `child`, together with everything already below it, as the last subcommand
    /// of `parent`. Nothing is modified on error.
    pub fn attach(&mut self, parent: CommandId, child: CommandId) -> Result<()> {
        if child == self.root() {
            return Err(Error::RootAttach { root: self[child].name.clone() });
        }
        if self[child].parent.is_some() {
            return Err(Error::AlreadyAttached { child: self[child].name.clone() });
        }
        if self.ancestor_chain(parent).contains(&child) {
            return Err(Error::Cycle {
                parent: self[parent].name.clone(),
                child: self[child].name.clone(),
            });
        }
        if self[parent].children.len() >= self.limits.max_children {
            return Err(Error::SubcommandLimitExceeded {
                parent: self[parent].name.clone(),
                max: self.limits.max_children,
            });
        }
        let offset = self[parent].depth + 1;
        if offset + self.subtree_depth(child) > self.limits.max_depth {
            return Err(Error::SubtreeDepthExceeded {
                parent: self[parent].name.clone(),
                child: self[child].name.clone(),
                max: self.limits.max_depth,
            });
        }

        let mut stack = vec![child];
        while let Some(id) = stack.pop() {
            let cmd = &mut self.commands[id.0];
            cmd.depth += offset;
            stack.extend(cmd.children.iter().copied());
        }
        self.commands[child.0].parent = Some(parent);
        self.commands[parent.0].children.push(child);
        tracing::trace!(
            parent = %self[parent].name,
            child = %self[child].name,
            depth = offset,
            "attached"
        );
        Ok(())
    }

    /// Distance from `id` down to its deepest descendant.
    pub fn subtree_depth(&self, id: CommandId) -> usize {
        let mut res = 0;
        let mut stack = vec![(id, 0)];
        while let Some((id, depth)) = stack.pop() {
            res = res.max(depth);
            stack.extend(self[id].children.iter().map(|&it| (it, depth + 1)));
        }
        res
    }

    /// Path from the topmost ancestor down to `id`, inclusive.
    pub fn ancestor_chain(&self, id: CommandId) -> Vec<CommandId> {
        let mut res = vec![id];
        let mut curr = id;
        while let Some(parent) = self[curr].parent {
            res.push(parent);
            curr = parent;
        }
        res.reverse();
        res
    }

    /// Every command reachable from the root, parents before children.
    pub fn commands(&self) -> Vec<CommandId> {
        let mut res = Vec::new();
        let mut queue = VecDeque::from([self.root()]);
        while let Some(id) = queue.pop_front() {
            res.push(id);
            queue.extend(self[id].children.iter().copied());
        }
        res
    }

    pub fn register_flag(&mut self, flag: Flag) -> FlagId {
        let id = FlagId(self.flags.len());
        self.flags.push(flag);
        id
    }

    pub fn flag_mut(&mut self, id: FlagId) -> &mut Flag {
        &mut self.flags[id.0]
    }

    pub fn add_flag(&mut self, cmd: CommandId, flag: FlagId) -> Result<()> {
        let limit = self.limits.max_flags;
        let command = &mut self.commands[cmd.0];
        if command.flags.contains(&flag) {
            return Ok(());
        }
        if command.flags.len() >= limit {
            return Err(Error::FlagLimitExceeded { command: command.name.clone(), max: limit });
        }
        command.flags.push(flag);
        Ok(())
    }

    /// Adds `flag` to `cmd` and makes it absorb positional tokens no other flag claims.
    pub fn add_default_flag(&mut self, cmd: CommandId, flag: FlagId) -> Result<()> {
        self.add_flag(cmd, flag)?;
        self.commands[cmd.0].default_flag = Some(flag);
        Ok(())
    }

    /// Adds `flag` to every command reachable from the root. Commands already at their
    /// flag limit are skipped; their number is returned.
    pub fn add_persistent_flag(&mut self, flag: FlagId) -> usize {
        let mut failed = 0;
        for cmd in self.commands() {
            if let Err(err) = self.add_flag(cmd, flag) {
                tracing::debug!(%err, "persistent flag skipped");
                failed += 1;
            }
        }
        failed
    }

    pub fn find_flag(&self, cmd: CommandId, name: &str) -> Option<FlagId> {
        self[cmd].flags.iter().copied().find(|&it| self[it].name() == name)
    }

    pub fn find_short(&self, cmd: CommandId, short: char) -> Option<FlagId> {
        self[cmd].flags.iter().copied().find(|&it| self[it].short() == Some(short))
    }

    pub(crate) fn reset_flags(&mut self, cmd: CommandId) {
        for &id in &self.commands[cmd.0].flags {
            self.flags[id.0].reset();
        }
    }
}

impl ops::Index<CommandId> for CommandTree {
    type Output = Command;
    fn index(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }
}

impl ops::Index<FlagId> for CommandTree {
    type Output = Flag;
    fn index(&self, id: FlagId) -> &Flag {
        &self.flags[id.0]
    }
}

impl fmt::Debug for CommandTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTree")
            .field("limits", &self.limits)
            .field("commands", &self.commands)
            .field("flags", &self.flags)
            .finish()
    }
}
