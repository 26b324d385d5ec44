//! Default text for the [`Render`](crate::Render) hook.

use std::fmt::Write;

use crate::{
    flag::{Arity, Flag},
    tree::{CommandId, CommandTree},
    Error,
};

macro_rules! w {
    ($($tt:tt)*) => {{
        let _ = write!($($tt)*);
    }};
}

/// Usage of `cmd`: the command path, descriptions, the default flag as `ARGS`, the
/// remaining flags as `OPTIONS`, and the direct subcommands.
pub fn help_text(tree: &CommandTree, cmd: CommandId) -> String {
    let mut buf = String::new();
    let command = &tree[cmd];

    let path = tree.ancestor_chain(cmd).iter().map(|&it| tree[it].name()).collect::<Vec<_>>();
    w!(buf, "{}\n", path.join(" "));
    if !command.short_desc().is_empty() {
        w!(buf, "  {}\n", command.short_desc());
    }
    if !command.long_desc().is_empty() {
        blank_line(&mut buf);
        w!(buf, "  {}\n", command.long_desc());
    }

    if let Some(default) = command.default_flag() {
        let flag = &tree[default];
        blank_line(&mut buf);
        w!(buf, "ARGS:\n");
        let (l, r) = match flag.arity() {
            Arity::Multiple => ("[", "]..."),
            Arity::NoArg | Arity::Single => ("[", "]"),
        };
        w!(buf, "    {}{}{}\n", l, flag.name(), r);
        flag_details(&mut buf, flag);
    }

    let options = command.flags().iter().filter(|&&it| Some(it) != command.default_flag());
    let mut blank = None;
    for &id in options {
        match blank {
            None => {
                blank_line(&mut buf);
                w!(buf, "OPTIONS:\n");
            }
            Some(blank) => w!(buf, "{}", blank),
        }
        blank = Some("\n");

        let flag = &tree[id];
        let short = flag.short().map(|it| format!("-{}, ", it)).unwrap_or_default();
        let value = match flag.arity() {
            Arity::NoArg => String::new(),
            Arity::Single => format!(" <{}>", flag.name()),
            Arity::Multiple => format!(" <{}>...", flag.name()),
        };
        w!(buf, "    {}--{}{}\n", short, flag.name(), value);
        flag_details(&mut buf, flag);
    }

    if !command.children().is_empty() {
        blank_line(&mut buf);
        w!(buf, "SUBCOMMANDS:\n");
        let width = command.children().iter().map(|&it| tree[it].name().len()).max().unwrap_or(0);
        for &child in command.children() {
            let child = &tree[child];
            let line = format!("    {:<width$}  {}", child.name(), child.short_desc());
            w!(buf, "{}\n", line.trim_end());
        }
    }

    buf
}

/// Diagnostic for a failed dispatch, naming the offending token.
pub fn error_text(tree: &CommandTree, err: &Error) -> String {
    let root = tree.root();
    let mut buf = format!("error: {}", err);
    if err.index().is_some() && tree[root].flags().contains(&tree.help_flag()) {
        w!(buf, "\n\nFor more information try `{} --help`", tree[root].name());
    }
    buf
}

fn flag_details(buf: &mut String, flag: &Flag) {
    if !flag.usage().is_empty() {
        w!(buf, "      {}\n", flag.usage());
    }
    if let Some(default) = flag.default_value() {
        w!(buf, "      [default: {}]\n", default);
    }
}

fn blank_line(buf: &mut String) {
    w!(buf, "\n");
}
