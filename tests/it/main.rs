mod resolve;

use std::fmt;

use expect_test::Expect;
use treeflags::{Command, CommandId, CommandTree, Flag, FlagId, FlagValue};

fn split(args: &str) -> Vec<String> {
    args.split_ascii_whitespace().map(String::from).collect()
}

fn check<F, A>(f: F, args: &str, expect: Expect)
where
    F: FnOnce(Vec<String>) -> treeflags::Result<A>,
    A: fmt::Debug,
{
    match f(split(args)) {
        Ok(res) => expect.assert_debug_eq(&res),
        Err(err) => expect.assert_eq(&err.to_string()),
    }
}

/// Parses `args` against the flags of `cmd` and compares the bound values, or the error
/// with its token index.
fn check_flags(tree: &mut CommandTree, cmd: CommandId, args: &str, expect: Expect) {
    let args = split(args);
    match tree.parse_flags(cmd, &args) {
        Ok(()) => expect.assert_eq(&report(tree, cmd)),
        Err(err) => match err.index() {
            Some(index) => expect.assert_eq(&format!("{} @ {}", err, index)),
            None => expect.assert_eq(&err.to_string()),
        },
    }
}

fn report(tree: &CommandTree, cmd: CommandId) -> String {
    let mut buf = String::new();
    for &id in tree[cmd].flags() {
        let flag = &tree[id];
        let value = match flag.value() {
            FlagValue::Absent => "<absent>".to_string(),
            FlagValue::Provided => "given".to_string(),
            FlagValue::Single(it) => it.clone(),
            FlagValue::Multiple(it) => format!("[{}]", it.join(", ")),
        };
        buf.push_str(&format!("{}: {}\n", flag.name(), value));
    }
    buf
}

/// `test_c` with a default flag, `cmd1` with two flags, `cmd2` with a default flag and
/// a self-parsing `cmd3` below it.
struct Sample {
    tree: CommandTree,
    root: CommandId,
    cmd1: CommandId,
    cmd2: CommandId,
    cmd3: CommandId,
    root_flag: FlagId,
    flag1: FlagId,
    flag3: FlagId,
}

fn sample() -> Sample {
    let mut tree = CommandTree::new(
        Command::new("test_c")
            .about("test_c command")
            .long_about("test_c command description")
            .run(|_| 0),
    );
    let root = tree.root();
    let cmd1 = tree
        .add_subcommand(root, Command::new("cmd1").about("cmd1 command").run(|_| 1))
        .unwrap();
    let cmd2 = tree.add_subcommand(root, Command::new("cmd2").about("cmd2 command")).unwrap();
    let cmd3 = tree
        .add_subcommand(
            cmd2,
            Command::new("cmd3").about("cmd3 command").run_raw(|_, args| args.len() as i32),
        )
        .unwrap();

    let mut flag = |name: &str, short: char| {
        let usage = format!("{} usage", name);
        tree.register_flag(Flag::new(name, Some(short), usage, Some("default_value")))
    };
    let root_flag = flag("rootFlag", 'r');
    let flag1 = flag("flag1", 'a');
    let flag2 = flag("flag2", 'b');
    let flag3 = flag("flag3", 'c');
    tree.add_default_flag(root, root_flag).unwrap();
    tree.add_flag(cmd1, flag1).unwrap();
    tree.add_flag(cmd1, flag2).unwrap();
    tree.add_default_flag(cmd2, flag3).unwrap();

    Sample { tree, root, cmd1, cmd2, cmd3, root_flag, flag1, flag3 }
}
