use expect_test::expect;
use treeflags::{Command, CommandTree, Error, Resolution};

use crate::{check, sample, split};

fn resolve(args: Vec<String>) -> treeflags::Result<(String, usize, Vec<String>)> {
    let tree = sample().tree;
    let res = tree.resolve(&args)?;
    Ok((tree[res.command].name().to_string(), res.consumed, res.residual(&args).to_vec()))
}

#[test]
fn full_path() {
    check(
        resolve,
        "cmd2 cmd3 extra",
        expect![[r#"
            (
                "cmd3",
                2,
                [
                    "extra",
                ],
            )
        "#]],
    );
    check(
        resolve,
        "cmd1 -a x",
        expect![[r#"
            (
                "cmd1",
                1,
                [
                    "-a",
                    "x",
                ],
            )
        "#]],
    );
}

#[test]
fn stops_at_exhausted_tokens() {
    check(
        resolve,
        "",
        expect![[r#"
            (
                "test_c",
                0,
                [],
            )
        "#]],
    );
    check(
        resolve,
        "cmd2",
        expect![[r#"
            (
                "cmd2",
                1,
                [],
            )
        "#]],
    );
}

#[test]
fn stops_at_option() {
    check(
        resolve,
        "cmd2 -c x",
        expect![[r#"
            (
                "cmd2",
                1,
                [
                    "-c",
                    "x",
                ],
            )
        "#]],
    );
    check(
        resolve,
        "--rootFlag cmd1",
        expect![[r#"
            (
                "test_c",
                0,
                [
                    "--rootFlag",
                    "cmd1",
                ],
            )
        "#]],
    );
}

#[test]
fn falls_back_to_default_flag() {
    check(
        resolve,
        "value1",
        expect![[r#"
            (
                "test_c",
                0,
                [
                    "value1",
                ],
            )
        "#]],
    );
    check(
        resolve,
        "cmd2 nope",
        expect![[r#"
            (
                "cmd2",
                1,
                [
                    "nope",
                ],
            )
        "#]],
    );
}

#[test]
fn unknown_command() {
    let mut tree = CommandTree::new(Command::new("app"));
    let server = tree.add_subcommand(tree.root(), Command::new("server")).unwrap();
    tree.add_subcommand(server, Command::new("launch")).unwrap();

    let args = split("server lunch");
    let err = tree.resolve(&args).unwrap_err();
    assert_eq!(err, Error::UnknownCommand { index: 1, token: "lunch".to_string() });
    assert_eq!(err.to_string(), "unknown command: `lunch`");

    check(|args| tree.resolve(&args), "serve", expect![[r#"unknown command: `serve`"#]]);
}

#[test]
fn consumed_equals_depth() {
    let s = sample();
    for (args, cmd) in [("", s.root), ("cmd1", s.cmd1), ("cmd2", s.cmd2), ("cmd2 cmd3", s.cmd3)] {
        let res = s.tree.resolve(&split(args)).unwrap();
        assert_eq!(res, Resolution { command: cmd, consumed: s.tree[cmd].depth() });
    }
}

#[test]
fn option_at_depth_resolves_to_parent() {
    let s = sample();
    for (args, cmd) in [("-x", s.root), ("cmd2 -x", s.cmd2), ("cmd2 --flag3=v cmd3", s.cmd2)] {
        let res = s.tree.resolve(&split(args)).unwrap();
        assert_eq!(res, Resolution { command: cmd, consumed: s.tree[cmd].depth() }, "{args}");
    }
}

#[test]
fn leaf_root() {
    let tree = CommandTree::new(Command::new("solo"));
    let res = tree.resolve(&split("anything at all")).unwrap();
    assert_eq!(res, Resolution { command: tree.root(), consumed: 0 });
}

#[test]
fn first_sibling_with_a_name_wins() {
    let mut tree = CommandTree::new(Command::new("app"));
    let root = tree.root();
    let first = tree.add_subcommand(root, Command::new("dup")).unwrap();
    let inner = tree.add_subcommand(first, Command::new("inner")).unwrap();
    let second = tree.add_subcommand(root, Command::new("dup")).unwrap();

    let res = tree.resolve(&split("dup inner")).unwrap();
    assert_eq!(res, Resolution { command: inner, consumed: 2 });

    let res = tree.resolve(&split("dup")).unwrap();
    assert_eq!(res, Resolution { command: first, consumed: 1 });

    // `first` has no default flag, so the second `dup` is never considered.
    let err = tree.resolve(&split("dup x")).unwrap_err();
    assert_eq!(err, Error::UnknownCommand { index: 1, token: "x".to_string() });
    assert_ne!(first, second);
}
