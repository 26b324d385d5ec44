
use std::time::{Duration, Instant};

use xshell::{cmd, Shell};

const DEMO_RUNS: &[&[&str]] = &[
    &["config", "get", "-k", "user.name"],
    &["exec", "-a", "--b", "c"],
    &["--names", "ferris", "crab", "--shout"],
    &["--help"],
];

fn main() -> xshell::Result<()> {
    let sh = Shell::new()?;
    let mut timings = Timings::new();

    Group::run(&mut timings, "toolchain", || {
        cmd!(sh, "rustup toolchain install stable --no-self-update").run()?;
        cmd!(sh, "rustc --version").run()
    })?;
    let _toolchain = sh.push_env("RUSTUP_TOOLCHAIN", "stable");

    Group::run(&mut timings, "compile", || {
        cmd!(sh, "cargo build --workspace --all-targets").run()
    })?;
    Group::run(&mut timings, "unit and integration tests", || {
        cmd!(sh, "cargo test --workspace --quiet").run()
    })?;
    Group::run(&mut timings, "demo", || {
        for &args in DEMO_RUNS {
            cmd!(sh, "cargo run --quiet --example hello -- {args...}").run()?;
        }
        let out = cmd!(sh, "cargo run --quiet --example hello -- --bogus")
            .ignore_status()
            .output()?;
        assert!(!out.status.success(), "an unknown flag must fail the demo");
        Ok(())
    })?;
    Group::run(&mut timings, "release", || release(&sh))?;

    for (name, elapsed) in timings {
        eprintln!("{name:>28}: {elapsed:.2?}");
    }
    Ok(())
}

/// Tags and publishes the crate when the manifest version has no tag yet on `master`.
fn release(sh: &Shell) -> xshell::Result<()> {
    let pkgid = cmd!(sh, "cargo pkgid -p treeflags").read()?;
    let version = pkgid.rsplit(['#', '@']).next().unwrap_or_default().to_string();
    let tag = format!("v{version}");

    let on_master = cmd!(sh, "git branch --show-current").read()? == "master";
    let tags = cmd!(sh, "git tag --list").read()?;
    if !on_master || tags.lines().any(|it| it.trim() == tag) {
        println!("skipping release of {tag}");
        return Ok(());
    }

    cmd!(sh, "git tag {tag}").run()?;
    cmd!(sh, "cargo publish -p treeflags").run()?;
    cmd!(sh, "git push origin {tag}").run()
}

type Timings = Vec<(&'static str, Duration)>;

/// A collapsible GitHub Actions log group.
struct Group;

impl Group {
    fn run<F>(timings: &mut Timings, name: &'static str, f: F) -> xshell::Result<()>
    where
        F: FnOnce() -> xshell::Result<()>,
    {
        println!("::group::{name}");
        let start = Instant::now();
        let res = f();
        println!("::endgroup::");
        timings.push((name, start.elapsed()));
        res
    }
}
