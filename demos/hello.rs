use tracing_subscriber::EnvFilter;
use treeflags::{Arity, Command, CommandTree, Flag, FlagValue, Invocation, Stdio};

fn show(inv: &Invocation<'_>) -> i32 {
    let cmd = inv.command();
    println!("command: {}", cmd.name());
    for &id in cmd.flags() {
        let flag = &inv.tree()[id];
        match flag.value() {
            FlagValue::Absent => println!("  --{}: <absent>", flag.name()),
            FlagValue::Provided => println!("  --{}: given", flag.name()),
            FlagValue::Single(value) => println!("  --{}: {}", flag.name(), value),
            FlagValue::Multiple(values) => println!("  --{}: {}", flag.name(), values.join(" ")),
        }
    }
    0
}

fn build() -> Result<CommandTree, treeflags::Error> {
    let mut tree = CommandTree::new(
        Command::new("hello").about("Greets, in a roundabout way").run(show),
    );
    let root = tree.root();

    let names = tree.register_flag(
        Flag::new("names", Some('m'), "Who to greet", None).with_arity(Arity::Multiple),
    );
    let shout = tree.register_flag(
        Flag::new("shout", Some('s'), "Greet loudly", None).with_arity(Arity::NoArg),
    );
    let greeting = tree.register_flag(Flag::new("greeting", Some('g'), "The greeting", Some("hi")));
    tree.add_default_flag(root, names)?;
    tree.add_flag(root, shout)?;
    tree.add_flag(root, greeting)?;

    let config = tree.add_subcommand(root, Command::new("config").about("Inspect configuration"))?;
    let get = tree.add_subcommand(config, Command::new("get").about("Read a key").run(show))?;
    let key = tree.register_flag(Flag::new("key", Some('k'), "Key to read", None));
    tree.add_default_flag(get, key)?;

    tree.add_subcommand(
        root,
        Command::new("exec").about("Hands its arguments over untouched").run_raw(|inv, args| {
            println!("command: {}", inv.command().name());
            for (i, arg) in args.iter().enumerate() {
                println!("  args[{}]: {}", i, arg);
            }
            0
        }),
    )?;

    tree.enable_help();
    Ok(tree)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = match treeflags::args_from_env() {
        Ok(it) => it,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1)
        }
    };
    let mut tree = match build() {
        Ok(it) => it,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1)
        }
    };
    let code = tree.run(&args, &mut Stdio);
    std::process::exit(code)
}
