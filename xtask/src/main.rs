use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for simplengine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run fmt, clippy, tests and doc in order
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
    /// Run the headless demo for two seconds
    Demo,
}

impl Commands {
    fn cargo_args(self) -> &'static [&'static str] {
        match self {
            Commands::Check => &[],
            Commands::Fmt => &["fmt", "--all", "--", "--check"],
            Commands::Clippy => &[
                "clippy",
                "--workspace",
                "--all-targets",
                "--",
                "-D",
                "warnings",
            ],
            Commands::Test => &["test", "--workspace"],
            Commands::Doc => &["doc", "--workspace", "--no-deps"],
            Commands::Build => &["build", "--workspace"],
            Commands::Demo => &[
                "run",
                "-p",
                "simplengine-cli",
                "--",
                "run",
                "--seconds",
                "2",
            ],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let steps: &[Commands] = match cli.command {
        Commands::Check => &[
            Commands::Fmt,
            Commands::Clippy,
            Commands::Test,
            Commands::Doc,
        ],
        ref single => std::slice::from_ref(single),
    };

    for step in steps {
        cargo(step.cargo_args())?;
    }
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed", args[0]);
    }
    Ok(())
}
