use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub mod members;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use members::MemberArgs;

/// Top-level CLI parser for the `objinspect` binary.
#[derive(Debug, Parser)]
#[command(
    name = "objinspect",
    version,
    about = "Inspect the signatures and members of Python functions and classes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: pretty, json, raw
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// When to color pretty output (overrides `display.color`)
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Quiet mode (errors only in the log)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect a function, class or method; without a target, list the module
    Inspect(InspectArgs),
    /// List a module's variables, classes and functions
    Dir(DirArgs),
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Python source file
    pub file: PathBuf,

    /// Dotted path inside the module: `func`, `Class` or `Class.method`
    pub target: Option<String>,

    #[command(flatten)]
    pub members: MemberArgs,
}

#[derive(Debug, Args)]
pub struct DirArgs {
    /// Python source file
    pub file: PathBuf,

    /// Also list dunder names
    #[arg(long)]
    pub dunders: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            color: self.color,
        }
    }
}
