use anyhow::Context;
use clap::Parser;
use objinspect_config::ObjinspectConfig;

mod cli;
mod commands;
mod output;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("objinspect error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    let config = ObjinspectConfig::load().context("failed to load objinspect configuration")?;
    let options = ui::format_options(&config.display, &flags);

    let rendered = commands::dispatch(&cli.command, &flags, &config, &options)?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("OBJINSPECT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
