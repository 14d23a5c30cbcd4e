use clap::Parser;

mod cli;
mod commands;
mod config;
mod menu;
mod report;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::CliConfig::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        config.level()?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    commands::run_command(cli, &config)
}
