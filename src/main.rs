//! seqlog - CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use seqlog::cli::{Cli, Commands, ConfigCommands};

/// Diagnostics go to stderr so stdout stays clean for `--json`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SEQLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Info { file } => commands::info::handle(&file, config_path),
        Commands::Testcases { file } => commands::testcases::handle(&file, config_path),
        Commands::Index { file, testcase } => {
            commands::index::handle(&file, testcase.as_deref(), config_path)
        }
        Commands::Events {
            file,
            testcase,
            from,
            to,
            json,
        } => commands::events::handle(
            &file,
            commands::events::EventsOptions {
                testcase: testcase.as_deref(),
                from,
                to,
                json,
            },
            config_path,
        ),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Path => commands::config::handle_path(config_path),
        },
        Commands::Completions { shell } => commands::completions::handle::<Cli>(shell),
    }
}
