//! CLI definitions for seqlog
//!
//! The clap structure lives in the library, apart from main.rs, so tests and
//! the completions generator can build the command without running it.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

/// Build clap styles for help output.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "seqlog")]
#[command(about = "Turn TTCN-3 execution logs into sequence-diagram timelines")]
#[command(
    long_about = "seqlog reads a TTCN-3 execution log, finds its test cases and turns each
one into an ordered timeline of events: component creation and termination,
port mapping and connection, messages sent and received, verdicts.

Indexing walks a test case once and keeps only what will be drawn. Events are
then decoded on demand for any window of that index.

QUICK START:
    seqlog info run.log                 Detected format, mode and size
    seqlog testcases run.log            Test cases with their verdicts
    seqlog index run.log -t tc_login    Counters and components of one test case
    seqlog events run.log --json        Full timeline of the first test case

Set SEQLOG_LOG (e.g. SEQLOG_LOG=debug) to see diagnostics on stderr."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Configuration file (default: ~/.config/seqlog/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print debug diagnostics on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show what was detected about a log file
    Info {
        /// Path to the log file
        file: PathBuf,
    },

    /// List the test cases of a log file
    Testcases {
        /// Path to the log file
        file: PathBuf,
    },

    /// Index one test case and print its counters and components
    #[command(long_about = "Index one test case and print its counters and components.

The test case is picked by name or by its 1-based number from `seqlog testcases`;
without --testcase the first one is used.

EXAMPLES:
    seqlog index run.log
    seqlog index run.log --testcase 2
    seqlog index run.log --testcase tc_login")]
    Index {
        /// Path to the log file
        file: PathBuf,
        /// Test case name or 1-based number
        #[arg(long, short)]
        testcase: Option<String>,
    },

    /// Decode and print the timeline of one test case
    #[command(long_about = "Decode and print the timeline of one test case.

--from and --to select a window of the index (0-based, inclusive); the
boundary events of the test case are always printed around it.

EXAMPLES:
    seqlog events run.log
    seqlog events run.log --testcase tc_login --from 100 --to 199
    seqlog events run.log --json > timeline.json")]
    Events {
        /// Path to the log file
        file: PathBuf,
        /// Test case name or 1-based number
        #[arg(long, short)]
        testcase: Option<String>,
        /// First index position to decode
        #[arg(long)]
        from: Option<usize>,
        /// Last index position to decode
        #[arg(long)]
        to: Option<usize>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["seqlog", "info", "run.log", "--verbose", "--config", "c.toml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(cli.command, Commands::Info { .. }));
    }

    #[test]
    fn events_window() {
        let cli = Cli::try_parse_from([
            "seqlog", "events", "run.log", "-t", "2", "--from", "3", "--to", "9", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Events {
                testcase,
                from,
                to,
                json,
                ..
            } => {
                assert_eq!(testcase.as_deref(), Some("2"));
                assert_eq!((from, to), (Some(3), Some(9)));
                assert!(json);
            }
            _ => panic!("expected events"),
        }
    }
}
