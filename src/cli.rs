use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskdeck", about = "Single-screen terminal task list")]
pub struct Cli {
    /// Path to the config file [default: ~/.taskdeck/config.toml]
    #[arg(long, env = "TASKDECK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Append log output to this file
    #[arg(long, env = "TASKDECK_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Launch the interactive task list (default)
    Ui(UiArgs),

    /// Validate task fields once and print the resulting task
    Check {
        /// Task name
        #[arg(short, long, default_value = "")]
        name: String,
        /// Task description
        #[arg(short, long, default_value = "")]
        desc: String,
        /// Deadline (YYYY-MM-DD or RFC 3339); omit for no deadline
        #[arg(long, default_value = "")]
        due: String,
        /// Importance (1-5)
        #[arg(
            short,
            long,
            default_value_t = 3,
            value_parser = clap::value_parser!(u8).range(1..=5)
        )]
        importance: u8,
        /// Difficulty (1-5)
        #[arg(
            short = 'D',
            long,
            default_value_t = 3,
            value_parser = clap::value_parser!(u8).range(1..=5)
        )]
        difficulty: u8,
        /// Estimated time in hours
        #[arg(short, long, default_value = "0.5")]
        estimate: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Default)]
pub struct UiArgs {
    /// Header title (overrides config)
    #[arg(long)]
    pub title: Option<String>,
    /// Header subtitle (overrides config)
    #[arg(long)]
    pub subtitle: Option<String>,
    /// Input poll interval in milliseconds (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_rate: Option<u64>,
    /// Print the session's tasks as JSON to stdout on exit
    #[arg(long, conflicts_with = "dump_text")]
    pub dump_json: bool,
    /// Print the session's tasks as a checklist to stdout on exit
    #[arg(long)]
    pub dump_text: bool,
}
