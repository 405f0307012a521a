mod cli;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use cli::{Cli, Command, UiArgs};
use taskdeck::config::Config;
use taskdeck::logging::{self, Sink};
use taskdeck::model::Rating;
use taskdeck::output;
use taskdeck::store::TaskStore;
use taskdeck::tui::{self, App, FormDefaults, Header};
use taskdeck::validate::{parse_hours, TaskFactory, TaskInput};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Ui(UiArgs::default()));

    let sink = match (&cli.log_file, &command) {
        (Some(path), _) => Sink::File(path.as_path()),
        (None, Command::Ui(_)) => Sink::Off,
        (None, Command::Check { .. }) => Sink::Stderr,
    };
    logging::init(sink)?;

    let config = Config::load(cli.config.as_deref())?;

    match command {
        Command::Ui(args) => {
            run_ui(&config, args)?;
            Ok(0)
        }

        Command::Check {
            name,
            desc,
            due,
            importance,
            difficulty,
            estimate,
            json,
        } => {
            let input = TaskInput {
                name,
                description: desc,
                due_date: due,
                importance: Rating::new(importance).unwrap_or_default(),
                difficulty: Rating::new(difficulty).unwrap_or_default(),
                time_estimate: parse_hours(&estimate),
            };
            match TaskFactory::new().create(&input) {
                Ok(task) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&task)?);
                    } else {
                        print!("{}", output::format_task_detail(&task));
                    }
                    Ok(0)
                }
                Err(e) => {
                    warn!("rejected: {e}");
                    eprintln!("invalid task: {e}");
                    Ok(1)
                }
            }
        }
    }
}

fn run_ui(config: &Config, args: UiArgs) -> Result<()> {
    let header = Header {
        title: args
            .title
            .unwrap_or_else(|| config.header.title().to_string()),
        subtitle: args
            .subtitle
            .unwrap_or_else(|| config.header.subtitle().to_string()),
    };
    let tick_rate = Duration::from_millis(args.tick_rate.unwrap_or(config.ui.tick_rate_ms()));

    let mut app = App::new(TaskStore::new(), header, FormDefaults::from_config(config));
    tui::run(&mut app, tick_rate)?;

    let store = app.into_store();
    info!("discarding {} task(s)", store.len());
    if args.dump_json {
        println!("{}", serde_json::to_string_pretty(store.list())?);
    } else if args.dump_text {
        print!("{}", output::format_task_list(store.list()));
    }
    Ok(())
}
