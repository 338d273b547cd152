mod app;
mod cli;
mod config;
mod constants;
mod domain;
mod error;
mod quiz;
mod storage;

use std::{fs::OpenOptions, io};

use clap::Parser;
use log::info;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::cli::{Cli, Command};

fn init_logging() {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let log_path = storage::get_log_path();
    if let Ok(log_file) = OpenOptions::new().create(true).append(true).open(&log_path) {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }
}

fn main() -> Result<(), io::Error> {
    let args = Cli::parse();
    init_logging();

    let settings = config::resolve(config::load_config(), args.questions);
    log::set_max_level(settings.log_level);
    info!(
        "quizline starting, questions from {}",
        settings.questions_path.display()
    );

    match args.command {
        None | Some(Command::Play) => app::run_ui(&settings),
        Some(command) => {
            cli::run_command(command, &settings);
            Ok(())
        }
    }
}
