use std::{io, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::{
    config::Settings,
    domain::{self, Categories},
    error::{QuizError, Result},
    storage,
};

#[derive(Parser, Debug)]
#[command(name = "quizline")]
#[command(about = "Timed multiple-choice quizzes in the terminal", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to the questions JSON file")]
    pub questions: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(about = "Open the quiz screen (default)")]
    Play,

    #[command(about = "Show saved results")]
    History {
        #[arg(long, short, help = "Only results for this category")]
        category: Option<String>,

        #[arg(long, short, help = "Only results for this topic")]
        topic: Option<String>,
    },

    #[command(about = "List categories and topics in the question file")]
    Categories,

    #[command(about = "Export saved results")]
    Export {
        #[arg(long, value_enum, help = "Export format")]
        format: ExportFormat,

        #[arg(long, short, help = "Output path")]
        out: Option<PathBuf>,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell type (bash, zsh, fish)")]
        shell: String,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryExport<'a> {
    pub schema_version: u32,
    pub exported_at: String,
    pub results: &'a [domain::TestResult],
}

pub fn print_history(category: Option<&str>, topic: Option<&str>) -> Result<()> {
    let results = storage::load_results(&storage::get_results_path())?;
    let filtered: Vec<domain::TestResult> = domain::filter_results(&results, category, topic)
        .into_iter()
        .cloned()
        .collect();

    if filtered.is_empty() {
        println!("No saved results yet.");
        return Ok(());
    }

    println!("{:<10} {:<20} {:<20} {:>7}", "DATE", "CATEGORY", "TOPIC", "SCORE");
    println!("{}", "-".repeat(60));
    for result in &filtered {
        println!(
            "{:<10} {:<20} {:<20} {:>3}/{:<3}",
            result.date, result.category, result.topic, result.score, result.total
        );
    }

    println!();
    println!("{:<20} {:<20} {:>5} {:>7} {:>8}", "CATEGORY", "TOPIC", "RUNS", "BEST", "AVG %");
    println!("{}", "-".repeat(64));
    for summary in domain::summarize_results(&filtered) {
        println!(
            "{:<20} {:<20} {:>5} {:>3}/{:<3} {:>7.1}",
            summary.category,
            summary.topic,
            summary.attempts,
            summary.best_score,
            summary.best_total,
            summary.average_percent
        );
    }

    Ok(())
}

pub fn print_categories(settings: &Settings) -> Result<()> {
    let loaded = storage::load_questions(&settings.questions_path)?;
    let categories = Categories::from_questions(&loaded.questions);

    if categories.is_empty() {
        println!("No questions in {}", settings.questions_path.display());
        return Ok(());
    }

    for entry in categories.entries() {
        println!("{}", entry.name);
        for topic in &entry.topics {
            let count = domain::filter_questions(&loaded.questions, &entry.name, topic).len();
            println!("  {:<30} {:>4}", topic, count);
        }
    }
    if loaded.dropped > 0 {
        println!("({} invalid questions skipped)", loaded.dropped);
    }

    Ok(())
}

pub fn export_history(format: ExportFormat, out_path: Option<PathBuf>) -> Result<()> {
    let results = storage::load_results(&storage::get_results_path())?;

    match format {
        ExportFormat::Json => {
            let export = HistoryExport {
                schema_version: 1,
                exported_at: chrono::Utc::now().to_rfc3339(),
                results: &results,
            };
            let json = serde_json::to_string_pretty(&export)?;
            if let Some(path) = out_path {
                storage::write_text_file(&path, &json)?;
                println!("Exported to {}", path.display());
            } else {
                println!("{}", json);
            }
        }
        ExportFormat::Csv => {
            if let Some(path) = out_path {
                let mut buffer = Vec::new();
                storage::export_results_csv(&results, &mut buffer)?;
                storage::write_text_file(&path, &String::from_utf8_lossy(&buffer))?;
                println!("Exported to {}", path.display());
            } else {
                storage::export_results_csv(&results, io::stdout())?;
            }
        }
    }

    Ok(())
}

pub fn print_completions(shell: &str) -> Result<()> {
    use clap_complete::Shell;

    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        other => return Err(QuizError::UnsupportedShell(other.to_string())),
    };
    clap_complete::generate(shell, &mut Cli::command(), "quizline", &mut io::stdout());
    Ok(())
}

pub fn run_command(command: Command, settings: &Settings) {
    let outcome = match command {
        Command::Play => Ok(()),
        Command::History { category, topic } => {
            print_history(category.as_deref(), topic.as_deref())
        }
        Command::Categories => print_categories(settings),
        Command::Export { format, out } => export_history(format, out),
        Command::Completions { shell } => print_completions(&shell),
    };

    if let Err(e) = outcome {
        log::error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
