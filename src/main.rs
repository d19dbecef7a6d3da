use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dojo::quiz::loader::{category_from_path, load_questions};
use dojo::quiz::{AnswerRule, Question, QuizRun, QuizSettings, ScoringMode};
use dojo::{App, Config};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dojo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz
    Run(RunArgs),
    /// Validate question sets and report what would be skipped
    Check {
        /// Question set JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Category for every question (defaults to the file name)
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Question set JSON files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Category for every question (defaults to the file name)
    #[arg(short, long)]
    category: Option<String>,

    /// Display title (defaults to the set's quizTitle)
    #[arg(short, long)]
    title: Option<String>,

    /// Shuffle question order
    #[arg(long)]
    randomize: bool,

    /// Only ask the first N questions
    #[arg(short = 'n', long)]
    max_questions: Option<usize>,

    /// Overall time limit in seconds
    #[arg(long, value_name = "SECS")]
    time_limit: Option<u32>,

    /// Move on automatically after a complete answer
    #[arg(long)]
    auto_advance: bool,

    /// Auto-advance delay in milliseconds
    #[arg(long, value_name = "MS")]
    auto_advance_delay: Option<u64>,

    /// Ask for a name before starting
    #[arg(long)]
    require_name: bool,

    /// Hide the check answer control
    #[arg(long)]
    hide_check_answer: bool,

    /// Hide category badges and the per-category breakdown
    #[arg(long)]
    no_categories: bool,

    /// Score by question points instead of question count
    #[arg(long)]
    weighted: bool,

    /// Count a multiple-selection question as answered once anything is selected
    #[arg(long)]
    lenient: bool,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    seed: Option<u64>,
}

impl RunArgs {
    /// Layer command-line flags over the configured defaults
    fn settings(&self, defaults: &QuizSettings, quiz_title: Option<&str>) -> QuizSettings {
        let mut settings = defaults.clone();

        if let Some(title) = self.title.as_deref().or(quiz_title) {
            settings.title = title.to_string();
        }
        settings.randomize |= self.randomize;
        settings.auto_advance |= self.auto_advance;
        settings.require_name |= self.require_name;
        settings.hide_check_answer |= self.hide_check_answer;
        if self.no_categories {
            settings.show_categories = false;
        }
        if self.weighted {
            settings.scoring = ScoringMode::Weighted;
        }
        if self.lenient {
            settings.answer_rule = AnswerRule::AnyNonEmpty;
        }
        if self.max_questions.is_some() {
            settings.max_questions = self.max_questions;
        }
        if self.time_limit.is_some() {
            settings.time_limit_seconds = self.time_limit;
        }
        if let Some(delay) = self.auto_advance_delay {
            settings.auto_advance_delay_ms = delay;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        settings
    }
}

/// Initialize logging, to a file while the TUI owns the terminal
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "dojo=info".into());

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {:?}", parent))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .init();
        }
    }
    Ok(())
}

/// Load and normalize every file; returns the first set's title and the skip count
fn load_all(
    files: &[PathBuf],
    category: Option<&str>,
) -> Result<(Option<String>, Vec<Question>, usize)> {
    let mut title = None;
    let mut questions = Vec::new();
    let mut skipped = 0;

    for file in files {
        let category = category.map_or_else(|| category_from_path(file), str::to_string);
        let (raw, normalized) = load_questions(file, &category)?;
        if title.is_none() {
            title = raw.quiz_title.filter(|t| !t.trim().is_empty());
        }
        skipped += normalized.skipped;
        questions.extend(normalized.questions);
    }

    Ok((title, questions, skipped))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            init_tracing(Some(&Config::log_path()?))?;

            let config = Config::load()?;
            let (title, questions, skipped) = load_all(&args.files, args.category.as_deref())?;
            let settings = args.settings(&config.defaults, title.as_deref());
            settings.validate().context("Invalid quiz settings")?;

            if questions.is_empty() {
                bail!("No usable questions found ({} skipped)", skipped);
            }
            let run = QuizRun::new(questions, settings).context("Failed to start quiz")?;

            let mut app = App::new(config, run, skipped)?;
            app.run().await?;
        }
        Commands::Check { files, category } => {
            init_tracing(None)?;

            let mut total_kept = 0;
            let mut total_skipped = 0;
            for file in &files {
                let category = category.clone().unwrap_or_else(|| category_from_path(file));
                let (raw, normalized) = load_questions(file, &category)?;
                let title = raw.quiz_title.as_deref().unwrap_or("untitled");
                println!(
                    "{}: \"{}\", {} questions kept, {} skipped",
                    file.display(),
                    title,
                    normalized.questions.len(),
                    normalized.skipped
                );
                total_kept += normalized.questions.len();
                total_skipped += normalized.skipped;
            }

            if files.len() > 1 {
                println!("total: {} questions kept, {} skipped", total_kept, total_skipped);
            }
            if total_kept == 0 {
                bail!("No usable questions found");
            }
        }
    }

    Ok(())
}
