use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "autodidact", version, about = "Autodidact spaced review CLI/API")]
pub struct Cli {
    /// Data directory (overrides config `data_dir`; defaults to the app data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to <data dir>/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Project key (overrides config `default_project`)
    #[arg(long, short, global = true)]
    pub project: Option<String>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Flashcard sets
    #[command(subcommand)]
    Cards(CardsCmd),
    /// Review queue
    #[command(subcommand)]
    Queue(QueueCmd),
    /// Review loop over today's due cards
    Review(ReviewCmd),
    /// Review statistics
    Stats(StatsCmd),
    /// Focus timer
    #[command(subcommand)]
    Focus(FocusCmd),
    /// Launch Axum HTTP API
    Serve(ServeCmd),
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardsCmd {
    /// Generate placeholder flashcards from a text file
    Generate {
        input: PathBuf,
        /// Read `input` as a `.transcript.json` (five cards per chunk)
        #[arg(long)]
        transcript: bool,
    },
    /// Import flashcards from JSON ([{question, answer}]) or CSV (question,answer header)
    Import {
        path: PathBuf,
        #[arg(long)]
        csv: bool,
    },
    List,
    /// Export flashcards as CSV
    Export { path: PathBuf },
}

#[derive(Debug, Subcommand, Clone)]
pub enum QueueCmd {
    /// Build the queue from the project's flashcards
    Build {
        /// First day of the schedule (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Replace an existing queue
        #[arg(long)]
        rebuild: bool,
    },
    /// Cards due on a day
    Due {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Only entries whose question or answer contains this text
        #[arg(long)]
        grep: Option<String>,
    },
    /// Cards due over the next few days
    Upcoming {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Every queue entry
    Show,
}

#[derive(Debug, Args, Clone)]
pub struct ReviewCmd {
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long, default_value_t = 50)]
    pub max: usize,
}

#[derive(Debug, Args, Clone)]
pub struct StatsCmd {
    /// Day the streak ends on (defaults to today)
    #[arg(long)]
    pub today: Option<NaiveDate>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum FocusCmd {
    /// Run a focus session (length must be one of the configured lengths)
    Start {
        minutes: u32,
        #[arg(long = "type")]
        session_type: Option<String>,
    },
    /// Show logged sessions
    Log,
}

#[derive(Debug, Args, Clone)]
pub struct ServeCmd {
    /// Bind address (host:port); overrides config `[server] addr`
    #[arg(long)]
    pub addr: Option<String>,
}
