//! roster CLI: the user-facing command-line interface.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use roster_core::config::{load_config_from, RosterConfig};
use roster_core::{QuizEngine, RegistryStore};

mod commands;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Student and teacher registry with a built-in quiz"
)]
struct Cli {
    /// Directory holding the data files and the chart
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fixed seed for the quiz question order
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (the default)
    Menu,

    /// Register a student
    AddStudent {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Enrollment number
        #[arg(long)]
        matricula: String,
    },

    /// Register a teacher
    AddTeacher {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
    },

    /// List all students and teachers
    List,

    /// Show the quiz score history
    Scores,

    /// Show score statistics and write the histogram chart
    Stats,

    /// Take the quiz, reading one answer per line from stdin
    Quiz {
        /// Name the score is recorded under
        #[arg(long)]
        name: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    let mut store =
        RegistryStore::open(config.store_paths()).context("failed to load the registry")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let mut engine = QuizEngine::builtin(config.quiz_seed)?;
            commands::menu::execute(&config, &mut engine, &mut store, &mut input)
        }
        Commands::AddStudent {
            name,
            email,
            matricula,
        } => commands::people::add_student(&mut store, &name, &email, &matricula),
        Commands::AddTeacher {
            name,
            email,
            subject,
        } => commands::people::add_teacher(&mut store, &name, &email, &subject),
        Commands::List => {
            commands::people::list_all(&store);
            Ok(())
        }
        Commands::Scores => {
            commands::scores::show_history(&store);
            Ok(())
        }
        Commands::Stats => commands::stats::execute(&store, &config.chart_path()),
        Commands::Quiz { name } => {
            let mut engine = QuizEngine::builtin(config.quiz_seed)?;
            commands::quiz::execute(&mut engine, &mut store, &mut input, &name).map(|_| ())
        }
    }
}

/// Config file, then environment, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<RosterConfig> {
    let mut config = load_config_from(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(seed) = cli.seed {
        config.quiz_seed = Some(seed);
    }
    Ok(config)
}
