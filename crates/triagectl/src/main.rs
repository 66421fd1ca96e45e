//! Triage Control - terminal front end for the symptom triage assistant
//!
//! Runs the two-step form, shows results and the session history.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::debug;
use triage_common::config::{default_config_path, TriageConfig};
use triage_common::{Duration, ExistingCondition, FeverLevel, MainSymptom, PainLevel, Session, SymptomIntake};
use triagectl::display::{display_error, Display};
use triagectl::errors::{exit_code_for, EXIT_SUCCESS};
use triagectl::form::Prompter;
use triagectl::{commands, logging};

// Version is embedded at build time
const VERSION: &str = env!("TRIAGE_VERSION");

#[derive(Parser)]
#[command(name = "triagectl")]
#[command(about = "Symptom triage assistant - preliminary health guidance only", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive two-step form with session history (default)
    Session {
        /// Write the session history as JSON on exit
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Evaluate one set of symptoms without a session
    Evaluate {
        /// Main symptom (e.g. "Fever", "stomach-pain")
        #[arg(long)]
        symptom: MainSymptom,

        /// Symptom duration
        #[arg(long, default_value = "1-2 days")]
        duration: Duration,

        /// Fever level
        #[arg(long, default_value = "None")]
        fever: FeverLevel,

        /// Pain level
        #[arg(long, default_value = "Mild")]
        pain: PainLevel,

        /// Existing medical condition
        #[arg(long, default_value = "None")]
        condition: ExistingCondition,

        /// Additional symptom (repeatable)
        #[arg(long = "additional", short = 'a')]
        additional: Vec<String>,

        /// Other symptoms as free text
        #[arg(long, default_value = "")]
        note: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show an exported history file
    History {
        /// JSON file written by `session --export`
        file: PathBuf,
    },

    /// List the symptom choices
    Symptoms,
}

fn main() {
    let cli = Cli::parse();
    let code = match run(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            display_error(&format!("{:#}", e));
            exit_code_for(&e)
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().or_else(default_config_path);
    let config = match &cli.config {
        // An explicit path must exist
        Some(path) => TriageConfig::load(path),
        None => TriageConfig::load_or_default(config_path.as_deref()),
    }
    .context("Failed to load configuration")?;

    logging::init(cli.verbose, &config.log.level);
    debug!(config = ?config_path, "triagectl v{} starting", VERSION);

    let display = Display::new(config.output.color, cli.no_color);
    let limit = config.history.max_display;
    let mut stdout = io::stdout().lock();

    match cli.command.unwrap_or(Commands::Session { export: None }) {
        Commands::Session { export } => {
            let mut session = Session::new();
            let stdin = io::stdin();
            if !stdin.is_terminal() {
                debug!("stdin is not a terminal, reading scripted answers");
            }
            let mut prompter = Prompter::new(stdin.lock(), &mut stdout, display.color);
            commands::run_session(&mut session, &mut prompter, &display, limit)?;
            if let Some(path) = export {
                commands::export_history(session.history(), &path)?;
            }
            Ok(())
        }
        Commands::Evaluate {
            symptom,
            duration,
            fever,
            pain,
            condition,
            additional,
            note,
            json,
        } => {
            let intake = additional
                .iter()
                .fold(SymptomIntake::new(symptom), |intake, s| intake.with_additional(s))
                .with_duration(duration)
                .with_fever(fever)
                .with_pain(pain)
                .with_condition(condition)
                .with_free_text(&note);
            commands::evaluate_once(&mut stdout, &intake, &display, json || config.output.json)?;
            Ok(())
        }
        Commands::History { file } => commands::history_file(&mut stdout, &file, &display, limit),
        Commands::Symptoms => commands::symptoms(&mut stdout, &display),
    }
}
