use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lessonmark::Config;
use lessonmark::progress::{JsonFileStore, PROGRESS_FILE_NAME, ProgressStore};

#[derive(Parser)]
#[command(name = "lessonmark")]
#[command(about = "Render tutoring lessons from Markdown to HTML")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a Markdown lesson or notes file to HTML
    Render {
        /// Input file (.md, .markdown or .txt)
        input: PathBuf,

        /// Output HTML file (defaults to input name with .html extension, `-` for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Styling config (TOML)
        #[arg(short, long, conflicts_with = "plain")]
        config: Option<PathBuf>,

        /// Emit bare HTML without any class attributes
        #[arg(long)]
        plain: bool,
    },
    /// List the built-in subjects
    Subjects,
    /// Show recorded learner progress
    Progress {
        /// Progress file
        #[arg(long, default_value = PROGRESS_FILE_NAME)]
        store: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Render {
            input,
            output,
            config,
            plain,
        } => render(&input, output, config.as_deref(), plain),
        Command::Subjects => {
            list_subjects();
            Ok(())
        }
        Command::Progress { store } => show_progress(store),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn render(
    input: &Path,
    output: Option<PathBuf>,
    config: Option<&Path>,
    plain: bool,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => Config::load(path)?,
        None if plain => Config::default(),
        None => Config::compiled_default(),
    };

    let markdown = lessonmark::ingest::extract_text(input)?;
    let html = lessonmark::render_with_config(&markdown, &config);

    let output = output.unwrap_or_else(|| input.with_extension("html"));
    if output.as_os_str() == "-" {
        println!("{html}");
        return Ok(());
    }

    fs::write(&output, html).with_context(|| format!("Error writing {}", output.display()))?;
    println!("Created {}", output.display());
    Ok(())
}

fn list_subjects() {
    for subject in lessonmark::tutor::builtin_subjects() {
        println!("{:<18} {}", subject.id, subject.name);
        println!("{:<18} {}", "", subject.description);
    }
}

fn show_progress(path: PathBuf) -> anyhow::Result<()> {
    let store = JsonFileStore::new(path);
    let progress = store.load()?;

    if progress.is_empty() {
        println!("No progress recorded in {}", store.path().display());
        return Ok(());
    }

    println!("{:<18} {:<12} {:>5}", "SUBJECT", "TOPIC", "SCORE");
    for (subject, topic, record) in progress.entries() {
        let score = match record.quiz_score {
            Some(score) => format!("{score}%"),
            None => "-".to_string(),
        };
        println!("{subject:<18} {topic:<12} {score:>5}");
    }
    Ok(())
}
