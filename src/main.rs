use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;

use mcq_admin::logging::{self, LogTarget};
use mcq_admin::{Config, Error, ImportOptions, Store, StoreError, admin, error_chain, import};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import MCQs from an .xlsx, .xls, .ods or .csv file
    Import {
        file: PathBuf,
        /// Reject rows whose Correct Choice is not between 1 and 4
        #[arg(long)]
        strict: bool,
        /// Keep rows imported before a failing row
        #[arg(long)]
        no_atomic: bool,
    },
    /// List questions, newest first
    Questions {
        /// Only questions containing every word
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a question with its choices
    Show { id: i64 },
    /// Delete a question and its choices
    Delete { id: i64 },
    /// List choices with their questions
    Choices {
        #[arg(long, conflicts_with = "incorrect")]
        correct: bool,
        #[arg(long)]
        incorrect: bool,
    },
    /// Write every question with its choices as JSON
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Open the interactive admin console
    Admin,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let target = match args.command {
        Command::Admin => LogTarget::FileOnly,
        _ => LogTarget::Stderr,
    };
    logging::setup(&args.config, target)?;

    let store = Store::open(&args.config.database)?;
    info!(database = %args.config.database.display(), "opened database");

    let result = dispatch(&store, &args.config, args.command);
    finish(result, store.close())
}

/// The command's own error wins over a failure to close the database.
fn finish(result: Result<(), Error>, closed: Result<(), StoreError>) -> Result<(), Error> {
    result?;
    closed?;
    Ok(())
}

fn dispatch(store: &Store, config: &Config, command: Command) -> Result<(), Error> {
    let mut out = io::stdout().lock();

    match command {
        Command::Import {
            file,
            strict,
            no_atomic,
        } => {
            let options = ImportOptions {
                atomic: !no_atomic,
                strict,
            };
            let summary = import::import_file(store, &file, options)?;
            writeln!(out, "{}", summary)?;
            if !summary.without_correct.is_empty() {
                let lines: Vec<String> = summary
                    .without_correct
                    .iter()
                    .map(|line| line.to_string())
                    .collect();
                writeln!(out, "No correct choice on row(s): {}", lines.join(", "))?;
            }
        }
        Command::Questions { search } => {
            let questions = match search {
                Some(term) => store.search_questions(&term)?,
                None => store.list_questions()?,
            };
            for question in &questions {
                writeln!(
                    out,
                    "#{:<6} {}  {}",
                    question.id,
                    question.created_at.format("%Y-%m-%d %H:%M"),
                    question
                )?;
            }
        }
        Command::Show { id } => {
            let detail = store
                .question_with_choices(id)?
                .ok_or(StoreError::QuestionNotFound(id))?;
            writeln!(out, "#{} {}", detail.question.id, detail.question)?;
            for (index, choice) in detail.choices.iter().enumerate() {
                writeln!(out, "  {}. {}", index + 1, choice)?;
            }
        }
        Command::Delete { id } => {
            let removed = store.delete_question(id)?;
            writeln!(out, "Deleted question #{} and {} choice(s).", id, removed)?;
        }
        Command::Choices { correct, incorrect } => {
            let filter = match (correct, incorrect) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            for listing in store.list_choices(filter)? {
                writeln!(
                    out,
                    "#{:<6} {}  <- #{} {}",
                    listing.choice.id,
                    listing.choice,
                    listing.choice.question_id,
                    listing.question_text
                )?;
            }
        }
        Command::Export { output } => {
            let questions = store.export_all()?;
            match output {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(&path)?);
                    serde_json::to_writer_pretty(&mut writer, &questions)?;
                    writer.flush()?;
                    info!(count = questions.len(), path = %path.display(), "exported questions");
                }
                None => {
                    serde_json::to_writer_pretty(&mut out, &questions)?;
                    writeln!(out)?;
                }
            }
        }
        Command::Admin => {
            drop(out);
            admin::run(store, config.database.display().to_string())?;
        }
    }

    Ok(())
}
