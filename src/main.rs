use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zinc_ast::cli::{self, CheckOptions, CliError, DocOptions};

#[derive(ClapParser)]
#[command(name = "zinc")]
#[command(about = "Zinc - inspect, print and document constraint models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a model and report its node statistics
    Check {
        /// JSON model file (reads from stdin if not provided)
        model: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pretty-print a model in concrete syntax
    Print {
        /// JSON model file (reads from stdin if not provided)
        model: Option<PathBuf>,
    },

    /// Generate HTML documentation from doc_comment annotations
    Doc {
        /// JSON model file (reads from stdin if not provided)
        model: Option<PathBuf>,

        /// Write a single document instead of one per group
        #[arg(long)]
        single_page: bool,

        /// Directory to write documents to (prints to stdout if not provided)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zinc=info,zinc_ast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { model, json } => read_model(model.as_deref()).and_then(|model| {
            let report = cli::execute_check(&CheckOptions { model, json })?;
            print!("{}", report);
            Ok(())
        }),
        Commands::Print { model } => read_model(model.as_deref()).and_then(|model| {
            print!("{}", cli::execute_print(model.as_deref())?);
            Ok(())
        }),
        Commands::Doc {
            model,
            single_page,
            out,
        } => read_model(model.as_deref())
            .and_then(|model| run_doc(DocOptions { model, single_page }, out.as_deref())),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Reads the model from `path`, or from stdin when no path is given and
/// stdin is not a terminal.
fn read_model(path: Option<&Path>) -> Result<Option<String>, CliError> {
    match path {
        Some(p) => Ok(Some(fs::read_to_string(p)?)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_doc(options: DocOptions, out: Option<&Path>) -> Result<(), CliError> {
    let documents = cli::execute_doc(&options)?;

    match out {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            for document in &documents {
                let path = dir.join(document.filename());
                fs::write(&path, &document.html)?;
                info!("wrote {}", path.display());
            }
        }
        None => {
            for document in &documents {
                println!("<!-- {} -->", document.filename());
                print!("{}", document.html);
            }
        }
    }
    Ok(())
}
