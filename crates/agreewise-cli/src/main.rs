//! agreewise - extract contract text from the command line.
//!
//! ```text
//! agreewise extract lease.pdf --language en
//! agreewise batch page1.jpg page2.jpg page3.jpg --format json
//! agreewise detect upload.tmp
//! agreewise summarize analysis.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use agreewise::analysis::{AnalysisDocument, prepare_contract_text};
use agreewise::core::config::{ExtractionConfig, UploadConfig};
use agreewise::core::io::validate_upload;
use agreewise::{DocumentProcessor, ExtractionResult, SourceFile, detect_mime_type};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

/// Document ingestion for plain-language contract analysis.
#[derive(Parser, Debug)]
#[command(name = "agreewise", version, about)]
struct Cli {
    /// Config file (.toml, .yaml, .yml or .json). Defaults to agreewise.toml in
    /// the current directory or a parent.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline decisions to stderr (same as RUST_LOG=agreewise=debug).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract the text of one document.
    Extract {
        file: PathBuf,

        /// Two-letter language hint for OCR.
        #[arg(long, short)]
        language: Option<String>,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Cut the text to the analysis input budget.
        #[arg(long)]
        for_analysis: bool,
    },

    /// Extract several files as consecutive pages of one document.
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, short)]
        language: Option<String>,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the content-detected MIME type of a file.
    Detect { file: PathBuf },

    /// Print the spoken summary of an analysis JSON document.
    Summarize { file: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "agreewise=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ExtractionConfig> {
    match path {
        Some(path) => {
            ExtractionConfig::from_file(path).with_context(|| format!("loading config {}", path.display()))
        }
        None => Ok(ExtractionConfig::discover()?.unwrap_or_default()),
    }
}

/// Apply the upload rules (extension allow-list, size cap) to a local file.
fn check_upload(path: &Path, limits: &UploadConfig) -> agreewise::Result<()> {
    let size = std::fs::metadata(path)?.len();
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    validate_upload(&filename, size, limits)
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Extract {
            file,
            language,
            format,
            for_analysis,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let max_chars = config.analysis.max_input_chars;
            let processor = DocumentProcessor::new(config);

            let mut result = match check_upload(&file, &processor.config().upload) {
                Ok(()) => processor.process(&file, language.as_deref()),
                Err(e) => ExtractionResult::failed(e.to_string()),
            };
            if for_analysis && result.success {
                let prepared = prepare_contract_text(&result.text, max_chars).into_owned();
                result.char_count = prepared.chars().count();
                result.text = prepared;
            }

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text if result.success => println!("{}", result.text),
                OutputFormat::Text => {}
            }

            if result.success {
                debug!(
                    method = ?result.method,
                    chars = result.char_count,
                    "extracted {}",
                    file.display()
                );
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!(
                    "error: {}: {}",
                    file.display(),
                    result.error.as_deref().unwrap_or("extraction failed")
                );
                Ok(ExitCode::FAILURE)
            }
        }

        Command::Batch {
            files,
            language,
            format,
        } => {
            let processor = DocumentProcessor::new(load_config(cli.config.as_deref())?);
            for file in &files {
                check_upload(file, &processor.config().upload)
                    .with_context(|| format!("rejected {}", file.display()))?;
            }
            let sources = files.into_iter().map(SourceFile::persistent).collect();
            let document = processor.process_batch(sources, language.as_deref())?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&document)?),
                OutputFormat::Text => println!("{}", document.full_text),
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Detect { file } => {
            println!("{}", detect_mime_type(&file)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Summarize { file } => {
            let response =
                std::fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let analysis = AnalysisDocument::from_json(&response)?;
            println!("{}", analysis.spoken_summary());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
