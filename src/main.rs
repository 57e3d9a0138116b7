//! pubsearch - PubMed boolean search strings from plain-language topics.
//!
//! Takes a research topic and optional study-type filters, asks Gemini to
//! expand it into a MeSH-based boolean query, and prints the result.

mod app;
mod config;
mod error;
mod llm;
mod output;
mod query;

use clap::Parser;
use llm::GeminiBackend;
use query::{study_types_from_flag, QueryRequest};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pubsearch")]
#[command(author, version, about = "Generate advanced PubMed search strings using AI.")]
#[command(long_about = "Generate advanced PubMed search strings using AI.\n\nRequires the GEMINI_API_KEY environment variable.")]
struct Cli {
    /// The research topic or natural language query
    #[arg(value_name = "TOPIC", value_parser = clap::builder::NonEmptyStringValueParser::new())]
    topic: String,

    /// Comma-separated list of study types (e.g., 'RCT,Systematic Review')
    #[arg(long, value_name = "LIST")]
    types: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let study_types = study_types_from_flag(cli.types.as_deref());

    let mut stderr = std::io::stderr();
    let request = match QueryRequest::new(cli.topic, study_types) {
        Ok(request) => request,
        Err(e) => {
            // Nothing is left to report a stderr failure to.
            output::write_error(&mut stderr, &e).ok();
            return ExitCode::from(e.exit_code());
        }
    };

    let mut stdout = std::io::stdout();
    match app::run(
        &request,
        |key| std::env::var(key).ok(),
        GeminiBackend::new,
        &mut stdout,
        &mut stderr,
    )
    .await
    {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(e.exit_code()),
    }
}

/// Log filter used when `RUST_LOG` is unset.
pub(crate) const DEFAULT_LOG_FILTER: &str = "pubsearch=warn,reqwest=warn";

/// Log to stderr so stdout only carries the console output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
