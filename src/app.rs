//! The end-to-end flow of one invocation.

use crate::config::Config;
use crate::error::QueryError;
use crate::llm::TextGenerator;
use crate::output;
use crate::query::{QueryGenerator, QueryRequest};
use std::io::Write;
use tracing::debug;

/// Run one invocation: banner, credential check, generation, result block.
///
/// `lookup` resolves environment variables and `connect` builds the backend
/// once configuration is known. `connect` is never called when the
/// credential is missing. Failures are reported on `err` and returned so the
/// caller can pick the exit code.
pub async fn run<L, C, G, O, E>(
    request: &QueryRequest,
    lookup: L,
    connect: C,
    out: &mut O,
    err: &mut E,
) -> Result<String, QueryError>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(&Config) -> anyhow::Result<G>,
    G: TextGenerator,
    O: Write,
    E: Write,
{
    let result = generate(request, lookup, connect, out).await;
    if let Err(e) = &result {
        debug!("Query generation failed: {}", e);
        // Nothing is left to report a stderr failure to.
        output::write_error(err, e).ok();
    }
    result
}

async fn generate<L, C, G, O>(
    request: &QueryRequest,
    lookup: L,
    connect: C,
    out: &mut O,
) -> Result<String, QueryError>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(&Config) -> anyhow::Result<G>,
    G: TextGenerator,
    O: Write,
{
    output::write_header(out, request)?;
    output::write_processing(out)?;

    let config = Config::from_lookup(lookup)?;
    let backend = connect(&config).map_err(QueryError::upstream)?;
    let query = QueryGenerator::new(config, backend)
        .generate(request)
        .await?;

    output::write_result(out, &query)?;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tests::FakeGenerator;
    use anyhow::anyhow;
    use std::cell::Cell;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_key(key: &str) -> Option<String> {
        (key == "GEMINI_API_KEY").then(|| "test-key".to_string())
    }

    fn request() -> QueryRequest {
        QueryRequest::new("hydrogels for wound healing", vec!["RCT".into()]).unwrap()
    }

    #[tokio::test]
    async fn test_success_prints_trimmed_query() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let query = run(
            &request(),
            with_key,
            |_| Ok(FakeGenerator::replying("  (Hydrogels[MeSH]) AND (Wound Healing)  ")),
            &mut out,
            &mut err,
        )
        .await
        .unwrap();

        assert_eq!(query, "(Hydrogels[MeSH]) AND (Wound Healing)");
        let stdout = String::from_utf8(out).unwrap();
        assert!(stdout.contains("Topic: hydrogels for wound healing"));
        assert!(stdout.contains("Filters: RCT"));
        assert!(stdout.contains("Processing..."));
        assert!(stdout.contains(
            "--- GENERATED PUBMED QUERY ---\n(Hydrogels[MeSH]) AND (Wound Healing)\n"
        ));
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_skips_network() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let connected = Cell::new(false);

        let failure = run(
            &request(),
            |_| None,
            |_| {
                connected.set(true);
                Ok(FakeGenerator::replying("unused"))
            },
            &mut out,
            &mut err,
        )
        .await
        .unwrap_err();

        assert!(matches!(failure, QueryError::MissingCredential));
        assert_eq!(failure.exit_code(), 1);
        assert!(!connected.get());
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.contains("GEMINI_API_KEY"));
        assert!(!String::from_utf8(out).unwrap().contains("GENERATED PUBMED QUERY"));
    }

    #[tokio::test]
    async fn test_upstream_failure_reports_message() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let failure = run(
            &request(),
            with_key,
            |_| Ok(FakeGenerator::failing("429 Resource has been exhausted")),
            &mut out,
            &mut err,
        )
        .await
        .unwrap_err();

        assert_eq!(failure.exit_code(), 1);
        let stderr = String::from_utf8(err).unwrap();
        assert!(stderr.starts_with("Error: "));
        assert!(stderr.contains("429 Resource has been exhausted"));
        assert!(!String::from_utf8(out).unwrap().contains("GENERATED PUBMED QUERY"));
    }

    #[tokio::test]
    async fn test_backend_construction_failure() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let failure = run(
            &request(),
            with_key,
            |_| -> anyhow::Result<FakeGenerator> { Err(anyhow!("TLS backend unavailable")) },
            &mut out,
            &mut err,
        )
        .await
        .unwrap_err();

        assert!(matches!(failure, QueryError::Upstream(_)));
        assert!(String::from_utf8(err)
            .unwrap()
            .contains("TLS backend unavailable"));
    }

    #[tokio::test]
    async fn test_connect_receives_resolved_config() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        run(
            &request(),
            with_key,
            |config: &Config| {
                assert_eq!(config.api_key, "test-key");
                assert_eq!(config.model, "gemini-2.0-flash");
                Ok(FakeGenerator::replying("q"))
            },
            &mut out,
            &mut err,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_failure_prints_single_message_under_default_filter() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(crate::DEFAULT_LOG_FILTER))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut out = Vec::new();
        let mut err = Vec::new();
        run(
            &request(),
            |_| None,
            |_| Ok(FakeGenerator::replying("unused")),
            &mut out,
            &mut err,
        )
        .await
        .unwrap_err();

        let stderr = String::from_utf8(err).unwrap();
        assert_eq!(stderr, "Error: GEMINI_API_KEY environment variable not set.\n");
        assert!(logs.0.lock().unwrap().is_empty());
    }
}
