//! PubMed query generation.
//!
//! Assembles the prompt from a research topic and optional study-type
//! filters, and asks a [`TextGenerator`] for the boolean search string.

use crate::config::Config;
use crate::error::QueryError;
use crate::llm::TextGenerator;
use tracing::{debug, info};

/// Fixed instruction sent alongside every prompt.
pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert Information Specialist and Biomaterials Engineer. Your task is to translate natural language research topics into advanced boolean search strings suitable for PubMed.

Follow this strict process:
1. Analyze the user's research topic to identify key concepts (e.g., Biomaterial type, Application, Disease model).
2. Expand keywords using MeSH terms (Medical Subject Headings) and synonyms (e.g., for "Hydrogel", use "Hydrogels"[MeSH] OR "Hydrogel networks" OR "Injectable gels").
3. Construct a robust query using AND/OR operators. Group concepts with parentheses.
4. If specific study types are requested (e.g., RCT, Systematic Review, Guidelines), append the correct publication type filters or search limits (e.g., "Practice Guideline"[pt], "Systematic Review"[pt], "Case Reports"[pt]).
5. Output ONLY the raw search string. Do not include markdown code blocks, explanations, or labels. Just the final query string."#;

/// A research topic plus the study types to restrict results to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    topic: String,
    study_types: Vec<String>,
}

impl QueryRequest {
    /// Create a request. The topic must contain something other than whitespace.
    pub fn new(topic: impl Into<String>, study_types: Vec<String>) -> Result<Self, QueryError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(QueryError::EmptyTopic);
        }
        Ok(Self { topic, study_types })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn study_types(&self) -> &[String] {
        &self.study_types
    }
}

/// Split a comma-separated `--types` value into trimmed labels, keeping order.
///
/// Blank entries are kept, so `"RCT,,"` yields three labels.
pub fn parse_study_types(raw: &str) -> Vec<String> {
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

/// Study types for an optional `--types` flag. Absent or empty means no filters.
pub fn study_types_from_flag(flag: Option<&str>) -> Vec<String> {
    flag.filter(|raw| !raw.is_empty())
        .map(parse_study_types)
        .unwrap_or_default()
}

/// Build the user-turn prompt for a request.
pub fn build_prompt(request: &QueryRequest) -> String {
    let mut prompt = format!("Research Topic: {}", request.topic);
    if !request.study_types.is_empty() {
        prompt.push_str(&format!(
            "\nRestrict results to these study types: {}",
            request.study_types.join(", ")
        ));
    }
    prompt
}

/// Turns requests into PubMed boolean queries through a text generator.
pub struct QueryGenerator<G> {
    config: Config,
    backend: G,
}

impl<G: TextGenerator> QueryGenerator<G> {
    pub fn new(config: Config, backend: G) -> Self {
        Self { config, backend }
    }

    /// Generate the search string for `request`.
    ///
    /// Issues exactly one generation call. The response is trimmed but
    /// otherwise returned as-is.
    pub async fn generate(&self, request: &QueryRequest) -> Result<String, QueryError> {
        let prompt = build_prompt(request);
        info!(
            "Generating query with {} ({})",
            self.backend.name(),
            self.backend.model()
        );
        debug!("Prompt: {}", prompt);

        let text = self
            .backend
            .generate_text(&prompt, SYSTEM_INSTRUCTION, self.config.temperature)
            .await
            .map_err(QueryError::upstream)?;

        Ok(text.trim().to_string())
    }
}
