//! Console rendering.
//!
//! Everything is written through `std::io::Write` so the layout can be
//! checked in tests without capturing the real stdout.

use crate::query::QueryRequest;
use reqwest::Url;
use std::io::{self, Write};

const PUBMED_SEARCH_URL: &str = "https://pubmed.ncbi.nlm.nih.gov/";

/// Print the banner echoing the topic and filters.
pub fn write_header<W: Write>(out: &mut W, request: &QueryRequest) -> io::Result<()> {
    writeln!(out, "\n--- BioSearch Architect CLI ---")?;
    writeln!(out, "Topic: {}", request.topic())?;
    if !request.study_types().is_empty() {
        writeln!(out, "Filters: {}", request.study_types().join(", "))?;
    }
    writeln!(out, "-------------------------------\n")?;
    Ok(())
}

/// Print the processing notice.
pub fn write_processing<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Processing...\n")?;
    out.flush()
}

/// Print the labeled result block and usage tip.
pub fn write_result<W: Write>(out: &mut W, query: &str) -> io::Result<()> {
    writeln!(out, "--- GENERATED PUBMED QUERY ---")?;
    writeln!(out, "{}", query)?;
    writeln!(out, "------------------------------")?;
    writeln!(out, "\nTip: You can paste this directly into the PubMed search bar.")?;
    if let Some(url) = pubmed_url(query) {
        writeln!(out, "Open in PubMed: {}", url)?;
    }
    Ok(())
}

/// Print a failure message.
pub fn write_error<W: Write>(err: &mut W, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(err, "Error: {}", message)
}

/// PubMed search link for a query string.
pub fn pubmed_url(query: &str) -> Option<Url> {
    Url::parse_with_params(PUBMED_SEARCH_URL, &[("term", query)]).ok()
}
