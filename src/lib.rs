//! SEC Submission Parser and Disclosure Metrics
//!
//! Parses legacy SGML submissions into header fields and typed
//! sub-documents, and scores document prose for length, numerical
//! intensity, readability (Fog index) and tone.

mod content;
mod error;
mod header;
mod lexicon;
mod metrics;
mod parse;
mod report;
mod syllable;
pub mod tags;
pub mod tokenize;
mod types;
pub mod xml;

#[cfg(feature = "python")]
mod python;

pub use content::{html_to_text, looks_like_html, plain_pages, strip_tags};
pub use error::{Error, Result};
pub use header::{keys as header_keys, parse_header};
pub use lexicon::{Lexicon, SentimentLexicons};
pub use metrics::{
    compute_metrics, fog_index, numerical_intensity, preprocess, tone, DisclosureMetrics,
    MetricsEngine, ToneMatches, COMPLEX_WORD_SYLLABLES,
};
pub use parse::{parse_submission, parse_submission_bytes, parse_submission_file};
pub use report::{analyze_submission, primary_metrics, FilingReport, MetricsRow};
pub use syllable::{HeuristicSyllables, SyllableCounter};
pub use tokenize::{DateSpan, RuleTokenizer, Tokenizer};
pub use types::{
    CompanyInfo, ContentClass, DocumentContent, FilingDetails, FilingHeader, ParseOptions,
    ParsedSubmission, SubDocument,
};

/// Parse a submission and return its JSON form.
///
/// This is the primary function for Python integration.
pub fn parse_submission_to_json(data: &[u8], options: &ParseOptions) -> Result<Vec<u8>> {
    let parsed = parse_submission_bytes(data, options)?;
    Ok(serde_json::to_vec(&parsed)?)
}

/// Compute disclosure metrics and return their JSON form
pub fn compute_metrics_to_json(text: &str) -> Result<Vec<u8>> {
    let metrics = compute_metrics(text)?;
    Ok(serde_json::to_vec(&metrics)?)
}
