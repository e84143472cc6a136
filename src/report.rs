//! Per-filing analysis: parse a submission and score its primary document

use crate::error::Error;
use crate::metrics::{DisclosureMetrics, MetricsEngine};
use crate::parse::parse_submission;
use crate::syllable::SyllableCounter;
use crate::tokenize::Tokenizer;
use crate::types::{ContentClass, ParseOptions, ParsedSubmission};
use serde::{Deserialize, Serialize};

/// A parsed submission plus the metrics of its primary document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingReport {
    #[serde(flatten)]
    pub submission: ParsedSubmission,
    pub form_metrics: Option<DisclosureMetrics>,
}

/// One flat output record per filing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    #[serde(rename = "CIK")]
    pub cik: String,
    #[serde(rename = "Form Date")]
    pub form_date: String,
    #[serde(rename = "Form Type")]
    pub form_type: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Filename")]
    pub filename: String,
    #[serde(rename = "Sentence Count")]
    pub sentence_count: usize,
    #[serde(rename = "Word Count")]
    pub word_count: usize,
    #[serde(rename = "Higher Syllable Word Count")]
    pub higher_syllable_word_count: usize,
    #[serde(rename = "Numerical Intensity")]
    pub numerical_intensity: usize,
    #[serde(rename = "Fog Index")]
    pub fog_index: f64,
    #[serde(rename = "Negative Words Count")]
    pub negative_words_count: usize,
    #[serde(rename = "Positive Words Count")]
    pub positive_words_count: usize,
    #[serde(rename = "Tone")]
    pub tone: i64,
}

impl FilingReport {
    /// Flat record, only for filings whose primary document was scored
    pub fn row(&self) -> Option<MetricsRow> {
        let metrics = self.form_metrics.as_ref()?;
        let header = &self.submission.header;
        Some(MetricsRow {
            cik: header.company.central_index_key.clone(),
            form_date: header.filing_date.clone(),
            form_type: header.filing_details.form_type.clone(),
            company_name: header.company.name.clone(),
            filename: header.filename.clone(),
            sentence_count: metrics.sentence_count,
            word_count: metrics.word_count,
            higher_syllable_word_count: metrics.higher_syllable_word_count,
            numerical_intensity: metrics.numerical_intensity,
            fog_index: metrics.fog_index,
            negative_words_count: metrics.neg_words_in_doc.len(),
            positive_words_count: metrics.pos_words_in_doc.len(),
            tone: metrics.tone,
        })
    }
}

/// Score the primary document of an already parsed submission.
///
/// XML primaries and primaries without pages are skipped, and so is text the
/// engine rejects as degenerate.
pub fn primary_metrics<T: Tokenizer, S: SyllableCounter>(
    submission: &ParsedSubmission,
    engine: &MetricsEngine<T, S>,
) -> Option<DisclosureMetrics> {
    let primary = submission.primary_document()?;
    if primary.classification() == ContentClass::Xml || primary.pages().is_empty() {
        log::debug!(
            "Primary document {} ({:?}) has no prose to score",
            primary.filename,
            primary.classification()
        );
        return None;
    }

    match engine.compute(&primary.text()) {
        Ok(metrics) => Some(metrics),
        Err(Error::InvalidInput(reason)) => {
            log::warn!("Skipping metrics for {}: {}", primary.filename, reason);
            None
        }
        Err(e) => {
            log::error!("Metrics failed for {}: {}", primary.filename, e);
            None
        }
    }
}

/// Parse a decoded submission and score its primary document
pub fn analyze_submission<T: Tokenizer, S: SyllableCounter>(
    text: &str,
    options: &ParseOptions,
    engine: &MetricsEngine<T, S>,
) -> FilingReport {
    let submission = parse_submission(text, options);
    let form_metrics = primary_metrics(&submission, engine);
    FilingReport {
        submission,
        form_metrics,
    }
}
