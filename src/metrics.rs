//! Textual disclosure metrics: length, numerical intensity, Fog index and tone

use crate::error::{Error, Result};
use crate::lexicon::SentimentLexicons;
use crate::syllable::{HeuristicSyllables, SyllableCounter};
use crate::tokenize::{DateSpan, RuleTokenizer, Tokenizer};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// Words with at least this many syllables are "complex" for the Fog index
pub const COMPLEX_WORD_SYLLABLES: usize = 3;

/// Metrics for one sub-document, with the token lists they were derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureMetrics {
    /// Number of sentences
    pub length: usize,
    /// Numbers in the text that are not part of a date
    pub numerical_intensity: usize,
    pub fog_index: f64,
    /// Positive minus negative lexicon hits
    pub tone: i64,
    pub word_count: usize,
    pub sentence_count: usize,
    pub higher_syllable_word_count: usize,
    pub syllable_count: usize,
    pub sentence_list: Vec<String>,
    pub word_list: Vec<String>,
    pub date_list: Vec<String>,
    pub pos_words_in_doc: Vec<String>,
    pub neg_words_in_doc: Vec<String>,
}

/// Lexicon hits in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToneMatches {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl ToneMatches {
    pub fn score(&self) -> i64 {
        self.positive.len() as i64 - self.negative.len() as i64
    }
}

struct Patterns {
    newlines: Regex,
    layout_runs: Regex,
    number: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        newlines: Regex::new(r"\n+").expect("valid newline regex"),
        layout_runs: Regex::new(r"[\s-]{2,}").expect("valid layout regex"),
        number: Regex::new(r"\d+(?:\.\d)?").expect("valid number regex"),
    })
}

/// Collapse line breaks and runs of whitespace or dashes so layout does
/// not read as sentence or word boundaries.
pub fn preprocess(text: &str) -> String {
    let p = patterns();
    let text = p.newlines.replace_all(text, " ");
    p.layout_runs.replace_all(&text, " ").into_owned()
}

/// Gunning Fog index; `None` when there are no words or no sentences
pub fn fog_index(word_count: usize, sentence_count: usize, complex_word_count: usize) -> Option<f64> {
    if word_count == 0 || sentence_count == 0 {
        return None;
    }
    let words = word_count as f64;
    let words_per_sentence = words / sentence_count as f64;
    let complex_percentage = 100.0 * complex_word_count as f64 / words;
    Some(0.4 * (words_per_sentence + complex_percentage))
}

/// Count numbers in `text`, skipping any that fall inside a date containing
/// digits. `dates` must carry offsets into the same `text`.
pub fn numerical_intensity(text: &str, dates: &[DateSpan]) -> usize {
    let numeric_dates: Vec<&DateSpan> = dates.iter().filter(|d| d.has_digit()).collect();
    patterns()
        .number
        .find_iter(text)
        .filter(|m| !numeric_dates.iter().any(|d| d.overlaps(m.start(), m.end())))
        .count()
}

/// Every word that appears in the positive or negative list, in document order
pub fn tone(words: &[String], lexicons: &SentimentLexicons) -> ToneMatches {
    let mut matches = ToneMatches::default();
    for word in words {
        if lexicons.positive.contains(word) {
            matches.positive.push(word.clone());
        }
        if lexicons.negative.contains(word) {
            matches.negative.push(word.clone());
        }
    }
    matches
}

/// Computes [`DisclosureMetrics`] with pluggable tokenization and syllable counting
#[derive(Debug, Clone)]
pub struct MetricsEngine<T = RuleTokenizer, S = HeuristicSyllables> {
    lexicons: Arc<SentimentLexicons>,
    tokenizer: T,
    syllables: S,
}

impl MetricsEngine {
    /// Engine over the bundled lexicons
    pub fn new() -> Self {
        Self::with_lexicons(SentimentLexicons::bundled())
    }

    pub fn with_lexicons(lexicons: Arc<SentimentLexicons>) -> Self {
        Self::with_components(lexicons, RuleTokenizer::new(), HeuristicSyllables)
    }
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer, S: SyllableCounter> MetricsEngine<T, S> {
    pub fn with_components(lexicons: Arc<SentimentLexicons>, tokenizer: T, syllables: S) -> Self {
        Self {
            lexicons,
            tokenizer,
            syllables,
        }
    }

    pub fn lexicons(&self) -> &SentimentLexicons {
        &self.lexicons
    }

    /// Compute all metrics for one document's text.
    ///
    /// Blank text, or text without a single sentence or word, is rejected
    /// with [`Error::InvalidInput`] instead of producing NaN.
    pub fn compute(&self, text: &str) -> Result<DisclosureMetrics> {
        let sanitized = preprocess(text);
        if sanitized.trim().is_empty() {
            return Err(Error::InvalidInput("text is empty".into()));
        }

        let sentence_list = non_empty(self.tokenizer.sentences(&sanitized));
        let word_list = non_empty(self.tokenizer.words(&sanitized));
        let dates: Vec<DateSpan> = self
            .tokenizer
            .dates(&sanitized)
            .into_iter()
            .filter(|d| !d.text.is_empty())
            .collect();

        let sentence_count = sentence_list.len();
        let word_count = word_list.len();

        let mut syllable_count = 0;
        let mut higher_syllable_word_count = 0;
        for word in &word_list {
            let count = self.syllables.count(word);
            syllable_count += count;
            if count >= COMPLEX_WORD_SYLLABLES {
                higher_syllable_word_count += 1;
            }
        }

        let fog = fog_index(word_count, sentence_count, higher_syllable_word_count).ok_or_else(|| {
            Error::InvalidInput(format!(
                "{} sentences and {} words",
                sentence_count, word_count
            ))
        })?;

        let numerical_intensity = numerical_intensity(&sanitized, &dates);
        let matches = tone(&word_list, &self.lexicons);

        log::trace!(
            "{} sentences, {} words, {} complex, ni {}, tone {}",
            sentence_count,
            word_count,
            higher_syllable_word_count,
            numerical_intensity,
            matches.score()
        );

        Ok(DisclosureMetrics {
            length: sentence_count,
            numerical_intensity,
            fog_index: fog,
            tone: matches.score(),
            word_count,
            sentence_count,
            higher_syllable_word_count,
            syllable_count,
            sentence_list,
            word_list,
            date_list: dates.into_iter().map(|d| d.text).collect(),
            pos_words_in_doc: matches.positive,
            neg_words_in_doc: matches.negative,
        })
    }
}

fn non_empty(items: Vec<String>) -> Vec<String> {
    items.into_iter().filter(|s| !s.trim().is_empty()).collect()
}

/// Compute metrics with the bundled lexicons and default tokenizer
pub fn compute_metrics(text: &str) -> Result<DisclosureMetrics> {
    MetricsEngine::new().compute(text)
}
