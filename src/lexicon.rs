//! Sentiment word lists for the tone measure
//!
//! Lists are newline-delimited, one term per line. Terms are trimmed and
//! lower-cased on load and blank lines are dropped. Once built a lexicon is
//! never modified.

use crate::error::Result;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, OnceLock};

const BUNDLED_POSITIVE: &str = include_str!("../data/positive.txt");
const BUNDLED_NEGATIVE: &str = include_str!("../data/negative.txt");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    terms: HashSet<String>,
}

impl Lexicon {
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        Self { terms }
    }

    /// Build from newline-delimited text
    pub fn parse(text: &str) -> Self {
        Self::from_terms(text.lines())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.terms.contains(word)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Positive and negative term lists used together for tone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentLexicons {
    pub positive: Lexicon,
    pub negative: Lexicon,
}

impl SentimentLexicons {
    pub fn new(positive: Lexicon, negative: Lexicon) -> Self {
        Self { positive, negative }
    }

    pub fn from_files(positive: impl AsRef<Path>, negative: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(
            Lexicon::from_file(positive)?,
            Lexicon::from_file(negative)?,
        ))
    }

    /// Bundled financial-disclosure word lists, built once per process
    pub fn bundled() -> Arc<Self> {
        static BUNDLED: OnceLock<Arc<SentimentLexicons>> = OnceLock::new();
        BUNDLED
            .get_or_init(|| {
                let lexicons = SentimentLexicons::new(
                    Lexicon::parse(BUNDLED_POSITIVE),
                    Lexicon::parse(BUNDLED_NEGATIVE),
                );
                log::debug!(
                    "Loaded bundled lexicons: {} positive, {} negative terms",
                    lexicons.positive.len(),
                    lexicons.negative.len()
                );
                Arc::new(lexicons)
            })
            .clone()
    }
}
