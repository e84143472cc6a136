//! Sentence, word and date tokenization

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A date-like span, with byte offsets into the tokenized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl DateSpan {
    pub fn has_digit(&self) -> bool {
        self.text.bytes().any(|b| b.is_ascii_digit())
    }

    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && self.start < end
    }
}

pub trait Tokenizer {
    /// Sentence texts, in order
    fn sentences(&self, text: &str) -> Vec<String>;
    /// Normalized (lower-cased, edge punctuation removed) word tokens
    fn words(&self, text: &str) -> Vec<String>;
    /// Date-like spans as found
    fn dates(&self, text: &str) -> Vec<DateSpan>;
}

/// Abbreviations whose trailing period does not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "no", "nos", "vs", "etc", "approx", "dept", "est", "fig", "jan", "feb", "mar", "apr",
    "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "gen", "gov", "sen", "rep", "ave",
    "blvd", "e.g", "i.e", "u.s", "u.k", "a.m", "p.m",
];

/// Company-name suffixes. A capitalized word after one starts a new sentence.
const CORPORATE_SUFFIXES: &[&str] = &["inc", "corp", "co", "ltd", "llc", "plc"];

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec";
/// "May" on its own is usually the modal verb
const STANDALONE_MONTHS: &str = "January|February|March|April|June|July|August|September|October|November|December";
const WEEKDAYS: &str = "Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday";

struct Patterns {
    boundary: Regex,
    word_separator: Regex,
    initialism: Regex,
    date: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let date = [
            r"\b\d{4}-\d{1,2}-\d{1,2}\b".to_string(),
            r"\b\d{1,2}/\d{1,2}/\d{2,4}\b".to_string(),
            format!(r"\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})\.?(?:,?\s+\d{{4}})?\b"),
            format!(r"\b(?:{MONTHS})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?\b"),
            format!(r"\b(?:{MONTHS})\.?,?\s+\d{{4}}\b"),
            format!(r"\b(?:{STANDALONE_MONTHS}|{WEEKDAYS})\b"),
        ]
        .join("|");

        Patterns {
            boundary: Regex::new("[.!?]+[\"'\u{201d}\u{2019})\\]]*\\s+").expect("valid boundary regex"),
            word_separator: Regex::new("[\\s\u{2013}\u{2014}/-]+").expect("valid separator regex"),
            initialism: Regex::new(r"^[a-z](?:\.[a-z])*$").expect("valid initialism regex"),
            date: Regex::new(&date).expect("valid date regex"),
        }
    })
}

/// Rule-based English tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTokenizer;

impl RuleTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Whether the punctuation run ending the candidate really closes a sentence
    fn is_boundary(&self, before: &str, punctuation: &str, after: &str) -> bool {
        if after.chars().next().is_some_and(char::is_lowercase) {
            return false;
        }
        if !punctuation.starts_with('.') {
            return true;
        }

        let last = before
            .split_whitespace()
            .last()
            .unwrap_or_default()
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();

        if CORPORATE_SUFFIXES.contains(&last.as_str()) {
            return after.chars().next().is_some_and(char::is_uppercase);
        }

        !(ABBREVIATIONS.contains(&last.as_str()) || patterns().initialism.is_match(&last))
    }
}

impl Tokenizer for RuleTokenizer {
    fn sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for m in patterns().boundary.find_iter(text) {
            let before = &text[start..m.start()];
            if before.trim().is_empty() {
                continue;
            }
            if self.is_boundary(before, m.as_str(), &text[m.end()..]) {
                sentences.push(text[start..m.end()].trim().to_string());
                start = m.end();
            }
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        sentences.retain(|s| !s.is_empty());
        sentences
    }

    fn words(&self, text: &str) -> Vec<String> {
        patterns()
            .word_separator
            .split(text)
            .map(|token| {
                token
                    .replace('\u{2019}', "'")
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase()
            })
            .filter(|word| !word.is_empty())
            .collect()
    }

    fn dates(&self, text: &str) -> Vec<DateSpan> {
        patterns()
            .date
            .find_iter(text)
            .map(|m| DateSpan {
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            })
            .filter(|span| !span.text.trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentences() {
        let text = "Revenue rose 12.5% in 2017. Costs fell! Did margins improve? Yes.";
        assert_eq!(
            RuleTokenizer.sentences(text),
            vec![
                "Revenue rose 12.5% in 2017.",
                "Costs fell!",
                "Did margins improve?",
                "Yes."
            ]
        );
    }

    #[test]
    fn test_sentences_keep_abbreviations() {
        let text = "Acme Corp. acquired U.S. Widgets Inc. in March. Mr. Smith approved it.";
        assert_eq!(
            RuleTokenizer.sentences(text),
            vec![
                "Acme Corp. acquired U.S. Widgets Inc. in March.",
                "Mr. Smith approved it."
            ]
        );
    }

    #[test]
    fn test_sentences_end_on_corporate_suffix() {
        let text = "We acquired Widgets Inc. The deal closed in March. Acme Corp. and Beta Ltd. merged.";
        assert_eq!(
            RuleTokenizer.sentences(text),
            vec![
                "We acquired Widgets Inc.",
                "The deal closed in March.",
                "Acme Corp. and Beta Ltd. merged."
            ]
        );
    }

    #[test]
    fn test_sentences_closing_quote() {
        let text = "He said \"we grew.\" Then we left.";
        assert_eq!(
            RuleTokenizer.sentences(text),
            vec!["He said \"we grew.\"", "Then we left."]
        );
    }

    #[test]
    fn test_words() {
        let words = RuleTokenizer.words("The Company\u{2019}s long-term growth (see Note 4) was $1,234.5 million.");
        assert_eq!(
            words,
            vec![
                "the", "company's", "long", "term", "growth", "see", "note", "4", "was",
                "1,234.5", "million"
            ]
        );
    }

    #[test]
    fn test_words_drop_punctuation_only_tokens() {
        assert_eq!(RuleTokenizer.words("-- ... ; ok"), vec!["ok"]);
    }

    #[test]
    fn test_dates() {
        let text = "On March 1, 2017 and 2017-03-01 and 3/1/2017, in 1 March 2017, \
                    during June 2016, every Monday, we may report.";
        let dates: Vec<String> = RuleTokenizer.dates(text).into_iter().map(|d| d.text).collect();
        assert_eq!(
            dates,
            vec![
                "March 1, 2017",
                "2017-03-01",
                "3/1/2017",
                "1 March 2017",
                "June 2016",
                "Monday"
            ]
        );
    }

    #[test]
    fn test_bare_year_is_not_a_date() {
        assert!(RuleTokenizer.dates("In 2017 we had 42 stores.").is_empty());
    }

    #[test]
    fn test_date_span_offsets() {
        let text = "As of 2017-03-01.";
        let dates = RuleTokenizer.dates(text);
        assert_eq!(dates.len(), 1);
        assert_eq!(&text[dates[0].start..dates[0].end], "2017-03-01");
        assert!(dates[0].has_digit());
        assert!(dates[0].overlaps(6, 10));
        assert!(!dates[0].overlaps(0, 5));
    }
}
