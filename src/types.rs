//! Type definitions for parsed submissions

use serde::{Deserialize, Serialize};

/// Filer identity fields from the header preamble
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub former_name: String,
    pub name_change_date: String,
    pub central_index_key: String,
    pub industry_classification: String,
    pub irs_number: String,
    pub state_of_incorporation: String,
    pub fiscal_year_end: String,
}

impl CompanyInfo {
    /// Numeric SIC code from a classification like `SERVICES-PREPACKAGED SOFTWARE [7372]`
    pub fn sic_code(&self) -> Option<&str> {
        let value = self.industry_classification.as_str();
        let start = value.find('[')?;
        let end = start + value[start..].find(']')?;
        let inner = &value[start + 1..end];
        if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
            Some(inner)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingDetails {
    pub form_type: String,
    pub file_number: String,
    pub film_number: String,
}

/// Submission-level header. Every field is present; missing data is `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilingHeader {
    pub filename: String,
    pub header_filename: String,
    pub acceptance_datetime: String,
    pub accession_number: String,
    pub submission_type: String,
    pub document_count: String,
    pub filing_date: String,
    pub company: CompanyInfo,
    pub filing_details: FilingDetails,
}

/// How a sub-document's body was interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentClass {
    Html,
    Xml,
    Plain,
}

/// De-rendered body of a sub-document, decided once per document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "classification", rename_all = "UPPERCASE")]
pub enum DocumentContent {
    /// Markup stripped prose; at most one page
    Html { pages: Vec<String> },
    /// Generic tree of a well-formed XML body, `None` when validation failed
    Xml { parsed: Option<serde_json::Value> },
    /// Segments between `<PAGE>` markers
    Plain { pages: Vec<String> },
}

impl DocumentContent {
    pub fn classification(&self) -> ContentClass {
        match self {
            DocumentContent::Html { .. } => ContentClass::Html,
            DocumentContent::Xml { .. } => ContentClass::Xml,
            DocumentContent::Plain { .. } => ContentClass::Plain,
        }
    }

    /// Text pages; XML bodies carry no prose pages
    pub fn pages(&self) -> &[String] {
        match self {
            DocumentContent::Html { pages } | DocumentContent::Plain { pages } => pages,
            DocumentContent::Xml { .. } => &[],
        }
    }

    pub fn parsed_xml(&self) -> Option<&serde_json::Value> {
        match self {
            DocumentContent::Xml { parsed } => parsed.as_ref(),
            _ => None,
        }
    }

    /// False when nothing could be extracted from the body
    pub fn has_content(&self) -> bool {
        match self {
            DocumentContent::Xml { parsed } => parsed.is_some(),
            other => !other.pages().is_empty(),
        }
    }
}

/// One `<DOCUMENT>` block of a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubDocument {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub sequence: String,
    pub filename: String,
    pub description: String,
    pub content: DocumentContent,
}

impl SubDocument {
    pub fn classification(&self) -> ContentClass {
        self.content.classification()
    }

    pub fn pages(&self) -> &[String] {
        self.content.pages()
    }

    /// Pages joined the way they are handed to the metrics engine
    pub fn text(&self) -> String {
        let mut text = self.pages().join("\n");
        text.push('\n');
        text
    }
}

/// Options for parsing
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Keep only sub-documents with these TYPE values (empty = all)
    pub filter_document_types: Vec<String>,
    /// Parse sub-documents on the rayon pool
    pub parallel: bool,
    /// Map undecodable bytes through Latin-1 instead of failing
    pub latin1_fallback: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self {
            parallel: true,
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, types: Vec<String>) -> Self {
        self.filter_document_types = types;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn with_latin1_fallback(mut self) -> Self {
        self.latin1_fallback = true;
        self
    }
}

/// Result of parsing a submission; documents keep their source order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSubmission {
    pub header: FilingHeader,
    pub documents: Vec<SubDocument>,
}

impl ParsedSubmission {
    /// By convention the first document is the main filing document
    pub fn primary_document(&self) -> Option<&SubDocument> {
        self.documents.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sic_code() {
        let company = CompanyInfo {
            industry_classification: "SERVICES-PREPACKAGED SOFTWARE [7372]".into(),
            ..Default::default()
        };
        assert_eq!(company.sic_code(), Some("7372"));

        let unassigned = CompanyInfo {
            industry_classification: "UNKNOWN SIC - 0000 []".into(),
            ..Default::default()
        };
        assert_eq!(unassigned.sic_code(), None);
        assert_eq!(CompanyInfo::default().sic_code(), None);
    }

    #[test]
    fn test_xml_content_has_no_pages() {
        let content = DocumentContent::Xml { parsed: None };
        assert_eq!(content.classification(), ContentClass::Xml);
        assert!(content.pages().is_empty());
        assert!(!content.has_content());
    }

    #[test]
    fn test_header_serializes_every_field() {
        let json = serde_json::to_value(FilingHeader::default()).unwrap();
        assert_eq!(json["acceptanceDatetime"], "");
        assert_eq!(json["company"]["centralIndexKey"], "");
        assert_eq!(json["filingDetails"]["filmNumber"], "");
    }

    #[test]
    fn test_document_text_joins_pages() {
        let doc = SubDocument {
            doc_type: "10-K".into(),
            sequence: "1".into(),
            filename: "a.txt".into(),
            description: String::new(),
            content: DocumentContent::Plain {
                pages: vec!["one".into(), "two".into()],
            },
        };
        assert_eq!(doc.text(), "one\ntwo\n");
    }
}
