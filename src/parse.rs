//! Core submission parsing logic

use crate::content::classify;
use crate::error::{Error, Result};
use crate::header::parse_header;
use crate::tags::{multi_line_block, multi_line_blocks, single_line};
use crate::types::*;
use memchr::memmem;
use rayon::prelude::*;
use std::path::Path;

const DOCUMENT: &str = "DOCUMENT";
const DOC_START: &[u8] = b"<DOCUMENT>";
const TEXT: &str = "TEXT";
const XML: &str = "XML";

/// Parse a submission from a file path using memory mapping
pub fn parse_submission_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<ParsedSubmission> {
    let file = std::fs::File::open(path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    parse_submission_bytes(&mmap, options)
}

/// Parse raw submission bytes. Fails only when the bytes are not text.
pub fn parse_submission_bytes(data: &[u8], options: &ParseOptions) -> Result<ParsedSubmission> {
    let text = decode(data, options.latin1_fallback)?;
    Ok(parse_submission(&text, options))
}

/// Parse a decoded submission.
///
/// Missing fields come back as empty strings and unreadable bodies as
/// documents without pages, so this never fails.
pub fn parse_submission(text: &str, options: &ParseOptions) -> ParsedSubmission {
    let header = parse_header(preamble(text));

    let spans = multi_line_blocks(text, DOCUMENT, DOCUMENT);
    log::debug!("Found {} document blocks", spans.len());

    let documents: Vec<SubDocument> = if options.parallel && spans.len() > 1 {
        spans.par_iter().map(|span| parse_document(span)).collect()
    } else {
        spans.iter().map(|span| parse_document(span)).collect()
    };

    ParsedSubmission {
        header,
        documents: apply_filter(documents, options),
    }
}

/// Header fields live before the first `<DOCUMENT>`
fn preamble(text: &str) -> &str {
    match memmem::find(text.as_bytes(), DOC_START) {
        Some(end) => &text[..end],
        None => text,
    }
}

/// Parse a single `<DOCUMENT>` block body
fn parse_document(span: &str) -> SubDocument {
    let field = |tag: &str| single_line(span, tag).unwrap_or_default().to_string();

    let text = multi_line_blocks(span, TEXT, TEXT).join("\n");
    let xml_block = multi_line_block(span, XML, XML);
    let content = classify(&text, xml_block);

    let document = SubDocument {
        doc_type: field("TYPE"),
        sequence: field("SEQUENCE"),
        filename: field("FILENAME"),
        description: field("DESCRIPTION"),
        content,
    };

    log::debug!(
        "Document {} ({}) classified {:?} with {} pages",
        document.sequence,
        document.doc_type,
        document.classification(),
        document.pages().len()
    );
    if !document.content.has_content() {
        log::debug!("Document {} has no extractable content", document.sequence);
    }

    document
}

/// Apply document type filter
fn apply_filter(documents: Vec<SubDocument>, options: &ParseOptions) -> Vec<SubDocument> {
    if options.filter_document_types.is_empty() {
        return documents;
    }

    documents
        .into_iter()
        .filter(|doc| options.filter_document_types.contains(&doc.doc_type))
        .collect()
}

/// Decode bytes as UTF-8, optionally falling back to Latin-1.
///
/// NUL bytes never occur in a text submission and are always rejected.
fn decode(data: &[u8], latin1_fallback: bool) -> Result<String> {
    if let Some(pos) = memchr::memchr(0, data) {
        return Err(Error::Decode(pos));
    }

    match std::str::from_utf8(data) {
        Ok(s) => Ok(s.to_string()),
        Err(_) if latin1_fallback => Ok(data.iter().map(|&b| b as char).collect()),
        Err(e) => Err(Error::Decode(e.valid_up_to())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBMISSION: &str = "\
<SEC-DOCUMENT>0000950123-17-000001.txt : 20170301
<SEC-HEADER>0000950123-17-000001.hdr.sgml : 20170301
<ACCEPTANCE-DATETIME>20170301120000
ACCESSION NUMBER:\t\t0000950123-17-000001
CONFORMED SUBMISSION TYPE:\t10-K
PUBLIC DOCUMENT COUNT:\t\t3
FILED AS OF DATE:\t\t20170301
\t\tCOMPANY CONFORMED NAME:\t\t\tACME CORP
</SEC-HEADER>
<DOCUMENT>
<TYPE>10-K
<SEQUENCE>1
<FILENAME>acme-10k.htm
<DESCRIPTION>ANNUAL REPORT
<TEXT>
<html><body>
<p>Our results were strong.</p>
<table>
<tr><td>1,234</td></tr>
</table>
</body></html>
</TEXT>
</DOCUMENT>
<DOCUMENT>
<TYPE>EX-21
<SEQUENCE>2
<FILENAME>ex21.txt
<TEXT>
Subsidiaries of the registrant
<PAGE>
Acme Widgets LLC
</TEXT>
</DOCUMENT>
<DOCUMENT>
<TYPE>EX-101.INS
<SEQUENCE>3
<FILENAME>acme-20161231.xml
<TEXT>
<XML>
<?xml version=\"1.0\" encoding=\"utf-8\"?>
<xbrl><dei>ACME</dei></xbrl>
</XML>
</TEXT>
</DOCUMENT>
</SEC-DOCUMENT>
";

    #[test]
    fn test_parse_submission() {
        let parsed = parse_submission(SUBMISSION, &ParseOptions::new());
        assert_eq!(parsed.header.filename, "0000950123-17-000001.txt");
        assert_eq!(parsed.header.company.name, "ACME CORP");
        assert_eq!(parsed.documents.len(), 3);

        let primary = parsed.primary_document().unwrap();
        assert_eq!(primary.doc_type, "10-K");
        assert_eq!(primary.sequence, "1");
        assert_eq!(primary.filename, "acme-10k.htm");
        assert_eq!(primary.description, "ANNUAL REPORT");
        assert_eq!(primary.classification(), ContentClass::Html);
        assert_eq!(primary.pages(), ["Our results were strong."]);

        let exhibit = &parsed.documents[1];
        assert_eq!(exhibit.classification(), ContentClass::Plain);
        assert_eq!(exhibit.description, "");
        assert_eq!(exhibit.pages(), ["Acme Widgets LLC"]);

        let xbrl = &parsed.documents[2];
        assert_eq!(xbrl.classification(), ContentClass::Xml);
        assert_eq!(
            xbrl.content.parsed_xml(),
            Some(&serde_json::json!({ "xbrl": { "dei": "ACME" } }))
        );
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let parallel = parse_submission(SUBMISSION, &ParseOptions::new());
        let sequential = parse_submission(SUBMISSION, &ParseOptions::new().sequential());
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_filter_document_types() {
        let options = ParseOptions::new().with_filter(vec!["EX-21".to_string()]);
        let parsed = parse_submission(SUBMISSION, &options);
        assert_eq!(parsed.documents.len(), 1);
        assert_eq!(parsed.documents[0].doc_type, "EX-21");
    }

    #[test]
    fn test_header_only_submission() {
        let parsed = parse_submission("COMPANY CONFORMED NAME:ACME CORP\n", &ParseOptions::new());
        assert_eq!(parsed.header.company.name, "ACME CORP");
        assert!(parsed.documents.is_empty());
    }

    #[test]
    fn test_document_without_body_is_kept() {
        let text = "<DOCUMENT>\n<TYPE>GRAPHIC\n<SEQUENCE>4\n</DOCUMENT>\n";
        let parsed = parse_submission(text, &ParseOptions::new());
        assert_eq!(parsed.documents.len(), 1);
        assert_eq!(parsed.documents[0].doc_type, "GRAPHIC");
        assert_eq!(parsed.documents[0].classification(), ContentClass::Plain);
        assert!(parsed.documents[0].pages().is_empty());
    }

    #[test]
    fn test_preamble_stops_at_first_document() {
        let text = "FORM TYPE:\t8-K\n<DOCUMENT>\n<TYPE>8-K\n<TEXT>\nFORM TYPE:\tEX-99\n</TEXT>\n</DOCUMENT>\n";
        assert_eq!(preamble(text), "FORM TYPE:\t8-K\n");
        let text = "<DOCUMENT>\n<TEXT>\nFORM TYPE:\tEX-99\n</TEXT>\n</DOCUMENT>\n";
        let parsed = parse_submission(text, &ParseOptions::new());
        assert_eq!(parsed.header.filing_details.form_type, "");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(b"plain", false).unwrap(), "plain");
        assert!(matches!(decode(b"caf\xe9", false), Err(Error::Decode(3))));
        assert_eq!(decode(b"caf\xe9", true).unwrap(), "caf\u{e9}");
        assert!(matches!(decode(b"bin\0ary", true), Err(Error::Decode(3))));
    }

    #[test]
    fn test_parse_submission_bytes_rejects_binary() {
        let result = parse_submission_bytes(&[0xff, 0xfe, 0x00, 0x41], &ParseOptions::new());
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
