//! Submission header extraction

use crate::tags::{key_value, single_line};
use crate::types::{CompanyInfo, FilingDetails, FilingHeader};

/// Colon-delimited preamble keys, as they appear in the header block
pub mod keys {
    pub const ACCESSION_NUMBER: &str = "ACCESSION NUMBER";
    pub const SUBMISSION_TYPE: &str = "CONFORMED SUBMISSION TYPE";
    pub const DOCUMENT_COUNT: &str = "PUBLIC DOCUMENT COUNT";
    pub const FILING_DATE: &str = "FILED AS OF DATE";
    pub const COMPANY_NAME: &str = "COMPANY CONFORMED NAME";
    pub const FORMER_NAME: &str = "FORMER CONFORMED NAME";
    pub const NAME_CHANGE_DATE: &str = "DATE OF NAME CHANGE";
    pub const CENTRAL_INDEX_KEY: &str = "CENTRAL INDEX KEY";
    pub const INDUSTRY_CLASSIFICATION: &str = "STANDARD INDUSTRIAL CLASSIFICATION";
    pub const IRS_NUMBER: &str = "IRS NUMBER";
    pub const STATE_OF_INCORPORATION: &str = "STATE OF INCORPORATION";
    pub const FISCAL_YEAR_END: &str = "FISCAL YEAR END";
    pub const FORM_TYPE: &str = "FORM TYPE";
    pub const FILE_NUMBER: &str = "SEC FILE NUMBER";
    pub const FILM_NUMBER: &str = "FILM NUMBER";
}

/// Single-line header tags
const SEC_DOCUMENT: &str = "SEC-DOCUMENT";
const SEC_HEADER: &str = "SEC-HEADER";
const ACCEPTANCE_DATETIME: &str = "ACCEPTANCE-DATETIME";

/// Build the header from the preamble (text before the first `<DOCUMENT>`).
pub fn parse_header(preamble: &str) -> FilingHeader {
    FilingHeader {
        filename: filename_part(single_line(preamble, SEC_DOCUMENT)),
        header_filename: filename_part(single_line(preamble, SEC_HEADER)),
        acceptance_datetime: single_line(preamble, ACCEPTANCE_DATETIME)
            .unwrap_or_default()
            .to_string(),
        accession_number: field(preamble, keys::ACCESSION_NUMBER),
        submission_type: field(preamble, keys::SUBMISSION_TYPE),
        document_count: field(preamble, keys::DOCUMENT_COUNT),
        filing_date: field(preamble, keys::FILING_DATE),
        company: parse_company(preamble),
        filing_details: parse_filing_details(preamble),
    }
}

fn parse_company(preamble: &str) -> CompanyInfo {
    CompanyInfo {
        name: field(preamble, keys::COMPANY_NAME),
        former_name: field(preamble, keys::FORMER_NAME),
        name_change_date: field(preamble, keys::NAME_CHANGE_DATE),
        central_index_key: field(preamble, keys::CENTRAL_INDEX_KEY),
        industry_classification: field(preamble, keys::INDUSTRY_CLASSIFICATION),
        irs_number: field(preamble, keys::IRS_NUMBER),
        state_of_incorporation: field(preamble, keys::STATE_OF_INCORPORATION),
        fiscal_year_end: field(preamble, keys::FISCAL_YEAR_END),
    }
}

fn parse_filing_details(preamble: &str) -> FilingDetails {
    FilingDetails {
        form_type: field(preamble, keys::FORM_TYPE),
        file_number: field(preamble, keys::FILE_NUMBER),
        film_number: field(preamble, keys::FILM_NUMBER),
    }
}

fn field(preamble: &str, key: &str) -> String {
    key_value(preamble, key).to_string()
}

/// `<SEC-DOCUMENT>0000950123-17-000001.txt : 20170301` carries a date after ` : `
fn filename_part(value: Option<&str>) -> String {
    value
        .and_then(|v| v.split(" : ").next())
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: &str = "\
<SEC-DOCUMENT>0001193125-17-056789.txt : 20170301
<SEC-HEADER>0001193125-17-056789.hdr.sgml : 20170301
<ACCEPTANCE-DATETIME>20170301163012
ACCESSION NUMBER:\t\t0001193125-17-056789
CONFORMED SUBMISSION TYPE:\t10-K
PUBLIC DOCUMENT COUNT:\t\t3
FILED AS OF DATE:\t\t20170301

FILER:

\tCOMPANY DATA:\t
\t\tCOMPANY CONFORMED NAME:\t\t\tACME CORP
\t\tCENTRAL INDEX KEY:\t\t\t0000012345
\t\tSTANDARD INDUSTRIAL CLASSIFICATION:\tSERVICES-PREPACKAGED SOFTWARE [7372]
\t\tIRS NUMBER:\t\t\t\t941234567
\t\tSTATE OF INCORPORATION:\t\t\tDE
\t\tFISCAL YEAR END:\t\t\t1231

\tFILING VALUES:
\t\tFORM TYPE:\t\t10-K
\t\tSEC ACT:\t\t1934 Act
\t\tSEC FILE NUMBER:\t001-12345
\t\tFILM NUMBER:\t\t17654321

\tFORMER COMPANY:\t
\t\tFORMER CONFORMED NAME:\tACME INC
\t\tDATE OF NAME CHANGE:\t19990101
";

    #[test]
    fn test_parse_header() {
        let header = parse_header(PREAMBLE);
        assert_eq!(header.filename, "0001193125-17-056789.txt");
        assert_eq!(header.header_filename, "0001193125-17-056789.hdr.sgml");
        assert_eq!(header.acceptance_datetime, "20170301163012");
        assert_eq!(header.accession_number, "0001193125-17-056789");
        assert_eq!(header.submission_type, "10-K");
        assert_eq!(header.document_count, "3");
        assert_eq!(header.filing_date, "20170301");
    }

    #[test]
    fn test_parse_company_and_filing_details() {
        let header = parse_header(PREAMBLE);
        assert_eq!(header.company.name, "ACME CORP");
        assert_eq!(header.company.former_name, "ACME INC");
        assert_eq!(header.company.name_change_date, "19990101");
        assert_eq!(header.company.central_index_key, "0000012345");
        assert_eq!(header.company.sic_code(), Some("7372"));
        assert_eq!(header.company.irs_number, "941234567");
        assert_eq!(header.company.state_of_incorporation, "DE");
        assert_eq!(header.company.fiscal_year_end, "1231");
        assert_eq!(header.filing_details.form_type, "10-K");
        assert_eq!(header.filing_details.file_number, "001-12345");
        assert_eq!(header.filing_details.film_number, "17654321");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let header = parse_header("COMPANY CONFORMED NAME:ACME CORP\n");
        assert_eq!(header.company.name, "ACME CORP");
        assert_eq!(header.filename, "");
        assert_eq!(header.acceptance_datetime, "");
        assert_eq!(header.filing_details, FilingDetails::default());
    }
}
