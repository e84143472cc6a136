//! CLI tool for parsing a submission and scoring its primary document

use secdisclosure::{
    parse_submission_bytes, primary_metrics, FilingReport, MetricsEngine, ParseOptions,
    SentimentLexicons,
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} <submission_file> [--positive <words.txt> --negative <words.txt>] [--no-parallel] [--latin1] [--row]",
        program
    );
    eprintln!("\nParses an SEC submission and prints the filing report as JSON.");
    eprintln!("Use --row to print only the flat metrics record.");
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }

    let path = PathBuf::from(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let mut options = ParseOptions::new();
    let mut positive: Option<PathBuf> = None;
    let mut negative: Option<PathBuf> = None;
    let mut row_only = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--no-parallel" => options.parallel = false,
            "--latin1" => options.latin1_fallback = true,
            "--row" => row_only = true,
            "--positive" | "--negative" => {
                let flag = args[i].clone();
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Error: {} requires a path", flag);
                    std::process::exit(1);
                };
                if flag == "--positive" {
                    positive = Some(PathBuf::from(value));
                } else {
                    negative = Some(PathBuf::from(value));
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                usage(&args[0]);
            }
        }
        i += 1;
    }

    let lexicons = match (positive, negative) {
        (None, None) => SentimentLexicons::bundled(),
        (Some(pos), Some(neg)) => match SentimentLexicons::from_files(&pos, &neg) {
            Ok(lexicons) => Arc::new(lexicons),
            Err(e) => {
                eprintln!("Error loading lexicons: {}", e);
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("Error: --positive and --negative must be given together");
            std::process::exit(1);
        }
    };
    let engine = MetricsEngine::with_lexicons(lexicons);

    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    let report = match parse_submission_bytes(&data, &options) {
        Ok(submission) => {
            let form_metrics = primary_metrics(&submission, &engine);
            FilingReport {
                submission,
                form_metrics,
            }
        }
        Err(e) => {
            eprintln!("Error parsing file: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!("Documents: {}", report.submission.documents.len());
    for (i, doc) in report.submission.documents.iter().enumerate() {
        eprintln!(
            "  [{}] {} - {} ({:?}, {} pages)",
            i + 1,
            doc.doc_type,
            doc.filename,
            doc.classification(),
            doc.pages().len()
        );
    }

    let json = if row_only {
        match report.row() {
            Some(row) => serde_json::to_string_pretty(&row),
            None => {
                eprintln!("Primary document was not scored");
                std::process::exit(2);
            }
        }
    } else {
        serde_json::to_string_pretty(&report)
    };

    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing report: {}", e);
            std::process::exit(1);
        }
    }
}
