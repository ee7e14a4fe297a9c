// Identity document field extraction from OCR dumps

use clap::Parser;
use docscan::{
    models::{load_observations, ExtractionConfig, ExtractionResult},
    processing::batch_extract,
    validation::ExpiryValidator,
    DocumentExtractor,
};
use log::error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "docscan", version, about = "Extract passport and ID card fields from OCR observations")]
struct Args {
    /// OCR dump (JSON array of observations) or a directory of dumps
    path: PathBuf,

    /// JSON file overriding extraction thresholds
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of a report
    #[arg(long)]
    json: bool,
}

// Function to print a detailed extraction report
fn print_detailed_report(result: &ExtractionResult, source: &Path) {
    println!("\n===============================================");
    println!("      DOCUMENT EXTRACTION REPORT");
    println!("===============================================\n");

    println!("Source: {}", source.display());
    println!("Detected: {}", result.document_type);

    if result.fields.is_empty() {
        println!("\nNo fields recognized. Try rescanning the document.");
        return;
    }

    println!("\nFIELDS:");
    for field in &result.fields {
        println!("  {:<16} {}", field.key.label(), field.value.as_deref().unwrap_or(""));
    }

    if let Some(mrz) = &result.mrz {
        println!("\nMRZ:");
        println!("  Document Type: {}", mrz.document_type);
        println!("  Issuing Country: {}", mrz.country_code);
        for line in &mrz.raw_lines {
            println!("  {}", line);
        }
        let today = chrono::Local::now().date_naive();
        match ExpiryValidator::is_expired(mrz, today) {
            Some(true) => println!("  Status: EXPIRED"),
            Some(false) => println!("  Status: VALID"),
            None => println!("  Status: expiry date unreadable"),
        }
    }
}

fn print_json(result: &ExtractionResult) -> Result<(), docscan::DocScanError> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn run(args: &Args) -> Result<(), docscan::DocScanError> {
    let config = match &args.config {
        Some(path) => ExtractionConfig::from_file(path)?,
        None => ExtractionConfig::default(),
    };
    let extractor = DocumentExtractor::with_config(config)?;

    if args.path.is_dir() {
        for entry in batch_extract(&args.path, &extractor)? {
            match entry.outcome {
                Ok(result) if args.json => print_json(&result)?,
                Ok(result) => print_detailed_report(&result, &entry.path),
                Err(msg) => eprintln!("Error in {}: {}", entry.path.display(), msg),
            }
        }
        return Ok(());
    }

    let observations = load_observations(&args.path)?;
    let result = extractor.extract(&observations);
    if args.json {
        print_json(&result)
    } else {
        print_detailed_report(&result, &args.path);
        Ok(())
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("Error extracting document: {}", err);
            ExitCode::FAILURE
        }
    }
}
