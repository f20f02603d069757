// src/main.rs
use std::path::PathBuf;

use clap::Parser;

use credit_extractor::config::sections::SectionName;
use credit_extractor::page::fetch;
use credit_extractor::report::model::{PageWindow, SectionRequest};
use credit_extractor::storage::StorageManager;
use credit_extractor::utils::html_debug;
use credit_extractor::{
    build_report, estimate_size, extract_all, validate_report, AppError, ExtractionOptions,
    SnapshotPage,
};

/// Command line interface for the credit report extraction pipeline.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a saved report page snapshot (HTML)
    #[arg(short, long, conflicts_with = "url")]
    input: Option<PathBuf>,

    /// URL serving the rendered report page snapshot
    #[arg(long)]
    url: Option<String>,

    /// Snapshot of the page captured after reveal toggles were activated
    /// (file mode only; enables creditor contact extraction)
    #[arg(long)]
    revealed: Option<PathBuf>,

    /// Sections to extract: "all" or a comma-separated list
    /// (e.g. "credit_scores,summary,account_history")
    #[arg(short, long, default_value = "all")]
    sections: String,

    /// Page size for account history; omit for the full list
    #[arg(long)]
    limit: Option<usize>,

    /// Offset into account history (used with --limit)
    #[arg(long, default_value = "0")]
    offset: usize,

    /// Output directory for extracted reports
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Label for the output subdirectory (e.g. a user handle)
    #[arg(short, long, default_value = "report")]
    label: String,

    /// Pretty-print the report JSON
    #[arg(long)]
    pretty: bool,

    /// Debug mode - save an annotated copy of the input document
    #[arg(short, long)]
    debug: bool,
}

fn parse_sections(value: &str) -> Result<SectionRequest, AppError> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(SectionRequest::All);
    }
    let names = value
        .split(',')
        .map(|name| name.parse::<SectionName>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::Config)?;
    if names.is_empty() {
        return Err(AppError::Config("no sections requested".to_string()));
    }
    Ok(SectionRequest::Only(names))
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    credit_extractor::utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting extraction for args: {:?}", args);

    // 3. Load the page snapshot
    let html = match (&args.input, &args.url) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(url)) => fetch::download_snapshot(url).await?,
        (None, None) => {
            return Err(AppError::Config(
                "either --input or --url is required".to_string(),
            ))
        }
    };

    let mut page = SnapshotPage::new(html.clone());
    if let Some(revealed_path) = &args.revealed {
        page = page.with_revealed(std::fs::read_to_string(revealed_path)?);
    }

    // 4. Build per-run options
    let options = ExtractionOptions {
        sections: parse_sections(&args.sections)?,
        pagination: args.limit.map(|limit| PageWindow {
            limit,
            offset: args.offset,
        }),
    };

    // 5. Initialize storage
    let storage = StorageManager::new(&args.output_dir)?;

    // 6. Optionally annotate the input for selector-drift diagnosis
    if args.debug {
        let debug_path = format!("{}/annotated_snapshot.html", args.output_dir);
        match html_debug::create_debug_html(&html, &debug_path, html_debug::REPORT_DEBUG_PATTERNS)
        {
            Ok(()) => tracing::info!("Created annotated debug HTML: {}", debug_path),
            Err(e) => tracing::warn!("Failed to create debug HTML: {}", e),
        }
    }

    // 7. Run the pipeline
    let raw = extract_all(&mut page, &options).await?;
    let report = build_report(&raw, &options);

    let missing = validate_report(&report);
    if missing.is_empty() {
        tracing::info!("All foundational sections extracted");
    } else {
        tracing::warn!("Proceeding with incomplete report; missing: {:?}", missing);
    }
    tracing::info!("Estimated report size: {} bytes", estimate_size(&report));

    // 8. Persist the report and its metadata
    let report_path = storage.save_report(&report, &args.label, args.pretty)?;
    tracing::info!("Saved report to: {}", report_path.display());
    storage.save_report_metadata(&report, &args.label)?;

    Ok(())
}
