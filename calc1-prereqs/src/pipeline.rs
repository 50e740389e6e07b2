//! Collect → normalize → export, with console reporting

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::ScraperConfig;
use crate::module::catalog::{
    export_csv, export_xlsx, normalize, strategy_for, CatalogClient, NormalizedRow, PREREQ_LABEL,
};

pub const DEFAULT_OUTPUT: &str = "ucla_courses_requiring_calc1.xlsx";
const PREVIEW_ROWS: usize = 10;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub out: PathBuf,
    pub csv: bool,
    pub all_subjects: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            out: PathBuf::from(DEFAULT_OUTPUT),
            csv: false,
            all_subjects: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Exported {
        rows: usize,
        xlsx: PathBuf,
        csv: Option<PathBuf>,
    },
    /// Collection came back empty
    NoRecords,
    /// Records were collected but none survived normalization
    NoMatches,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Exported { .. })
    }
}

/// `out` with its extension swapped for `.csv`
pub fn csv_path_for(out: &Path) -> PathBuf {
    out.with_extension("csv")
}

pub fn print_banner() {
    println!("UCLA Course Catalog Scraper");
    println!("===========================");
    println!("Looking for courses that list '{}' as a prerequisite.\n", PREREQ_LABEL);
}

/// Run one scrape end to end. Nothing is written unless at least one row
/// survives normalization.
pub async fn run(options: &RunOptions, config: &ScraperConfig) -> Result<RunOutcome> {
    let client = CatalogClient::from_config(config).context("Failed to set up catalog client")?;
    let strategy = strategy_for(options.all_subjects, config.subject_delay());

    println!("Mode: {}", strategy.describe());
    tracing::info!("Collecting from {}", config.api_base);

    let raw = strategy
        .collect(&client)
        .await
        .context("Failed to collect courses")?;

    if raw.is_empty() {
        println!("\nNo courses returned. Check your internet connection.");
        return Ok(RunOutcome::NoRecords);
    }
    println!("\n  Raw results from API: {} courses", raw.len());

    let rows = normalize(&raw);
    println!("  After dedup + filtering: {} courses\n", rows.len());

    if rows.is_empty() {
        println!("No courses matched after filtering. Unexpected — please report.");
        return Ok(RunOutcome::NoMatches);
    }

    println!("Preview (first {} matches):", PREVIEW_ROWS);
    print!("{}", format_preview(&rows, PREVIEW_ROWS));

    println!("\nExporting ...");
    export_xlsx(&rows, &options.out, &config.sheet_name)?;

    let csv = if options.csv {
        let csv_path = csv_path_for(&options.out);
        export_csv(&rows, &csv_path)?;
        Some(csv_path)
    } else {
        None
    };

    println!("\nDone!");
    Ok(RunOutcome::Exported {
        rows: rows.len(),
        xlsx: options.out.clone(),
        csv,
    })
}

/// Fixed-width table of the first `limit` rows.
pub fn format_preview(rows: &[NormalizedRow], limit: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("  {:<35} {:<40} {}\n", "Subject Area", "Course", "Units"));
    output.push_str(&format!("  {} {} {}\n", "-".repeat(35), "-".repeat(40), "-".repeat(5)));

    for row in rows.iter().take(limit) {
        output.push_str(&format!(
            "  {:<35} {:<40} {}\n",
            row.subject_area, row.course_name, row.units
        ));
    }

    if rows.len() > limit {
        output.push_str(&format!("  ... and {} more.\n", rows.len() - limit));
    }

    output
}
