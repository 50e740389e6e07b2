//! Spreadsheet and CSV export

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use super::types::NormalizedRow;

pub const DEFAULT_SHEET_NAME: &str = "Math 31A Prereq Courses";

/// Column widths in character units, in header order
const COLUMN_WIDTHS: [f64; 5] = [35.0, 45.0, 8.0, 28.0, 90.0];
const DESCRIPTION_COL: u16 = 4;

/// Write `rows` to a single-sheet workbook at `path`, replacing any
/// existing file.
pub fn export_xlsx(rows: &[NormalizedRow], path: &Path, sheet_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .with_context(|| format!("Invalid sheet name: {}", sheet_name))?;

    let header_format = Format::new().set_bold();
    let description_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);

    for (col, header) in NormalizedRow::HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, value) in row.fields().iter().enumerate() {
            let col = col as u16;
            if col == DESCRIPTION_COL {
                worksheet.write_string_with_format(row_num, col, *value, &description_format)?;
            } else {
                worksheet.write_string(row_num, col, *value)?;
            }
        }
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    // Keep the header visible while scrolling
    worksheet.set_freeze_panes(1, 0)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to write spreadsheet: {}", path.display()))?;

    println!("  Saved {} courses → {}", rows.len(), path.display());
    Ok(())
}

/// Write `rows` as comma-separated values. The header line comes from the
/// field names of [`NormalizedRow`].
pub fn export_csv(rows: &[NormalizedRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

    println!("  Saved CSV → {}", path.display());
    Ok(())
}
