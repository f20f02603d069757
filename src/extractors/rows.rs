// src/extractors/rows.rs

// Row-list extractor: repeated data rows under a header row, used for the
// inquiry detail table. Cells zip positionally against the configured field
// list, and a row without a creditor name is not a valid record.

use scraper::Html;

use crate::config::sections::{SectionConfig, SectionShape};
use crate::config::selectors::{INQUIRY_ROW, TABLE_CELL};
use crate::extractors::locate_section;
use crate::page::element_text;
use crate::report::model::FieldMap;
use crate::utils::error::ExtractError;

/// Extracts the inquiry rows of the located section.
///
/// The header row carries `<th>` cells and therefore yields no data cells;
/// any row with fewer cells than configured fields is skipped the same way.
pub fn extract_rows(
    document: &Html,
    config: &SectionConfig,
) -> Result<Option<Vec<FieldMap>>, ExtractError> {
    if config.shape != SectionShape::RowList {
        return Err(ExtractError::ShapeMismatch {
            section: config.name.as_str(),
            expected: "row-list",
        });
    }

    let Some(section) = locate_section(document, config) else {
        tracing::debug!("Section '{}' not found in document", config.name);
        return Ok(None);
    };

    let mut rows = Vec::new();
    for row in section.select(&INQUIRY_ROW) {
        let cells: Vec<String> = row.select(&TABLE_CELL).map(element_text).collect();
        if cells.len() < config.fields.len() {
            continue;
        }
        if cells[0].trim().is_empty() {
            // A record without a creditor name is not a valid record.
            continue;
        }

        let mut fields = FieldMap::new();
        for (index, field) in config.fields.iter().enumerate() {
            fields.insert(field.name.to_string(), cells.get(index).cloned());
        }
        rows.push(fields);
    }

    tracing::debug!("Extracted {} rows for section '{}'", rows.len(), config.name);
    Ok(Some(rows))
}
