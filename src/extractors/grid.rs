// src/extractors/grid.rs

// Grid extractor: fixed-column tabular sections laid out as one label column
// plus one column per bureau. Cells are read positionally against the
// configured field list; nothing here interprets values.

use scraper::{ElementRef, Html};

use crate::config::sections::{SectionConfig, SectionShape};
use crate::config::selectors::{GRID, GRID_CELL, GRID_COLUMN};
use crate::extractors::locate_section;
use crate::page::element_text;
use crate::report::model::{Bureau, BureauMap, FieldMap};
use crate::utils::error::ExtractError;

/// Reads one bureau grid into raw per-bureau field maps.
///
/// Returns `Ok(None)` when the section, the grid, or the expected 4-column
/// layout is not present; that signals "not on this document version", not a
/// fatal error.
pub fn extract_grid_data(
    document: &Html,
    config: &SectionConfig,
) -> Result<Option<BureauMap<FieldMap>>, ExtractError> {
    let SectionShape::Grid { grid_index } = config.shape else {
        return Err(ExtractError::ShapeMismatch {
            section: config.name.as_str(),
            expected: "grid",
        });
    };

    let Some(section) = locate_section(document, config) else {
        tracing::debug!("Section '{}' not found in document", config.name);
        return Ok(None);
    };

    let Some(grid) = section.select(&GRID).nth(grid_index) else {
        tracing::debug!(
            "Section '{}' has no grid at index {}",
            config.name,
            grid_index
        );
        return Ok(None);
    };

    let columns: Vec<ElementRef> = grid.select(&GRID_COLUMN).collect();
    if columns.len() != 4 {
        tracing::debug!(
            "Section '{}' grid {} has {} column groups, expected 4 (labels + one per bureau)",
            config.name,
            grid_index,
            columns.len()
        );
        return Ok(None);
    }

    let mut data = BureauMap::<FieldMap>::default();
    for (bureau, column) in Bureau::ALL.into_iter().zip(columns[1..].iter()) {
        let cells: Vec<String> = column.select(&GRID_CELL).map(element_text).collect();
        let map = data.get_mut(bureau);
        for (index, field) in config.fields.iter().enumerate() {
            // Cell 0 is the bureau header; data cells zip positionally
            // against the field list, missing trailing cells become null.
            map.insert(field.name.to_string(), cells.get(index + 1).cloned());
        }
    }

    tracing::trace!("Extracted grid data for section '{}'", config.name);
    Ok(Some(data))
}

/// Narrow read of a single grid cell, for callers that need one value
/// without keeping the whole section result.
pub fn read_grid_cell(
    document: &Html,
    config: &SectionConfig,
    bureau: Bureau,
    field: &str,
) -> Option<String> {
    extract_grid_data(document, config)
        .ok()
        .flatten()
        .and_then(|data| data.get(bureau).get(field).cloned().flatten())
}
