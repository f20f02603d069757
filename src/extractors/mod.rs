// src/extractors/mod.rs
pub mod accounts;
pub mod contacts;
pub mod grid;
pub mod rows;

use scraper::{ElementRef, Html};

use crate::config::sections::SectionConfig;
use crate::config::selectors::{SECTION, SECTION_TITLE};
use crate::page::element_text;

/// Locates a section's container element.
///
/// The heading-text match is preferred. When no heading matches (labeling is
/// inconsistent across document versions), the configured ordinal position is
/// used instead and logged as a degraded-confidence match; it is never a
/// silent default.
pub(crate) fn locate_section<'a>(
    document: &'a Html,
    config: &SectionConfig,
) -> Option<ElementRef<'a>> {
    let locator = &config.locator;

    if let Some(heading) = locator.heading {
        for section in document.select(&SECTION) {
            if let Some(title) = section.select(&SECTION_TITLE).next() {
                if element_text(title).eq_ignore_ascii_case(heading) {
                    tracing::trace!("Located section '{}' by heading match", config.name);
                    return Some(section);
                }
            }
        }

        let fallback = document.select(&SECTION).nth(locator.ordinal);
        if fallback.is_some() {
            tracing::warn!(
                "No heading matched '{}' for section '{}'; fell back to ordinal {} (degraded-confidence match)",
                heading,
                config.name,
                locator.ordinal
            );
        }
        return fallback;
    }

    document.select(&SECTION).nth(locator.ordinal)
}
