// src/extractors/contacts.rs

// Interactive-list extractor, read half. Creditor contact details sit behind
// reveal toggles; the orchestrator activates them through the page handle,
// waits out the settle delay, and re-reads the document before calling in
// here. By that point this is an ordinary positional read.

use scraper::Html;

use crate::config::sections::{SectionConfig, SectionShape};
use crate::config::selectors::{CONTACT_BLOCK, CONTACT_FIELD};
use crate::extractors::locate_section;
use crate::page::element_text;
use crate::report::model::FieldMap;
use crate::utils::error::ExtractError;

/// Extracts creditor contact blocks from an already-revealed document.
///
/// A contact is only emitted when at least one configured field is non-empty
/// after trimming; fully blank blocks are display artifacts.
pub fn extract_contacts(
    document: &Html,
    config: &SectionConfig,
) -> Result<Option<Vec<FieldMap>>, ExtractError> {
    if config.shape != SectionShape::InteractiveList {
        return Err(ExtractError::ShapeMismatch {
            section: config.name.as_str(),
            expected: "interactive-list",
        });
    }

    let Some(section) = locate_section(document, config) else {
        tracing::debug!("Section '{}' not found in document", config.name);
        return Ok(None);
    };

    let contacts: Vec<FieldMap> = section
        .select(&CONTACT_BLOCK)
        .filter_map(|block| {
            let cells: Vec<String> = block.select(&CONTACT_FIELD).map(element_text).collect();

            let mut fields = FieldMap::new();
            for (index, field) in config.fields.iter().enumerate() {
                fields.insert(field.name.to_string(), cells.get(index).cloned());
            }

            let has_content = fields
                .values()
                .any(|value| value.as_deref().is_some_and(|text| !text.trim().is_empty()));
            has_content.then_some(fields)
        })
        .collect();

    tracing::debug!("Extracted {} creditor contacts", contacts.len());
    Ok(Some(contacts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sections::CREDITOR_CONTACTS;

    fn contacts_section(contacts: &[(&str, &str, &str)]) -> String {
        let mut html = String::from(
            r#"<div class="rpt-section"><div class="section-title">Creditor Contacts</div>"#,
        );
        for (name, address, phone) in contacts {
            html.push_str(&format!(
                r#"<div class="contact-block">
                   <div class="contact-field">{}</div>
                   <div class="contact-field">{}</div>
                   <div class="contact-field">{}</div>
                   </div>"#,
                name, address, phone
            ));
        }
        html.push_str("</div>");
        html
    }

    #[test]
    fn test_extracts_contact_fields_positionally() {
        let html = contacts_section(&[(
            "ACME BANK",
            "100 MAIN ST, COLUMBUS, OH 43215",
            "(800) 555-0142",
        )]);
        let document = Html::parse_document(&html);

        let contacts = extract_contacts(&document, &CREDITOR_CONTACTS)
            .unwrap()
            .unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(
            contacts[0].get("creditor_name"),
            Some(&Some("ACME BANK".to_string()))
        );
        assert_eq!(
            contacts[0].get("phone_number"),
            Some(&Some("(800) 555-0142".to_string()))
        );
    }

    #[test]
    fn test_drops_fully_blank_contacts() {
        let html = contacts_section(&[("", " ", ""), ("REAL CREDITOR", "", "")]);
        let document = Html::parse_document(&html);

        let contacts = extract_contacts(&document, &CREDITOR_CONTACTS)
            .unwrap()
            .unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(
            contacts[0].get("creditor_name"),
            Some(&Some("REAL CREDITOR".to_string()))
        );
    }

    #[test]
    fn test_missing_section_is_absence() {
        let document = Html::parse_document("<div></div>");
        assert!(extract_contacts(&document, &CREDITOR_CONTACTS)
            .unwrap()
            .is_none());
    }
}
