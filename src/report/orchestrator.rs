// src/report/orchestrator.rs

// Extraction orchestrator: one pass over the live document, one extractor
// per requested section, per-section failure isolation. A section that
// cannot be read becomes a null slot; only an unusable page handle fails
// the run itself.

use scraper::Html;

use crate::config::sections::{self, SectionName, INQUIRY_COUNT_FIELD};
use crate::config::selectors::REVEAL_LABEL;
use crate::extractors::{accounts, contacts, grid, rows};
use crate::page::PageHandle;
use crate::report::model::{
    Bureau, ExtractionOptions, FieldMap, Pagination, RawInquiries, RawSections,
};
use crate::utils::error::{ExtractError, PageError};

/// Extracts every requested section from the page.
///
/// Pure sections are read from a single snapshot of the document. Creditor
/// contacts run last: their reveal step mutates the document, so every pure
/// read must be finished before toggles are activated.
pub async fn extract_all<P: PageHandle>(
    page: &mut P,
    options: &ExtractionOptions,
) -> Result<RawSections, PageError> {
    let html = page.content().await?;
    tracing::info!("Extracting report sections ({} bytes of markup)", html.len());

    let mut raw = extract_static_sections(&html, options);

    if options.sections.includes(SectionName::CreditorContacts) {
        raw.creditor_contacts = extract_contacts_with_reveal(page).await?;
    }

    Ok(raw)
}

/// Collapses an extractor outcome into the section slot. Structural absence
/// and extractor faults land in the same place: a null section, a log line,
/// and the run continues.
fn run_section<T>(name: SectionName, result: Result<Option<T>, ExtractError>) -> Option<T> {
    match result {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            tracing::debug!("Section '{}' absent from document", name);
            None
        }
        Err(e) => {
            tracing::warn!("Section '{}' extraction failed: {}; continuing", name, e);
            None
        }
    }
}

fn extract_static_sections(html: &str, options: &ExtractionOptions) -> RawSections {
    let document = Html::parse_document(html);
    let requested = &options.sections;
    let mut raw = RawSections::default();

    if requested.includes(SectionName::CreditScores) {
        raw.credit_scores = run_section(
            SectionName::CreditScores,
            grid::extract_grid_data(&document, &sections::CREDIT_SCORES),
        );
    }

    if requested.includes(SectionName::PersonalInformation) {
        raw.personal_information = run_section(
            SectionName::PersonalInformation,
            grid::extract_grid_data(&document, &sections::PERSONAL_INFORMATION),
        );
    }

    if requested.includes(SectionName::Summary) {
        raw.summary = run_section(
            SectionName::Summary,
            grid::extract_grid_data(&document, &sections::SUMMARY),
        );

        // Second, narrower grid read for the account counters, merged
        // field-by-field into the bureau maps already produced.
        if let Some(summary) = raw.summary.as_mut() {
            if let Some(totals) = run_section(
                SectionName::Summary,
                grid::extract_grid_data(&document, &sections::ACCOUNT_TOTALS),
            ) {
                for bureau in Bureau::ALL {
                    let target = summary.get_mut(bureau);
                    for (field, value) in totals.get(bureau) {
                        target.insert(field.clone(), value.clone());
                    }
                }
            }
        }
    }

    if requested.includes(SectionName::AccountHistory) {
        if let Some(accounts) = run_section(
            SectionName::AccountHistory,
            accounts::extract_accounts(&document, &sections::ACCOUNT_HISTORY),
        ) {
            let total = accounts.len();
            match options.pagination {
                Some(window) => {
                    // Pagination is a view over the fully-materialized list,
                    // never a partial DOM read.
                    let start = window.offset.min(total);
                    let end = window.offset.saturating_add(window.limit).min(total);
                    raw.account_history = Some(accounts[start..end].to_vec());
                    raw.account_history_pagination = Some(Pagination {
                        total,
                        has_more: end < total,
                        limit: window.limit,
                        offset: window.offset,
                    });
                    tracing::debug!(
                        "Paginated account history: rows {}..{} of {}",
                        start,
                        end,
                        total
                    );
                }
                None => raw.account_history = Some(accounts),
            }
        }
    }

    if requested.includes(SectionName::PublicRecords) {
        raw.public_records = run_section(
            SectionName::PublicRecords,
            grid::extract_grid_data(&document, &sections::PUBLIC_RECORDS),
        );
    }

    if requested.includes(SectionName::Inquiries) {
        let details = run_section(
            SectionName::Inquiries,
            rows::extract_rows(&document, &sections::INQUIRIES),
        );
        // The aggregate count lives in the summary grid, not the inquiry
        // table; read that one cell narrowly.
        let count = grid::read_grid_cell(
            &document,
            &sections::SUMMARY,
            Bureau::Transunion,
            INQUIRY_COUNT_FIELD,
        );
        raw.inquiries = match (count, details) {
            (None, None) => None,
            (count, details) => Some(RawInquiries {
                count,
                details: details.unwrap_or_default(),
            }),
        };
    }

    raw
}

async fn extract_contacts_with_reveal<P: PageHandle>(
    page: &mut P,
) -> Result<Option<Vec<FieldMap>>, PageError> {
    match page.activate_toggles(REVEAL_LABEL).await {
        Ok(0) => tracing::debug!("No reveal toggles matched '{}'", REVEAL_LABEL),
        Ok(count) => {
            let delay = page.settle_delay();
            tracing::debug!("Activated {} reveal toggles; settling for {:?}", count, delay);
            // Activation expands content asynchronously with no completion
            // signal; the settle delay is the only synchronization point.
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
        Err(e) => {
            // Fire-and-forget: a failed click leaves the document
            // unrevealed but still readable.
            tracing::warn!("Reveal activation failed: {}", e);
        }
    }

    let html = page.content().await?;
    let contacts = {
        let document = Html::parse_document(&html);
        run_section(
            SectionName::CreditorContacts,
            contacts::extract_contacts(&document, &sections::CREDITOR_CONTACTS),
        )
    };
    Ok(contacts)
}
