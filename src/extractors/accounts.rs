// src/extractors/accounts.rs

// Account-list extractor: the Account History section holds one repeated
// block per credit account, each with a display name, a 4-column bureau grid
// over 23 positional fields, and two optional nested structures (the
// payment-history calendar and the days-late histogram).
//
// Accounts are processed independently. A malformed sub-structure degrades
// only that account's optional field to null; the account itself is still
// emitted, and the remaining accounts are untouched.

use scraper::{ElementRef, Html};

use crate::config::sections::{SectionConfig, SectionShape};
use crate::config::selectors::{
    ACCOUNT_BLOCK, ACCOUNT_NAME, DAYS_LATE_HEADING, GRID, GRID_CELL, GRID_COLUMN, HISTORY_BUREAU,
    LATE_CELL, LATE_COLUMN, LATE_COUNTS, LATE_TITLE, MONTH_ENTRY, MONTH_LABEL, MONTH_STATUS,
    PAYMENT_HISTORY, STATUS_CLASS_PREFIX,
};
use crate::extractors::locate_section;
use crate::page::element_text;
use crate::report::model::{Bureau, BureauMap, DaysLate, FieldMap, PaymentMonth, RawAccount};
use crate::utils::error::ExtractError;

/// Extracts every account in the Account History section.
///
/// Account containers are enumerated strictly within the located section's
/// subtree; lookalike containers elsewhere in the document must not leak in.
pub fn extract_accounts(
    document: &Html,
    config: &SectionConfig,
) -> Result<Option<Vec<RawAccount>>, ExtractError> {
    if config.shape != SectionShape::AccountList {
        return Err(ExtractError::ShapeMismatch {
            section: config.name.as_str(),
            expected: "account-list",
        });
    }

    let Some(section) = locate_section(document, config) else {
        tracing::debug!("Section '{}' not found in document", config.name);
        return Ok(None);
    };

    let accounts: Vec<RawAccount> = section
        .select(&ACCOUNT_BLOCK)
        .map(|block| extract_account(block, config))
        .collect();

    tracing::debug!("Extracted {} accounts", accounts.len());
    Ok(Some(accounts))
}

fn extract_account(block: ElementRef<'_>, config: &SectionConfig) -> RawAccount {
    let name = block
        .select(&ACCOUNT_NAME)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty());

    let bureaus = extract_account_grid(block, config);
    let payment_history = extract_payment_history(block);
    let days_late = extract_days_late(block);

    RawAccount {
        name,
        bureaus,
        payment_history,
        days_late,
    }
}

/// Same 4-column-group pattern as the grid extractor, scoped to one account
/// block. A malformed grid yields full-null field maps so the account record
/// keeps its schema instead of disappearing.
fn extract_account_grid(block: ElementRef<'_>, config: &SectionConfig) -> BureauMap<FieldMap> {
    let null_maps = || {
        BureauMap::from_fn(|_| {
            config
                .fields
                .iter()
                .map(|field| (field.name.to_string(), None))
                .collect::<FieldMap>()
        })
    };

    let Some(grid) = block.select(&GRID).next() else {
        tracing::debug!("Account block has no bureau grid");
        return null_maps();
    };

    let columns: Vec<ElementRef> = grid.select(&GRID_COLUMN).collect();
    if columns.len() != 4 {
        tracing::debug!(
            "Account grid has {} column groups, expected 4",
            columns.len()
        );
        return null_maps();
    }

    let mut data = null_maps();
    for (bureau, column) in Bureau::ALL.into_iter().zip(columns[1..].iter()) {
        let cells: Vec<String> = column.select(&GRID_CELL).map(element_text).collect();
        let map = data.get_mut(bureau);
        for (index, field) in config.fields.iter().enumerate() {
            // Cell 0 is the bureau header.
            map.insert(field.name.to_string(), cells.get(index + 1).cloned());
        }
    }
    data
}

/// Payment-history calendar: one block per bureau, each an ordered run of
/// month entries. Null for the whole structure when fewer than 3 bureau
/// blocks are present.
fn extract_payment_history(block: ElementRef<'_>) -> Option<BureauMap<Vec<PaymentMonth>>> {
    let container = block.select(&PAYMENT_HISTORY).next()?;

    let bureau_blocks: Vec<ElementRef> = container.select(&HISTORY_BUREAU).collect();
    if bureau_blocks.len() < 3 {
        tracing::debug!(
            "Payment history has {} bureau blocks, expected 3; dropping structure",
            bureau_blocks.len()
        );
        return None;
    }

    let mut blocks = bureau_blocks.into_iter();
    Some(BureauMap::from_fn(|_| {
        blocks
            .next()
            .map(month_entries)
            .unwrap_or_default()
    }))
}

fn month_entries(bureau_block: ElementRef<'_>) -> Vec<PaymentMonth> {
    bureau_block
        .select(&MONTH_ENTRY)
        .map(|entry| {
            // The status code rides on the entry's class list as a
            // `status-*` token; the suffix is the code.
            let status_class = entry
                .value()
                .classes()
                .find_map(|class| class.strip_prefix(STATUS_CLASS_PREFIX))
                .unwrap_or_default()
                .to_string();
            let month = entry
                .select(&MONTH_LABEL)
                .next()
                .map(element_text)
                .unwrap_or_default();
            let status = entry
                .select(&MONTH_STATUS)
                .next()
                .map(element_text)
                .unwrap_or_default();
            PaymentMonth {
                month,
                status,
                status_class,
            }
        })
        .collect()
}

/// Days-late histogram: the sub-container is identified by its heading text,
/// then read as one column per bureau with 30/60/90 bucket counts.
fn extract_days_late(block: ElementRef<'_>) -> Option<BureauMap<DaysLate>> {
    let container = block.select(&LATE_COUNTS).find(|candidate| {
        candidate
            .select(&LATE_TITLE)
            .next()
            .map(|title| {
                element_text(title)
                    .to_ascii_lowercase()
                    .contains(DAYS_LATE_HEADING)
            })
            .unwrap_or(false)
    })?;

    let columns: Vec<ElementRef> = container.select(&LATE_COLUMN).collect();
    if columns.len() < 3 {
        tracing::debug!(
            "Days-late histogram has {} columns, expected 3; dropping structure",
            columns.len()
        );
        return None;
    }

    let mut columns = columns.into_iter();
    Some(BureauMap::from_fn(|_| {
        columns.next().map(late_counts).unwrap_or(DaysLate {
            days_30: "0".to_string(),
            days_60: "0".to_string(),
            days_90: "0".to_string(),
        })
    }))
}

fn late_counts(column: ElementRef<'_>) -> DaysLate {
    let cells: Vec<String> = column.select(&LATE_CELL).map(element_text).collect();
    // Missing buckets default to "0", not null. Inherited from the source
    // document, which renders the histogram that way; see DaysLate docs.
    let bucket = |index: usize| {
        cells
            .get(index)
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| "0".to_string())
    };
    DaysLate {
        days_30: bucket(0),
        days_60: bucket(1),
        days_90: bucket(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sections::ACCOUNT_HISTORY;

    struct AccountFixture {
        name: &'static str,
        balance: &'static str,
        history_blocks: usize,
        with_late_counts: bool,
    }

    fn account_block(fixture: &AccountFixture) -> String {
        let mut html = format!(
            r#"<div class="account-block"><div class="account-name">{}</div>
               <div class="bureau-grid">
               <div class="grid-column"><div class="grid-cell"></div><div class="grid-cell">Balance:</div></div>"#,
            fixture.name
        );
        for header in ["TransUnion", "Experian", "Equifax"] {
            html.push_str(&format!(
                r#"<div class="grid-column"><div class="grid-cell">{}</div>"#,
                header
            ));
            // 23 data cells; the eighth field (balance) gets the fixture value.
            for index in 0..23 {
                let value = if index == 7 { fixture.balance } else { "--" };
                html.push_str(&format!(r#"<div class="grid-cell">{}</div>"#, value));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");

        html.push_str(r#"<div class="payment-history">"#);
        for _ in 0..fixture.history_blocks {
            html.push_str(
                r#"<div class="history-bureau">
                   <div class="month-cell status-ok"><span class="month-label">Jan</span><span class="month-status">OK</span></div>
                   <div class="month-cell status-late30"><span class="month-label">Feb</span><span class="month-status">30 Days Late</span></div>
                   </div>"#,
            );
        }
        html.push_str("</div>");

        if fixture.with_late_counts {
            html.push_str(
                r#"<div class="late-counts"><div class="late-title">Days Late</div>
                   <div class="late-column"><span class="late-count">1</span><span class="late-count">0</span></div>
                   <div class="late-column"><span class="late-count">0</span><span class="late-count">0</span><span class="late-count">0</span></div>
                   <div class="late-column"></div>
                   </div>"#,
            );
        }

        html.push_str("</div>");
        html
    }

    fn history_section(accounts: &[AccountFixture]) -> String {
        let mut html = String::from(
            r#"<div class="rpt-section"><div class="section-title">Account History</div>"#,
        );
        for account in accounts {
            html.push_str(&account_block(account));
        }
        html.push_str("</div>");
        html
    }

    fn default_fixture(name: &'static str) -> AccountFixture {
        AccountFixture {
            name,
            balance: "$1,702.00",
            history_blocks: 3,
            with_late_counts: true,
        }
    }

    #[test]
    fn test_extracts_accounts_within_section_only() {
        // A lookalike account block outside the section must not be picked up.
        let mut html = history_section(&[default_fixture("CHASE AUTO")]);
        html.push_str(
            r#"<div class="account-block"><div class="account-name">OUTSIDER</div></div>"#,
        );
        let document = Html::parse_document(&html);

        let accounts = extract_accounts(&document, &ACCOUNT_HISTORY)
            .unwrap()
            .unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name.as_deref(), Some("CHASE AUTO"));
    }

    #[test]
    fn test_account_grid_fields_and_schema_stability() {
        let html = history_section(&[default_fixture("CAPITAL ONE")]);
        let document = Html::parse_document(&html);

        let accounts = extract_accounts(&document, &ACCOUNT_HISTORY)
            .unwrap()
            .unwrap();
        let account = &accounts[0];

        assert_eq!(
            account.bureaus.transunion.get("balance"),
            Some(&Some("$1,702.00".to_string()))
        );
        // Identical field-name sets across all three bureaus.
        let tu_keys: Vec<_> = account.bureaus.transunion.keys().collect();
        let ex_keys: Vec<_> = account.bureaus.experian.keys().collect();
        let eq_keys: Vec<_> = account.bureaus.equifax.keys().collect();
        assert_eq!(tu_keys, ex_keys);
        assert_eq!(ex_keys, eq_keys);
        assert_eq!(tu_keys.len(), 23);
    }

    #[test]
    fn test_payment_history_statuses() {
        let html = history_section(&[default_fixture("DISCOVER")]);
        let document = Html::parse_document(&html);

        let accounts = extract_accounts(&document, &ACCOUNT_HISTORY)
            .unwrap()
            .unwrap();
        let history = accounts[0].payment_history.as_ref().unwrap();

        assert_eq!(history.transunion.len(), 2);
        assert_eq!(history.transunion[0].month, "Jan");
        assert_eq!(history.transunion[0].status_class, "ok");
        assert_eq!(history.transunion[1].status_class, "late30");
        assert_eq!(history.transunion[1].status, "30 Days Late");
    }

    #[test]
    fn test_malformed_history_degrades_only_that_account() {
        let mut second = default_fixture("SECOND BANK");
        second.history_blocks = 2; // fewer than 3 bureau blocks
        let fixtures = [
            default_fixture("FIRST BANK"),
            second,
            default_fixture("THIRD BANK"),
        ];
        let html = history_section(&fixtures);
        let document = Html::parse_document(&html);

        let accounts = extract_accounts(&document, &ACCOUNT_HISTORY)
            .unwrap()
            .unwrap();
        assert_eq!(accounts.len(), 3);
        assert!(accounts[0].payment_history.is_some());
        assert!(accounts[1].payment_history.is_none());
        assert!(accounts[2].payment_history.is_some());
        // The degraded account still carries its grid data.
        assert_eq!(
            accounts[1].bureaus.experian.get("balance"),
            Some(&Some("$1,702.00".to_string()))
        );
    }

    #[test]
    fn test_days_late_missing_buckets_default_to_zero() {
        let html = history_section(&[default_fixture("AMEX")]);
        let document = Html::parse_document(&html);

        let accounts = extract_accounts(&document, &ACCOUNT_HISTORY)
            .unwrap()
            .unwrap();
        let late = accounts[0].days_late.as_ref().unwrap();

        // First column has only two cells; the 90-day bucket defaults.
        assert_eq!(late.transunion.days_30, "1");
        assert_eq!(late.transunion.days_60, "0");
        assert_eq!(late.transunion.days_90, "0");
        // Third column is empty; every bucket defaults.
        assert_eq!(late.equifax.days_30, "0");
    }

    #[test]
    fn test_account_without_substructures() {
        let mut fixture = default_fixture("PLAIN CARD");
        fixture.history_blocks = 0;
        fixture.with_late_counts = false;
        let html = history_section(&[fixture]);
        let document = Html::parse_document(&html);

        let accounts = extract_accounts(&document, &ACCOUNT_HISTORY)
            .unwrap()
            .unwrap();
        assert!(accounts[0].payment_history.is_none());
        assert!(accounts[0].days_late.is_none());
        assert_eq!(accounts[0].name.as_deref(), Some("PLAIN CARD"));
    }

    #[test]
    fn test_missing_section_is_absence() {
        let document = Html::parse_document("<div></div>");
        assert!(extract_accounts(&document, &ACCOUNT_HISTORY)
            .unwrap()
            .is_none());
    }
}
