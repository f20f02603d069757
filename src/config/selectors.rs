// src/config/selectors.rs

// Site-profile selectors for the report document. These strings are
// configuration data describing one known document shape; the extractors
// themselves never hardcode CSS. A site redesign should only touch this file.

use once_cell::sync::Lazy;
use scraper::Selector;

fn css(selector: &str) -> Selector {
    // Selector strings here are compile-time constants; a parse failure is a
    // programming error, not an input error.
    Selector::parse(selector)
        .unwrap_or_else(|e| panic!("Invalid site-profile selector '{}': {}", selector, e))
}

// --- Report sections ---

/// Top-level report section containers, in document order.
pub static SECTION: Lazy<Selector> = Lazy::new(|| css("div.rpt-section"));

/// The heading element of a report section.
pub static SECTION_TITLE: Lazy<Selector> = Lazy::new(|| css(".section-title"));

// --- Bureau grids (label column + one column per bureau) ---

pub static GRID: Lazy<Selector> = Lazy::new(|| css("div.bureau-grid"));
pub static GRID_COLUMN: Lazy<Selector> = Lazy::new(|| css("div.grid-column"));
pub static GRID_CELL: Lazy<Selector> = Lazy::new(|| css("div.grid-cell"));

// --- Account history ---

/// One container per credit account. Lookalike containers exist outside the
/// Account History section; always select within the located section subtree.
pub static ACCOUNT_BLOCK: Lazy<Selector> = Lazy::new(|| css("div.account-block"));
pub static ACCOUNT_NAME: Lazy<Selector> = Lazy::new(|| css(".account-name"));

// Payment-history calendar: one block per bureau, one cell per month.
pub static PAYMENT_HISTORY: Lazy<Selector> = Lazy::new(|| css("div.payment-history"));
pub static HISTORY_BUREAU: Lazy<Selector> = Lazy::new(|| css("div.history-bureau"));
pub static MONTH_ENTRY: Lazy<Selector> = Lazy::new(|| css("div.month-cell"));
pub static MONTH_LABEL: Lazy<Selector> = Lazy::new(|| css(".month-label"));
pub static MONTH_STATUS: Lazy<Selector> = Lazy::new(|| css(".month-status"));

// Days-late histogram: identified by its heading text, one column per bureau.
pub static LATE_COUNTS: Lazy<Selector> = Lazy::new(|| css("div.late-counts"));
pub static LATE_TITLE: Lazy<Selector> = Lazy::new(|| css(".late-title"));
pub static LATE_COLUMN: Lazy<Selector> = Lazy::new(|| css("div.late-column"));
pub static LATE_CELL: Lazy<Selector> = Lazy::new(|| css("span.late-count"));

/// Heading text that marks the days-late sub-container within an account.
pub const DAYS_LATE_HEADING: &str = "days late";

// --- Inquiries ---

pub static INQUIRY_ROW: Lazy<Selector> = Lazy::new(|| css("table.inquiry-table tr"));
pub static TABLE_CELL: Lazy<Selector> = Lazy::new(|| css("td"));

// --- Creditor contacts ---

pub static CONTACT_BLOCK: Lazy<Selector> = Lazy::new(|| css("div.contact-block"));
pub static CONTACT_FIELD: Lazy<Selector> = Lazy::new(|| css(".contact-field"));

/// Toggle controls that reveal hidden contact details when activated.
pub static REVEAL_TOGGLE: Lazy<Selector> = Lazy::new(|| css("button.reveal-toggle, a.reveal-toggle"));

/// Case-insensitive token identifying reveal toggles by their visible label.
pub const REVEAL_LABEL: &str = "show";

/// Class prefix carrying a month's payment status in the history calendar.
pub const STATUS_CLASS_PREFIX: &str = "status-";
