// src/report/model.rs

// Raw and normalized report shapes. Raw types hold trimmed text exactly as
// scraped; normalized types hold JSON values after the field transforms.
// Both are plain serde data with no behavior beyond small accessors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::sections::SectionName;

/// One of the three fixed credit-reporting agencies. Every per-section and
/// per-account record is tripled, one value set per bureau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bureau {
    Transunion,
    Experian,
    Equifax,
}

impl Bureau {
    /// Bureau column order as the document renders it.
    pub const ALL: [Bureau; 3] = [Bureau::Transunion, Bureau::Experian, Bureau::Equifax];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bureau::Transunion => "transunion",
            Bureau::Experian => "experian",
            Bureau::Equifax => "equifax",
        }
    }
}

/// One value per bureau. Serializes as an object keyed by bureau name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BureauMap<T> {
    pub transunion: T,
    pub experian: T,
    pub equifax: T,
}

impl<T> BureauMap<T> {
    pub fn get(&self, bureau: Bureau) -> &T {
        match bureau {
            Bureau::Transunion => &self.transunion,
            Bureau::Experian => &self.experian,
            Bureau::Equifax => &self.equifax,
        }
    }

    pub fn get_mut(&mut self, bureau: Bureau) -> &mut T {
        match bureau {
            Bureau::Transunion => &mut self.transunion,
            Bureau::Experian => &mut self.experian,
            Bureau::Equifax => &mut self.equifax,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Bureau) -> T) -> Self {
        BureauMap {
            transunion: f(Bureau::Transunion),
            experian: f(Bureau::Experian),
            equifax: f(Bureau::Equifax),
        }
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> BureauMap<U> {
        BureauMap {
            transunion: f(&self.transunion),
            experian: f(&self.experian),
            equifax: f(&self.equifax),
        }
    }
}

/// Raw per-bureau field values: field name to trimmed text, None for absent.
pub type FieldMap = BTreeMap<String, Option<String>>;

/// Normalized per-bureau field values after transforms.
pub type ValueMap = BTreeMap<String, Value>;

/// One month of the payment-history calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMonth {
    pub month: String,
    pub status: String,
    pub status_class: String,
}

/// Late-payment counts bucketed at 30/60/90 days.
///
/// A missing bucket is rendered as "0" rather than null. Whether a missing
/// bucket truly means zero is an ambiguity inherited from the source
/// document; the distinction is preserved rather than unified with the
/// null-for-absent policy used everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaysLate {
    #[serde(rename = "30")]
    pub days_30: String,
    #[serde(rename = "60")]
    pub days_60: String,
    #[serde(rename = "90")]
    pub days_90: String,
}

/// One credit account as scraped: per-bureau field maps plus the optional
/// nested structures. The field maps always carry the full configured key
/// set, nulls included, so absence never collapses the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAccount {
    pub name: Option<String>,
    pub bureaus: BureauMap<FieldMap>,
    pub payment_history: Option<BureauMap<Vec<PaymentMonth>>>,
    pub days_late: Option<BureauMap<DaysLate>>,
}

/// Compound inquiries result: the aggregate count read from the summary grid
/// plus the detailed row list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInquiries {
    pub count: Option<String>,
    pub details: Vec<FieldMap>,
}

/// Everything the orchestrator produced for one run. A None slot means the
/// section was not requested or its extraction failed; both render as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSections {
    pub credit_scores: Option<BureauMap<FieldMap>>,
    pub personal_information: Option<BureauMap<FieldMap>>,
    pub summary: Option<BureauMap<FieldMap>>,
    pub account_history: Option<Vec<RawAccount>>,
    pub account_history_pagination: Option<Pagination>,
    pub public_records: Option<BureauMap<FieldMap>>,
    pub inquiries: Option<RawInquiries>,
    pub creditor_contacts: Option<Vec<FieldMap>>,
}

/// Pagination echo for account history: a window over the fully-extracted
/// in-memory list, not a partial DOM read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub has_more: bool,
    pub limit: usize,
    pub offset: usize,
}

// --- Normalized report ---

/// Narrative-derived score movement for one bureau.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInsight {
    pub progress: Option<i64>,
    pub boost_potential: Option<i64>,
}

/// One normalized credit account. Bureau maps share an identical key set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: Option<String>,
    #[serde(flatten)]
    pub bureaus: BureauMap<ValueMap>,
    pub payment_history: Option<BureauMap<Vec<PaymentMonth>>>,
    pub days_late: Option<BureauMap<DaysLate>>,
}

/// Normalized inquiries: numeric aggregate count plus detailed rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inquiries {
    pub count: Option<f64>,
    pub details: Vec<ValueMap>,
}

/// The terminal aggregate handed to the persistence boundary. Every key is
/// always present; a section that was not requested or failed extraction is
/// an explicit null, so consumers see a stable schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub credit_scores_3b: Option<BureauMap<Option<f64>>>,
    pub score_insights: Option<BureauMap<ScoreInsight>>,
    pub personal_information: Option<BureauMap<ValueMap>>,
    pub summary: Option<BureauMap<ValueMap>>,
    pub account_history: Option<Vec<Account>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_history_pagination: Option<Pagination>,
    pub public_records: Option<BureauMap<ValueMap>>,
    pub inquiries: Option<Inquiries>,
    pub creditor_contacts: Option<Vec<ValueMap>>,
    pub scraped_at: String,
}

// --- Per-run options ---

/// Which sections a run should extract.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SectionRequest {
    #[default]
    All,
    Only(Vec<SectionName>),
}

impl SectionRequest {
    pub fn includes(&self, name: SectionName) -> bool {
        match self {
            SectionRequest::All => true,
            SectionRequest::Only(names) => names.contains(&name),
        }
    }
}

/// Account-history pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: usize,
    pub offset: usize,
}

/// Per-run extraction configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionOptions {
    pub sections: SectionRequest,
    pub pagination: Option<PageWindow>,
}
