// src/config/sections.rs

// Declarative configuration for every report section: where it sits in the
// document, what shape it has, and which named fields it yields. Loaded once,
// shared by all extraction runs, never mutated.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::normalize::{clean_text, extract_number, parse_date};

/// The report sections this pipeline knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionName {
    CreditScores,
    PersonalInformation,
    Summary,
    AccountHistory,
    PublicRecords,
    Inquiries,
    CreditorContacts,
}

impl SectionName {
    pub const ALL: [SectionName; 7] = [
        SectionName::CreditScores,
        SectionName::PersonalInformation,
        SectionName::Summary,
        SectionName::AccountHistory,
        SectionName::PublicRecords,
        SectionName::Inquiries,
        SectionName::CreditorContacts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::CreditScores => "credit_scores",
            SectionName::PersonalInformation => "personal_information",
            SectionName::Summary => "summary",
            SectionName::AccountHistory => "account_history",
            SectionName::PublicRecords => "public_records",
            SectionName::Inquiries => "inquiries",
            SectionName::CreditorContacts => "creditor_contacts",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "credit_scores" => Ok(SectionName::CreditScores),
            "personal_information" => Ok(SectionName::PersonalInformation),
            "summary" => Ok(SectionName::Summary),
            "account_history" => Ok(SectionName::AccountHistory),
            "public_records" => Ok(SectionName::PublicRecords),
            "inquiries" => Ok(SectionName::Inquiries),
            "creditor_contacts" => Ok(SectionName::CreditorContacts),
            other => Err(format!("unknown section name '{}'", other)),
        }
    }
}

/// How a raw cell value becomes a report value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Numeric extraction; formatting stripped, null on no digits.
    Number,
    /// Trimmed text kept verbatim (currency/percent formatting preserved);
    /// empty and `"--"` collapse to null.
    Text,
    /// `MM/DD/YYYY` substring reformatted to ISO `YYYY-MM-DD`.
    Date,
}

impl Transform {
    pub fn apply(&self, raw: Option<&str>) -> Value {
        let value = match self {
            Transform::Number => raw
                .and_then(extract_number)
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            Transform::Text => raw.and_then(clean_text).map(Value::String),
            Transform::Date => raw.and_then(parse_date).map(Value::String),
        };
        value.unwrap_or(Value::Null)
    }
}

/// One named sub-field of a section, in the positional order the document
/// renders it.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub transform: Transform,
}

const fn field(name: &'static str, transform: Transform) -> FieldSpec {
    FieldSpec { name, transform }
}

/// Where a section sits in the document. The heading match is preferred;
/// the ordinal is an explicit fallback for document versions with
/// inconsistent labeling, and using it is logged as a degraded match.
#[derive(Debug, Clone, Copy)]
pub struct SectionLocator {
    pub heading: Option<&'static str>,
    pub ordinal: usize,
}

/// The structural shape of a section, deciding which extractor reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionShape {
    /// Fixed-column tabular layout: label column plus one column per bureau.
    /// `grid_index` picks among several grids inside the same section.
    Grid { grid_index: usize },
    /// Repeated variable-count account blocks with nested sub-tables.
    AccountList,
    /// Repeated data rows under a header row.
    RowList,
    /// Repeated blocks that need a reveal action before they are readable.
    InteractiveList,
}

/// Declarative description of one report section.
#[derive(Debug, Clone, Copy)]
pub struct SectionConfig {
    pub name: SectionName,
    pub locator: SectionLocator,
    pub shape: SectionShape,
    pub fields: &'static [FieldSpec],
}

// --- Section registry ---

pub static CREDIT_SCORES: SectionConfig = SectionConfig {
    name: SectionName::CreditScores,
    locator: SectionLocator {
        heading: Some("Credit Score"),
        ordinal: 0,
    },
    shape: SectionShape::Grid { grid_index: 0 },
    fields: &[
        field("score", Transform::Number),
        field("score_progress", Transform::Text),
        field("boost_potential", Transform::Text),
    ],
};

pub static PERSONAL_INFORMATION: SectionConfig = SectionConfig {
    name: SectionName::PersonalInformation,
    locator: SectionLocator {
        heading: Some("Personal Information"),
        ordinal: 1,
    },
    shape: SectionShape::Grid { grid_index: 0 },
    fields: &[
        field("name", Transform::Text),
        field("also_known_as", Transform::Text),
        field("former_names", Transform::Text),
        // Rendered as MM/YYYY on some document versions, so kept as text.
        field("date_of_birth", Transform::Text),
        field("current_address", Transform::Text),
        field("previous_address", Transform::Text),
        field("employers", Transform::Text),
        field("credit_report_date", Transform::Date),
    ],
};

pub static SUMMARY: SectionConfig = SectionConfig {
    name: SectionName::Summary,
    locator: SectionLocator {
        heading: Some("Summary"),
        ordinal: 2,
    },
    shape: SectionShape::Grid { grid_index: 0 },
    fields: &[
        field("delinquent", Transform::Number),
        field("derogatory", Transform::Number),
        field("collection", Transform::Number),
        // Dollar figures stay text so formatting survives into the report.
        field("balances", Transform::Text),
        field("payments", Transform::Text),
        field("public_records", Transform::Number),
        field("inquiries_2_years", Transform::Number),
    ],
};

/// Second, narrower grid inside the Summary section carrying the account
/// counters. Read separately and merged into the summary bureau maps.
pub static ACCOUNT_TOTALS: SectionConfig = SectionConfig {
    name: SectionName::Summary,
    locator: SectionLocator {
        heading: Some("Summary"),
        ordinal: 2,
    },
    shape: SectionShape::Grid { grid_index: 1 },
    fields: &[
        field("total_accounts", Transform::Number),
        field("open_accounts", Transform::Number),
        field("closed_accounts", Transform::Number),
    ],
};

/// Summary field holding the two-year inquiry count, read narrowly for the
/// compound inquiries result.
pub const INQUIRY_COUNT_FIELD: &str = "inquiries_2_years";

pub static ACCOUNT_HISTORY: SectionConfig = SectionConfig {
    name: SectionName::AccountHistory,
    locator: SectionLocator {
        heading: Some("Account History"),
        ordinal: 3,
    },
    shape: SectionShape::AccountList,
    fields: &[
        field("account_number", Transform::Text),
        field("account_type", Transform::Text),
        field("account_type_detail", Transform::Text),
        field("bureau_code", Transform::Text),
        field("account_status", Transform::Text),
        field("monthly_payment", Transform::Text),
        field("date_opened", Transform::Date),
        field("balance", Transform::Text),
        field("number_of_months", Transform::Number),
        field("high_credit", Transform::Text),
        field("credit_limit", Transform::Text),
        field("past_due", Transform::Text),
        field("payment_status", Transform::Text),
        field("late_status", Transform::Text),
        field("date_reported", Transform::Date),
        field("date_of_last_activity", Transform::Date),
        field("remarks", Transform::Text),
        field("closed_date", Transform::Date),
        field("last_verified", Transform::Date),
        field("date_of_last_payment", Transform::Date),
        field("creditor_type", Transform::Text),
        field("term_length", Transform::Text),
        field("payment_frequency", Transform::Text),
    ],
};

pub static PUBLIC_RECORDS: SectionConfig = SectionConfig {
    name: SectionName::PublicRecords,
    locator: SectionLocator {
        heading: Some("Public Information"),
        ordinal: 4,
    },
    shape: SectionShape::Grid { grid_index: 0 },
    fields: &[
        field("bankruptcies", Transform::Number),
        field("tax_liens", Transform::Number),
        field("judgments", Transform::Number),
        field("other_records", Transform::Number),
    ],
};

pub static INQUIRIES: SectionConfig = SectionConfig {
    name: SectionName::Inquiries,
    locator: SectionLocator {
        heading: Some("Inquiries"),
        ordinal: 5,
    },
    shape: SectionShape::RowList,
    fields: &[
        field("creditor_name", Transform::Text),
        field("inquiry_date", Transform::Date),
        field("credit_bureau", Transform::Text),
    ],
};

pub static CREDITOR_CONTACTS: SectionConfig = SectionConfig {
    name: SectionName::CreditorContacts,
    locator: SectionLocator {
        heading: Some("Creditor Contacts"),
        ordinal: 6,
    },
    shape: SectionShape::InteractiveList,
    fields: &[
        field("creditor_name", Transform::Text),
        field("address", Transform::Text),
        field("phone_number", Transform::Text),
    ],
};

/// Registry entry lookup for dispatching by name.
pub fn section_config(name: SectionName) -> &'static SectionConfig {
    match name {
        SectionName::CreditScores => &CREDIT_SCORES,
        SectionName::PersonalInformation => &PERSONAL_INFORMATION,
        SectionName::Summary => &SUMMARY,
        SectionName::AccountHistory => &ACCOUNT_HISTORY,
        SectionName::PublicRecords => &PUBLIC_RECORDS,
        SectionName::Inquiries => &INQUIRIES,
        SectionName::CreditorContacts => &CREDITOR_CONTACTS,
    }
}
