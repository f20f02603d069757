// src/report/builder.rs

// Report builder: maps raw per-section text through the field transforms
// into the final normalized report, with every top-level key always present.
// Stateless; each call produces a fresh, immutable report.

use chrono::Utc;

use crate::config::sections::{self, FieldSpec, SectionName};
use crate::normalize::{
    clean_text, extract_number, parse_3b_scores, parse_boost_potential, parse_score_boost,
    parse_score_progress,
};
use crate::report::model::{
    Account, BureauMap, ExtractionOptions, FieldMap, Inquiries, RawAccount, RawInquiries,
    RawSections, Report, ScoreInsight, ValueMap,
};

/// Assembles the normalized report from raw section results.
///
/// Sections that were not requested or failed extraction stay as explicit
/// nulls, so the output schema is stable regardless of what was asked for.
pub fn build_report(raw: &RawSections, options: &ExtractionOptions) -> Report {
    for name in SectionName::ALL {
        if options.sections.includes(name) && section_slot_is_empty(raw, name) {
            tracing::debug!("Requested section '{}' produced no data; emitting null", name);
        }
    }

    Report {
        credit_scores_3b: raw.credit_scores.as_ref().map(|grid| {
            parse_3b_scores(&grid.map(|fields| fields.get("score").cloned().flatten()))
        }),
        score_insights: raw.credit_scores.as_ref().map(score_insights),
        personal_information: raw
            .personal_information
            .as_ref()
            .map(|grid| transform_grid(grid, sections::PERSONAL_INFORMATION.fields)),
        summary: raw.summary.as_ref().map(transform_summary),
        account_history: raw
            .account_history
            .as_ref()
            .map(|accounts| accounts.iter().map(normalize_account).collect()),
        account_history_pagination: raw.account_history_pagination,
        public_records: raw
            .public_records
            .as_ref()
            .map(|grid| transform_grid(grid, sections::PUBLIC_RECORDS.fields)),
        inquiries: raw.inquiries.as_ref().map(normalize_inquiries),
        creditor_contacts: raw.creditor_contacts.as_ref().map(|contacts| {
            contacts
                .iter()
                .map(|contact| transform_fields(contact, sections::CREDITOR_CONTACTS.fields))
                .collect()
        }),
        scraped_at: Utc::now().to_rfc3339(),
    }
}

/// Names the foundational sections missing from the report. Advisory: a
/// partially-valid report is still usable, the caller decides.
pub fn validate_report(report: &Report) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if report.credit_scores_3b.is_none() {
        missing.push("credit_scores_3b");
    }
    if report.personal_information.is_none() {
        missing.push("personal_information");
    }
    if report.summary.is_none() {
        missing.push("summary");
    }
    if !missing.is_empty() {
        tracing::warn!("Report is missing foundational sections: {:?}", missing);
    }
    missing
}

/// Serialized byte size of the report. Advisory, for callers deciding
/// whether to paginate account history.
pub fn estimate_size(report: &Report) -> usize {
    match serde_json::to_vec(report) {
        Ok(bytes) => bytes.len(),
        Err(e) => {
            tracing::error!("Failed to serialize report for size estimate: {}", e);
            0
        }
    }
}

fn section_slot_is_empty(raw: &RawSections, name: SectionName) -> bool {
    match name {
        SectionName::CreditScores => raw.credit_scores.is_none(),
        SectionName::PersonalInformation => raw.personal_information.is_none(),
        SectionName::Summary => raw.summary.is_none(),
        SectionName::AccountHistory => raw.account_history.is_none(),
        SectionName::PublicRecords => raw.public_records.is_none(),
        SectionName::Inquiries => raw.inquiries.is_none(),
        SectionName::CreditorContacts => raw.creditor_contacts.is_none(),
    }
}

/// Applies each configured field's transform. Iterates the field list, not
/// the raw map, so every bureau map ends with the full configured key set.
fn transform_fields(raw: &FieldMap, fields: &[FieldSpec]) -> ValueMap {
    fields
        .iter()
        .map(|field| {
            let value = raw.get(field.name).and_then(|v| v.as_deref());
            (field.name.to_string(), field.transform.apply(value))
        })
        .collect()
}

fn transform_grid(grid: &BureauMap<FieldMap>, fields: &'static [FieldSpec]) -> BureauMap<ValueMap> {
    grid.map(|bureau_fields| transform_fields(bureau_fields, fields))
}

/// The summary carries its own grid fields plus the account counters merged
/// in by the orchestrator's second read.
fn transform_summary(grid: &BureauMap<FieldMap>) -> BureauMap<ValueMap> {
    grid.map(|bureau_fields| {
        let mut values = transform_fields(bureau_fields, sections::SUMMARY.fields);
        values.extend(transform_fields(bureau_fields, sections::ACCOUNT_TOTALS.fields));
        values
    })
}

/// Narrative sentences from the scores section become per-bureau point
/// deltas; nothing matching yields nulls.
fn score_insights(grid: &BureauMap<FieldMap>) -> BureauMap<ScoreInsight> {
    grid.map(|fields| {
        let text = |name: &str| fields.get(name).and_then(|v| v.as_deref());
        ScoreInsight {
            progress: text("score_progress")
                .and_then(|t| parse_score_progress(t).or_else(|| parse_score_boost(t))),
            boost_potential: text("boost_potential").and_then(parse_boost_potential),
        }
    })
}

fn normalize_account(raw: &RawAccount) -> Account {
    Account {
        name: raw.name.as_deref().and_then(clean_text),
        bureaus: raw
            .bureaus
            .map(|fields| transform_fields(fields, sections::ACCOUNT_HISTORY.fields)),
        // Already structured by the extractor, not raw text; pass through.
        payment_history: raw.payment_history.clone(),
        days_late: raw.days_late.clone(),
    }
}

fn normalize_inquiries(raw: &RawInquiries) -> Inquiries {
    Inquiries {
        count: raw.count.as_deref().and_then(extract_number),
        details: raw
            .details
            .iter()
            .map(|row| transform_fields(row, sections::INQUIRIES.fields))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::{Bureau, DaysLate, PaymentMonth};
    use serde_json::{json, Value};

    fn raw_scores() -> BureauMap<FieldMap> {
        BureauMap::from_fn(|bureau| {
            let score = match bureau {
                Bureau::Transunion => "770",
                Bureau::Experian => "790",
                Bureau::Equifax => "789",
            };
            FieldMap::from([
                ("score".to_string(), Some(score.to_string())),
                (
                    "score_progress".to_string(),
                    Some("Your score increased by +34 pts".to_string()),
                ),
                (
                    "boost_potential".to_string(),
                    Some("could boost your score by up to 25 points".to_string()),
                ),
            ])
        })
    }

    fn raw_account() -> RawAccount {
        let mut fields = FieldMap::new();
        for spec in sections::ACCOUNT_HISTORY.fields {
            fields.insert(spec.name.to_string(), None);
        }
        fields.insert("balance".to_string(), Some("$1,702.00".to_string()));
        fields.insert("date_opened".to_string(), Some("1/9/2020".to_string()));
        fields.insert("account_status".to_string(), Some("  Open ".to_string()));
        fields.insert("remarks".to_string(), Some("--".to_string()));

        RawAccount {
            name: Some("CHASE AUTO".to_string()),
            bureaus: BureauMap::from_fn(|_| fields.clone()),
            payment_history: Some(BureauMap::from_fn(|_| {
                vec![PaymentMonth {
                    month: "Jan".to_string(),
                    status: "OK".to_string(),
                    status_class: "ok".to_string(),
                }]
            })),
            days_late: Some(BureauMap::from_fn(|_| DaysLate {
                days_30: "0".to_string(),
                days_60: "0".to_string(),
                days_90: "0".to_string(),
            })),
        }
    }

    fn sample_raw() -> RawSections {
        RawSections {
            credit_scores: Some(raw_scores()),
            personal_information: None,
            summary: None,
            account_history: Some(vec![raw_account()]),
            account_history_pagination: None,
            public_records: None,
            inquiries: Some(RawInquiries {
                count: Some("4".to_string()),
                details: vec![FieldMap::from([
                    ("creditor_name".to_string(), Some("NISSAN".to_string())),
                    ("inquiry_date".to_string(), Some("06/12/2025".to_string())),
                    ("credit_bureau".to_string(), Some("Experian".to_string())),
                ])],
            }),
            creditor_contacts: None,
        }
    }

    #[test]
    fn test_scores_and_insights() {
        let report = build_report(&sample_raw(), &ExtractionOptions::default());

        let scores = report.credit_scores_3b.unwrap();
        assert_eq!(scores.transunion, Some(770.0));
        assert_eq!(scores.experian, Some(790.0));
        assert_eq!(scores.equifax, Some(789.0));

        let insights = report.score_insights.unwrap();
        assert_eq!(insights.transunion.progress, Some(34));
        assert_eq!(insights.transunion.boost_potential, Some(25));
    }

    #[test]
    fn test_account_normalization_transforms() {
        let report = build_report(&sample_raw(), &ExtractionOptions::default());
        let accounts = report.account_history.unwrap();
        let account = &accounts[0];

        // Currency text preserved verbatim, dates normalized to ISO,
        // placeholders collapsed to null.
        assert_eq!(account.bureaus.transunion["balance"], json!("$1,702.00"));
        assert_eq!(account.bureaus.transunion["date_opened"], json!("2020-01-09"));
        assert_eq!(account.bureaus.transunion["account_status"], json!("Open"));
        assert_eq!(account.bureaus.transunion["remarks"], Value::Null);

        // Substructures pass through untouched.
        assert_eq!(
            account.payment_history.as_ref().unwrap().equifax[0].status_class,
            "ok"
        );
        assert_eq!(account.days_late.as_ref().unwrap().experian.days_30, "0");
    }

    #[test]
    fn test_schema_stability_across_bureaus() {
        let report = build_report(&sample_raw(), &ExtractionOptions::default());
        let accounts = report.account_history.unwrap();
        let account = &accounts[0];

        let tu: Vec<_> = account.bureaus.transunion.keys().collect();
        let ex: Vec<_> = account.bureaus.experian.keys().collect();
        let eq: Vec<_> = account.bureaus.equifax.keys().collect();
        assert_eq!(tu, ex);
        assert_eq!(ex, eq);
        assert_eq!(tu.len(), sections::ACCOUNT_HISTORY.fields.len());
    }

    #[test]
    fn test_inquiries_normalization() {
        let report = build_report(&sample_raw(), &ExtractionOptions::default());
        let inquiries = report.inquiries.unwrap();

        assert_eq!(inquiries.count, Some(4.0));
        assert_eq!(inquiries.details[0]["inquiry_date"], json!("2025-06-12"));
        assert_eq!(inquiries.details[0]["creditor_name"], json!("NISSAN"));
    }

    #[test]
    fn test_absent_sections_serialize_as_explicit_nulls() {
        let report = build_report(&RawSections::default(), &ExtractionOptions::default());
        let json = serde_json::to_value(&report).unwrap();

        for key in [
            "credit_scores_3b",
            "personal_information",
            "summary",
            "account_history",
            "public_records",
            "inquiries",
            "creditor_contacts",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
            assert_eq!(json[key], Value::Null, "key {} not null", key);
        }
        // Pagination is the one optional key.
        assert!(json.get("account_history_pagination").is_none());
        assert!(json.get("scraped_at").is_some());
    }

    #[test]
    fn test_build_report_idempotent_modulo_timestamp() {
        let raw = sample_raw();
        let options = ExtractionOptions::default();
        let first = build_report(&raw, &options);
        let mut second = build_report(&raw, &options);
        second.scraped_at = first.scraped_at.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_report_names_missing_foundations() {
        let report = build_report(&sample_raw(), &ExtractionOptions::default());
        let missing = validate_report(&report);
        assert_eq!(missing, vec!["personal_information", "summary"]);

        let empty = build_report(&RawSections::default(), &ExtractionOptions::default());
        assert_eq!(
            validate_report(&empty),
            vec!["credit_scores_3b", "personal_information", "summary"]
        );
    }

    #[test]
    fn test_estimate_size_is_positive() {
        let report = build_report(&sample_raw(), &ExtractionOptions::default());
        assert!(estimate_size(&report) > 0);
    }
}
