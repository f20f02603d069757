// src/lib.rs
//! Credit report extraction pipeline.
//!
//! Turns a captured credit-report page (the rendered HTML of a third-party
//! report site) into a normalized, JSON-serializable [`report::model::Report`].
//!
//! # Modules
//!
//! - `config`: declarative section configuration and site-profile selectors.
//! - `extractors`: one extractor per section shape (grid, account list,
//!   row list, interactive list).
//! - `normalize`: field transform library (numbers, dates, text cleanup,
//!   narrative score phrases).
//! - `page`: the `PageHandle` capability the pipeline reads documents
//!   through, plus snapshot implementations.
//! - `report`: orchestration (`extract_all`) and assembly (`build_report`).
//! - `storage`: report JSON and metadata persistence.
//! - `utils`: errors, logging setup, debug HTML annotation.

pub mod config;
pub mod extractors;
pub mod normalize;
pub mod page;
pub mod report;
pub mod storage;
pub mod utils;

// Re-export the consumer surface of the pipeline.
pub use page::{PageHandle, SnapshotPage};
pub use report::builder::{build_report, estimate_size, validate_report};
pub use report::model::{ExtractionOptions, PageWindow, Report, SectionRequest};
pub use report::orchestrator::extract_all;
pub use utils::AppError;
