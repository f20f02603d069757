// src/config/mod.rs
pub mod sections;
pub mod selectors;

pub use sections::{section_config, SectionConfig, SectionName, SectionShape, Transform};
