//! # Silver DQ Validator
//!
//! Validation engine for the silver daily weather table. This crate provides:
//!
//! - Schema contract validation (column presence, types, nulls, counts)
//! - The [`Rule`] abstraction and the built-in rules (completeness, flag
//!   consistency, key uniqueness, ranges)
//! - [`RuleSet`] assembly from configuration
//! - The concurrent [`ValidationEngine`]
//! - Dataset providers, with the in-memory [`FixtureSource`]
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dq_core::FixtureRow;
//! use dq_validator::{DataSet, RuleSet, ValidationEngine};
//!
//! let incomplete = FixtureRow {
//!     row_count: 23,
//!     ..FixtureRow::sample()
//! };
//! let dataset = DataSet::from_fixture(&[incomplete.clone()]);
//! let today = NaiveDate::from_ymd_opt(2025, 7, 16).unwrap();
//!
//! let report = ValidationEngine::new().run(&dataset, &RuleSet::default_rules(), today);
//!
//! assert!(!report.passed());
//! assert!(report.violations("completeness").unwrap().contains(&incomplete.key()));
//! ```

mod completeness;
mod dataset;
mod engine;
mod error;
mod flags;
mod provider;
mod quality;
mod rule;
mod rule_set;
mod schema;

pub use completeness::*;
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use flags::*;
pub use provider::*;
pub use quality::*;
pub use rule::*;
pub use rule_set::*;
pub use schema::*;
