//! Tag normalization for advertising tag sheets.
//!
//! This crate turns one raw vendor tag into its canonical form:
//!
//! - **normalization**: HTML image unwrapping, VAST percent-decoding and the
//!   macro dialect table
//! - **vendors**: the ordered vendor rule table (Nielsen, Flashtalking, kids
//!   compliance, Extreme Reach, Sizmek)
//! - **clean**: the fixed-order pipeline tying the stages together
//! - **records**: row-parallel application over a resolved table

pub mod clean;
pub mod normalization;
pub mod records;
pub mod vendors;

pub use clean::{CleanedTag, clean, clean_cell};
pub use normalization::{CANONICAL_CACHEBUSTER, MacroPattern, macro_dialect};
pub use records::build_records;
pub use vendors::{RuleGate, VendorRule, vendor_rules};
