//! Content extraction module
//!
//! Helpers shared by the site scrapers: DOM lookups by exact or fuzzy class
//! name over a parsed page, and text cleanup for the extracted body.

pub mod dom;
pub mod text;

pub use dom::{
    all_with_class_prefix, element_text, first_match, first_with_class_prefix, parse_document,
};
pub use text::{normalize_whitespace, strip_patterns};
