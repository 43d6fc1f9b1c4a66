//! Rendering Layer - report assembly, escaping and number formatting
//!
//! Everything here is pure: the resolver produces the data, these modules
//! only turn it into text.

pub mod abbrev;
pub mod escape;
pub mod report;

pub use abbrev::abbreviate;
pub use escape::{defang, escape, escape_strict_extra, EscapeDialect, ZERO_WIDTH_NON_JOINER};
pub use report::{render, ReportOptions};
