//! Report resolution
//!
//! Maps a report id to its name and fixed price through the report
//! service, caching every definitive answer (found or not found).

pub mod resolver;

pub use resolver::{ReportLookup, ReportResolver, ReportSource};
