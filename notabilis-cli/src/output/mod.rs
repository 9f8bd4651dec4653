//! Output formatting for CLI results.

mod report;

pub use report::{JsonLines, ReportRenderer};
