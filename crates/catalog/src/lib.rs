//! Product catalog: the keyed collection of products and the operations and
//! reports built on top of it.
//!
//! Holds all ledger state in memory for the lifetime of the process.

pub mod catalog;
pub mod report;

pub use catalog::{Catalog, SaveOutcome};
pub use report::{ExportError, OrderReportRow, REPORT_HEADER, read_csv, write_csv};
