//! CSV product import.
//!
//! Import runs in three steps:
//!
//! 1. [`parse_csv`] splits the uploaded text into a header row and data rows.
//! 2. [`infer_mapping`] guesses which column feeds which product field. The
//!    admin may override any guess before importing.
//! 3. [`project_rows`] turns rows into [`ProductDraft`](crate::catalog::ProductDraft)s,
//!    and [`import_drafts`] submits them to the catalog store one at a time.

mod csv;
mod mapping;
mod pipeline;
mod project;

pub use csv::{parse_csv, CsvTable};
pub use mapping::{infer_mapping, ColumnMapping, ImportField};
pub use pipeline::{import_drafts, ImportReport, RowOutcome};
pub use project::{project_row, project_rows, FALLBACK_PRODUCT_NAME};
