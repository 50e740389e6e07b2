//! UCLA course catalog scraping
//!
//! Finds catalog courses whose description names Mathematics 31A as a
//! prerequisite.
//!
//! ## Pipeline
//! - `CollectionStrategy`: search endpoint, or every subject area in turn
//! - `normalize`: dedup by (subject code, title), re-check, sort
//! - `export_xlsx` / `export_csv`: write the rows out

mod types;
pub use types::{NormalizedRow, RawCourseRecord, SubjectArea};

mod matcher;
pub use matcher::{mentions_math_31a, PREREQ_LABEL};

mod error;
pub use error::FetchError;

mod retry;
pub use retry::{RetryPolicy, DEFAULT_BACKOFF, DEFAULT_MAX_ATTEMPTS};

mod api_client;
pub use api_client::{CatalogClient, DEFAULT_API_BASE};

mod strategy;
pub use strategy::{strategy_for, AllSubjectsStrategy, CollectionStrategy, SearchStrategy};

mod normalizer;
pub use normalizer::normalize;

mod exporter;
pub use exporter::{export_csv, export_xlsx, DEFAULT_SHEET_NAME};
