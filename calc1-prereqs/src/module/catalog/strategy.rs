//! Ways of pulling candidate course records from the catalog API

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api_client::CatalogClient;
use super::error::FetchError;
use super::matcher::{mentions_math_31a, PREREQ_LABEL};
use super::types::{RawCourseRecord, SubjectArea};

/// Produces the raw records the normalizer works on.
#[async_trait]
pub trait CollectionStrategy: Send + Sync {
    /// Mode line printed before collection starts
    fn describe(&self) -> &'static str;

    async fn collect(&self, client: &CatalogClient) -> Result<Vec<RawCourseRecord>>;
}

/// Pick the strategy once, at startup.
pub fn strategy_for(all_subjects: bool, subject_delay: Duration) -> Box<dyn CollectionStrategy> {
    if all_subjects {
        Box::new(AllSubjectsStrategy::new(subject_delay))
    } else {
        Box::new(SearchStrategy)
    }
}

/// One call to the full-text search endpoint. Fast, but the endpoint's
/// matching is fuzzier than ours, so results are re-checked downstream.
pub struct SearchStrategy;

#[async_trait]
impl CollectionStrategy for SearchStrategy {
    fn describe(&self) -> &'static str {
        "Search API (fast — takes ~5 seconds) ..."
    }

    async fn collect(&self, client: &CatalogClient) -> Result<Vec<RawCourseRecord>> {
        let url = client.search_url(PREREQ_LABEL);
        println!("  Querying: {}", url);

        // Fetch failures abort the run; a malformed body just means no data.
        let results = client.fetch_json(&url).await?;
        match records_from(results) {
            Some(records) => Ok(records),
            None => {
                tracing::error!("Unexpected response format.");
                Ok(Vec::new())
            }
        }
    }
}

/// Walk every subject area and filter each course list locally.
/// Slow (one request per subject) but sees the whole catalog.
pub struct AllSubjectsStrategy {
    delay: Duration,
}

impl AllSubjectsStrategy {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CollectionStrategy for AllSubjectsStrategy {
    fn describe(&self) -> &'static str {
        "Fetching all subject areas individually (slow but thorough)..."
    }

    async fn collect(&self, client: &CatalogClient) -> Result<Vec<RawCourseRecord>> {
        let subjects: Vec<SubjectArea> = match client.fetch_json(&client.all_subjects_url()).await {
            Ok(value) => records_from(value).unwrap_or_else(|| {
                tracing::error!("Failed to load subject areas.");
                Vec::new()
            }),
            Err(e) => {
                tracing::error!("Failed to load subject areas: {}", e);
                Vec::new()
            }
        };
        if subjects.is_empty() {
            return Ok(Vec::new());
        }

        let total = subjects.len();
        println!("  Found {} subject areas.", total);

        let mut matching = Vec::new();
        for (index, subject) in subjects.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let code = subject.code();
            let courses: Vec<RawCourseRecord> = match client.fetch_json(&client.subject_url(&code)).await {
                Ok(value) => records_from(value).unwrap_or_else(|| {
                    tracing::warn!("Unexpected course list format for {}", code);
                    Vec::new()
                }),
                Err(e) => {
                    println!("{}", format_progress(index, total, subject, Err(&e)));
                    continue;
                }
            };

            let hits: Vec<RawCourseRecord> = courses
                .into_iter()
                .filter(|course| mentions_math_31a(course.description()))
                .collect();

            println!("{}", format_progress(index, total, subject, Ok(hits.len())));
            matching.extend(hits);
        }

        Ok(matching)
    }
}

/// Progress line for the `index`-th (zero-based) of `total` subjects. A
/// zero match count leaves the line bare.
fn format_progress(
    index: usize,
    total: usize,
    subject: &SubjectArea,
    outcome: Result<usize, &FetchError>,
) -> String {
    let prefix = format!(
        "  [{:3}/{}] {:<12} {}",
        index + 1,
        total,
        subject.code(),
        subject.name()
    );
    match outcome {
        Ok(0) => prefix,
        Ok(hits) => format!("{}  → {} match(es)", prefix, hits),
        Err(e) => format!("{}  ERROR: {}", prefix, e),
    }
}

/// Interpret a payload as a list of records. `None` when it is not a list;
/// list items that are not objects are skipped.
fn records_from<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    let Value::Array(items) = value else {
        return None;
    };

    let records = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed record: {}", e);
                None
            }
        })
        .collect();
    Some(records)
}
