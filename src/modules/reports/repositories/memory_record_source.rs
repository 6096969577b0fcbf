use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::record_source::{check_filters, RecordFilters, RecordSource};
use crate::core::Result;
use crate::modules::metrics::TimeRange;
use crate::modules::records::fields::{string_field, timestamp_field};
use crate::modules::records::RecordKind;

/// Record source backed by rows held in memory
///
/// Rows are filtered the same way the database source filters them: by owner,
/// by the kind's timestamp field and by equality on every extra filter. Filter
/// names are checked against the kind's fields first. Rows without a parseable
/// timestamp never match a range.
#[derive(Default)]
pub struct InMemoryRecordSource {
    rows: RwLock<HashMap<(String, RecordKind), Vec<Value>>>,
}

impl InMemoryRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows for an owner
    pub async fn insert(&self, owner_id: &str, kind: RecordKind, rows: Vec<Value>) {
        self.rows
            .write()
            .await
            .entry((owner_id.to_string(), kind))
            .or_default()
            .extend(rows);
    }

    /// Replace all rows of `kind` for an owner
    pub async fn replace(&self, owner_id: &str, kind: RecordKind, rows: Vec<Value>) {
        self.rows
            .write()
            .await
            .insert((owner_id.to_string(), kind), rows);
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn fetch(
        &self,
        owner_id: &str,
        kind: RecordKind,
        range: &TimeRange,
        filters: &RecordFilters,
    ) -> Result<Vec<Value>> {
        check_filters(kind, filters)?;

        let rows = self.rows.read().await;
        let Some(owned) = rows.get(&(owner_id.to_string(), kind)) else {
            return Ok(Vec::new());
        };

        let matching = owned
            .iter()
            .filter(|row| {
                timestamp_field(row, kind.timestamp_field()).is_some_and(|ts| range.contains(ts))
            })
            .filter(|row| {
                filters
                    .iter()
                    .all(|(field, expected)| string_field(row, field).as_deref() == Some(expected.as_str()))
            })
            .cloned()
            .collect();

        Ok(matching)
    }
}
