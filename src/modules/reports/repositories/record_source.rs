use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::{AppError, Result};
use crate::modules::metrics::TimeRange;
use crate::modules::records::RecordKind;

/// Extra equality filters applied on top of owner and range
pub type RecordFilters = BTreeMap<String, String>;

/// Reject filters naming a field `kind` does not have
pub fn check_filters(kind: RecordKind, filters: &RecordFilters) -> Result<()> {
    let fields = kind.fields();

    match filters.keys().find(|name| !fields.contains(&name.as_str())) {
        Some(unknown) => Err(AppError::validation(format!(
            "Unknown filter '{}' for {}",
            unknown, kind
        ))),
        None => Ok(()),
    }
}

/// Read-only access to the raw records reports are computed from
///
/// Implementations return every row of `kind` owned by `owner_id` whose
/// timestamp field falls inside `range`, matching all `filters`. A filter on a
/// field the kind does not have is a validation error. Any other failure
/// to deliver the complete set must be reported as
/// [`AppError::SourceUnavailable`](crate::core::AppError::SourceUnavailable);
/// a partial result is never acceptable.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(
        &self,
        owner_id: &str,
        kind: RecordKind,
        range: &TimeRange,
        filters: &RecordFilters,
    ) -> Result<Vec<Value>>;
}
