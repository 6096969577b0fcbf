use async_trait::async_trait;
use serde_json::Value;
use sqlx::MySqlPool;
use tracing::{debug, error};

use super::record_source::{check_filters, RecordFilters, RecordSource};
use crate::core::{AppError, Result};
use crate::modules::metrics::TimeRange;
use crate::modules::records::RecordKind;

/// Column every record table is scoped by
const OWNER_COLUMN: &str = "vendor_id";

/// Record source backed by the platform's MySQL tables
///
/// Each row is returned as a JSON object built server-side with
/// `JSON_OBJECT`, keyed by the kind's field names.
pub struct MySqlRecordSource {
    pool: MySqlPool,
}

impl MySqlRecordSource {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Build the select statement for `kind` with one placeholder per filter
///
/// Filter names are checked against the kind's known fields, so only static
/// identifiers ever reach the SQL text.
pub fn build_select(kind: RecordKind, filters: &RecordFilters) -> Result<String> {
    check_filters(kind, filters)?;
    let fields = kind.fields();

    let object = fields
        .iter()
        .map(|field| format!("'{field}', `{field}`"))
        .collect::<Vec<_>>()
        .join(", ");

    let ts = kind.timestamp_field();
    let mut sql = format!(
        "SELECT JSON_OBJECT({object}) AS record FROM `{table}` \
         WHERE `{OWNER_COLUMN}` = ? AND `{ts}` >= ? AND `{ts}` < ?",
        table = kind.as_str(),
    );
    for name in filters.keys() {
        sql.push_str(&format!(" AND `{name}` = ?"));
    }
    sql.push_str(&format!(" ORDER BY `{ts}` ASC"));

    Ok(sql)
}

#[async_trait]
impl RecordSource for MySqlRecordSource {
    async fn fetch(
        &self,
        owner_id: &str,
        kind: RecordKind,
        range: &TimeRange,
        filters: &RecordFilters,
    ) -> Result<Vec<Value>> {
        let sql = build_select(kind, filters)?;

        let mut query = sqlx::query_scalar::<_, Value>(&sql)
            .bind(owner_id)
            .bind(range.from)
            .bind(range.to);
        for value in filters.values() {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|e| {
            error!(owner_id, kind = %kind, error = %e, "Record query failed");
            AppError::source_unavailable(format!("Failed to fetch {}: {}", kind, e))
        })?;

        debug!(owner_id, kind = %kind, rows = rows.len(), "Fetched records");
        Ok(rows)
    }
}
