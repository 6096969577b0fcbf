mod memory_record_source;
mod mysql_record_source;
mod record_source;

pub use memory_record_source::InMemoryRecordSource;
pub use mysql_record_source::{build_select, MySqlRecordSource};
pub use record_source::{RecordFilters, RecordSource};
