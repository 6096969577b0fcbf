//! Fleet metrics engine
//!
//! Computes vendor-facing reports (dashboard, financial summary, maintenance
//! costs, review statistics) from booking, transaction, maintenance and review
//! records, and serves them over HTTP.

pub mod config;
pub mod core;
pub mod modules;

pub use modules::metrics;
pub use modules::records;
pub use modules::reports;
