//! Motor de agregación de reportes
//!
//! Extractores de campos, agregador por grupos, buckets horarios y
//! constructores de los dos reportes (3PL y clientes).

pub mod aggregator;
pub mod extractors;
pub mod report_builder;
pub mod time_buckets;

pub use report_builder::{build_3pl_report, build_client_report};
pub use time_buckets::TimeWindow;
