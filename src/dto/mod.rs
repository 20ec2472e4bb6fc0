//! DTOs de la API
//!
//! Parámetros de entrada de los endpoints, ya validados.

pub mod report_dto;

pub use report_dto::ReportRequest;
