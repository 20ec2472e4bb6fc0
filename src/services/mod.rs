//! Services module
//!
//! Este módulo contiene la lógica de negocio de los reportes: filtros
//! previos a la agregación y el servicio que orquesta cada petición.

pub mod report_filters;
pub mod report_service;

pub use report_filters::ReportFilters;
pub use report_service::ReportService;
