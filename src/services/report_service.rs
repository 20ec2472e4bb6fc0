//! Servicio de reportes
//!
//! Orquesta cada petición: obtiene las transacciones del upstream,
//! aplica los filtros y construye el reporte. No hay cache; cada
//! llamada vuelve a pedir los datos.

use std::sync::Arc;

use crate::analysis::{build_3pl_report, build_client_report};
use crate::clients::{TransactionQuery, TransactionSource};
use crate::dto::report_dto::ReportRequest;
use crate::models::order::OrderRecord;
use crate::models::report::{ClientReport, ThreePlReport};
use crate::services::report_filters::ReportFilters;
use crate::utils::errors::AppResult;

pub struct ReportService {
    source: Arc<dyn TransactionSource>,
}

impl ReportService {
    pub fn new(source: Arc<dyn TransactionSource>) -> Self {
        Self { source }
    }

    async fn fetch(&self, request: &ReportRequest) -> AppResult<Vec<OrderRecord>> {
        let query = TransactionQuery {
            start_date: request.start_date,
            end_date: request.end_date,
            user_id: request.user_id.clone(),
        };
        Ok(self.source.fetch_transactions(&query).await?)
    }

    /// Reporte 3PL: `filter_by` son grupos de conductores
    pub async fn three_pl_report(&self, request: &ReportRequest) -> AppResult<ThreePlReport> {
        let records = self.fetch(request).await?;
        let fetched = records.len();

        let filters = ReportFilters::new()
            .driver_groups(&request.filter_by)
            .status(&request.status)
            .date_range(request.start_date, request.end_date);
        let records = filters.apply(records);

        log::info!("📊 3PL report: {} of {} transactions kept after filters", records.len(), fetched);
        Ok(build_3pl_report(&records))
    }

    /// Reporte de clientes: `filter_by` son nombres de clientes
    pub async fn client_report(&self, request: &ReportRequest) -> AppResult<ClientReport> {
        let records = self.fetch(request).await?;
        let fetched = records.len();

        let filters = ReportFilters::new()
            .clients(&request.filter_by)
            .status(&request.status)
            .date_range(request.start_date, request.end_date)
            .time_window(request.window);
        let records = filters.apply(records);

        log::info!("📊 Client report: {} of {} transactions kept after filters", records.len(), fetched);
        Ok(build_client_report(&records, &request.window))
    }
}
