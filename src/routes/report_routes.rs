use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use tracing::info;

use crate::dto::report_dto::ReportRequest;
use crate::models::report::{ClientReport, ThreePlReport};
use crate::services::report_service::ReportService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/3pl_report", get(three_pl_report))
        .route("/client_report", get(client_report))
}

/// Reporte de conductores (3PL)
async fn three_pl_report(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<ThreePlReport>> {
    let request = ReportRequest::from_query_pairs(&params)?;
    info!(
        "🚚 3PL report requested: {} → {}, filter_by={:?}, status={}",
        request.start_date, request.end_date, request.filter_by, request.status
    );

    let service = ReportService::new(state.source.clone());
    let report = service.three_pl_report(&request).await?;
    Ok(Json(report))
}

/// Reporte de clientes con histograma horario
async fn client_report(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<ClientReport>> {
    let request = ReportRequest::from_query_pairs(&params)?;
    info!(
        "🏢 Client report requested: {} → {}, filter_by={:?}, status={}, window={}-{}",
        request.start_date,
        request.end_date,
        request.filter_by,
        request.status,
        request.window.start.format("%H:%M"),
        request.window.end.format("%H:%M")
    );

    let service = ReportService::new(state.source.clone());
    let report = service.client_report(&request).await?;
    Ok(Json(report))
}
