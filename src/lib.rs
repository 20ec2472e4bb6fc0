//! Delivery Reporting - API de reportes sobre transacciones de Verdi
//!
//! Obtiene las órdenes de entrega del API de Verdi y calcula los reportes
//! del dashboard (3PL y clientes) en cada petición.

pub mod analysis;
pub mod clients;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::trace::TraceLayer;

use middleware::cors::cors_layer;
use state::AppState;

/// Crear el router principal de la API
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .merge(routes::health_routes::create_health_router())
        .merge(routes::report_routes::create_report_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
