//! Clients - HTTP Clients for External APIs
//!
//! This module contains the source of delivery transactions. The reports
//! only depend on the `TransactionSource` trait; `VerdiClient` is the
//! production implementation.

pub mod verdi_client;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::models::order::OrderRecord;

pub use verdi_client::VerdiClient;

/// Valor que desactiva el filtro de usuario en el API upstream
pub const ALL_USERS: &str = "all";

/// Parámetros de una consulta de transacciones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user_id: String,
}

/// Errores al obtener transacciones
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("upstream request timed out after {0}s")]
    Timeout(u64),

    #[error("upstream transport error: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream body could not be decoded: {0}")]
    Decode(String),
}

/// Fuente de órdenes de entrega
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn fetch_transactions(&self, query: &TransactionQuery) -> Result<Vec<OrderRecord>, SourceError>;
}
