//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Es inmutable: cada petición calcula su
//! reporte sin compartir nada mutable con las demás.

use std::sync::Arc;

use anyhow::Result;

use crate::clients::{TransactionSource, VerdiClient};
use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub source: Arc<dyn TransactionSource>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, source: Arc<dyn TransactionSource>) -> Self {
        Self { config, source }
    }

    /// Estado de producción con el cliente de Verdi
    pub fn from_config(config: EnvironmentConfig) -> Result<Self> {
        let client = VerdiClient::new(
            config.verdi_api_url.clone(),
            config.verdi_api_key.clone(),
            config.upstream_timeout,
        )?;
        Ok(Self::new(config, Arc::new(client)))
    }
}
