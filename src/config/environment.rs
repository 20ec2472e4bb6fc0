//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: servidor, API de
//! Verdi y CORS. Se carga una sola vez al arrancar.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

pub const DEFAULT_VERDI_API_URL: &str = "https://tryverdi.com";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    // API de Verdi
    pub verdi_api_url: String,
    pub verdi_api_key: String,
    pub upstream_timeout: Duration,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let verdi_api_key = var("VERDI_API_KEY").ok_or_else(|| anyhow!("VERDI_API_KEY must be set"))?;

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => 5000,
        };

        let timeout_secs = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("UPSTREAM_TIMEOUT_SECS must be a valid number, got '{}'", raw))?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            verdi_api_url: var("VERDI_API_URL")
                .unwrap_or_else(|| DEFAULT_VERDI_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            verdi_api_key,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
