//! Cliente HTTP para el API de transacciones de Verdi
//!
//! Una sola llamada `GET /api/transaction_data` autenticada con token
//! Bearer. Cualquier status no exitoso hace fallar la petición completa.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{SourceError, TransactionQuery, TransactionSource};
use crate::models::order::OrderRecord;

/// Cliente HTTP para Verdi
pub struct VerdiClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl VerdiClient {
    /// Crear nuevo cliente con timeout acotado
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("DeliveryReporting/1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        })
    }

    fn transactions_url(&self) -> String {
        format!("{}/api/transaction_data", self.base_url)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::Timeout(self.timeout.as_secs())
        } else {
            SourceError::Transport(error.to_string())
        }
    }
}

/// Extraer la lista de órdenes del body. Se acepta un array directo o
/// un objeto que lo envuelve en `data`.
fn decode_orders(body: Value) -> Result<Vec<OrderRecord>, SourceError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(SourceError::Decode("expected a list of transactions".to_string())),
        },
        other => {
            return Err(SourceError::Decode(format!(
                "expected a list of transactions, got {}",
                other
            )))
        }
    };

    Ok(items.iter().map(OrderRecord::from_json).collect())
}

#[async_trait]
impl TransactionSource for VerdiClient {
    async fn fetch_transactions(&self, query: &TransactionQuery) -> Result<Vec<OrderRecord>, SourceError> {
        let url = self.transactions_url();
        let start_date = query.start_date.format("%Y-%m-%d").to_string();
        let end_date = query.end_date.format("%Y-%m-%d").to_string();

        log::info!(
            "🌐 Fetching transactions: user_id={} start_date={} end_date={}",
            query.user_id,
            start_date,
            end_date
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .query(&[
                ("user_id", query.user_id.as_str()),
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        log::info!("📡 Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Verdi API failed with status {}: {}", status, body);
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout.as_secs())
            } else {
                SourceError::Decode(e.to_string())
            }
        })?;

        let orders = decode_orders(body)?;
        log::info!("✅ Received {} transactions", orders.len());
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    fn query() -> TransactionQuery {
        TransactionQuery {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            user_id: "all".to_string(),
        }
    }

    fn client_for(server: &MockServer, timeout: Duration) -> VerdiClient {
        VerdiClient::new(server.base_url(), "secret".to_string(), timeout).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_transactions() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/transaction_data")
                    .header("authorization", "Bearer secret")
                    .query_param("user_id", "all")
                    .query_param("start_date", "2025-01-01")
                    .query_param("end_date", "2025-01-31");
                then.status(200).json_body(json!([
                    { "amount": "-10.00", "pickup_task": { "driver_name": "John Smith" } },
                    { "amount": "5" }
                ]));
            })
            .await;

        let orders = client_for(&server, Duration::from_secs(5))
            .fetch_transactions(&query())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].driver_group().as_deref(), Some("SMITH"));
    }

    #[tokio::test]
    async fn test_fetch_wrapped_data() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/transaction_data");
                then.status(200).json_body(json!({ "data": [{ "amount": "1" }] }));
            })
            .await;

        let orders = client_for(&server, Duration::from_secs(5))
            .fetch_transactions(&query())
            .await
            .unwrap();
        assert_eq!(orders.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/transaction_data");
                then.status(401).body("invalid token");
            })
            .await;

        let result = client_for(&server, Duration::from_secs(5))
            .fetch_transactions(&query())
            .await;

        match result {
            Err(SourceError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid token");
            }
            other => panic!("expected status error, got {:?}", other.map(|o| o.len())),
        }
    }

    #[tokio::test]
    async fn test_unexpected_body_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/transaction_data");
                then.status(200).json_body(json!({ "message": "no data" }));
            })
            .await;

        let result = client_for(&server, Duration::from_secs(5))
            .fetch_transactions(&query())
            .await;
        assert!(matches!(result, Err(SourceError::Decode(_))));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/transaction_data");
                then.status(200)
                    .delay(Duration::from_millis(1500))
                    .json_body(json!([]));
            })
            .await;

        let result = client_for(&server, Duration::from_millis(200))
            .fetch_transactions(&query())
            .await;
        assert!(matches!(result, Err(SourceError::Timeout(_))));
    }

    #[test]
    fn test_decode_orders() {
        assert_eq!(decode_orders(json!([])).unwrap().len(), 0);
        assert_eq!(decode_orders(json!([null, 1, {}])).unwrap().len(), 3);
        assert!(decode_orders(json!("text")).is_err());
    }
}
