//! Modelos de órdenes de entrega
//!
//! Un `OrderRecord` es una transacción devuelta por el API de Verdi,
//! decodificada una sola vez al ingresar. Los campos ausentes o mal
//! formados nunca abortan la decodificación.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::analysis::extractors::{driver_group_key, parse_amount, parse_timestamp};

/// Timestamp de un evento de la orden
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Timestamp {
    Parsed(NaiveDateTime),
    /// Campo ausente, null o vacío
    #[default]
    Missing,
    /// Texto presente que no respeta `YYYY-MM-DD HH:MM:SS`
    Malformed(String),
}

impl Timestamp {
    pub fn value(&self) -> Option<NaiveDateTime> {
        match self {
            Timestamp::Parsed(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Timestamp::Malformed(_))
    }
}

/// Tarea de recogida (lado 3PL)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickupTask {
    pub driver_name: String,
    pub assigned_at: Timestamp,
    pub arrived_at: Timestamp,
    pub successful_at: Timestamp,
}

/// Tarea de entrega
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryTask {
    pub started_at: Timestamp,
    pub arrived_at: Timestamp,
    pub successful_at: Timestamp,
}

/// Orden de entrega decodificada
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRecord {
    /// Valor absoluto de `amount`, cero si no se pudo parsear
    pub fare: Decimal,
    pub created_at: Timestamp,
    pub status: String,
    pub user_name: String,
    pub reference: String,
    pub pickup_task: PickupTask,
    pub delivery_task: DeliveryTask,
}

impl OrderRecord {
    /// Decodificar una orden desde el JSON del API upstream
    pub fn from_json(json_data: &Value) -> Self {
        let pickup = json_data.get("pickup_task").unwrap_or(&Value::Null);
        let delivery = json_data.get("delivery_task").unwrap_or(&Value::Null);

        OrderRecord {
            fare: json_data
                .get("amount")
                .and_then(scalar_text)
                .map(|raw| parse_amount(&raw))
                .unwrap_or(Decimal::ZERO),
            created_at: timestamp_field(json_data, "created_at"),
            status: string_field(json_data, "status"),
            user_name: string_field(json_data, "user_name"),
            reference: string_field(json_data, "reference"),
            pickup_task: PickupTask {
                driver_name: string_field(pickup, "driver_name"),
                assigned_at: timestamp_field(pickup, "assigned_at"),
                arrived_at: timestamp_field(pickup, "arrived_at"),
                successful_at: timestamp_field(pickup, "successful_at"),
            },
            delivery_task: DeliveryTask {
                started_at: timestamp_field(delivery, "started_at"),
                arrived_at: timestamp_field(delivery, "arrived_at"),
                successful_at: timestamp_field(delivery, "successful_at"),
            },
        }
    }

    /// Grupo del conductor: último token del nombre en mayúsculas
    pub fn driver_group(&self) -> Option<String> {
        driver_group_key(&self.pickup_task.driver_name)
    }

    /// Nombre del conductor normalizado: espacios colapsados y cada
    /// palabra capitalizada, así "JOHN SMITH" y "john smith" son la misma fila
    pub fn driver(&self) -> Option<String> {
        let name = self
            .pickup_task
            .driver_name
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    pub fn client(&self) -> Option<String> {
        let name = self.user_name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    /// Momento en que la orden se considera completada.
    /// El éxito de la entrega manda; sin él se usa el éxito de la recogida.
    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.delivery_task
            .successful_at
            .value()
            .or_else(|| self.pickup_task.successful_at.value())
    }

    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created_at.value().map(|dt| dt.date())
    }

    pub fn created_time(&self) -> Option<NaiveTime> {
        self.created_at.value().map(|dt| dt.time())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// Strings y números se aceptan; cualquier otro tipo cuenta como ausente
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(json_data: &Value, key: &str) -> String {
    json_data
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn timestamp_field(json_data: &Value, key: &str) -> Timestamp {
    match json_data.get(key) {
        Some(Value::String(raw)) => parse_timestamp(raw),
        Some(Value::Null) | None => Timestamp::Missing,
        Some(other) => Timestamp::Malformed(other.to_string()),
    }
}
