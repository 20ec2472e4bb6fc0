//! Extractores de campos
//!
//! Parseo tolerante de montos y timestamps. Ninguna función de este
//! módulo falla: un valor inválido se convierte en cero o en ausente.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::order::Timestamp;

/// Formato de timestamp del API de Verdi
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Monto máximo aceptado por orden; por encima se trata como mal formado
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Parsear un monto con signo y devolver su valor absoluto.
/// Devuelve cero si el texto no es un decimal válido o supera `MAX_AMOUNT`.
pub fn parse_amount(raw: &str) -> Decimal {
    let raw = raw.trim();
    raw.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(raw))
        .map(|amount| amount.abs())
        .ok()
        .filter(|amount| *amount <= MAX_AMOUNT)
        .unwrap_or(Decimal::ZERO)
}

/// Parsear un timestamp `YYYY-MM-DD HH:MM:SS`
pub fn parse_timestamp(raw: &str) -> Timestamp {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Timestamp::Missing;
    }

    match NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT) {
        Ok(dt) => Timestamp::Parsed(dt),
        Err(_) => Timestamp::Malformed(raw.to_string()),
    }
}

/// Minutos transcurridos de `from` a `to`; negativo si `to` es anterior
pub fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 60.0
}

/// Clave de grupo del conductor: último token del nombre, en mayúsculas
pub fn driver_group_key(driver_name: &str) -> Option<String> {
    driver_name
        .split_whitespace()
        .last()
        .map(|token| token.to_uppercase())
}

/// Redondear a 2 decimales
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Redondear un monto a 2 decimales (mitad lejos de cero)
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Convertir un monto a número JSON
pub fn money_to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}
