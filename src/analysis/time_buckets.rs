//! Buckets horarios para el reporte de clientes
//!
//! Una ventana diaria (hora de inicio y de fin, sin fecha) se divide en
//! buckets de una hora. Si la hora de fin es anterior a la de inicio, la
//! ventana cruza la medianoche.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::models::order::OrderRecord;

/// Máximo de barras por gráfico antes de dividirlo en dos
pub const MAX_BARS_PER_CHART: usize = 10;

const MINUTES_PER_DAY: u32 = 24 * 60;

pub const HOURLY_CHART_TITLE: &str = "Orders per Hour";

/// Ventana horaria diaria, límites inclusivos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Ventana de día completo (00:00 - 23:59)
    pub fn full_day() -> Self {
        Self {
            start: NaiveTime::default(),
            end: NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default(),
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Comprobar si una hora del día cae en la ventana (precisión de minuto)
    pub fn contains(&self, time: NaiveTime) -> bool {
        let minute = minute_of_day(time);
        let start = minute_of_day(self.start);
        let end = minute_of_day(self.end);

        if start <= end {
            start <= minute && minute <= end
        } else {
            minute >= start || minute <= end
        }
    }
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Intervalo de una hora `[start_hour, start_hour + 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourBucket {
    pub start_hour: u32,
}

impl HourBucket {
    pub fn label(&self) -> String {
        format!("{}-{}", self.start_hour, (self.start_hour + 1) % 24)
    }
}

/// Buckets que cubren la ventana, en orden cronológico
pub fn hour_buckets(window: &TimeWindow) -> Vec<HourBucket> {
    let start = minute_of_day(window.start);
    let mut end = minute_of_day(window.end);
    if end < start {
        end += MINUTES_PER_DAY;
    }

    let first_hour = start / 60;
    // La hora de fin entra solo si tiene minutos
    let last_hour_exclusive = end.div_ceil(60);
    let count = last_hour_exclusive.saturating_sub(first_hour).clamp(1, 24);

    (0..count)
        .map(|offset| HourBucket {
            start_hour: (first_hour + offset) % 24,
        })
        .collect()
}

/// Gráfico de barras de órdenes por hora
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyChart {
    pub title: String,
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

/// Posición del bucket de una hora del día dentro de la ventana.
/// El minuto de cierre en punto (p. ej. 10:00 en 08:00 - 10:00) no tiene
/// bucket propio y cuenta en el último.
fn bucket_position(buckets: &[HourBucket], window: &TimeWindow, time: NaiveTime) -> Option<usize> {
    if !window.contains(time) {
        return None;
    }
    buckets
        .iter()
        .position(|b| b.start_hour == time.hour())
        .or_else(|| buckets.len().checked_sub(1))
}

/// Histograma de órdenes por hora de creación sobre toda la ventana.
/// Los buckets vacíos se mantienen con cero.
pub fn hourly_histogram(records: &[OrderRecord], window: &TimeWindow) -> Vec<HourlyChart> {
    let buckets = hour_buckets(window);
    let mut counts = vec![0usize; buckets.len()];

    for time in records.iter().filter_map(OrderRecord::created_time) {
        if let Some(position) = bucket_position(&buckets, window, time) {
            counts[position] += 1;
        }
    }

    let labels: Vec<String> = buckets.iter().map(HourBucket::label).collect();

    if labels.len() <= MAX_BARS_PER_CHART {
        return vec![HourlyChart {
            title: HOURLY_CHART_TITLE.to_string(),
            labels,
            counts,
        }];
    }

    let split = labels.len() / 2;
    vec![
        HourlyChart {
            title: format!("{} (1/2)", HOURLY_CHART_TITLE),
            labels: labels[..split].to_vec(),
            counts: counts[..split].to_vec(),
        },
        HourlyChart {
            title: format!("{} (2/2)", HOURLY_CHART_TITLE),
            labels: labels[split..].to_vec(),
            counts: counts[split..].to_vec(),
        },
    ]
}
