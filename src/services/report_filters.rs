//! Filtros previos a la agregación
//!
//! Todos los filtros se combinan con AND. Un filtro sin valores, o con
//! el valor `all` en cualquier posición, queda desactivado.

use chrono::NaiveDate;

use crate::analysis::time_buckets::TimeWindow;
use crate::models::order::OrderRecord;

/// Valor centinela que desactiva un filtro
pub const ALL: &str = "all";

/// Normalizar una lista de valores de filtro.
/// `None` significa "sin filtro".
fn selection(values: &[String]) -> Option<Vec<String>> {
    let values: Vec<String> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
        .collect();

    if values.is_empty() || values.iter().any(|v| v == ALL) {
        None
    } else {
        Some(values)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportFilters {
    driver_groups: Option<Vec<String>>,
    clients: Option<Vec<String>>,
    status: Option<String>,
    date_range: Option<(NaiveDate, NaiveDate)>,
    time_window: Option<TimeWindow>,
}

impl ReportFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filtrar por grupo de conductor (apellido)
    pub fn driver_groups(mut self, groups: &[String]) -> Self {
        self.driver_groups = selection(groups);
        self
    }

    /// Filtrar por nombre de cliente (`user_name`)
    pub fn clients(mut self, clients: &[String]) -> Self {
        self.clients = selection(clients);
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = selection(&[status.to_string()]).and_then(|mut v| v.pop());
        self
    }

    /// Rango de fechas inclusivo sobre la fecha de `created_at`
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    /// Ventana horaria diaria sobre la hora de `created_at`
    pub fn time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    pub fn matches(&self, order: &OrderRecord) -> bool {
        if let Some(groups) = &self.driver_groups {
            match order.driver_group() {
                Some(group) if groups.contains(&group.to_lowercase()) => {}
                _ => return false,
            }
        }

        if let Some(clients) = &self.clients {
            if !clients.contains(&order.user_name.trim().to_lowercase()) {
                return false;
            }
        }

        if let Some(status) = &self.status {
            if order.status.trim().to_lowercase() != *status {
                return false;
            }
        }

        // Sin created_at parseable no se puede descartar: el upstream ya filtró por fecha
        if let (Some((start, end)), Some(date)) = (self.date_range, order.created_date()) {
            if date < start || date > end {
                return false;
            }
        }

        if let (Some(window), Some(time)) = (self.time_window, order.created_time()) {
            if !window.contains(time) {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, records: Vec<OrderRecord>) -> Vec<OrderRecord> {
        records.into_iter().filter(|order| self.matches(order)).collect()
    }
}
