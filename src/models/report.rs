//! Modelos de reportes
//!
//! Forma fija de los JSON que consume el dashboard. Los nombres de las
//! claves se mantienen tal cual los lee el front end.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::aggregator::EntityMetrics;
use crate::analysis::extractors::money_to_f64;
use crate::analysis::time_buckets::HourlyChart;

/// Promedios de los cinco intervalos, en minutos
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalAverages {
    #[serde(rename = "Average Time Taken")]
    pub delivery: Option<f64>,
    #[serde(rename = "Average Assignment Time")]
    pub assignment: Option<f64>,
    #[serde(rename = "Average Pickup Wait")]
    pub pickup_wait: Option<f64>,
    #[serde(rename = "Average Travel Time")]
    pub travel: Option<f64>,
    #[serde(rename = "Average Dropoff Wait")]
    pub dropoff_wait: Option<f64>,
}

impl From<&EntityMetrics> for IntervalAverages {
    fn from(metrics: &EntityMetrics) -> Self {
        Self {
            delivery: metrics.avg_delivery_minutes,
            assignment: metrics.avg_assignment_minutes,
            pickup_wait: metrics.avg_pickup_wait_minutes,
            travel: metrics.avg_travel_minutes,
            dropoff_wait: metrics.avg_dropoff_wait_minutes,
        }
    }
}

// ===== Reporte 3PL =====

/// Gráficos por grupo de conductores (clave = apellido en mayúsculas)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DriverGroupCharts {
    pub number_of_orders: BTreeMap<String, usize>,
    pub total_fare: BTreeMap<String, f64>,
    pub average_fare: BTreeMap<String, Option<f64>>,
    pub total_earnings: BTreeMap<String, f64>,
}

impl DriverGroupCharts {
    pub fn insert(&mut self, group: &str, metrics: &EntityMetrics) {
        self.number_of_orders.insert(group.to_string(), metrics.orders);
        self.total_fare
            .insert(group.to_string(), money_to_f64(metrics.total_fare));
        self.average_fare
            .insert(group.to_string(), metrics.average_fare.map(money_to_f64));
        self.total_earnings
            .insert(group.to_string(), money_to_f64(metrics.earnings()));
    }
}

/// Fila de detalle por conductor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRow {
    #[serde(rename = "Driver")]
    pub driver: String,
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Orders")]
    pub orders: usize,
    #[serde(rename = "Total Amount")]
    pub total_amount: f64,
    #[serde(flatten)]
    pub averages: IntervalAverages,
}

/// Fila por orden
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    #[serde(rename = "Driver")]
    pub driver: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Time Taken")]
    pub time_taken: Option<f64>,
    #[serde(rename = "Reference")]
    pub reference: String,
    #[serde(rename = "Client")]
    pub client: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Created At")]
    pub created_at: Option<String>,
}

/// Resumen del reporte 3PL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreePlReport {
    #[serde(rename = "Number of Orders")]
    pub number_of_orders: usize,
    #[serde(rename = "Total Fare")]
    pub total_fare: f64,
    #[serde(rename = "Average Fare")]
    pub average_fare: Option<f64>,
    #[serde(rename = "Average Time Taken (minutes)")]
    pub average_time_taken: Option<f64>,
    #[serde(rename = "Total Earnings")]
    pub total_earnings: f64,
    #[serde(rename = "Total Revenue")]
    pub total_revenue: f64,
    #[serde(rename = "Charts")]
    pub charts: DriverGroupCharts,
    pub table_data: Vec<DriverRow>,
    pub order_data: Vec<OrderRow>,
}

// ===== Reporte de clientes =====

/// Fila de detalle por cliente
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRow {
    #[serde(rename = "Client")]
    pub client: String,
    #[serde(rename = "Orders")]
    pub orders: usize,
    #[serde(rename = "Total Fare")]
    pub total_fare: f64,
    #[serde(rename = "Average Fare")]
    pub average_fare: Option<f64>,
    #[serde(flatten)]
    pub averages: IntervalAverages,
}

/// Resumen del reporte de clientes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientReport {
    #[serde(rename = "Number of Orders")]
    pub number_of_orders: usize,
    #[serde(rename = "Total Fare")]
    pub total_fare: f64,
    #[serde(rename = "Average Fare")]
    pub average_fare: Option<f64>,
    #[serde(rename = "Average Time Taken (minutes)")]
    pub average_time_taken: Option<f64>,
    #[serde(rename = "Charts")]
    pub charts: Vec<HourlyChart>,
    pub table_data: Vec<ClientRow>,
}
