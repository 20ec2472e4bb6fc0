//! Agregador de métricas
//!
//! Agrupa órdenes por una clave arbitraria y calcula, con un único fold
//! por grupo, el número de órdenes, la tarifa total y los promedios de
//! los cinco intervalos de tiempo de una entrega.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::analysis::extractors::{minutes_between, round2, round_money};
use crate::models::order::OrderRecord;

/// Parte de la tarifa que corresponde al conductor
pub const EARNINGS_SHARE: Decimal = Decimal::from_parts(85, 0, 0, false, 2);

/// Agrupar órdenes por clave conservando el orden de primera aparición.
/// Las órdenes cuya clave es `None` quedan fuera.
pub fn group_by<'a, F>(records: &'a [OrderRecord], key_fn: F) -> Vec<(String, Vec<&'a OrderRecord>)>
where
    F: Fn(&OrderRecord) -> Option<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<&'a OrderRecord>)> = Vec::new();

    for record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };

        match index.get(&key) {
            Some(&position) => groups[position].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }

    groups
}

/// Media aritmética redondeada a 2 decimales; `None` si no hay muestras
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(round2(values.iter().sum::<f64>() / values.len() as f64))
}

/// Intervalos de tiempo medidos sobre cada orden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    /// Creación → orden completada
    Delivery,
    /// Creación → conductor asignado
    Assignment,
    /// Llegada a recogida → recogida exitosa
    PickupWait,
    /// Inicio de entrega → llegada a destino
    Travel,
    /// Llegada a destino → entrega exitosa
    DropoffWait,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::Delivery,
        Interval::Assignment,
        Interval::PickupWait,
        Interval::Travel,
        Interval::DropoffWait,
    ];

    fn endpoints(self, order: &OrderRecord) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        let pickup = &order.pickup_task;
        let delivery = &order.delivery_task;
        match self {
            Interval::Delivery => (order.created_at.value(), order.completed_at()),
            Interval::Assignment => (order.created_at.value(), pickup.assigned_at.value()),
            Interval::PickupWait => (pickup.arrived_at.value(), pickup.successful_at.value()),
            Interval::Travel => (delivery.started_at.value(), delivery.arrived_at.value()),
            Interval::DropoffWait => (delivery.arrived_at.value(), delivery.successful_at.value()),
        }
    }

    /// Minutos del intervalo, solo si ambos extremos existen
    pub fn minutes(self, order: &OrderRecord) -> Option<f64> {
        match self.endpoints(order) {
            (Some(from), Some(to)) => Some(minutes_between(from, to)),
            _ => None,
        }
    }
}

/// Acumulador por grupo
#[derive(Debug, Default, Clone)]
pub struct MetricsAccumulator {
    orders: usize,
    fare: Decimal,
    delivery: Vec<f64>,
    assignment: Vec<f64>,
    pickup_wait: Vec<f64>,
    travel: Vec<f64>,
    dropoff_wait: Vec<f64>,
}

impl MetricsAccumulator {
    pub fn add(mut self, order: &OrderRecord) -> Self {
        self.orders += 1;
        self.fare = self.fare.saturating_add(order.fare);
        for interval in Interval::ALL {
            if let Some(minutes) = interval.minutes(order) {
                self.samples_mut(interval).push(minutes);
            }
        }
        self
    }

    fn samples_mut(&mut self, interval: Interval) -> &mut Vec<f64> {
        match interval {
            Interval::Delivery => &mut self.delivery,
            Interval::Assignment => &mut self.assignment,
            Interval::PickupWait => &mut self.pickup_wait,
            Interval::Travel => &mut self.travel,
            Interval::DropoffWait => &mut self.dropoff_wait,
        }
    }

    pub fn finish(self) -> EntityMetrics {
        let total_fare = round_money(self.fare);
        let average_fare = if self.orders > 0 {
            Some(round_money(total_fare / Decimal::from(self.orders)))
        } else {
            None
        };

        EntityMetrics {
            orders: self.orders,
            total_fare,
            average_fare,
            avg_delivery_minutes: average(&self.delivery),
            avg_assignment_minutes: average(&self.assignment),
            avg_pickup_wait_minutes: average(&self.pickup_wait),
            avg_travel_minutes: average(&self.travel),
            avg_dropoff_wait_minutes: average(&self.dropoff_wait),
        }
    }
}

/// Métricas finales de un grupo (o del conjunto completo)
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetrics {
    pub orders: usize,
    pub total_fare: Decimal,
    pub average_fare: Option<Decimal>,
    pub avg_delivery_minutes: Option<f64>,
    pub avg_assignment_minutes: Option<f64>,
    pub avg_pickup_wait_minutes: Option<f64>,
    pub avg_travel_minutes: Option<f64>,
    pub avg_dropoff_wait_minutes: Option<f64>,
}

impl EntityMetrics {
    pub fn earnings(&self) -> Decimal {
        round_money(self.total_fare.saturating_mul(EARNINGS_SHARE))
    }

    pub fn revenue(&self) -> Decimal {
        round_money(
            self.total_fare
                .saturating_sub(self.total_fare.saturating_mul(EARNINGS_SHARE)),
        )
    }
}

/// Fold de un conjunto de órdenes
pub fn aggregate<'a, I>(records: I) -> EntityMetrics
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    records
        .into_iter()
        .fold(MetricsAccumulator::default(), MetricsAccumulator::add)
        .finish()
}

/// Agrupar y agregar en un solo paso
pub fn aggregate_by<F>(records: &[OrderRecord], key_fn: F) -> Vec<(String, EntityMetrics)>
where
    F: Fn(&OrderRecord) -> Option<String>,
{
    group_by(records, key_fn)
        .into_iter()
        .map(|(key, group)| (key, aggregate(group)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(value: serde_json::Value) -> OrderRecord {
        OrderRecord::from_json(&value)
    }

    #[test]
    fn test_group_by_preserves_first_seen_order() {
        let records = vec![
            order(json!({ "pickup_task": { "driver_name": "Ann Zed" } })),
            order(json!({ "pickup_task": { "driver_name": "Bob Adams" } })),
            order(json!({ "pickup_task": { "driver_name": "carl zed" } })),
            order(json!({ "pickup_task": {} })),
        ];

        let groups = group_by(&records, OrderRecord::driver_group);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["ZED", "ADAMS"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups.iter().map(|(_, g)| g.len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[10.0, 20.0]), Some(15.0));
        assert_eq!(average(&[1.0, 1.0, 2.0]), Some(1.33));
        assert_eq!(average(&[0.0]), Some(0.0));
    }

    #[test]
    fn test_intervals_are_independent() {
        let record = order(json!({
            "created_at": "2025-01-01 10:00:00",
            "pickup_task": {
                "assigned_at": "2025-01-01 10:03:00",
                "arrived_at": "garbage",
                "successful_at": "2025-01-01 10:12:00"
            },
            "delivery_task": {
                "started_at": "2025-01-01 10:15:00",
                "arrived_at": "2025-01-01 10:45:00",
                "successful_at": "2025-01-01 10:50:00"
            }
        }));

        let metrics = aggregate([&record]);
        assert_eq!(metrics.avg_delivery_minutes, Some(50.0));
        assert_eq!(metrics.avg_assignment_minutes, Some(3.0));
        assert_eq!(metrics.avg_pickup_wait_minutes, None);
        assert_eq!(metrics.avg_travel_minutes, Some(30.0));
        assert_eq!(metrics.avg_dropoff_wait_minutes, Some(5.0));
    }

    #[test]
    fn test_partial_samples_only_reduce_their_own_average() {
        let records = vec![
            order(json!({
                "created_at": "2025-01-01 10:00:00",
                "delivery_task": { "successful_at": "2025-01-01 10:30:00" }
            })),
            order(json!({ "created_at": "2025-01-01 11:00:00" })),
        ];

        let metrics = aggregate(&records);
        assert_eq!(metrics.orders, 2);
        assert_eq!(metrics.avg_delivery_minutes, Some(30.0));
        assert_eq!(metrics.avg_assignment_minutes, None);
    }

    #[test]
    fn test_fare_totals_and_split() {
        let records = vec![
            order(json!({ "amount": "-10.005" })),
            order(json!({ "amount": "5.10" })),
            order(json!({ "amount": "oops" })),
        ];

        let metrics = aggregate(&records);
        assert_eq!(metrics.total_fare, Decimal::new(1511, 2));
        assert_eq!(metrics.average_fare, Some(Decimal::new(504, 2)));
        assert_eq!(metrics.earnings(), Decimal::new(1284, 2));
        assert_eq!(metrics.revenue(), Decimal::new(227, 2));
    }

    #[test]
    fn test_huge_amounts_do_not_abort_aggregation() {
        let mut records: Vec<OrderRecord> = (0..10)
            .map(|_| order(json!({ "amount": "50000000000000000000000000000" })))
            .collect();
        records.push(order(json!({ "amount": "10.00" })));

        let metrics = aggregate(&records);
        assert_eq!(metrics.orders, 11);
        assert_eq!(metrics.total_fare, Decimal::new(1000, 2));
        assert_eq!(metrics.earnings() + metrics.revenue(), metrics.total_fare);
    }

    #[test]
    fn test_saturating_totals() {
        let mut accumulator = MetricsAccumulator::default();
        let mut record = order(json!({}));
        record.fare = Decimal::MAX;
        accumulator = accumulator.add(&record).add(&record);

        let metrics = accumulator.finish();
        assert_eq!(metrics.orders, 2);
        assert_eq!(metrics.total_fare, Decimal::MAX);
        assert!(metrics.earnings() > Decimal::ZERO);
        assert!(metrics.revenue() >= Decimal::ZERO);
    }

    #[test]
    fn test_empty_aggregate_is_no_data() {
        let metrics = aggregate(&Vec::<OrderRecord>::new());
        assert_eq!(metrics.orders, 0);
        assert_eq!(metrics.total_fare, Decimal::ZERO);
        assert_eq!(metrics.average_fare, None);
        assert_eq!(metrics.avg_delivery_minutes, None);
        assert_eq!(metrics.earnings(), Decimal::ZERO);
    }
}
