//! Constructor de reportes
//!
//! Funciones puras: reciben las órdenes ya filtradas y devuelven el
//! resumen listo para serializar. La misma entrada produce siempre la
//! misma salida.

use crate::analysis::aggregator::{aggregate, aggregate_by, Interval};
use crate::analysis::extractors::{driver_group_key, money_to_f64, round2, round_money, TIMESTAMP_FORMAT};
use crate::analysis::time_buckets::{hourly_histogram, TimeWindow};
use crate::models::order::OrderRecord;
use crate::models::report::{
    ClientReport, ClientRow, DriverGroupCharts, DriverRow, IntervalAverages, OrderRow,
    ThreePlReport,
};

/// Construir el reporte 3PL (lado conductores)
pub fn build_3pl_report(records: &[OrderRecord]) -> ThreePlReport {
    let overall = aggregate(records);

    let mut charts = DriverGroupCharts::default();
    for (group, metrics) in aggregate_by(records, OrderRecord::driver_group) {
        charts.insert(&group, &metrics);
    }

    let table_data = aggregate_by(records, OrderRecord::driver)
        .into_iter()
        .map(|(driver, metrics)| DriverRow {
            group: driver_group_key(&driver).unwrap_or_default(),
            orders: metrics.orders,
            total_amount: money_to_f64(metrics.total_fare),
            averages: IntervalAverages::from(&metrics),
            driver,
        })
        .collect();

    let order_data = records.iter().map(order_row).collect();

    ThreePlReport {
        number_of_orders: overall.orders,
        total_fare: money_to_f64(overall.total_fare),
        average_fare: overall.average_fare.map(money_to_f64),
        average_time_taken: overall.avg_delivery_minutes,
        total_earnings: money_to_f64(overall.earnings()),
        total_revenue: money_to_f64(overall.revenue()),
        charts,
        table_data,
        order_data,
    }
}

fn order_row(order: &OrderRecord) -> OrderRow {
    OrderRow {
        driver: order.pickup_task.driver_name.clone(),
        amount: money_to_f64(round_money(order.fare)),
        time_taken: Interval::Delivery.minutes(order).map(round2),
        reference: order.reference.clone(),
        client: order.user_name.clone(),
        status: order.status.clone(),
        created_at: order
            .created_at
            .value()
            .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string()),
    }
}

/// Construir el reporte de clientes con el histograma de la ventana diaria
pub fn build_client_report(records: &[OrderRecord], window: &TimeWindow) -> ClientReport {
    let overall = aggregate(records);

    let table_data = aggregate_by(records, OrderRecord::client)
        .into_iter()
        .map(|(client, metrics)| ClientRow {
            orders: metrics.orders,
            total_fare: money_to_f64(metrics.total_fare),
            average_fare: metrics.average_fare.map(money_to_f64),
            averages: IntervalAverages::from(&metrics),
            client,
        })
        .collect();

    ClientReport {
        number_of_orders: overall.orders,
        total_fare: money_to_f64(overall.total_fare),
        average_fare: overall.average_fare.map(money_to_f64),
        average_time_taken: overall.avg_delivery_minutes,
        charts: hourly_histogram(records, window),
        table_data,
    }
}
