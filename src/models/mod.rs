//! Modelos del sistema
//!
//! Este módulo contiene las órdenes decodificadas del API de Verdi y
//! los modelos de los reportes que devuelve la API.

pub mod order;
pub mod report;

pub use order::{DeliveryTask, OrderRecord, PickupTask, Timestamp};
pub use report::{ClientReport, ThreePlReport};
