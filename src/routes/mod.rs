pub mod health_routes;
pub mod report_routes;
