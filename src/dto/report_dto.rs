use chrono::NaiveDate;

use crate::analysis::time_buckets::TimeWindow;
use crate::clients::ALL_USERS;
use crate::services::report_filters::ALL;
use crate::utils::errors::{bad_request_error, validation_error, AppResult};
use crate::utils::validation::{validate_date, validate_date_range, validate_time};

pub const DEFAULT_START_TIME: &str = "00:00";
pub const DEFAULT_END_TIME: &str = "23:59";

/// Parámetros validados de una petición de reporte
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Repetible; grupos de conductores o clientes según el reporte
    pub filter_by: Vec<String>,
    pub status: String,
    pub user_id: String,
    pub window: TimeWindow,
}

impl ReportRequest {
    /// Construir la petición desde los pares `clave=valor` del query string.
    /// `filter_by` puede repetirse; para el resto se usa la primera aparición.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> AppResult<Self> {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.trim())
                .filter(|v| !v.is_empty())
        };

        let start_date = first("start_date").ok_or_else(|| bad_request_error("start_date is required (YYYY-MM-DD)"))?;
        let end_date = first("end_date").ok_or_else(|| bad_request_error("end_date is required (YYYY-MM-DD)"))?;

        let start_date = validate_date(start_date).map_err(|e| validation_error("start_date", e))?;
        let end_date = validate_date(end_date).map_err(|e| validation_error("end_date", e))?;
        validate_date_range(start_date, end_date).map_err(|e| validation_error("end_date", e))?;

        let start_time = validate_time(first("start_time").unwrap_or(DEFAULT_START_TIME))
            .map_err(|e| validation_error("start_time", e))?;
        let end_time = validate_time(first("end_time").unwrap_or(DEFAULT_END_TIME))
            .map_err(|e| validation_error("end_time", e))?;

        let filter_by = pairs
            .iter()
            .filter(|(k, _)| k == "filter_by")
            .map(|(_, v)| v.clone())
            .collect();

        Ok(Self {
            start_date,
            end_date,
            filter_by,
            status: first("status").unwrap_or(ALL).to_string(),
            user_id: first("user_id").unwrap_or(ALL_USERS).to_string(),
            window: TimeWindow::new(start_time, end_time),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use chrono::NaiveTime;

    fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
        values.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let request = ReportRequest::from_query_pairs(&pairs(&[
            ("start_date", "2025-01-01"),
            ("end_date", "2025-01-31"),
        ]))
        .unwrap();

        assert_eq!(request.status, "all");
        assert_eq!(request.user_id, "all");
        assert!(request.filter_by.is_empty());
        assert_eq!(request.window, TimeWindow::full_day());
    }

    #[test]
    fn test_repeated_filter_by() {
        let request = ReportRequest::from_query_pairs(&pairs(&[
            ("start_date", "2025-01-01"),
            ("end_date", "2025-01-01"),
            ("filter_by", "smith"),
            ("filter_by", "khan"),
            ("status", "delivered"),
            ("start_time", "22:00"),
            ("end_time", "02:00"),
        ]))
        .unwrap();

        assert_eq!(request.filter_by, vec!["smith", "khan"]);
        assert_eq!(request.status, "delivered");
        assert_eq!(request.window.start, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        assert!(request.window.crosses_midnight());
    }

    #[test]
    fn test_missing_dates_are_bad_requests() {
        let result = ReportRequest::from_query_pairs(&pairs(&[("end_date", "2025-01-31")]));
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = ReportRequest::from_query_pairs(&pairs(&[("start_date", "2025-01-01"), ("end_date", "")]));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_invalid_values_are_validation_errors() {
        let cases = vec![
            pairs(&[("start_date", "01/01/2025"), ("end_date", "2025-01-31")]),
            pairs(&[("start_date", "2025-02-01"), ("end_date", "2025-01-31")]),
            pairs(&[("start_date", "2025-01-01"), ("end_date", "2025-01-31"), ("start_time", "25:00")]),
            pairs(&[("start_date", "2025-01-01"), ("end_date", "2025-01-31"), ("end_time", "noon")]),
        ];

        for case in cases {
            let result = ReportRequest::from_query_pairs(&case);
            assert!(matches!(result, Err(AppError::Validation(_))), "case {:?}", case);
        }
    }
}
