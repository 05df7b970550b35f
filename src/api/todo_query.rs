use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::ApiError;
use crate::services::TodoQuery;

/// Raw `GET /todos` query string.
///
/// Timestamps arrive as RFC 3339 text and a blank `weather` means "any".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub weather: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl TodoListParams {
    pub fn into_query(self) -> Result<TodoQuery, ApiError> {
        let mut field_errors = HashMap::new();
        let start = parse_timestamp("start", self.start.as_deref(), &mut field_errors);
        let end = parse_timestamp("end", self.end.as_deref(), &mut field_errors);

        if !field_errors.is_empty() {
            return Err(ApiError::validation_error("Invalid query parameters", Some(field_errors)));
        }

        Ok(TodoQuery {
            page: self.page,
            size: self.size,
            weather: self.weather.filter(|w| !w.trim().is_empty()),
            start,
            end,
        })
    }
}

fn parse_timestamp(
    field: &str,
    value: Option<&str>,
    field_errors: &mut HashMap<String, String>,
) -> Option<DateTime<Utc>> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            field_errors.insert(field.to_string(), format!("expected RFC 3339 timestamp: {}", e));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn blank_values_mean_absent() {
        let query = TodoListParams {
            weather: Some("  ".into()),
            start: Some(String::new()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.weather, None);
        assert_eq!(query.start, None);
    }

    #[test]
    fn offsets_are_normalised_to_utc() {
        let query = TodoListParams {
            start: Some("2024-03-01T09:00:00+09:00".into()),
            ..Default::default()
        }
        .into_query()
        .unwrap();
        assert_eq!(query.start, Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn bad_timestamps_are_reported_per_field() {
        let err = TodoListParams {
            start: Some("yesterday".into()),
            end: Some("tomorrow".into()),
            ..Default::default()
        }
        .into_query()
        .unwrap_err();
        let body = err.to_json();
        assert!(body["field_errors"]["start"].is_string());
        assert!(body["field_errors"]["end"].is_string());
    }
}
