use crate::error::ApiError;
use crate::model::none_if_empty;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// Normalized status values stored in the database as TEXT.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString,
    ToSchema,
)]
#[sqlx(type_name = "TEXT")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// One status mark for one employee on one calendar date, enriched with the
/// employee's display fields (a join, not stored columns).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "0b9e6d1a-0000-4000-8000-000000000002",
        "employee_id": "a3f1c2d4-0000-4000-8000-000000000001",
        "employee_name": "Jane Doe",
        "employee_code": "EMP001",
        "date": "2024-01-15",
        "status": "Present",
        "created_at": "2024-01-15T09:00:00Z"
    })
)]
pub struct AttendanceRecord {
    pub id: String,

    /// Internal id of the employee this record belongs to.
    pub employee_id: String,

    pub employee_name: String,

    /// The employee's business id.
    #[schema(example = "EMP001")]
    pub employee_code: String,

    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkAttendance {
    /// Internal id of the employee to mark.
    pub employee_id: String,
    #[schema(value_type = String, format = "date", example = "2024-01-15")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAttendance {
    pub status: AttendanceStatus,
}

/// Raw externally supplied filter parameters, before validation.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    /// Filter by the internal employee id
    pub employee_id: Option<String>,
    /// Inclusive lower bound, YYYY-MM-DD
    pub start_date: Option<String>,
    /// Inclusive upper bound, YYYY-MM-DD
    pub end_date: Option<String>,
    /// "Present" or "Absent"
    pub status: Option<String>,
}

/// Validated filter consumed by the ledger. Every present field narrows the
/// result with AND composition.
#[derive(Debug, Default)]
pub struct AttendanceFilter {
    pub employee_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

impl AttendanceQuery {
    /// Normalizes the raw parameters: empty strings count as omitted,
    /// malformed dates and statuses are rejected rather than ignored.
    pub fn normalize(&self) -> Result<AttendanceFilter, ApiError> {
        let status = match none_if_empty(self.status.as_deref()) {
            Some(raw) => Some(AttendanceStatus::from_str(&raw).map_err(|_| {
                ApiError::Validation(format!(
                    "'{raw}' is not a valid attendance status (expected Present or Absent)"
                ))
            })?),
            None => None,
        };

        Ok(AttendanceFilter {
            employee_id: none_if_empty(self.employee_id.as_deref()),
            start_date: parse_date_param(self.start_date.as_deref(), "start_date")?,
            end_date: parse_date_param(self.end_date.as_deref(), "end_date")?,
            status,
        })
    }
}

fn parse_date_param(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    match none_if_empty(value) {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ApiError::Validation(format!("'{raw}' is not a valid {field} (expected YYYY-MM-DD)"))
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_count_as_omitted() {
        let query = AttendanceQuery {
            employee_id: Some("   ".into()),
            start_date: Some("".into()),
            end_date: None,
            status: Some("".into()),
        };
        let filter = query.normalize().unwrap();
        assert!(filter.employee_id.is_none());
        assert!(filter.start_date.is_none());
        assert!(filter.end_date.is_none());
        assert!(filter.status.is_none());
    }

    #[test]
    fn valid_parameters_are_parsed() {
        let query = AttendanceQuery {
            employee_id: Some("abc-123".into()),
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-31".into()),
            status: Some("Present".into()),
        };
        let filter = query.normalize().unwrap();
        assert_eq!(filter.employee_id.as_deref(), Some("abc-123"));
        assert_eq!(
            filter.start_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(
            filter.end_date,
            Some(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
        assert_eq!(filter.status, Some(AttendanceStatus::Present));
    }

    #[test]
    fn malformed_dates_are_rejected_not_ignored() {
        let query = AttendanceQuery {
            start_date: Some("15/01/2024".into()),
            ..Default::default()
        };
        let err = query.normalize().unwrap_err();
        assert_eq!(err.kind(), "validation_error");
        assert!(err.to_string().contains("start_date"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let query = AttendanceQuery {
            status: Some("Late".into()),
            ..Default::default()
        };
        let err = query.normalize().unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }
}
