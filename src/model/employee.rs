use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "a3f1c2d4-0000-4000-8000-000000000001",
        "employee_id": "EMP001",
        "full_name": "Jane Doe",
        "email": "jane.doe@company.com",
        "department": "Engineering",
        "created_at": "2024-01-01T09:00:00Z",
        "updated_at": null
    })
)]
pub struct Employee {
    /// Internal storage id, referenced by attendance records.
    pub id: String,

    /// Externally visible business id, immutable after creation.
    #[schema(example = "EMP001")]
    pub employee_id: String,

    #[schema(example = "Jane Doe")]
    pub full_name: String,

    #[schema(example = "jane.doe@company.com")]
    pub email: String,

    /// Free-text label; dashboard stats group employees on this field.
    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = Option<String>, format = "date-time", nullable = true)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP001")]
    pub employee_id: String,
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[schema(example = "jane.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

/// `employee_id` is immutable: it has no field here, so a client-supplied
/// value is dropped during deserialization instead of rejected.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Case-insensitive substring match over employee_id, full_name and email
    pub search: Option<String>,
    /// Exact match on the department label
    pub department: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeSummary {
    pub id: String,
    pub employee_id: String,
    pub full_name: String,
    pub department: String,
    pub total_present: i64,
    pub total_absent: i64,
    /// Percentage over this employee's marked days, one decimal place.
    #[schema(example = 66.7)]
    pub attendance_rate: f64,
}
