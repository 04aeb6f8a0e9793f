use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Derived, read-only summary of the directory and ledger as of "today".
/// Never persisted; recomputed on every request.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_employees: i64,
    /// One entry per distinct department value; counts sum to total_employees.
    pub departments: Vec<DepartmentCount>,
    pub today_attendance: TodayAttendance,
    /// Percentage over all historical records, one decimal place.
    #[schema(example = 66.7)]
    pub overall_attendance_rate: f64,
    /// Newest employees first, capped at a small fixed bound.
    pub recent_employees: Vec<RecentEmployee>,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct DepartmentCount {
    #[schema(example = "Engineering")]
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TodayAttendance {
    pub present: i64,
    pub absent: i64,
    /// total_employees - present - absent
    pub not_marked: i64,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct RecentEmployee {
    pub id: String,
    #[schema(example = "EMP001")]
    pub employee_id: String,
    pub full_name: String,
    pub department: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Today's status for one employee, "Not Marked" when no record exists.
#[derive(Debug, Serialize, ToSchema)]
pub struct TodayRosterEntry {
    /// Internal employee id.
    pub employee_id: String,
    /// The employee's business id.
    #[schema(example = "EMP001")]
    pub employee_code: String,
    pub full_name: String,
    pub department: String,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Not Marked")]
    pub status: String,
}
