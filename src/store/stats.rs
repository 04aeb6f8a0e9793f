use crate::error::ApiError;
use crate::model::dashboard::{DashboardStats, DepartmentCount, RecentEmployee, TodayAttendance};
use crate::store::rate_percent;
use chrono::NaiveDate;
use sqlx::SqlitePool;

const RECENT_EMPLOYEES_LIMIT: i64 = 5;

/// Builds the dashboard snapshot from the current directory and ledger
/// state. Read-only; `today` is injected so the counts are testable with
/// fixed dates.
pub async fn dashboard(pool: &SqlitePool, today: NaiveDate) -> Result<DashboardStats, ApiError> {
    let total_employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;

    let departments = sqlx::query_as::<_, DepartmentCount>(
        "SELECT department AS name, COUNT(*) AS count FROM employees GROUP BY department",
    )
    .fetch_all(pool)
    .await?;

    let today_present: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE date = ? AND status = 'Present'")
            .bind(today)
            .fetch_one(pool)
            .await?;

    let today_absent: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE date = ? AND status = 'Absent'")
            .bind(today)
            .fetch_one(pool)
            .await?;

    let present_total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE status = 'Present'")
            .fetch_one(pool)
            .await?;

    let absent_total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attendance WHERE status = 'Absent'")
            .fetch_one(pool)
            .await?;

    let recent_employees = sqlx::query_as::<_, RecentEmployee>(
        "SELECT id, employee_id, full_name, department, created_at \
         FROM employees ORDER BY created_at DESC LIMIT ?",
    )
    .bind(RECENT_EMPLOYEES_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(DashboardStats {
        total_employees,
        departments,
        today_attendance: TodayAttendance {
            present: today_present,
            absent: today_absent,
            not_marked: total_employees - today_present - today_absent,
        },
        overall_attendance_rate: rate_percent(present_total, present_total + absent_total),
        recent_employees,
    })
}
