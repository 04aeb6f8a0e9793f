use crate::error::ApiError;
use crate::model::attendance::{
    AttendanceFilter, AttendanceRecord, AttendanceStatus, MarkAttendance,
};
use crate::model::dashboard::TodayRosterEntry;
use crate::store::employees;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

const JOINED_COLUMNS: &str = "a.id, a.employee_id, e.full_name AS employee_name, \
     e.employee_id AS employee_code, a.date, a.status, a.created_at";

// Helper enum for typed SQLx binding
enum FilterValue {
    Str(String),
    Date(NaiveDate),
}

/// Marks attendance for one employee on one date. The composite unique index
/// makes the insert the conflict check: of N concurrent identical marks,
/// exactly one succeeds and the rest get `Conflict`.
pub async fn mark(
    pool: &SqlitePool,
    payload: &MarkAttendance,
    today: NaiveDate,
) -> Result<AttendanceRecord, ApiError> {
    if payload.date > today {
        return Err(ApiError::Validation(
            "Attendance date cannot be in the future".to_string(),
        ));
    }

    let employee = employees::get(pool, &payload.employee_id).await?;

    let record = AttendanceRecord {
        id: Uuid::new_v4().to_string(),
        employee_id: employee.id,
        employee_name: employee.full_name,
        employee_code: employee.employee_id,
        date: payload.date,
        status: payload.status,
        created_at: Utc::now(),
    };

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (id, employee_id, date, status, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.employee_id)
    .bind(record.date)
    .bind(record.status)
    .bind(record.created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(record),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Err(ApiError::Conflict(format!(
                        "Attendance already marked for employee '{}' on {}",
                        record.employee_code, record.date
                    )));
                }
                // Employee removed between lookup and insert
                if db_err.is_foreign_key_violation() {
                    return Err(ApiError::NotFound(format!(
                        "Employee with ID '{}' not found",
                        record.employee_id
                    )));
                }
            }
            Err(e.into())
        }
    }
}

pub async fn update_status(
    pool: &SqlitePool,
    record_id: &str,
    status: AttendanceStatus,
) -> Result<AttendanceRecord, ApiError> {
    let result = sqlx::query("UPDATE attendance SET status = ? WHERE id = ?")
        .bind(status)
        .bind(record_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!(
            "Attendance record with ID '{record_id}' not found"
        )));
    }

    let sql = format!(
        "SELECT {JOINED_COLUMNS} FROM attendance a \
         JOIN employees e ON e.id = a.employee_id WHERE a.id = ?"
    );
    Ok(sqlx::query_as::<_, AttendanceRecord>(&sql)
        .bind(record_id)
        .fetch_one(pool)
        .await?)
}

pub async fn delete(pool: &SqlitePool, record_id: &str) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
        .bind(record_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!(
            "Attendance record with ID '{record_id}' not found"
        )));
    }
    Ok(())
}

/// Filtered scan of the ledger, joined with the directory for display
/// fields. Most recent date first, ties broken by created_at descending so
/// newly marked same-day records surface first.
pub async fn query(
    pool: &SqlitePool,
    filter: &AttendanceFilter,
) -> Result<Vec<AttendanceRecord>, ApiError> {
    let mut conditions = Vec::new();
    let mut bindings: Vec<FilterValue> = Vec::new();

    if let Some(employee_id) = &filter.employee_id {
        conditions.push("a.employee_id = ?");
        bindings.push(FilterValue::Str(employee_id.clone()));
    }
    if let Some(start_date) = filter.start_date {
        conditions.push("a.date >= ?");
        bindings.push(FilterValue::Date(start_date));
    }
    if let Some(end_date) = filter.end_date {
        conditions.push("a.date <= ?");
        bindings.push(FilterValue::Date(end_date));
    }
    if let Some(status) = filter.status {
        conditions.push("a.status = ?");
        bindings.push(FilterValue::Str(status.to_string()));
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT {JOINED_COLUMNS} FROM attendance a \
         JOIN employees e ON e.id = a.employee_id \
         {} ORDER BY a.date DESC, a.created_at DESC",
        where_clause
    );
    debug!(sql = %sql, "Querying attendance");

    let mut query = sqlx::query_as::<_, AttendanceRecord>(&sql);
    for b in &bindings {
        query = match b {
            FilterValue::Str(v) => query.bind(v),
            FilterValue::Date(v) => query.bind(*v),
        };
    }

    Ok(query.fetch_all(pool).await?)
}

#[derive(sqlx::FromRow)]
struct RosterRow {
    employee_id: String,
    employee_code: String,
    full_name: String,
    department: String,
    status: Option<String>,
}

/// Today's status for every employee; employees without a record for the
/// given date show up as "Not Marked".
pub async fn today_roster(
    pool: &SqlitePool,
    today: NaiveDate,
) -> Result<Vec<TodayRosterEntry>, ApiError> {
    let rows = sqlx::query_as::<_, RosterRow>(
        r#"
        SELECT e.id AS employee_id, e.employee_id AS employee_code,
               e.full_name, e.department, a.status
        FROM employees e
        LEFT JOIN attendance a ON a.employee_id = e.id AND a.date = ?
        ORDER BY e.created_at DESC
        "#,
    )
    .bind(today)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| TodayRosterEntry {
            employee_id: row.employee_id,
            employee_code: row.employee_code,
            full_name: row.full_name,
            department: row.department,
            date: today,
            status: row.status.unwrap_or_else(|| "Not Marked".to_string()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::store::employees::tests::seed;
    use futures::future::join_all;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mark_payload(employee_id: &str, on: NaiveDate, status: AttendanceStatus) -> MarkAttendance {
        MarkAttendance {
            employee_id: employee_id.to_string(),
            date: on,
            status,
        }
    }

    #[actix_web::test]
    async fn mark_enforces_one_record_per_day() {
        let pool = test_pool().await;
        let jane = seed(&pool, "EMP001", "jane@x.com").await;
        let today = date(2024, 2, 1);

        let record = mark(
            &pool,
            &mark_payload(&jane.id, date(2024, 1, 15), AttendanceStatus::Present),
            today,
        )
        .await
        .unwrap();
        assert_eq!(record.employee_code, "EMP001");
        assert_eq!(record.employee_name, "Jane Doe");
        assert_eq!(record.status, AttendanceStatus::Present);

        // second mark for the same (employee, date) pair
        let err = mark(
            &pool,
            &mark_payload(&jane.id, date(2024, 1, 15), AttendanceStatus::Absent),
            today,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "conflict");
        assert!(err.to_string().contains("already marked"));

        // the next day is fine
        mark(
            &pool,
            &mark_payload(&jane.id, date(2024, 1, 16), AttendanceStatus::Present),
            today,
        )
        .await
        .unwrap();
    }

    #[actix_web::test]
    async fn mark_rejects_future_dates_and_unknown_employees() {
        let pool = test_pool().await;
        let jane = seed(&pool, "EMP001", "jane@x.com").await;
        let today = date(2024, 2, 1);

        let err = mark(
            &pool,
            &mark_payload(&jane.id, date(2024, 2, 2), AttendanceStatus::Present),
            today,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "validation_error");

        // marking exactly today is allowed
        mark(
            &pool,
            &mark_payload(&jane.id, today, AttendanceStatus::Present),
            today,
        )
        .await
        .unwrap();

        let err = mark(
            &pool,
            &mark_payload("missing", date(2024, 1, 15), AttendanceStatus::Present),
            today,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[actix_web::test]
    async fn concurrent_identical_marks_have_one_winner() {
        let pool = test_pool().await;
        let jane = seed(&pool, "EMP001", "jane@x.com").await;
        let today = date(2024, 2, 1);

        let attempts = (0..8).map(|_| {
            let pool = pool.clone();
            let payload = mark_payload(&jane.id, date(2024, 1, 15), AttendanceStatus::Present);
            async move { mark(&pool, &payload, today).await }
        });
        let outcomes = join_all(attempts).await;

        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(
            outcomes
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| e.kind() == "conflict")
        );

        let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, 1);
    }

    #[actix_web::test]
    async fn update_status_replaces_and_delete_removes() {
        let pool = test_pool().await;
        let jane = seed(&pool, "EMP001", "jane@x.com").await;
        let today = date(2024, 2, 1);

        let record = mark(
            &pool,
            &mark_payload(&jane.id, date(2024, 1, 15), AttendanceStatus::Present),
            today,
        )
        .await
        .unwrap();

        let updated = update_status(&pool, &record.id, AttendanceStatus::Absent)
            .await
            .unwrap();
        assert_eq!(updated.status, AttendanceStatus::Absent);
        assert_eq!(updated.employee_code, "EMP001");

        delete(&pool, &record.id).await.unwrap();
        let err = delete(&pool, &record.id).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");

        let err = update_status(&pool, "missing", AttendanceStatus::Present)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[actix_web::test]
    async fn query_filters_and_orders() {
        let pool = test_pool().await;
        let jane = seed(&pool, "EMP001", "jane@x.com").await;
        let john = seed(&pool, "EMP002", "john@x.com").await;
        let today = date(2024, 2, 10);

        for (who, day, status) in [
            (&jane, date(2023, 12, 31), AttendanceStatus::Present),
            (&jane, date(2024, 1, 10), AttendanceStatus::Present),
            (&jane, date(2024, 1, 20), AttendanceStatus::Absent),
            (&jane, date(2024, 1, 31), AttendanceStatus::Present),
            (&john, date(2024, 1, 10), AttendanceStatus::Absent),
            (&john, date(2024, 2, 5), AttendanceStatus::Present),
        ] {
            mark(&pool, &mark_payload(&who.id, day, status), today)
                .await
                .unwrap();
        }

        // inclusive window + status, most recent first
        let hits = query(
            &pool,
            &AttendanceFilter {
                start_date: Some(date(2024, 1, 1)),
                end_date: Some(date(2024, 1, 31)),
                status: Some(AttendanceStatus::Present),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let dates: Vec<_> = hits.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 31), date(2024, 1, 10)]);
        assert!(hits.iter().all(|r| r.status == AttendanceStatus::Present));

        // one-sided bound
        let hits = query(
            &pool,
            &AttendanceFilter {
                start_date: Some(date(2024, 2, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].employee_code, "EMP002");

        // employee filter
        let hits = query(
            &pool,
            &AttendanceFilter {
                employee_id: Some(john.id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(hits.len(), 2);

        // inverted range is empty, not an error
        let hits = query(
            &pool,
            &AttendanceFilter {
                start_date: Some(date(2024, 1, 31)),
                end_date: Some(date(2024, 1, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(hits.is_empty());

        // no filter returns everything, newest date first
        let all = query(&pool, &AttendanceFilter::default()).await.unwrap();
        assert_eq!(all.len(), 6);
        assert!(all.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[actix_web::test]
    async fn same_day_ties_break_on_created_at_descending() {
        let pool = test_pool().await;
        let jane = seed(&pool, "EMP001", "jane@x.com").await;
        let john = seed(&pool, "EMP002", "john@x.com").await;
        let today = date(2024, 2, 1);

        let first = mark(
            &pool,
            &mark_payload(&jane.id, date(2024, 1, 15), AttendanceStatus::Present),
            today,
        )
        .await
        .unwrap();
        let second = mark(
            &pool,
            &mark_payload(&john.id, date(2024, 1, 15), AttendanceStatus::Present),
            today,
        )
        .await
        .unwrap();

        let hits = query(&pool, &AttendanceFilter::default()).await.unwrap();
        assert_eq!(hits[0].id, second.id);
        assert_eq!(hits[1].id, first.id);
    }

    #[actix_web::test]
    async fn roster_fills_in_not_marked() {
        let pool = test_pool().await;
        let jane = seed(&pool, "EMP001", "jane@x.com").await;
        let john = seed(&pool, "EMP002", "john@x.com").await;
        seed(&pool, "EMP003", "janet@x.com").await;
        let today = date(2024, 2, 1);

        mark(
            &pool,
            &mark_payload(&jane.id, today, AttendanceStatus::Present),
            today,
        )
        .await
        .unwrap();
        mark(
            &pool,
            &mark_payload(&john.id, today, AttendanceStatus::Absent),
            today,
        )
        .await
        .unwrap();
        // a record on another date must not leak into today's roster
        mark(
            &pool,
            &mark_payload(&jane.id, date(2024, 1, 15), AttendanceStatus::Absent),
            today,
        )
        .await
        .unwrap();

        let roster = today_roster(&pool, today).await.unwrap();
        assert_eq!(roster.len(), 3);
        let status_of = |code: &str| {
            roster
                .iter()
                .find(|r| r.employee_code == code)
                .unwrap()
                .status
                .clone()
        };
        assert_eq!(status_of("EMP001"), "Present");
        assert_eq!(status_of("EMP002"), "Absent");
        assert_eq!(status_of("EMP003"), "Not Marked");
        assert!(roster.iter().all(|r| r.date == today));
    }
}
