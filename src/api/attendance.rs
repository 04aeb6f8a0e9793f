use crate::error::ApiError;
use crate::model::attendance::{AttendanceQuery, AttendanceRecord, MarkAttendance, UpdateAttendance};
use crate::model::dashboard::TodayRosterEntry;
use crate::store::attendance;
use actix_web::{HttpResponse, web};
use chrono::Local;
use sqlx::SqlitePool;

/// Mark attendance
///
/// One record per employee per calendar date; a second mark for the same
/// pair is rejected with 409.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked", body = AttendanceRecord),
        (status = 400, description = "Future date or malformed payload"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Already marked", body = Object, example = json!({
            "error": "conflict",
            "message": "Attendance already marked for employee 'EMP001' on 2024-01-15"
        }))
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, ApiError> {
    let today = Local::now().date_naive();
    let record = attendance::mark(pool.get_ref(), &payload, today).await?;
    Ok(HttpResponse::Created().json(record))
}

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Filtered records, most recent date first", body = [AttendanceRecord]),
        (status = 400, description = "Malformed date or status filter")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.normalize()?;
    let records = attendance::query(pool.get_ref(), &filter).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Today's roster
///
/// Every employee with today's status, "Not Marked" when no record exists.
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    responses(
        (status = 200, description = "Today's status for all employees", body = [TodayRosterEntry])
    ),
    tag = "Attendance"
)]
pub async fn today_attendance(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let today = Local::now().date_naive();
    let roster = attendance::today_roster(pool.get_ref(), today).await?;
    Ok(HttpResponse::Ok().json(roster))
}

/// Update attendance status
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(("id", Path, description = "Attendance record ID")),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Status replaced", body = AttendanceRecord),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<UpdateAttendance>,
) -> Result<HttpResponse, ApiError> {
    let record =
        attendance::update_status(pool.get_ref(), &path.into_inner(), payload.status).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Delete attendance record
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(("id", Path, description = "Attendance record ID")),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    attendance::delete(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
