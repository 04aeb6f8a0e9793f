use crate::error::ApiError;
use crate::model::dashboard::DashboardStats;
use crate::store::stats;
use actix_web::{HttpResponse, web};
use chrono::Local;
use sqlx::SqlitePool;

/// Dashboard statistics
///
/// Recomputed from the directory and ledger on every call; safe to invoke
/// concurrently with mutations.
#[utoipa::path(
    get,
    path = "/api/employees/dashboard/stats",
    responses(
        (status = 200, description = "Current dashboard snapshot", body = DashboardStats)
    ),
    tag = "Dashboard"
)]
pub async fn dashboard_stats(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let today = Local::now().date_naive();
    let snapshot = stats::dashboard(pool.get_ref(), today).await?;
    Ok(HttpResponse::Ok().json(snapshot))
}
