use crate::error::ApiError;
use crate::model::employee::{CreateEmployee, Employee, EmployeeQuery, EmployeeSummary, UpdateEmployee};
use crate::model::none_if_empty;
use crate::store::employees;
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Employee),
        (status = 400, description = "Missing or malformed field"),
        (status = 409, description = "Duplicate employee_id or email", body = Object, example = json!({
            "error": "duplicate_key",
            "field": "email",
            "message": "Employee with email 'jane@x.com' already exists"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee = employees::create(pool.get_ref(), &payload).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employee list", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let search = none_if_empty(query.search.as_deref());
    let department = none_if_empty(query.department.as_deref());

    let employees =
        employees::list(pool.get_ref(), search.as_deref(), department.as_deref()).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Internal employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee = employees::get(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Internal employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Email already taken by another employee")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let employee = employees::update(pool.get_ref(), &path.into_inner(), &payload).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee
///
/// Cascade-deletes the employee's attendance records.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Internal employee ID")),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    employees::delete(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Per-employee attendance summary
#[utoipa::path(
    get,
    path = "/api/employees/{id}/summary",
    params(("id", Path, description = "Internal employee ID")),
    responses(
        (status = 200, description = "Attendance summary", body = EmployeeSummary),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn employee_summary(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let summary = employees::summary(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(summary))
}
