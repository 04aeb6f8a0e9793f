use crate::error::ApiError;
use crate::model::employee::{CreateEmployee, Employee, EmployeeSummary, UpdateEmployee};
use crate::store::rate_percent;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

/// Minimal syntactic check: one '@', non-empty local part, dotted domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
        && !domain.contains('@')
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::Validation(format!(
            "{field} cannot be empty or whitespace"
        )));
    }
    Ok(())
}

/// Attributes a unique violation to the exact colliding column. The insert
/// itself is the uniqueness check; there is no racy pre-check SELECT.
fn map_unique_violation(e: sqlx::Error, employee_id: &str, email: &str) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return if db_err.message().contains("employees.email") {
                ApiError::DuplicateKey {
                    field: "email",
                    message: format!("Employee with email '{email}' already exists"),
                }
            } else {
                ApiError::DuplicateKey {
                    field: "employee_id",
                    message: format!("Employee with ID '{employee_id}' already exists"),
                }
            };
        }
    }
    e.into()
}

pub async fn create(pool: &SqlitePool, payload: &CreateEmployee) -> Result<Employee, ApiError> {
    let employee = Employee {
        id: Uuid::new_v4().to_string(),
        employee_id: payload.employee_id.trim().to_uppercase(),
        full_name: payload.full_name.trim().to_string(),
        email: payload.email.trim().to_lowercase(),
        department: payload.department.trim().to_string(),
        created_at: Utc::now(),
        updated_at: None,
    };

    require_non_empty(&employee.employee_id, "Employee ID")?;
    require_non_empty(&employee.full_name, "Full name")?;
    require_non_empty(&employee.department, "Department")?;
    if !is_valid_email(&employee.email) {
        return Err(ApiError::Validation(format!(
            "'{}' is not a valid email address",
            employee.email
        )));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO employees (id, employee_id, full_name, email, department, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&employee.id)
    .bind(&employee.employee_id)
    .bind(&employee.full_name)
    .bind(&employee.email)
    .bind(&employee.department)
    .bind(employee.created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(employee),
        Err(e) => Err(map_unique_violation(
            e,
            &employee.employee_id,
            &employee.email,
        )),
    }
}

pub async fn list(
    pool: &SqlitePool,
    search: Option<&str>,
    department: Option<&str>,
) -> Result<Vec<Employee>, ApiError> {
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(search) = search {
        conditions.push("(employee_id LIKE ? OR full_name LIKE ? OR email LIKE ?)");
        let like = format!("%{}%", search);
        bindings.push(like.clone());
        bindings.push(like.clone());
        bindings.push(like);
    }

    if let Some(department) = department {
        conditions.push("department = ?");
        bindings.push(department.to_string());
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!("SELECT * FROM employees {} ORDER BY created_at DESC", where_clause);
    debug!(sql = %sql, "Listing employees");

    let mut query = sqlx::query_as::<_, Employee>(&sql);
    for b in &bindings {
        query = query.bind(b);
    }

    Ok(query.fetch_all(pool).await?)
}

pub async fn get(pool: &SqlitePool, id: &str) -> Result<Employee, ApiError> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Employee with ID '{id}' not found")))
}

pub async fn update(
    pool: &SqlitePool,
    id: &str,
    changes: &UpdateEmployee,
) -> Result<Employee, ApiError> {
    let mut employee = get(pool, id).await?;

    if let Some(full_name) = &changes.full_name {
        let full_name = full_name.trim();
        require_non_empty(full_name, "Full name")?;
        employee.full_name = full_name.to_string();
    }
    if let Some(department) = &changes.department {
        let department = department.trim();
        require_non_empty(department, "Department")?;
        employee.department = department.to_string();
    }
    if let Some(email) = &changes.email {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(ApiError::Validation(format!(
                "'{email}' is not a valid email address"
            )));
        }
        employee.email = email;
    }
    employee.updated_at = Some(Utc::now());

    let result = sqlx::query(
        r#"
        UPDATE employees
        SET full_name = ?, email = ?, department = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&employee.full_name)
    .bind(&employee.email)
    .bind(&employee.department)
    .bind(employee.updated_at)
    .bind(id)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(employee),
        Err(e) => Err(map_unique_violation(
            e,
            &employee.employee_id,
            &employee.email,
        )),
    }
}

/// Deleting an employee cascades to their attendance records.
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound(format!(
            "Employee with ID '{id}' not found"
        )));
    }
    Ok(())
}

pub async fn summary(pool: &SqlitePool, id: &str) -> Result<EmployeeSummary, ApiError> {
    let employee = get(pool, id).await?;

    let total_present: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND status = 'Present'",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    let total_absent: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND status = 'Absent'",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(EmployeeSummary {
        id: employee.id,
        employee_id: employee.employee_id,
        full_name: employee.full_name,
        department: employee.department,
        total_present,
        total_absent,
        attendance_rate: rate_percent(total_present, total_present + total_absent),
    })
}
