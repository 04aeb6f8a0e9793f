use crate::model::attendance::{
    AttendanceQuery, AttendanceRecord, AttendanceStatus, MarkAttendance, UpdateAttendance,
};
use crate::model::dashboard::{
    DashboardStats, DepartmentCount, RecentEmployee, TodayAttendance, TodayRosterEntry,
};
use crate::model::employee::{
    CreateEmployee, Employee, EmployeeQuery, EmployeeSummary, UpdateEmployee,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight Human Resource Management System API.

### Key Features
- **Employee Directory**
  - Create, update, list, search and delete employee profiles
- **Attendance Ledger**
  - One status mark per employee per calendar date, with range and status filters
- **Dashboard**
  - Department breakdown, today's attendance and overall attendance rate

### Response Format
- JSON-based RESTful responses
- Errors carry a stable machine-readable `error` kind plus a human-readable `message`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employee_summary,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::today_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,

        crate::api::dashboard::dashboard_stats,
    ),
    components(schemas(
        Employee,
        CreateEmployee,
        UpdateEmployee,
        EmployeeQuery,
        EmployeeSummary,
        AttendanceStatus,
        AttendanceRecord,
        MarkAttendance,
        UpdateAttendance,
        AttendanceQuery,
        DashboardStats,
        DepartmentCount,
        TodayAttendance,
        RecentEmployee,
        TodayRosterEntry,
    )),
    tags(
        (name = "Employee", description = "Employee directory"),
        (name = "Attendance", description = "Attendance ledger"),
        (name = "Dashboard", description = "Derived statistics")
    )
)]
pub struct ApiDoc;
