use crate::api::dashboard::{DashboardResponse, DashboardStatus};
use crate::model::{
    attendance::AttendanceRecord,
    employee::{Employee, EmployeeStatus},
    view::{TodayEntry, ViewModel},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Dashboard API",
        version = "0.1.0",
        description = r#"
## Attendance Dashboard

Read-only views over an attendance spreadsheet, refreshed on a fixed interval.

### 🔹 What you get
- **Stat cards**: total employees, present today, absent today
- **Today Attendance**: check-ins dated today, in sheet order
- **Employee List**: the roster as last fetched

### 📦 Response Format
- JSON, tagged by `status` (`loading`, `ready`, `error`)
- When a poll fails only a generic message is returned; details go to the server log

---
Built with **Rust**, **Actix Web**, **reqwest**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::dashboard::dashboard_data,
        crate::api::dashboard::todays_attendance,
        crate::api::dashboard::employees
    ),
    components(
        schemas(
            DashboardResponse,
            DashboardStatus,
            ViewModel,
            TodayEntry,
            Employee,
            EmployeeStatus,
            AttendanceRecord
        )
    ),
    tags(
        (name = "Dashboard", description = "Attendance dashboard APIs"),
    )
)]
pub struct ApiDoc;
