use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One check-in row as it appears in the attendance feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "2024-05-01", nullable = true)]
    pub date: Option<String>,
    #[schema(example = "09:00", nullable = true)]
    pub time: Option<String>,
    #[schema(example = "1", nullable = true)]
    pub employee_id: Option<String>,
    #[schema(example = "Ann", nullable = true)]
    pub employee_name: Option<String>,
}

impl AttendanceRecord {
    /// Positional row: date, time, employee id, employee name.
    pub fn from_row(row: &[String]) -> Self {
        let field = |i: usize| row.get(i).cloned();
        Self {
            date: field(0),
            time: field(1),
            employee_id: field(2),
            employee_name: field(3),
        }
    }
}
