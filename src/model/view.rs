use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::employee::Employee;

/// A check-in that happened today, with the id resolved through the identity map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodayEntry {
    #[schema(example = "2024-05-01", nullable = true)]
    pub date: Option<String>,
    #[schema(example = "09:00", nullable = true)]
    pub time: Option<String>,
    /// First id ever seen for this name
    #[schema(example = "1", nullable = true)]
    pub employee_id: Option<String>,
    /// Id written on this particular row
    #[schema(example = "1", nullable = true)]
    pub recorded_employee_id: Option<String>,
    /// Missing when the row had no name cell
    #[schema(example = "Ann", nullable = true)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "total_employees": 2,
        "present_today": 1,
        "absent_today": 1,
        "todays_records": [{
            "date": "2024-05-01",
            "time": "09:00",
            "employee_id": "1",
            "recorded_employee_id": "1",
            "name": "Ann"
        }],
        "roster": [
            { "id": "1", "name": "Ann", "department": "Eng", "status": "Yes" },
            { "id": "2", "name": "Bo", "department": "Sales", "status": "No" }
        ]
    })
)]
pub struct ViewModel {
    pub total_employees: usize,
    pub present_today: usize,
    /// `total_employees - present_today`; negative when attendance names people missing from the roster
    pub absent_today: i64,
    pub todays_records: Vec<TodayEntry>,
    pub roster: Vec<Employee>,
}
