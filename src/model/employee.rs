use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Feed value the roster uses to mark someone as present.
pub const PRESENT_MARKER: &str = "Yes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "1",
        "name": "Ann",
        "department": "Eng",
        "status": "Yes"
    })
)]
pub struct Employee {
    #[schema(example = "1", nullable = true)]
    pub id: Option<String>,

    #[schema(example = "Ann", nullable = true)]
    pub name: Option<String>,

    #[schema(example = "Eng", nullable = true)]
    pub department: Option<String>,

    /// Raw roster value, kept verbatim
    #[schema(example = "Yes", nullable = true)]
    pub status: Option<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema, strum_macros::Display)]
pub enum EmployeeStatus {
    Present,
    Absent,
}

impl Employee {
    /// Build from a positional roster row (id, name, department, status).
    /// Short rows leave the trailing fields empty.
    pub fn from_row(row: &[String]) -> Self {
        let field = |i: usize| row.get(i).cloned();
        Self {
            id: field(0),
            name: field(1),
            department: field(2),
            status: field(3),
        }
    }

    pub fn presence(&self) -> EmployeeStatus {
        match self.status.as_deref() {
            Some(PRESENT_MARKER) => EmployeeStatus::Present,
            _ => EmployeeStatus::Absent,
        }
    }
}
