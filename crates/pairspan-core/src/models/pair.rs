use serde::{Deserialize, Serialize};

/// One row computed by the processing service: two employees, the project they
/// shared and the number of days their working periods overlapped.
///
/// The employee ids are kept in the order the service returned them, so
/// `(A, B)` and `(B, A)` on the same project are distinct aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairAggregate {
    pub employee_id_first: String,
    pub employee_id_second: String,
    pub project_id: String,
    pub days_worked: u64,
}

impl PairAggregate {
    pub fn new(
        employee_id_first: impl Into<String>,
        employee_id_second: impl Into<String>,
        project_id: impl Into<String>,
        days_worked: u64,
    ) -> Self {
        Self {
            employee_id_first: employee_id_first.into(),
            employee_id_second: employee_id_second.into(),
            project_id: project_id.into(),
            days_worked,
        }
    }
}
