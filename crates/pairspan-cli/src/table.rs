use pairspan_core::PairAggregate;
use serde::Serialize;

use crate::truncate_string;

const ID_WIDTH: usize = 20;

/// Pair aggregates ordered for display: most days worked together first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultsTable {
    rows: Vec<PairAggregate>,
}

impl ResultsTable {
    /// Sorts by days worked, descending. Ties keep the order the service returned.
    pub fn from_aggregates(aggregates: &[PairAggregate]) -> Self {
        let mut rows = aggregates.to_vec();
        rows.sort_by(|a, b| b.days_worked.cmp(&a.days_worked));
        Self { rows }
    }

    pub fn rows(&self) -> &[PairAggregate] {
        &self.rows
    }

    /// The pair that worked together longest, if any pair overlapped at all.
    pub fn longest_pair(&self) -> Option<&PairAggregate> {
        self.rows.first().filter(|row| row.days_worked > 0)
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{:<w$} {:<w$} {:<w$} {:>12}\n",
            "Employee ID #1",
            "Employee ID #2",
            "Project ID",
            "Days worked",
            w = ID_WIDTH
        );
        out.push_str(&"-".repeat(ID_WIDTH * 3 + 15));
        out.push('\n');

        if self.rows.is_empty() {
            out.push_str("No employee pairs found.\n");
            return out;
        }

        for row in &self.rows {
            out.push_str(&format!(
                "{:<w$} {:<w$} {:<w$} {:>12}\n",
                truncate_string(&row.employee_id_first, ID_WIDTH),
                truncate_string(&row.employee_id_second, ID_WIDTH),
                truncate_string(&row.project_id, ID_WIDTH),
                row.days_worked,
                w = ID_WIDTH
            ));
        }

        match self.longest_pair() {
            Some(top) => out.push_str(&format!(
                "\nLongest: employees {} and {} worked together on project {} for {} days.\n",
                top.employee_id_first, top.employee_id_second, top.project_id, top.days_worked
            )),
            None => out.push_str("\nNo employees have worked together on a common project.\n"),
        }

        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
