use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date pattern the processing service uses to parse the work-log dates.
///
/// The set is fixed and ordered; the first entry is the default selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "yyyy-MM-dd")]
    IsoDash,
    #[serde(rename = "dd/MM/yyyy")]
    DayMonthYearSlash,
    #[serde(rename = "dd-MM-yyyy")]
    DayMonthYearDash,
    #[serde(rename = "MM-dd-yyyy")]
    MonthDayYearDash,
    #[serde(rename = "MM/dd/yyyy")]
    MonthDayYearSlash,
}

impl DateFormat {
    /// All selectable formats, in display order.
    pub const ALL: [DateFormat; 5] = [
        DateFormat::IsoDash,
        DateFormat::DayMonthYearSlash,
        DateFormat::DayMonthYearDash,
        DateFormat::MonthDayYearDash,
        DateFormat::MonthDayYearSlash,
    ];

    /// Pattern string sent as the `pattern` query parameter.
    pub fn as_pattern(&self) -> &'static str {
        match self {
            DateFormat::IsoDash => "yyyy-MM-dd",
            DateFormat::DayMonthYearSlash => "dd/MM/yyyy",
            DateFormat::DayMonthYearDash => "dd-MM-yyyy",
            DateFormat::MonthDayYearDash => "MM-dd-yyyy",
            DateFormat::MonthDayYearSlash => "MM/dd/yyyy",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_pattern())
    }
}

/// Returned when a pattern string is not one of [`DateFormat::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown date format '{given}'. Must be one of: {valid}", valid = valid_patterns())]
pub struct UnknownDateFormat {
    pub given: String,
}

fn valid_patterns() -> String {
    DateFormat::ALL
        .iter()
        .map(DateFormat::as_pattern)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for DateFormat {
    type Err = UnknownDateFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateFormat::ALL
            .into_iter()
            .find(|format| format.as_pattern() == s.trim())
            .ok_or_else(|| UnknownDateFormat {
                given: s.to_string(),
            })
    }
}
