use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_DATA_TEAM_SIDE: &str = "No data available for the given team and side";
pub const NO_DATA_CONDITIONS: &str = "No data available for the given conditions";

/// Why a query found nothing to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataReason {
    /// No rows for the (team, side) pair, or none of them in the zone.
    TeamSide,
    /// Rows exist but none satisfy the query's extra conditions.
    Conditions,
}

impl NoDataReason {
    pub fn message(&self) -> &'static str {
        match self {
            NoDataReason::TeamSide => NO_DATA_TEAM_SIDE,
            NoDataReason::Conditions => NO_DATA_CONDITIONS,
        }
    }
}

/// Result of a read-only query.
///
/// `NoData` is an expected outcome, not an error: an empty selection is
/// distinct from a computed `0.0`. `Error` carries a descriptive message
/// for queries that report failures as values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum QueryOutcome<T> {
    Value(T),
    NoData(NoDataReason),
    Error(String),
}

impl<T> QueryOutcome<T> {
    pub fn value(self) -> Option<T> {
        match self {
            QueryOutcome::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, QueryOutcome::NoData(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryOutcome<U> {
        match self {
            QueryOutcome::Value(v) => QueryOutcome::Value(f(v)),
            QueryOutcome::NoData(r) => QueryOutcome::NoData(r),
            QueryOutcome::Error(e) => QueryOutcome::Error(e),
        }
    }

    pub(crate) fn missing_column(column: &str) -> Self {
        QueryOutcome::Error(format!("Error: '{}' not found in data", column))
    }

    pub(crate) fn unexpected(detail: impl fmt::Display) -> Self {
        QueryOutcome::Error(format!("Unexpected error: {}", detail))
    }
}

impl<T: fmt::Display> fmt::Display for QueryOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueryOutcome::Value(v) => write!(f, "{}", v),
            QueryOutcome::NoData(reason) => f.write_str(reason.message()),
            QueryOutcome::Error(msg) => f.write_str(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let none: QueryOutcome<f64> = QueryOutcome::NoData(NoDataReason::TeamSide);
        assert_eq!(none.to_string(), NO_DATA_TEAM_SIDE);
        let missing: QueryOutcome<f64> = QueryOutcome::missing_column("team");
        assert_eq!(missing.to_string(), "Error: 'team' not found in data");
        assert_eq!(QueryOutcome::Value(0.5).to_string(), "0.5");
    }

    #[test]
    fn test_no_data_is_not_zero() {
        let none: QueryOutcome<f64> = QueryOutcome::NoData(NoDataReason::TeamSide);
        assert!(none.is_no_data());
        assert_eq!(none.value(), None);
        assert_eq!(QueryOutcome::Value(0.0).value(), Some(0.0));
    }

    #[test]
    fn test_serialized_shape() {
        let v = serde_json::to_value(QueryOutcome::Value(0.25)).unwrap();
        assert_eq!(v, serde_json::json!({"status": "value", "value": 0.25}));
        let n = serde_json::to_value(QueryOutcome::<f64>::NoData(NoDataReason::Conditions)).unwrap();
        assert_eq!(n, serde_json::json!({"status": "no_data", "value": "conditions"}));
    }
}
