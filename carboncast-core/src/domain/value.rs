//! Tri-state metric cell for forecast output.

use serde::{Deserialize, Serialize};

/// One metric cell in a forecast row.
///
/// The three states are deliberately distinct:
/// - `Known` — a constrained/rounded forecast, or a base value carried forward
/// - `Unknown` — the entity tracks this metric but no value could be produced
///   (renders as the `NA` sentinel)
/// - `NeverTracked` — the column has no historical data for any entity
///   (renders blank, exactly like the source)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    Known(f64),
    Unknown,
    NeverTracked,
}

impl MetricValue {
    pub fn is_known(self) -> bool {
        matches!(self, MetricValue::Known(_))
    }

    pub fn as_known(self) -> Option<f64> {
        match self {
            MetricValue::Known(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_exposes_value() {
        assert_eq!(MetricValue::Known(1.14).as_known(), Some(1.14));
        assert_eq!(MetricValue::Unknown.as_known(), None);
        assert_eq!(MetricValue::NeverTracked.as_known(), None);
    }

    #[test]
    fn states_are_distinct() {
        assert_ne!(MetricValue::Unknown, MetricValue::NeverTracked);
        assert!(!MetricValue::Unknown.is_known());
    }
}
