//! Parsed query conditions.

use std::fmt;

/// Comparison operator of a [`Condition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    GreaterThan,
    LessThan,
    Equal,
    /// The source line had no operator at all. Never matches.
    Missing,
    /// Any other symbol. Always matches.
    Unrecognized(String),
}

impl Operator {
    pub const SYMBOLS: [char; 3] = ['>', '<', '='];

    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            ">" => Operator::GreaterThan,
            "<" => Operator::LessThan,
            "=" => Operator::Equal,
            "" => Operator::Missing,
            other => Operator::Unrecognized(other.to_string()),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::Equal => "=",
            Operator::Missing => "",
            Operator::Unrecognized(s) => s,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One comparison from a query: field label as typed, operator, threshold.
///
/// `value` is NaN when the threshold text didn't parse; such a condition never matches.
#[derive(Debug, Clone)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: f64,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: f64) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }
}

/// NaN thresholds compare equal so re-parsed queries can be checked for equality.
impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        let same_value =
            self.value == other.value || (self.value.is_nan() && other.value.is_nan());
        self.field == other.field && self.operator == other.operator && same_value
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator {
            Operator::Missing => f.write_str(&self.field),
            _ => write!(
                f,
                "{} {} {}",
                self.field,
                self.operator,
                ThresholdText(self.value)
            ),
        }
    }
}

/// Threshold spelled the way the query parser reads it back.
struct ThresholdText(f64);

impl fmt::Display for ThresholdText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            v if v == f64::INFINITY => f.write_str("Infinity"),
            v if v == f64::NEG_INFINITY => f.write_str("-Infinity"),
            v => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_from_symbol() {
        assert_eq!(Operator::from_symbol(">"), Operator::GreaterThan);
        assert_eq!(Operator::from_symbol(" < "), Operator::LessThan);
        assert_eq!(Operator::from_symbol("="), Operator::Equal);
        assert_eq!(Operator::from_symbol(""), Operator::Missing);
        assert_eq!(
            Operator::from_symbol(">="),
            Operator::Unrecognized(">=".into())
        );
    }

    #[test]
    fn display_condition() {
        let c = Condition::new("P/E Ratio", Operator::LessThan, 20.0);
        assert_eq!(c.to_string(), "P/E Ratio < 20");

        let c = Condition::new("Dividend Yield", Operator::GreaterThan, 2.5);
        assert_eq!(c.to_string(), "Dividend Yield > 2.5");

        let c = Condition::new("garbage line", Operator::Missing, f64::NAN);
        assert_eq!(c.to_string(), "garbage line");
    }

    #[test]
    fn display_infinite_thresholds() {
        let c = Condition::new("ROE", Operator::GreaterThan, f64::INFINITY);
        assert_eq!(c.to_string(), "ROE > Infinity");

        let c = Condition::new("ROE", Operator::LessThan, f64::NEG_INFINITY);
        assert_eq!(c.to_string(), "ROE < -Infinity");

        let c = Condition::new("ROE", Operator::Equal, f64::NAN);
        assert_eq!(c.to_string(), "ROE = NaN");
    }

    #[test]
    fn nan_thresholds_compare_equal() {
        let a = Condition::new("ROE", Operator::GreaterThan, f64::NAN);
        let b = Condition::new("ROE", Operator::GreaterThan, f64::NAN);
        assert_eq!(a, b);
        assert_ne!(a, Condition::new("ROE", Operator::GreaterThan, 1.0));
    }
}
