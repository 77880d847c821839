//! Condition evaluation against a single stock.
//!
//! # Evaluation Semantics
//!
//! - `Operator::Missing` (line without an operator): `false` for every stock
//! - Field label not in the registry: `true` for every stock
//! - `>` / `<`: strict numeric comparison
//! - `=`: exact floating-point equality, no epsilon
//! - `Operator::Unrecognized`: `true`
//!
//! A NaN threshold fails every comparison, so bad numbers never match.

use crate::domain::condition::{Condition, Operator};
use crate::domain::field_registry;
use crate::domain::stock::Stock;

pub fn evaluate(stock: &Stock, condition: &Condition) -> bool {
    if condition.operator == Operator::Missing {
        return false;
    }

    let Some(field) = field_registry::lookup(&condition.field) else {
        return true;
    };
    let value = stock.metric(field);

    match &condition.operator {
        Operator::GreaterThan => value > condition.value,
        Operator::LessThan => value < condition.value,
        Operator::Equal => value == condition.value,
        Operator::Missing => false,
        Operator::Unrecognized(_) => true,
    }
}

/// Logical AND of every condition. An empty list matches everything.
pub fn evaluate_all(stock: &Stock, conditions: &[Condition]) -> bool {
    conditions.iter().all(|c| evaluate(stock, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stock::StockField;

    fn stock_with_pe(pe: f64) -> Stock {
        Stock::new(1, "TEST").with(StockField::Pe, pe)
    }

    fn cond(field: &str, operator: Operator, value: f64) -> Condition {
        Condition::new(field, operator, value)
    }

    #[test]
    fn greater_than_is_strict() {
        let c = cond("P/E Ratio", Operator::GreaterThan, 20.0);
        assert!(evaluate(&stock_with_pe(25.0), &c));
        assert!(!evaluate(&stock_with_pe(20.0), &c));
        assert!(!evaluate(&stock_with_pe(15.0), &c));
    }

    #[test]
    fn less_than_is_strict() {
        let c = cond("P/E Ratio", Operator::LessThan, 20.0);
        assert!(evaluate(&stock_with_pe(15.0), &c));
        assert!(!evaluate(&stock_with_pe(20.0), &c));
        assert!(!evaluate(&stock_with_pe(25.0), &c));
    }

    #[test]
    fn equal_is_exact() {
        let c = cond("P/E Ratio", Operator::Equal, 20.0);
        assert!(evaluate(&stock_with_pe(20.0), &c));
        assert!(!evaluate(&stock_with_pe(20.000001), &c));

        // 0.1 + 0.2 != 0.3 in binary floating point; no tolerance is applied
        let c = cond("P/E Ratio", Operator::Equal, 0.3);
        assert!(!evaluate(&stock_with_pe(0.1 + 0.2), &c));
    }

    #[test]
    fn unknown_field_matches_everything() {
        let c = cond("Unknown Metric", Operator::GreaterThan, 1e12);
        assert!(evaluate(&stock_with_pe(0.0), &c));
    }

    #[test]
    fn unknown_field_wins_over_nan_threshold() {
        let c = cond("Unknown Metric", Operator::GreaterThan, f64::NAN);
        assert!(evaluate(&stock_with_pe(0.0), &c));
    }

    #[test]
    fn nan_threshold_matches_nothing() {
        for op in [Operator::GreaterThan, Operator::LessThan, Operator::Equal] {
            let c = cond("P/E Ratio", op, f64::NAN);
            assert!(!evaluate(&stock_with_pe(15.0), &c));
            assert!(!evaluate(&stock_with_pe(f64::NAN), &c));
        }
    }

    #[test]
    fn missing_operator_matches_nothing() {
        let c = cond("Unknown Metric", Operator::Missing, f64::NAN);
        assert!(!evaluate(&stock_with_pe(15.0), &c));
    }

    #[test]
    fn unrecognized_operator_matches_everything() {
        let c = cond("P/E Ratio", Operator::Unrecognized(">=".into()), 100.0);
        assert!(evaluate(&stock_with_pe(15.0), &c));
    }

    #[test]
    fn evaluate_all_is_conjunction() {
        let stock = Stock::new(1, "KO")
            .with(StockField::DivYield, 3.0)
            .with(StockField::Pe, 18.0);
        let both = vec![
            cond("Dividend Yield", Operator::GreaterThan, 2.0),
            cond("P/E Ratio", Operator::LessThan, 20.0),
        ];
        assert!(evaluate_all(&stock, &both));

        let one_fails = vec![
            cond("Dividend Yield", Operator::GreaterThan, 2.0),
            cond("P/E Ratio", Operator::LessThan, 10.0),
        ];
        assert!(!evaluate_all(&stock, &one_fails));
        assert!(evaluate_all(&stock, &[]));
    }
}
