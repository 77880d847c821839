//! Query filtering over a dataset.

use crate::domain::condition::Condition;
use crate::domain::condition_eval::evaluate_all;
use crate::domain::query_parser::parse_query;
use crate::domain::stock::Stock;

/// Stocks matching every condition of `query`, in input order.
///
/// Blank query text returns the whole dataset untouched.
pub fn filter_stocks<'a>(stocks: &'a [Stock], query: &str) -> Vec<&'a Stock> {
    if query.trim().is_empty() {
        return stocks.iter().collect();
    }
    filter_with_conditions(stocks, &parse_query(query))
}

/// Same as [`filter_stocks`] for an already-parsed query.
pub fn filter_with_conditions<'a>(stocks: &'a [Stock], conditions: &[Condition]) -> Vec<&'a Stock> {
    stocks
        .iter()
        .filter(|stock| evaluate_all(stock, conditions))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stock::StockField;

    fn dataset() -> Vec<Stock> {
        vec![
            Stock::new(1, "AAA")
                .with(StockField::DivYield, 3.0)
                .with(StockField::Pe, 18.0)
                .with(StockField::DebtToEquity, 0.5),
            Stock::new(2, "BBB")
                .with(StockField::DivYield, 1.0)
                .with(StockField::Pe, 12.0)
                .with(StockField::DebtToEquity, 0.2),
            Stock::new(3, "CCC")
                .with(StockField::DivYield, 4.0)
                .with(StockField::Pe, 9.0)
                .with(StockField::DebtToEquity, 0.8),
        ]
    }

    fn ids(stocks: &[&Stock]) -> Vec<usize> {
        stocks.iter().map(|s| s.id).collect()
    }

    #[test]
    fn blank_query_returns_everything() {
        let data = dataset();
        assert_eq!(ids(&filter_stocks(&data, "")), vec![1, 2, 3]);
        assert_eq!(ids(&filter_stocks(&data, "  \n\t ")), vec![1, 2, 3]);
    }

    #[test]
    fn keyword_only_query_returns_everything() {
        let data = dataset();
        assert_eq!(ids(&filter_stocks(&data, "\n  AND\n")), vec![1, 2, 3]);
    }

    #[test]
    fn conjunction_of_conditions() {
        let data = dataset();
        let result = filter_stocks(
            &data,
            "Dividend Yield > 2 AND\nP/E Ratio < 20 AND\nDebt-to-Equity < 1",
        );
        assert_eq!(ids(&result), vec![1, 3]);
    }

    #[test]
    fn preserves_input_order() {
        let mut data = dataset();
        data.reverse();
        let result = filter_stocks(&data, "Dividend Yield > 2");
        assert_eq!(ids(&result), vec![3, 1]);
    }

    #[test]
    fn unknown_field_keeps_everything() {
        let data = dataset();
        assert_eq!(ids(&filter_stocks(&data, "Unknown Metric > 5")), vec![1, 2, 3]);
    }

    #[test]
    fn malformed_line_drops_everything() {
        let data = dataset();
        assert!(filter_stocks(&data, "P/E Ratio < twenty").is_empty());
        assert!(filter_stocks(&data, "Dividend Yield > 2\nno operator here").is_empty());
    }

    #[test]
    fn empty_dataset() {
        assert!(filter_stocks(&[], "ROE > 1").is_empty());
        assert!(filter_stocks(&[], "").is_empty());
    }
}
