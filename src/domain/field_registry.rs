//! Field registry: maps the labels users type in queries to stock attributes.
//!
//! The table is closed. Every [`StockField`] must appear here or it cannot be reached
//! from a query; `every_field_has_a_label` guards that.

use crate::domain::stock::StockField;

/// Label → attribute table, in display order. Labels are matched exactly
/// (case-sensitive).
pub const FIELDS: [(&str, StockField); 9] = [
    ("Market Capitalization", StockField::MarketCap),
    ("P/E Ratio", StockField::Pe),
    ("ROE", StockField::Roe),
    ("Debt-to-Equity", StockField::DebtToEquity),
    ("Dividend Yield", StockField::DivYield),
    ("Revenue Growth", StockField::RevenueGrowth),
    ("EPS Growth", StockField::EpsGrowth),
    ("Current Ratio", StockField::CurrentRatio),
    ("Gross Margin", StockField::GrossMargin),
];

pub fn lookup(label: &str) -> Option<StockField> {
    FIELDS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, field)| *field)
}

pub fn label_of(field: StockField) -> &'static str {
    FIELDS
        .iter()
        .find(|(_, f)| *f == field)
        .map(|(label, _)| *label)
        .unwrap_or("")
}
