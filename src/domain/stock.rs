//! Stock fundamentals record and attribute selectors.

use std::fmt;
use std::str::FromStr;

use crate::domain::field_registry;

/// One stock's fundamental-metrics row.
///
/// `id` is assigned once at load time (1-based, source order). Metrics default to zero
/// when the source value is absent or unparsable.
#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    pub id: usize,
    pub name: String,
    pub market_cap: f64,
    pub pe: f64,
    pub roe: f64,
    pub debt_to_equity: f64,
    pub div_yield: f64,
    pub revenue_growth: f64,
    pub eps_growth: f64,
    pub current_ratio: f64,
    pub gross_margin: f64,
}

impl Stock {
    /// A stock with every metric at zero.
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            market_cap: 0.0,
            pe: 0.0,
            roe: 0.0,
            debt_to_equity: 0.0,
            div_yield: 0.0,
            revenue_growth: 0.0,
            eps_growth: 0.0,
            current_ratio: 0.0,
            gross_margin: 0.0,
        }
    }

    pub fn metric(&self, field: StockField) -> f64 {
        match field {
            StockField::MarketCap => self.market_cap,
            StockField::Pe => self.pe,
            StockField::Roe => self.roe,
            StockField::DebtToEquity => self.debt_to_equity,
            StockField::DivYield => self.div_yield,
            StockField::RevenueGrowth => self.revenue_growth,
            StockField::EpsGrowth => self.eps_growth,
            StockField::CurrentRatio => self.current_ratio,
            StockField::GrossMargin => self.gross_margin,
        }
    }

    pub fn metric_mut(&mut self, field: StockField) -> &mut f64 {
        match field {
            StockField::MarketCap => &mut self.market_cap,
            StockField::Pe => &mut self.pe,
            StockField::Roe => &mut self.roe,
            StockField::DebtToEquity => &mut self.debt_to_equity,
            StockField::DivYield => &mut self.div_yield,
            StockField::RevenueGrowth => &mut self.revenue_growth,
            StockField::EpsGrowth => &mut self.eps_growth,
            StockField::CurrentRatio => &mut self.current_ratio,
            StockField::GrossMargin => &mut self.gross_margin,
        }
    }

    /// Builder-style setter, mostly for fixtures.
    pub fn with(mut self, field: StockField, value: f64) -> Self {
        *self.metric_mut(field) = value;
        self
    }
}

/// Numeric attribute of a [`Stock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockField {
    MarketCap,
    Pe,
    Roe,
    DebtToEquity,
    DivYield,
    RevenueGrowth,
    EpsGrowth,
    CurrentRatio,
    GrossMargin,
}

impl StockField {
    pub const ALL: [StockField; 9] = [
        StockField::MarketCap,
        StockField::Pe,
        StockField::Roe,
        StockField::DebtToEquity,
        StockField::DivYield,
        StockField::RevenueGrowth,
        StockField::EpsGrowth,
        StockField::CurrentRatio,
        StockField::GrossMargin,
    ];

    /// Snake-case column id used by the CLI and config files.
    pub fn column_id(self) -> &'static str {
        match self {
            StockField::MarketCap => "market_cap",
            StockField::Pe => "pe",
            StockField::Roe => "roe",
            StockField::DebtToEquity => "debt_to_equity",
            StockField::DivYield => "div_yield",
            StockField::RevenueGrowth => "revenue_growth",
            StockField::EpsGrowth => "eps_growth",
            StockField::CurrentRatio => "current_ratio",
            StockField::GrossMargin => "gross_margin",
        }
    }
}

/// Column a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Name,
    Metric(StockField),
}

impl SortKey {
    pub fn column_id(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Metric(field) => field.column_id(),
        }
    }

    /// Every sortable column, in display order.
    pub fn all() -> Vec<SortKey> {
        let mut keys = vec![SortKey::Id, SortKey::Name];
        keys.extend(StockField::ALL.iter().map(|&f| SortKey::Metric(f)));
        keys
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key '{0}'")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    /// Accepts a column id (`market_cap`) or a registry label (`Market Capitalization`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if let Some(key) = SortKey::all().into_iter().find(|k| k.column_id() == lowered) {
            return Ok(key);
        }
        field_registry::lookup(trimmed)
            .map(SortKey::Metric)
            .ok_or_else(|| UnknownSortKey(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_reads_matching_attribute() {
        let stock = Stock::new(1, "AAPL")
            .with(StockField::Pe, 28.5)
            .with(StockField::GrossMargin, 44.1);
        assert_eq!(stock.metric(StockField::Pe), 28.5);
        assert_eq!(stock.metric(StockField::GrossMargin), 44.1);
        assert_eq!(stock.metric(StockField::Roe), 0.0);
    }

    #[test]
    fn every_field_round_trips_through_metric_mut() {
        let mut stock = Stock::new(1, "X");
        for (i, field) in StockField::ALL.iter().enumerate() {
            *stock.metric_mut(*field) = i as f64 + 1.0;
        }
        for (i, field) in StockField::ALL.iter().enumerate() {
            assert_eq!(stock.metric(*field), i as f64 + 1.0);
        }
    }

    #[test]
    fn sort_key_parses_column_ids() {
        assert_eq!("id".parse::<SortKey>().unwrap(), SortKey::Id);
        assert_eq!("Name".parse::<SortKey>().unwrap(), SortKey::Name);
        assert_eq!(
            "market_cap".parse::<SortKey>().unwrap(),
            SortKey::Metric(StockField::MarketCap)
        );
        assert_eq!(
            " gross_margin ".parse::<SortKey>().unwrap(),
            SortKey::Metric(StockField::GrossMargin)
        );
    }

    #[test]
    fn sort_key_parses_registry_labels() {
        assert_eq!(
            "P/E Ratio".parse::<SortKey>().unwrap(),
            SortKey::Metric(StockField::Pe)
        );
        assert_eq!(
            "Debt-to-Equity".parse::<SortKey>().unwrap(),
            SortKey::Metric(StockField::DebtToEquity)
        );
    }

    #[test]
    fn sort_key_rejects_unknown() {
        let err = "volume".parse::<SortKey>().unwrap_err();
        assert_eq!(err, UnknownSortKey("volume".into()));
        assert_eq!(err.to_string(), "unknown sort key 'volume'");
    }

    #[test]
    fn all_sort_keys_are_distinct() {
        let keys = SortKey::all();
        assert_eq!(keys.len(), 11);
        let ids: std::collections::HashSet<_> = keys.iter().map(|k| k.column_id()).collect();
        assert_eq!(ids.len(), 11);
    }
}
