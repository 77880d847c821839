#![allow(dead_code)]

use screener::domain::error::ScreenerError;
pub use screener::domain::stock::{Stock, StockField};
use screener::ports::data_port::StockDataPort;

pub struct MockDataPort {
    pub stocks: Vec<Stock>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            stocks: Vec::new(),
            error: None,
        }
    }

    pub fn with_stocks(mut self, stocks: Vec<Stock>) -> Self {
        self.stocks = stocks;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl StockDataPort for MockDataPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, ScreenerError> {
        if let Some(reason) = &self.error {
            return Err(ScreenerError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.stocks.clone())
    }
}

pub fn make_stock(id: usize, name: &str, metrics: &[(StockField, f64)]) -> Stock {
    metrics
        .iter()
        .fold(Stock::new(id, name), |s, (field, value)| s.with(*field, *value))
}

/// `count` stocks named `S001`.. with metrics derived from the index.
pub fn generate_stocks(count: usize) -> Vec<Stock> {
    (1..=count)
        .map(|i| {
            make_stock(
                i,
                &format!("S{:03}", i),
                &[
                    (StockField::MarketCap, (i * 7 % 50) as f64),
                    (StockField::Pe, 5.0 + (i % 30) as f64),
                    (StockField::Roe, (i % 25) as f64),
                    (StockField::DebtToEquity, (i % 5) as f64 * 0.4),
                    (StockField::DivYield, (i % 6) as f64 * 0.75),
                ],
            )
        })
        .collect()
}

pub fn ids(stocks: &[&Stock]) -> Vec<usize> {
    stocks.iter().map(|s| s.id).collect()
}

pub const FUNDAMENTALS_HEADER: &str = "Ticker,Market Capitalization (B),P/E Ratio,ROE (%),\
    Debt-to-Equity,Dividend Yield (%),Revenue Growth (%),EPS Growth (%),Current Ratio,\
    Gross Margin (%)";

pub fn fundamentals_csv(rows: &[&str]) -> String {
    let mut out = String::from(FUNDAMENTALS_HEADER);
    out.push('\n');
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}
