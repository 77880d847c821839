//! CSV file dataset adapter.
//!
//! Reads the fundamentals sheet by header name. Rows with an empty ticker are skipped,
//! ids are assigned 1-based over the rows that remain, and every metric cell goes
//! through [`numeric::parse_or_zero`].

use crate::domain::error::ScreenerError;
use crate::domain::numeric;
use crate::domain::stock::{Stock, StockField};
use crate::ports::data_port::StockDataPort;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

pub const TICKER_COLUMN: &str = "Ticker";

/// Source header for each metric.
pub const METRIC_COLUMNS: [(&str, StockField); 9] = [
    ("Market Capitalization (B)", StockField::MarketCap),
    ("P/E Ratio", StockField::Pe),
    ("ROE (%)", StockField::Roe),
    ("Debt-to-Equity", StockField::DebtToEquity),
    ("Dividend Yield (%)", StockField::DivYield),
    ("Revenue Growth (%)", StockField::RevenueGrowth),
    ("EPS Growth (%)", StockField::EpsGrowth),
    ("Current Ratio", StockField::CurrentRatio),
    ("Gross Margin (%)", StockField::GrossMargin),
];

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StockDataPort for CsvAdapter {
    fn load_stocks(&self) -> Result<Vec<Stock>, ScreenerError> {
        let file = File::open(&self.path).map_err(|e| ScreenerError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        read_stocks(file)
    }
}

/// Parse a fundamentals CSV from any reader.
pub fn read_stocks<R: Read>(reader: R) -> Result<Vec<Stock>, ScreenerError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ScreenerError::Data {
            reason: format!("CSV header error: {}", e),
        })?
        .clone();

    let ticker_idx = headers
        .iter()
        .position(|h| h == TICKER_COLUMN)
        .ok_or_else(|| ScreenerError::Data {
            reason: format!("missing {} column", TICKER_COLUMN),
        })?;

    let metric_idx: Vec<(Option<usize>, StockField)> = METRIC_COLUMNS
        .iter()
        .map(|(name, field)| (headers.iter().position(|h| h == *name), *field))
        .collect();

    let mut stocks = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(|e| ScreenerError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;

        // ticker is kept as written; only an empty cell drops the row
        let name = record.get(ticker_idx).unwrap_or("");
        if name.is_empty() {
            continue;
        }

        let mut stock = Stock::new(stocks.len() + 1, name);
        for (idx, field) in &metric_idx {
            let cell = idx.and_then(|i| record.get(i)).unwrap_or("");
            *stock.metric_mut(*field) = numeric::parse_or_zero(cell);
        }
        stocks.push(stock);
    }

    Ok(stocks)
}
