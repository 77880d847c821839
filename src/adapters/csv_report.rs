//! CSV export of the current page.
//!
//! Uses the same headers the loader reads, so an export can be fed back in as a dataset.

use std::io::Write;

use serde::Serialize;

use crate::domain::error::ScreenerError;
use crate::domain::screen::ScreenResult;
use crate::domain::stock::Stock;
use crate::ports::report_port::ReportPort;

/// Column names of [`StockRow`] in field order, for exports with no rows.
const HEADER: [&str; 11] = [
    "S.No.",
    "Ticker",
    "Market Capitalization (B)",
    "P/E Ratio",
    "ROE (%)",
    "Debt-to-Equity",
    "Dividend Yield (%)",
    "Revenue Growth (%)",
    "EPS Growth (%)",
    "Current Ratio",
    "Gross Margin (%)",
];

#[derive(Debug, Serialize)]
struct StockRow<'a> {
    #[serde(rename = "S.No.")]
    serial: usize,
    #[serde(rename = "Ticker")]
    name: &'a str,
    #[serde(rename = "Market Capitalization (B)")]
    market_cap: f64,
    #[serde(rename = "P/E Ratio")]
    pe: f64,
    #[serde(rename = "ROE (%)")]
    roe: f64,
    #[serde(rename = "Debt-to-Equity")]
    debt_to_equity: f64,
    #[serde(rename = "Dividend Yield (%)")]
    div_yield: f64,
    #[serde(rename = "Revenue Growth (%)")]
    revenue_growth: f64,
    #[serde(rename = "EPS Growth (%)")]
    eps_growth: f64,
    #[serde(rename = "Current Ratio")]
    current_ratio: f64,
    #[serde(rename = "Gross Margin (%)")]
    gross_margin: f64,
}

impl<'a> StockRow<'a> {
    fn new(serial: usize, stock: &'a Stock) -> Self {
        Self {
            serial,
            name: &stock.name,
            market_cap: stock.market_cap,
            pe: stock.pe,
            roe: stock.roe,
            debt_to_equity: stock.debt_to_equity,
            div_yield: stock.div_yield,
            revenue_growth: stock.revenue_growth,
            eps_growth: stock.eps_growth,
            current_ratio: stock.current_ratio,
            gross_margin: stock.gross_margin,
        }
    }
}

#[derive(Debug, Default)]
pub struct CsvReport;

impl CsvReport {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for CsvReport {
    fn write(&self, result: &ScreenResult<'_>, out: &mut dyn Write) -> Result<(), ScreenerError> {
        let mut wtr = csv::Writer::from_writer(out);
        // serialize() only emits the header along with the first record
        if result.page.items.is_empty() {
            wtr.write_record(HEADER).map_err(|e| ScreenerError::Output {
                reason: format!("CSV write error: {}", e),
            })?;
        }
        for (i, stock) in result.page.items.iter().enumerate() {
            wtr.serialize(StockRow::new(result.page.row_number(i), stock))
                .map_err(|e| ScreenerError::Output {
                    reason: format!("CSV write error: {}", e),
                })?;
        }
        wtr.flush()?;
        Ok(())
    }
}
