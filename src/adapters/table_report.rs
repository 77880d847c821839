//! Plain-text table report.
//!
//! Layout:
//! - summary line (`N results found. Showing page P of Q`)
//! - one fixed-width table of the current page, sort arrow on the active column
//! - footer with the shown range, the first few page numbers and Prev/Next markers

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::domain::error::ScreenerError;
use crate::domain::pagination::page_links;
use crate::domain::screen::ScreenResult;
use crate::domain::stock::{SortKey, Stock, StockField};
use crate::ports::report_port::ReportPort;

/// Page numbers listed in the footer.
pub const MAX_PAGE_LINKS: usize = 3;

pub const COLUMNS: [(SortKey, &str); 11] = [
    (SortKey::Id, "S.No."),
    (SortKey::Name, "Name"),
    (SortKey::Metric(StockField::MarketCap), "Market Cap (B)"),
    (SortKey::Metric(StockField::Pe), "P/E"),
    (SortKey::Metric(StockField::Roe), "ROE %"),
    (SortKey::Metric(StockField::DebtToEquity), "D/E Ratio"),
    (SortKey::Metric(StockField::DivYield), "Div Yield %"),
    (SortKey::Metric(StockField::RevenueGrowth), "Rev Growth %"),
    (SortKey::Metric(StockField::EpsGrowth), "EPS Growth %"),
    (SortKey::Metric(StockField::CurrentRatio), "Current Ratio"),
    (SortKey::Metric(StockField::GrossMargin), "Gross Margin %"),
];

#[derive(Debug, Default)]
pub struct TableReport;

impl TableReport {
    pub fn new() -> Self {
        Self
    }
}

fn cell(stock: &Stock, key: SortKey, row_number: usize) -> String {
    match key {
        // S.No. is the position in the result list, not the stock id
        SortKey::Id => row_number.to_string(),
        SortKey::Name => stock.name.clone(),
        SortKey::Metric(field) => format!("{:.2}", stock.metric(field)),
    }
}

fn header_label(key: SortKey, label: &str, result: &ScreenResult<'_>) -> String {
    if result.sort.key == key {
        format!("{} {}", label, result.sort.direction.arrow())
    } else {
        label.to_string()
    }
}

/// Left-align `s` in a column `width` terminal cells wide.
fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

/// Right-align `s` in a column `width` terminal cells wide.
fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(s.width())), s)
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (c, w))| {
            // name column left-aligned, numbers right-aligned
            if i == 1 { pad_right(c, *w) } else { pad_left(c, *w) }
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

pub fn format_table(result: &ScreenResult<'_>) -> String {
    let headers: Vec<String> = COLUMNS
        .iter()
        .map(|(key, label)| header_label(*key, label, result))
        .collect();

    let rows: Vec<Vec<String>> = result
        .page
        .items
        .iter()
        .enumerate()
        .map(|(i, stock)| {
            COLUMNS
                .iter()
                .map(|(key, _)| cell(stock, *key, result.page.row_number(i)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            rows.iter()
                .map(|r| r[col].width())
                .chain(std::iter::once(h.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();
    output.push_str(&format_row(&headers, &widths));
    output.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
    output.push_str(&"-".repeat(rule_len));
    output.push('\n');
    for row in &rows {
        output.push_str(&format_row(row, &widths));
        output.push('\n');
    }
    output
}

pub fn format_summary(result: &ScreenResult<'_>) -> String {
    format!(
        "{} results found. Showing page {} of {}",
        result.matched(),
        result.page.number,
        result.page.page_count()
    )
}

pub fn format_footer(result: &ScreenResult<'_>) -> String {
    let range = match result.page.showing_range() {
        Some((first, last)) => format!("Showing {}-{} of {} results", first, last, result.matched()),
        None => format!("Showing 0 of {} results", result.matched()),
    };

    let count = result.page.page_count();
    if count == 0 {
        return range;
    }

    let mut links: Vec<String> = page_links(count, MAX_PAGE_LINKS)
        .into_iter()
        .map(|n| {
            if n == result.page.number {
                format!("[{}]", n)
            } else {
                n.to_string()
            }
        })
        .collect();
    if count > MAX_PAGE_LINKS {
        links.push("...".to_string());
    }
    if result.page.has_previous() {
        links.insert(0, "Prev".to_string());
    }
    if result.page.has_next() {
        links.push("Next".to_string());
    }

    format!("{}\nPages: {}", range, links.join(" "))
}

impl ReportPort for TableReport {
    fn write(&self, result: &ScreenResult<'_>, out: &mut dyn Write) -> Result<(), ScreenerError> {
        writeln!(out, "{}", format_summary(result))?;
        writeln!(out)?;
        write!(out, "{}", format_table(result))?;
        writeln!(out)?;
        writeln!(out, "{}", format_footer(result))?;
        Ok(())
    }
}
