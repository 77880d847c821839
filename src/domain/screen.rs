//! Screen pipeline: query text → filter → sort → one page of results.
//!
//! All state a screen needs travels in a [`ScreenRequest`]; the pipeline itself keeps
//! nothing between calls and borrows the dataset for the lifetime of the result.

use crate::domain::filter::filter_with_conditions;
use crate::domain::pagination::{Page, DEFAULT_PAGE_SIZE};
use crate::domain::query_parser::{parse_query_with_diagnostics, ParsedQuery};
use crate::domain::sort::{sort_stocks, SortState};
use crate::domain::stock::Stock;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRequest {
    pub query: String,
    pub sort: SortState,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ScreenRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort: SortState::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ScreenRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScreenResult<'a> {
    pub parsed: ParsedQuery,
    pub sort: SortState,
    pub page: Page<&'a Stock>,
}

impl ScreenResult<'_> {
    /// Number of stocks that passed the query, across all pages.
    pub fn matched(&self) -> usize {
        self.page.total
    }
}

pub fn screen<'a>(stocks: &'a [Stock], request: &ScreenRequest) -> ScreenResult<'a> {
    let parsed = if request.query.trim().is_empty() {
        ParsedQuery::default()
    } else {
        parse_query_with_diagnostics(&request.query)
    };

    let filtered = filter_with_conditions(stocks, &parsed.conditions);
    let sorted = sort_stocks(&filtered, request.sort);
    let page = Page::of(&sorted, request.page, request.page_size);

    ScreenResult {
        parsed,
        sort: request.sort,
        page,
    }
}
