//! Result ordering.
//!
//! Sorting is stable: stocks with equal sort values keep their relative input order.
//! For unequal values ascending puts the greater value later, descending puts the
//! smaller value later. NaN metrics sort as zero.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::stock::{SortKey, Stock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected asc or desc, found '{0}'")]
pub struct UnknownSortDirection(pub String);

impl FromStr for SortDirection {
    type Err = UnknownSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(UnknownSortDirection(s.trim().to_string())),
        }
    }
}

/// The active ordering. Defaults to id ascending (source order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Id,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// State after a click on `key`'s column header: same column flips direction,
    /// another column starts ascending.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                key,
                direction: SortDirection::Ascending,
            }
        }
    }
}

/// Stocks ordered by `state`, as a new list. The input is left untouched.
pub fn sort_stocks<'a>(stocks: &[&'a Stock], state: SortState) -> Vec<&'a Stock> {
    let mut sorted = stocks.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare_by_key(a, b, state.key);
        match state.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

fn compare_by_key(a: &Stock, b: &Stock, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Metric(field) => {
            let av = zero_if_nan(a.metric(field));
            let bv = zero_if_nan(b.metric(field));
            av.partial_cmp(&bv).unwrap_or(Ordering::Equal)
        }
    }
}

fn zero_if_nan(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}
