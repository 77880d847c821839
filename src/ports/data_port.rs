//! Dataset loader port trait.

use crate::domain::error::ScreenerError;
use crate::domain::stock::Stock;

/// Source of the stock dataset.
///
/// Implementations assign ids 1-based in source order and default absent or unparsable
/// metrics to zero. Every call returns a complete snapshot that replaces any previous one.
pub trait StockDataPort {
    fn load_stocks(&self) -> Result<Vec<Stock>, ScreenerError>;
}
