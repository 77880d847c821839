//! Result rendering port trait.

use std::io::Write;

use crate::domain::error::ScreenerError;
use crate::domain::screen::ScreenResult;

/// Port for writing one page of screen results.
pub trait ReportPort {
    fn write(&self, result: &ScreenResult<'_>, out: &mut dyn Write) -> Result<(), ScreenerError>;

    /// Default implementation: renders into a string via `write`.
    fn render(&self, result: &ScreenResult<'_>) -> Result<String, ScreenerError> {
        let mut buf = Vec::new();
        self.write(result, &mut buf)?;
        String::from_utf8(buf).map_err(|e| ScreenerError::Output {
            reason: format!("report is not valid UTF-8: {}", e),
        })
    }
}
