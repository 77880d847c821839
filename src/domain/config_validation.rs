//! Configuration validation.
//!
//! Validates the `[screen]` and `[output]` sections before a screen runs.

use crate::domain::error::ScreenerError;
use crate::domain::sort::SortDirection;
use crate::domain::stock::SortKey;
use crate::ports::config_port::ConfigPort;

pub const OUTPUT_FORMATS: [&str; 2] = ["table", "csv"];

pub fn validate_screen_config(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    validate_page_size(config)?;
    validate_sort(config)?;
    validate_direction(config)?;
    validate_query_source(config)?;
    validate_output_format(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: String) -> ScreenerError {
    ScreenerError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

fn validate_page_size(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    if config.get_string("screen", "page_size").is_none() {
        return Ok(());
    }
    let value = config.get_int("screen", "page_size", 0);
    if value <= 0 {
        return Err(invalid(
            "screen",
            "page_size",
            "page_size must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn validate_sort(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    match config.get_string("screen", "sort") {
        Some(s) => s
            .parse::<SortKey>()
            .map(|_| ())
            .map_err(|e| invalid("screen", "sort", e.to_string())),
        None => Ok(()),
    }
}

fn validate_direction(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    match config.get_string("screen", "direction") {
        Some(s) => s
            .parse::<SortDirection>()
            .map(|_| ())
            .map_err(|e| invalid("screen", "direction", e.to_string())),
        None => Ok(()),
    }
}

fn validate_query_source(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let has_inline = config.get_string("screen", "query").is_some();
    let has_file = config.get_string("screen", "query_file").is_some();
    if has_inline && has_file {
        return Err(invalid(
            "screen",
            "query",
            "set either query or query_file, not both".to_string(),
        ));
    }
    Ok(())
}

fn validate_output_format(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    match config.get_string("output", "format") {
        Some(s) if !OUTPUT_FORMATS.contains(&s.trim().to_ascii_lowercase().as_str()) => {
            Err(invalid(
                "output",
                "format",
                format!("expected one of {}, found '{}'", OUTPUT_FORMATS.join(", "), s),
            ))
        }
        _ => Ok(()),
    }
}
