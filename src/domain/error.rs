//! Domain error types.

/// Top-level error type for screener.
///
/// The core operations (parse, evaluate, filter, sort, paginate) never fail; these
/// errors come from loading data, reading config, writing output, or strict query mode.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("query has {count} problem(s)")]
    QueryInvalid { count: usize },

    #[error("output error: {reason}")]
    Output { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ScreenerError> for std::process::ExitCode {
    fn from(err: &ScreenerError) -> Self {
        let code: u8 = match err {
            ScreenerError::Io(_) => 1,
            ScreenerError::ConfigParse { .. }
            | ScreenerError::ConfigMissing { .. }
            | ScreenerError::ConfigInvalid { .. } => 2,
            ScreenerError::Data { .. } => 3,
            ScreenerError::QueryInvalid { .. } => 4,
            ScreenerError::Output { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
