use std::fmt;

/// Comprehensive error types for benchviz operations
#[derive(Debug)]
pub enum BenchvizError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON (de)serialization error
    Json(serde_json::Error),

    /// The measurement store could not answer the fetch
    StoreUnavailable {
        message: String,
        source: Option<rusqlite::Error>,
    },

    /// A fetched row is missing a required field or holds a non-numeric value
    /// where a number is expected; `depth` is `None` when the depth itself is
    /// unreadable
    MalformedRow {
        row_key: String,
        depth: Option<i64>,
    },

    /// A negative or non-finite duration reached the formatter
    InvalidDuration(f64),

    /// A zero or negative value would be plotted on a logarithmic axis
    NonPositiveDuration {
        row_key: String,
        depth: i64,
        value: f64,
    },

    /// Chart rendering error
    Render(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl BenchvizError {
    /// Build a `StoreUnavailable` without an underlying driver error
    pub fn store(message: impl Into<String>) -> Self {
        BenchvizError::StoreUnavailable {
            message: message.into(),
            source: None,
        }
    }
}

impl fmt::Display for BenchvizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchvizError::Io(err) => write!(f, "IO error: {err}"),
            BenchvizError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BenchvizError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            BenchvizError::Json(err) => write!(f, "JSON error: {err}"),
            BenchvizError::StoreUnavailable { message, source } => match source {
                Some(err) => write!(f, "Store unavailable: {message}: {err}"),
                None => write!(f, "Store unavailable: {message}"),
            },
            BenchvizError::MalformedRow { row_key, depth } => match depth {
                Some(depth) => write!(
                    f,
                    "Malformed row: '{row_key}' at depth {depth} has a missing or non-numeric field"
                ),
                None => write!(
                    f,
                    "Malformed row: '{row_key}' at an unknown depth has a missing or non-numeric field"
                ),
            },
            BenchvizError::InvalidDuration(value) => {
                write!(f, "Invalid duration: {value} ns is not a non-negative number")
            }
            BenchvizError::NonPositiveDuration {
                row_key,
                depth,
                value,
            } => write!(
                f,
                "Non-positive duration: '{row_key}' at depth {depth} is {value} ns and cannot be drawn on a logarithmic axis"
            ),
            BenchvizError::Render(msg) => write!(f, "Render error: {msg}"),
            BenchvizError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for BenchvizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchvizError::Io(err) => Some(err),
            BenchvizError::TomlParsing(err) => Some(err),
            BenchvizError::Json(err) => Some(err),
            BenchvizError::StoreUnavailable {
                source: Some(err), ..
            } => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BenchvizError {
    fn from(err: std::io::Error) -> Self {
        BenchvizError::Io(err)
    }
}

impl From<toml::de::Error> for BenchvizError {
    fn from(err: toml::de::Error) -> Self {
        BenchvizError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for BenchvizError {
    fn from(err: serde_json::Error) -> Self {
        BenchvizError::Json(err)
    }
}

impl From<rusqlite::Error> for BenchvizError {
    fn from(err: rusqlite::Error) -> Self {
        BenchvizError::StoreUnavailable {
            message: "query failed".to_string(),
            source: Some(err),
        }
    }
}

/// Type alias for Results using BenchvizError
pub type Result<T> = std::result::Result<T, BenchvizError>;
