use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum DemoError {
    /// Could not reach or authenticate with the Redis server
    #[error("Connection Error: {0}")]
    Connection(String),

    /// A Redis command failed after the connection was established
    #[error("Cache Error: {0}")]
    Cache(String),

    /// Reading or writing a workbook failed
    #[error("Spreadsheet Error: {0}")]
    Spreadsheet(String),

    #[error("CSV Error: {0}")]
    Csv(String),

    #[error("IO Error: {0}")]
    Io(String),

    /// JSON serialization/deserialization of cached values
    #[error("JSON Error: {0}")]
    Json(String),

    /// Configuration errors
    #[error("Config Error: {0}")]
    Config(String),

    /// A table lacks the columns an operation needs
    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("No data found in sheet: {0}")]
    EmptySheet(String),
}

impl DemoError {
    /// True for failures where the most likely fix is starting the server or fixing credentials.
    pub fn is_connection(&self) -> bool {
        matches!(self, DemoError::Connection(_))
    }
}

impl From<redis::RedisError> for DemoError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
            || err.kind() == redis::ErrorKind::AuthenticationFailed
        {
            DemoError::Connection(err.to_string())
        } else {
            DemoError::Cache(err.to_string())
        }
    }
}

impl From<calamine::Error> for DemoError {
    fn from(err: calamine::Error) -> Self {
        DemoError::Spreadsheet(format!("read failed: {}", err))
    }
}

impl From<rust_xlsxwriter::XlsxError> for DemoError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        DemoError::Spreadsheet(format!("write failed: {}", err))
    }
}

impl From<csv::Error> for DemoError {
    fn from(err: csv::Error) -> Self {
        DemoError::Csv(err.to_string())
    }
}

impl From<std::io::Error> for DemoError {
    fn from(err: std::io::Error) -> Self {
        DemoError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(err: serde_json::Error) -> Self {
        DemoError::Json(format!("JSON serialization/deserialization error: {}", err))
    }
}

impl From<url::ParseError> for DemoError {
    fn from(err: url::ParseError) -> Self {
        DemoError::Config(format!("invalid Redis URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_lists_every_name() {
        let err = DemoError::MissingColumns(vec!["Salary".to_string(), "Age".to_string()]);
        assert_eq!(err.to_string(), "Missing columns: Salary, Age");
    }

    #[test]
    fn only_connection_errors_are_flagged() {
        assert!(DemoError::Connection("refused".into()).is_connection());
        assert!(!DemoError::Cache("WRONGTYPE".into()).is_connection());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DemoError = io.into();
        assert!(matches!(err, DemoError::Io(msg) if msg.contains("gone")));
    }
}
