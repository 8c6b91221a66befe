use thiserror::Error;

#[derive(Error, Debug)]
pub enum DefaultBoxError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid tag key '{key}': {reason}")]
    InvalidTagKey { key: String, reason: &'static str },
    #[error("Defaults for {record} not applied to: {}", .fields.join(", "))]
    Unresolved { record: &'static str, fields: Vec<String> },
}

pub type Result<T> = std::result::Result<T, DefaultBoxError>;

// Helper conversions
impl From<config::ConfigError> for DefaultBoxError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
