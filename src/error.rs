#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Malformed placeholder at byte {position} in template '{template}'")]
    MalformedTemplate { template: String, position: usize },

    #[error("Unsupported conversion '%{conversion}' for key '{key}'")]
    UnsupportedConversion { key: String, conversion: char },

    #[error("Missing key '{0}' in log arguments")]
    MissingKey(String),

    #[error("Value '{value}' for key '{key}' is not a number")]
    NotANumber { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
