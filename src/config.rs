use crate::adapter::DEFAULT_UNIT;
use crate::formatter::{DEFAULT_PATTERN, DEFAULT_TIME_FORMAT};
use crate::tty::ColourChoice;

/// Construction-time options for handlers and adapters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub colour: ColourChoice,
    pub pattern: String,
    pub time_format: String,
    pub indent_unit: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            colour: ColourChoice::Auto,
            pattern: DEFAULT_PATTERN.to_string(),         // message only
            time_format: DEFAULT_TIME_FORMAT.to_string(), // 2024-01-01 10:00:00,123
            indent_unit: DEFAULT_UNIT.to_string(),        // two spaces
        }
    }
}
