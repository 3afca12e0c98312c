use log::Level;

/// ANSI color codes keyed by log level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourScheme {
    pub error: &'static str, // Red for errors
    pub warn: &'static str,  // Yellow for warnings
    pub info: &'static str,
    pub debug: &'static str, // Cyan for debug
    pub trace: &'static str,
    pub reset: &'static str, // Reset to default color
}

/// Scheme used unless a handler is given another one.
pub static STANDARD: ColourScheme = ColourScheme {
    error: "\x1b[31m",
    warn: "\x1b[33m",
    info: "",
    debug: "\x1b[36m",
    trace: "",
    reset: "\x1b[0m",
};

impl ColourScheme {
    /// ANSI code for `level`, empty when the level has no colour
    pub fn code_for(&self, level: Level) -> &'static str {
        match level {
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
            Level::Trace => self.trace,
        }
    }

    /// Wrap `text` in the level's colour followed by the reset code.
    ///
    /// The reset is appended even when the level is unmapped.
    pub fn paint(&self, level: Level, text: &str) -> String {
        let code = self.code_for(level);
        let mut out = String::with_capacity(code.len() + text.len() + self.reset.len());
        out.push_str(code);
        out.push_str(text);
        out.push_str(self.reset);
        out
    }
}

impl Default for ColourScheme {
    fn default() -> Self {
        STANDARD.clone()
    }
}
