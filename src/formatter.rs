use crate::args::Lookup;
use crate::error::LogError;
use crate::template::Template;
use log::{Level, Record};
use std::fmt::Write;
use std::path::Path;

pub const DEFAULT_PATTERN: &str = "%(message)s";
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Trait for rendering a log record to text, before any colouring
pub trait RecordFormatter: Send + Sync {
    fn format(&self, record: &Record<'_>) -> Result<String, LogError>;
}

impl<F> RecordFormatter for F
where
    F: Fn(&Record<'_>) -> String + Send + Sync,
{
    fn format(&self, record: &Record<'_>) -> Result<String, LogError> {
        Ok(self(record))
    }
}

/// Conventional numeric value for a level, as exposed by `%(levelno)d`
pub fn level_number(level: Level) -> u32 {
    match level {
        Level::Error => 40,
        Level::Warn => 30,
        Level::Info => 20,
        Level::Debug => 10,
        Level::Trace => 5,
    }
}

/// Formats records through a [`Template`] over the record's fields.
///
/// Available keys: `message`, `levelname`, `levelno`, `name` (the target),
/// `module`, `pathname`, `filename`, `lineno`, `process` and `asctime`.
#[derive(Debug, Clone)]
pub struct PatternFormatter {
    template: Template,
    time_format: String,
}

impl PatternFormatter {
    pub fn new(pattern: &str) -> Result<Self, LogError> {
        Ok(Self {
            template: Template::parse(pattern)?,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        })
    }

    /// chrono format string used for `%(asctime)s`
    pub fn with_time_format(mut self, time_format: impl Into<String>) -> Self {
        self.time_format = time_format.into();
        self
    }

    pub fn uses_time(&self) -> bool {
        self.template.uses_key("asctime")
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self {
            template: Template::parse(DEFAULT_PATTERN).expect("default pattern is valid"),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl RecordFormatter for PatternFormatter {
    fn format(&self, record: &Record<'_>) -> Result<String, LogError> {
        self.template
            .render(&RecordFields::new(record, &self.time_format))
    }
}

/// Exposes a record's attributes to a template
pub struct RecordFields<'r, 'a> {
    record: &'r Record<'a>,
    time_format: &'r str,
}

impl<'r, 'a> RecordFields<'r, 'a> {
    pub fn new(record: &'r Record<'a>, time_format: &'r str) -> Self {
        Self {
            record,
            time_format,
        }
    }
}

impl Lookup for RecordFields<'_, '_> {
    fn lookup(&self, key: &str) -> Option<String> {
        let record = self.record;
        let value = match key {
            "message" => record.args().to_string(),
            "levelname" => record.level().as_str().to_string(),
            "levelno" => level_number(record.level()).to_string(),
            "name" => record.target().to_string(),
            "module" => record.module_path().unwrap_or_default().to_string(),
            "pathname" => record.file().unwrap_or_default().to_string(),
            "filename" => record
                .file()
                .and_then(|f| Path::new(f).file_name())
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
            "lineno" => record.line().unwrap_or(0).to_string(),
            "process" => std::process::id().to_string(),
            "asctime" => format_time(self.time_format),
            _ => return None,
        };
        Some(value)
    }
}

/// Current local time; an invalid chrono format falls back to the default one
fn format_time(time_format: &str) -> String {
    let now = chrono::Local::now();
    let mut out = String::new();
    if write!(out, "{}", now.format(time_format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", now.format(DEFAULT_TIME_FORMAT));
    }
    out
}
