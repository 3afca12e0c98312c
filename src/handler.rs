use crate::colors::{ColourScheme, STANDARD};
use crate::config::LogConfig;
use crate::error::LogError;
use crate::formatter::{PatternFormatter, RecordFormatter};
use crate::tty::{ColourChoice, TerminalSink};
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Stream handler that colours each line by severity.
///
/// Text comes from a [`RecordFormatter`]; when colour is enabled it is wrapped
/// in the level's ANSI code and a reset. One line is written per record, under
/// the handler's lock.
pub struct ColouringHandler<W: TerminalSink = io::Stderr> {
    sink: Mutex<W>,
    formatter: Box<dyn RecordFormatter>,
    scheme: &'static ColourScheme,
    colour: bool,
}

impl ColouringHandler<io::Stderr> {
    /// Handler writing to the process's standard error
    pub fn stderr(choice: ColourChoice) -> Self {
        Self::new(io::stderr(), choice)
    }
}

impl<W: TerminalSink> ColouringHandler<W> {
    pub fn new(sink: W, choice: ColourChoice) -> Self {
        let colour = choice.resolve(&sink);
        Self {
            sink: Mutex::new(sink),
            formatter: Box::new(PatternFormatter::default()),
            scheme: &STANDARD,
            colour,
        }
    }

    pub fn from_config(sink: W, config: &LogConfig) -> Result<Self, LogError> {
        let formatter =
            PatternFormatter::new(&config.pattern)?.with_time_format(config.time_format.clone());
        Ok(Self::new(sink, config.colour).with_formatter(formatter))
    }

    pub fn with_formatter(mut self, formatter: impl RecordFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn with_scheme(mut self, scheme: &'static ColourScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn colour_enabled(&self) -> bool {
        self.colour
    }

    pub fn scheme(&self) -> &'static ColourScheme {
        self.scheme
    }

    /// Render a record, coloured if enabled. Nothing is written.
    pub fn format(&self, record: &Record<'_>) -> Result<String, LogError> {
        let message = self.formatter.format(record)?;
        if self.colour {
            Ok(self.scheme.paint(record.level(), &message))
        } else {
            Ok(message)
        }
    }

    /// Format and write one record followed by a newline
    pub fn emit(&self, record: &Record<'_>) -> Result<(), LogError> {
        let line = self.format(record)?;
        let mut sink = self.sink.lock();
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")?;
        sink.flush()?;
        Ok(())
    }

    /// Report a failed emit on stderr without disturbing the caller
    pub fn handle_error(&self, record: &Record<'_>, err: &LogError) {
        let _ = write_diagnostic(&mut io::stderr().lock(), record, err);
    }

    pub fn into_sink(self) -> W {
        self.sink.into_inner()
    }
}

impl<W: TerminalSink + 'static> ColouringHandler<W> {
    /// Install as the global `log` logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self, max_level: LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

fn write_diagnostic(out: &mut impl Write, record: &Record<'_>, err: &LogError) -> io::Result<()> {
    writeln!(out, "--- Logging error ---")?;
    writeln!(out, "{}", err)?;
    writeln!(
        out,
        "Record: level={} target={} message={:?}",
        record.level(),
        record.target(),
        record.args().to_string()
    )
}

impl<W: TerminalSink> Log for ColouringHandler<W> {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Err(err) = self.emit(record) {
            self.handle_error(record, &err);
        }
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}
