use is_terminal::IsTerminal;
use std::fs::File;
use std::io::{self, BufWriter, Cursor, Write};

/// Whether a handler should colour its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourChoice {
    /// Colour only when writing to a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColourChoice {
    /// Build a choice from a `--color` / `--no-color` flag pair.
    /// `--no-color` wins if both are given.
    pub fn from_flags(force_on: bool, force_off: bool) -> Self {
        match (force_on, force_off) {
            (_, true) => ColourChoice::Never,
            (true, false) => ColourChoice::Always,
            (false, false) => ColourChoice::Auto,
        }
    }

    /// Resolve the choice against a concrete sink
    pub fn resolve<S: TerminalSink + ?Sized>(self, sink: &S) -> bool {
        match self {
            ColourChoice::Always => true,
            ColourChoice::Never => false,
            ColourChoice::Auto => sink.is_terminal(),
        }
    }
}

/// A writable destination for log lines that can report terminal attachment.
///
/// Sinks that have no way of knowing keep the default and count as
/// non-interactive.
pub trait TerminalSink: Write + Send {
    fn is_terminal(&self) -> bool {
        false
    }
}

impl TerminalSink for io::Stderr {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl TerminalSink for io::Stdout {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl TerminalSink for File {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }
}

impl TerminalSink for Vec<u8> {}

impl TerminalSink for Cursor<Vec<u8>> {}

impl<W: TerminalSink> TerminalSink for BufWriter<W> {
    fn is_terminal(&self) -> bool {
        self.get_ref().is_terminal()
    }
}

impl TerminalSink for Box<dyn TerminalSink> {
    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }
}
