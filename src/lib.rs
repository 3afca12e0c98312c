// src/lib.rs
pub mod adapter;
pub mod args;
pub mod colors;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod indent;
pub mod template;
pub mod tty;

pub use error::*;

pub use adapter::{CallOptions, IndentScope, IndentingAdapter};
pub use args::{from_fn, Lookup};
pub use colors::{ColourScheme, STANDARD};
pub use config::LogConfig;
pub use formatter::{PatternFormatter, RecordFormatter};
pub use handler::ColouringHandler;
pub use indent::indent_lines;
pub use template::Template;
pub use tty::{ColourChoice, TerminalSink};
