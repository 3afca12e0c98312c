//! Logger wrapper that indents messages.
//!
//! [`IndentingAdapter`] keeps a depth counter and prefixes every line of every
//! message it forwards with that many copies of an indent unit. Depth changes
//! are either explicit ([`IndentingAdapter::indent`] /
//! [`IndentingAdapter::outdent`]) or scoped with [`IndentingAdapter::scope`],
//! which restores the previous depth when the guard is dropped.
//!
//! ```ignore
//! use logtweaks::{ColouringHandler, ColourChoice, IndentingAdapter};
//!
//! let handler = ColouringHandler::stderr(ColourChoice::Auto);
//! let mut log = IndentingAdapter::new(&handler);
//! log.info("building");
//! {
//!     let log = log.scope();
//!     log.info("compiling crate");
//! }
//! log.info("done");
//! ```

use crate::args::Lookup;
use crate::error::LogError;
use crate::indent::indent_lines;
use crate::template::render_str;
use log::{Level, Log, Metadata, Record};
use std::fmt;
use std::ops::{Deref, DerefMut};

pub const DEFAULT_UNIT: &str = "  ";

/// Per-call options forwarded untouched to the wrapped logger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallOptions {
    pub target: Option<String>,
    pub module_path: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = Some(module_path.into());
        self
    }
}

pub struct IndentingAdapter<L: Log> {
    inner: L,
    depth: usize,
    unit: String,
    target: String,
}

impl<L: Log> IndentingAdapter<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            depth: 0,
            unit: DEFAULT_UNIT.to_string(),
            target: String::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Target used when a call does not name its own
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    /// Decrease depth by one; a no-op at zero
    pub fn outdent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Indent until the returned guard is dropped.
    ///
    /// The guard restores the depth seen on entry, so unbalanced `indent`
    /// calls inside the scope, early returns and panics do not leak depth.
    pub fn scope(&mut self) -> IndentScope<'_, L> {
        let restore = self.depth;
        self.indent();
        IndentScope {
            adapter: self,
            restore,
        }
    }

    /// Indent `message` at the current depth; options pass through
    pub fn process(&self, message: &str, options: CallOptions) -> (String, CallOptions) {
        (indent_lines(message, self.depth, &self.unit), options)
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        self.inner
            .enabled(&Metadata::builder().level(level).target(&self.target).build())
    }

    pub fn log_at(&self, level: Level, message: impl fmt::Display) {
        self.log_with(level, message, CallOptions::default());
    }

    pub fn log_with(&self, level: Level, message: impl fmt::Display, options: CallOptions) {
        let target = options.target.as_deref().unwrap_or(&self.target);
        if !self
            .inner
            .enabled(&Metadata::builder().level(level).target(target).build())
        {
            return;
        }

        let (text, options) = self.process(&message.to_string(), options);
        let target = options.target.as_deref().unwrap_or(&self.target);
        self.inner.log(
            &Record::builder()
                .args(format_args!("{}", text))
                .level(level)
                .target(target)
                .module_path(options.module_path.as_deref())
                .file(options.file.as_deref())
                .line(options.line)
                .build(),
        );
    }

    /// Fill a `%(key)s` message template from `args`, then log it.
    ///
    /// A rendering error is returned and nothing is logged. Disabled levels
    /// return early without reading `args`.
    pub fn log_mapped<A: Lookup + ?Sized>(
        &self,
        level: Level,
        template: &str,
        args: &A,
    ) -> Result<(), LogError> {
        if !self.is_enabled_for(level) {
            return Ok(());
        }
        let message = render_str(template, args)?;
        self.log_at(level, message);
        Ok(())
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log_at(Level::Error, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log_at(Level::Warn, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log_at(Level::Info, message);
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log_at(Level::Debug, message);
    }

    pub fn trace(&self, message: impl fmt::Display) {
        self.log_at(Level::Trace, message);
    }
}

impl<L: Log> Log for IndentingAdapter<L> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.depth == 0 {
            self.inner.log(record);
            return;
        }

        let text = indent_lines(&record.args().to_string(), self.depth, &self.unit);
        self.inner.log(
            &Record::builder()
                .args(format_args!("{}", text))
                .metadata(record.metadata().clone())
                .module_path(record.module_path())
                .file(record.file())
                .line(record.line())
                .build(),
        );
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Guard returned by [`IndentingAdapter::scope`]
pub struct IndentScope<'a, L: Log> {
    adapter: &'a mut IndentingAdapter<L>,
    restore: usize,
}

impl<L: Log> Deref for IndentScope<'_, L> {
    type Target = IndentingAdapter<L>;

    fn deref(&self) -> &Self::Target {
        self.adapter
    }
}

impl<L: Log> DerefMut for IndentScope<'_, L> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.adapter
    }
}

impl<L: Log> Drop for IndentScope<'_, L> {
    fn drop(&mut self) {
        self.adapter.depth = self.restore;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::panic::{self, AssertUnwindSafe};

    #[derive(Default)]
    struct Capture {
        min_level: Option<Level>,
        records: Mutex<Vec<(Level, String, String)>>,
    }

    impl Capture {
        fn messages(&self) -> Vec<String> {
            self.records.lock().iter().map(|(_, _, m)| m.clone()).collect()
        }
    }

    impl Log for Capture {
        fn enabled(&self, metadata: &Metadata) -> bool {
            self.min_level.map_or(true, |min| metadata.level() <= min)
        }

        fn log(&self, record: &Record) {
            self.records.lock().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_depth_zero_unchanged() {
        let adapter = IndentingAdapter::new(Capture::default());
        let (msg, _) = adapter.process("line1\nline2", CallOptions::default());
        assert_eq!(msg, "line1\nline2");
    }

    #[test]
    fn test_one_indent() {
        let mut adapter = IndentingAdapter::new(Capture::default());
        adapter.indent();
        let (msg, _) = adapter.process("line1\nline2", CallOptions::default());
        assert_eq!(msg, "  line1\n  line2");
    }

    #[test]
    fn test_indent_outdent_balanced() {
        let mut adapter = IndentingAdapter::new(Capture::default());
        for n in 0..5 {
            for _ in 0..n {
                adapter.indent();
                let (msg, _) = adapter.process("a\nb", CallOptions::default());
                let prefix = "  ".repeat(adapter.depth());
                assert_eq!(msg, format!("{prefix}a\n{prefix}b"));
            }
            for _ in 0..n {
                adapter.outdent();
            }
            assert_eq!(adapter.depth(), 0);
        }
    }

    #[test]
    fn test_outdent_floor() {
        let mut adapter = IndentingAdapter::new(Capture::default());
        adapter.outdent();
        assert_eq!(adapter.depth(), 0);
        adapter.indent();
        adapter.outdent();
        adapter.outdent();
        assert_eq!(adapter.depth(), 0);
    }

    #[test]
    fn test_options_pass_through() {
        let mut adapter = IndentingAdapter::new(Capture::default());
        adapter.indent();
        let options = CallOptions::new()
            .with_target("db")
            .with_location("src/db.rs", 7);
        let (_, out) = adapter.process("x", options.clone());
        assert_eq!(out, options);
    }

    #[test]
    fn test_level_methods_keep_level() {
        let mut adapter = IndentingAdapter::new(Capture::default()).with_target("app");
        adapter.indent();
        adapter.error("e");
        adapter.warn("w");
        adapter.info("i");
        adapter.debug("d");
        adapter.trace("t");
        adapter.log_at(Level::Warn, format_args!("n={}", 3));

        let records = adapter.inner().records.lock().clone();
        let levels: Vec<Level> = records.iter().map(|(l, _, _)| *l).collect();
        assert_eq!(
            levels,
            vec![
                Level::Error,
                Level::Warn,
                Level::Info,
                Level::Debug,
                Level::Trace,
                Level::Warn
            ]
        );
        assert!(records.iter().all(|(_, target, _)| target == "app"));
        assert_eq!(records[5].2, "  n=3");
    }

    #[test]
    fn test_call_target_overrides_default() {
        let adapter = IndentingAdapter::new(Capture::default()).with_target("app");
        adapter.log_with(Level::Info, "hi", CallOptions::new().with_target("net"));
        assert_eq!(adapter.inner().records.lock()[0].1, "net");
    }

    #[test]
    fn test_disabled_levels_skipped() {
        let capture = Capture {
            min_level: Some(Level::Info),
            ..Capture::default()
        };
        let adapter = IndentingAdapter::new(capture);
        adapter.debug("hidden");
        adapter.info("shown");
        assert!(!adapter.is_enabled_for(Level::Debug));
        assert!(adapter.is_enabled_for(Level::Error));
        assert_eq!(adapter.inner().messages(), vec!["shown"]);
    }

    #[test]
    fn test_scope_restores_depth() {
        let mut adapter = IndentingAdapter::new(Capture::default());
        {
            let mut outer = adapter.scope();
            outer.info("one");
            {
                let inner = outer.scope();
                inner.info("two");
            }
            // Unbalanced indent inside a scope is undone on exit
            outer.indent();
            outer.indent();
            outer.info("four");
        }
        adapter.info("zero");
        assert_eq!(adapter.depth(), 0);
        assert_eq!(
            adapter.inner().messages(),
            vec!["  one", "    two", "      four", "zero"]
        );
    }

    #[test]
    fn test_scope_restores_depth_on_panic() {
        let mut adapter = IndentingAdapter::new(Capture::default());
        adapter.indent();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let scoped = adapter.scope();
            scoped.info("before panic");
            panic!("phase failed");
        }));
        assert!(result.is_err());
        assert_eq!(adapter.depth(), 1);
    }

    #[test]
    fn test_custom_unit() {
        let mut adapter = IndentingAdapter::new(Capture::default()).with_unit("| ");
        adapter.indent();
        adapter.indent();
        adapter.info("x\ny");
        assert_eq!(adapter.unit(), "| ");
        assert_eq!(adapter.inner().messages(), vec!["| | x\n| | y"]);
    }

    #[test]
    fn test_log_mapped() {
        let mut adapter = IndentingAdapter::new(Capture::default());
        adapter.indent();
        let mut args = HashMap::new();
        args.insert("user", "alice");
        adapter
            .log_mapped(Level::Info, "%(user)s logged in", &args)
            .unwrap();
        assert_eq!(adapter.inner().messages(), vec!["  alice logged in"]);
    }

    #[test]
    fn test_log_mapped_error_logs_nothing() {
        let adapter = IndentingAdapter::new(Capture::default());
        let args: HashMap<String, String> = HashMap::new();
        let result = adapter.log_mapped(Level::Info, "%(user)s logged in", &args);
        assert!(matches!(result, Err(LogError::MissingKey(_))));
        assert!(adapter.inner().messages().is_empty());
    }

    #[test]
    fn test_log_mapped_disabled_level_skips_rendering() {
        let capture = Capture {
            min_level: Some(Level::Error),
            ..Capture::default()
        };
        let adapter = IndentingAdapter::new(capture);
        let args: HashMap<String, String> = HashMap::new();
        assert!(adapter.log_mapped(Level::Debug, "%(x)s", &args).is_ok());
        assert!(adapter.log_mapped(Level::Info, "%(broken", &args).is_ok());
        assert!(adapter.inner().messages().is_empty());

        // Enabled levels still report rendering errors
        assert!(adapter.log_mapped(Level::Error, "%(x)s", &args).is_err());
    }

    #[test]
    fn test_log_trait_enabled_delegates() {
        let capture = Capture {
            min_level: Some(Level::Warn),
            ..Capture::default()
        };
        let adapter = IndentingAdapter::new(capture);
        let warn = Metadata::builder().level(Level::Warn).target("t").build();
        let info = Metadata::builder().level(Level::Info).target("t").build();
        assert!(Log::enabled(&adapter, &warn));
        assert!(!Log::enabled(&adapter, &info));
    }

    #[test]
    fn test_log_trait_indents_records() {
        let mut adapter = IndentingAdapter::new(Capture::default());
        adapter.indent();
        Log::log(
            &adapter,
            &Record::builder()
                .args(format_args!("a\nb"))
                .level(Level::Warn)
                .target("t")
                .build(),
        );
        let records = adapter.inner().records.lock().clone();
        assert_eq!(records, vec![(Level::Warn, "t".to_string(), "  a\n  b".to_string())]);
    }

    #[test]
    fn test_adapters_nest() {
        let mut outer = IndentingAdapter::new(IndentingAdapter::new(Capture::default()));
        outer.indent();
        // Inner adapter at depth 0 passes through, outer adds one level
        outer.info("x");
        assert_eq!(outer.inner().inner().messages(), vec!["  x"]);
    }

    #[test]
    fn test_borrowed_logger() {
        let capture = Capture::default();
        {
            let mut adapter = IndentingAdapter::new(&capture);
            adapter.indent();
            adapter.info("borrowed");
        }
        assert_eq!(capture.messages(), vec!["  borrowed"]);
    }
}
