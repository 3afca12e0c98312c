use crate::args::Lookup;
use crate::error::LogError;
use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%(?:\((?P<key>\w+)\)(?P<left>-)?(?P<width>\d+)?(?P<conv>[A-Za-z])|%)")
        .expect("placeholder regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `s`: the value as text
    Str,
    /// `d`: the value, which must parse as an integer
    Int,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        key: String,
        width: Option<usize>,
        left_align: bool,
        conversion: Conversion,
    },
}

/// Compiled printf-style template with named placeholders.
///
/// Supports `%(key)s`, `%(key)d`, an optional `-` flag and minimum width
/// (`%(levelname)-8s`) and `%%`. A `%` that does not open a placeholder is
/// kept as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, LogError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(source) {
            let whole = caps.get(0).expect("group 0 always matches");
            let between = &source[last..whole.start()];
            check_literal(source, between, last)?;
            literal.push_str(between);
            last = whole.end();

            let Some(key) = caps.name("key") else {
                // `%%`
                literal.push('%');
                continue;
            };

            let key = key.as_str().to_string();
            // `conv` always participates when `key` does
            let conversion = match &caps["conv"] {
                "s" => Conversion::Str,
                "d" => Conversion::Int,
                other => {
                    return Err(LogError::UnsupportedConversion {
                        key,
                        conversion: other.chars().next().unwrap_or('?'),
                    })
                }
            };
            // Width digits are bounded by the regex; only overflow can fail here
            let width = match caps.name("width") {
                Some(w) => Some(w.as_str().parse::<usize>().map_err(|_| {
                    LogError::MalformedTemplate {
                        template: source.to_string(),
                        position: w.start(),
                    }
                })?),
                None => None,
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field {
                key,
                width,
                left_align: caps.name("left").is_some(),
                conversion,
            });
        }

        let rest = &source[last..];
        check_literal(source, rest, last)?;
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Fill every placeholder from `args`
    pub fn render<L: Lookup + ?Sized>(&self, args: &L) -> Result<String, LogError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field {
                    key,
                    width,
                    left_align,
                    conversion,
                } => {
                    let value = args
                        .lookup(key)
                        .ok_or_else(|| LogError::MissingKey(key.clone()))?;
                    if *conversion == Conversion::Int && value.trim().parse::<i64>().is_err() {
                        return Err(LogError::NotANumber {
                            key: key.clone(),
                            value,
                        });
                    }
                    pad_into(&mut out, &value, *width, *left_align);
                }
            }
        }
        Ok(out)
    }

    /// Placeholder keys in order of appearance
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field { key, .. } => Some(key.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn uses_key(&self, key: &str) -> bool {
        self.keys().any(|k| k == key)
    }
}

/// Render a one-off template; used for message arguments at the call site
pub fn render_str<L: Lookup + ?Sized>(source: &str, args: &L) -> Result<String, LogError> {
    Template::parse(source)?.render(args)
}

fn check_literal(source: &str, literal: &str, offset: usize) -> Result<(), LogError> {
    match literal.find("%(") {
        Some(pos) => Err(LogError::MalformedTemplate {
            template: source.to_string(),
            position: offset + pos,
        }),
        None => Ok(()),
    }
}

fn pad_into(out: &mut String, value: &str, width: Option<usize>, left_align: bool) {
    let len = value.chars().count();
    let pad = width.map_or(0, |w| w.saturating_sub(len));
    if !left_align {
        out.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(value);
    if left_align {
        out.extend(std::iter::repeat(' ').take(pad));
    }
}
