use std::convert::Infallible;
use std::str::FromStr;

use chrono::{Datelike, DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};

/// The textual encoding of byte sequence values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BytesEncoding {
    /// Two hexadecimal digits per byte.
    #[default]
    Hex,
    /// The standard base64 alphabet, with padding.
    Base64,
}

/// The semantics of integer scalars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntSemantics {
    /// Each occurrence overwrites the value.
    #[default]
    Plain,
    /// Each occurrence without an argument increments the value.
    Counter,
}

/// The per-occurrence semantics of string sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SequenceSemantics {
    /// Each occurrence carries a comma separated list of elements.
    #[default]
    List,
    /// Each occurrence carries exactly one element.
    Repeat,
}

/// A timestamp format.
///
/// Parses from `"rfc3339"` or `"rfc2822"` (case insensitive); any other text is a custom [`chrono`] strftime format.
/// A custom format without an offset reads the timestamp as UTC, and a date-only custom format reads it as midnight UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    /// RFC 3339, rendered with `Z` for UTC and the minimal sub-second digits.
    Rfc3339,
    /// RFC 2822, the numeric zone form of RFC 1123.
    Rfc2822,
    /// A strftime format string.
    Custom(String),
}

impl TimeFormat {
    pub(crate) fn read(&self, text: &str) -> Option<DateTime<FixedOffset>> {
        match self {
            TimeFormat::Rfc3339 => DateTime::parse_from_rfc3339(text)
                .ok()
                .or_else(|| read_signed_year(text)),
            TimeFormat::Rfc2822 => DateTime::parse_from_rfc2822(text)
                .ok()
                .or_else(|| read_signed_year(text)),
            TimeFormat::Custom(format) => DateTime::parse_from_str(text, format)
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(text, format)
                        .ok()
                        .map(|naive| naive.and_utc().fixed_offset())
                })
                .or_else(|| {
                    NaiveDate::parse_from_str(text, format)
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                        .map(|naive| naive.and_utc().fixed_offset())
                }),
        }
    }

    pub(crate) fn write(&self, timestamp: &DateTime<FixedOffset>) -> String {
        match self {
            TimeFormat::Rfc3339 => timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            TimeFormat::Rfc2822 if (0..=9999).contains(&timestamp.year()) => {
                timestamp.to_rfc2822()
            }
            // RFC 2822 has no form for these years.
            TimeFormat::Rfc2822 => TimeFormat::Rfc3339.write(timestamp),
            TimeFormat::Custom(format) => {
                use std::fmt::Write;
                let mut out = String::default();
                // An invalid strftime item fails the write, in which case we fall back to the lossless form.
                match write!(out, "{}", timestamp.format(format)) {
                    Ok(()) => out,
                    Err(_) => TimeFormat::Rfc3339.write(timestamp),
                }
            }
        }
    }
}

/// Read the RFC 3339 layout with a signed year outside `0..=9999` (`+12000-01-01T00:00:00Z`).
fn read_signed_year(text: &str) -> Option<DateTime<FixedOffset>> {
    if !text.starts_with(['+', '-']) {
        return None;
    }

    let text = match text.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };
    DateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f%:z").ok()
}

impl std::fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeFormat::Rfc3339 => write!(f, "rfc3339"),
            TimeFormat::Rfc2822 => write!(f, "rfc2822"),
            TimeFormat::Custom(format) => write!(f, "{format}"),
        }
    }
}

impl FromStr for TimeFormat {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.to_ascii_lowercase().as_str() {
            "rfc3339" => TimeFormat::Rfc3339,
            "rfc2822" => TimeFormat::Rfc2822,
            _ => TimeFormat::Custom(value.to_string()),
        })
    }
}

impl From<&str> for TimeFormat {
    fn from(value: &str) -> Self {
        match TimeFormat::from_str(value) {
            Ok(format) => format,
            Err(never) => match never {},
        }
    }
}

impl From<String> for TimeFormat {
    fn from(value: String) -> Self {
        TimeFormat::from(value.as_str())
    }
}

/// The resolved configuration of an adapter.
///
/// Built once from a list of [`Setting`]s (see [`Options::resolve`]) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    bytes: BytesEncoding,
    ints: IntSemantics,
    strings: SequenceSemantics,
    // Split so the format list can never be empty.
    canonical_time_format: TimeFormat,
    fallback_time_formats: Vec<TimeFormat>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            bytes: BytesEncoding::Hex,
            ints: IntSemantics::Plain,
            strings: SequenceSemantics::List,
            canonical_time_format: TimeFormat::Rfc3339,
            fallback_time_formats: vec![TimeFormat::Rfc2822],
        }
    }
}

impl Options {
    /// Fold the settings, left to right, over the defaults.
    /// Later settings win over earlier ones.
    ///
    /// ### Example
    /// ```
    /// # use flagvalue_core as flagvalue;
    /// use flagvalue::{bytes_is_base64, BytesEncoding, Options};
    ///
    /// let options = Options::resolve([bytes_is_base64(true), bytes_is_base64(false)]);
    /// assert_eq!(options.bytes_encoding(), BytesEncoding::Hex);
    /// ```
    pub fn resolve(settings: impl IntoIterator<Item = Setting>) -> Self {
        settings
            .into_iter()
            .fold(Options::default(), |mut options, setting| {
                (setting.0)(&mut options);
                options
            })
    }

    /// The encoding of byte sequences.
    pub fn bytes_encoding(&self) -> BytesEncoding {
        self.bytes
    }

    /// The semantics of integer scalars.
    pub fn int_semantics(&self) -> IntSemantics {
        self.ints
    }

    /// The per-occurrence semantics of string sequences.
    pub fn sequence_semantics(&self) -> SequenceSemantics {
        self.strings
    }

    /// The format used to render timestamps.
    pub fn canonical_time_format(&self) -> &TimeFormat {
        &self.canonical_time_format
    }

    /// All accepted timestamp formats, in the order they are tried.
    pub fn time_formats(&self) -> impl Iterator<Item = &TimeFormat> {
        std::iter::once(&self.canonical_time_format).chain(self.fallback_time_formats.iter())
    }
}

/// An opaque setter over [`Options`].
pub struct Setting(Box<dyn FnOnce(&mut Options)>);

impl std::fmt::Debug for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Setting{..}").finish()
    }
}

/// Encode byte sequences as base64 rather than hex.
pub fn bytes_is_base64(enabled: bool) -> Setting {
    Setting(Box::new(move |options| {
        options.bytes = if enabled {
            BytesEncoding::Base64
        } else {
            BytesEncoding::Hex
        };
    }))
}

/// Give integer scalars counter semantics.
///
/// Repeated occurrences without an argument then increment the value.
pub fn int_is_counter(enabled: bool) -> Setting {
    Setting(Box::new(move |options| {
        options.ints = if enabled {
            IntSemantics::Counter
        } else {
            IntSemantics::Plain
        };
    }))
}

/// Give string sequences repeat semantics.
///
/// Each occurrence then supplies exactly one element, without splitting on commas.
pub fn string_sequence_is_repeat(enabled: bool) -> Setting {
    Setting(Box::new(move |options| {
        options.strings = if enabled {
            SequenceSemantics::Repeat
        } else {
            SequenceSemantics::List
        };
    }))
}

/// Set the accepted timestamp formats.
/// The first format is used to render timestamps.
///
/// An empty list leaves the formats unchanged.
///
/// ### Example
/// ```
/// # use flagvalue_core as flagvalue;
/// use flagvalue::{with_time_formats, Options, TimeFormat};
///
/// let options = Options::resolve([with_time_formats(["%Y-%m-%d", "rfc3339"])]);
/// assert_eq!(options.canonical_time_format(), &TimeFormat::Custom("%Y-%m-%d".to_string()));
/// ```
pub fn with_time_formats<F: Into<TimeFormat>>(formats: impl IntoIterator<Item = F>) -> Setting {
    let mut formats = formats.into_iter().map(Into::into);
    let first = formats.next();
    let rest: Vec<TimeFormat> = formats.collect();

    Setting(Box::new(move |options| {
        if let Some(first) = first {
            options.canonical_time_format = first;
            options.fallback_time_formats = rest;
        }
    }))
}
