//! `flagvalue` provides strongly typed flag values for command line option parsers.
//!
//! An option parser (the *registration system*) knows nothing about the types of its flags.
//! It only sees text: the argument of each occurrence, the flag's current value for help output, and so on.
//! `flagvalue` sits between the two, giving the program compile-time typed storage while presenting the registration system a uniform text contract.
//! Specifically, `flagvalue` attempts to prioritize the following design concerns:
//! * *Type safe values*:
//! The user declares a `u16`, a `Vec<Duration>` or a `HashMap<String, IpNet>`, and never converts text by hand.
//! * *Round-trip safe text*:
//! The rendered form of every value parses back to the same value.
//! This is what lets a value be shown as a default, and later loaded from a config file.
//! * *Occurrence semantics*:
//! Repeated occurrences of the same flag accumulate (sequences), merge (mappings), or count (counters), as opposed to simply overwriting.
//!
//! # Usage
//! Create a [`Scalar`], [`Sequence`], or [`Mapping`] over the program's variable, and hand its [`FlagValue`](prelude::FlagValue) contract to the registration system.
//! ```
//! use flagvalue::prelude::*;
//! use flagvalue::{int_is_counter, Mapping, Scalar, Sequence};
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! let mut timeout = Duration::ZERO;
//! let mut verbosity: u8 = 0;
//! let mut tags: Vec<String> = Vec::default();
//! let mut limits: HashMap<String, u32> = HashMap::default();
//!
//! let mut flags: Vec<(&str, Box<dyn FlagValue + '_>)> = vec![
//!     ("timeout", Box::new(Scalar::new(Some(&mut timeout), Duration::from_secs(30), []))),
//!     ("verbose", Box::new(Scalar::new(Some(&mut verbosity), 0, [int_is_counter(true)]))),
//!     ("tag", Box::new(Sequence::new(Some(&mut tags), vec!["default".to_string()], []))),
//!     ("limit", Box::new(Mapping::new(Some(&mut limits), HashMap::default(), []))),
//! ];
//!
//! // What the registration system does for `--timeout 1m30s -vv --tag a,b --tag c --limit cpu=2`.
//! for (name, argument) in [
//!     ("timeout", Some("1m30s")),
//!     ("verbose", None),
//!     ("verbose", None),
//!     ("tag", Some("a,b")),
//!     ("tag", Some("c")),
//!     ("limit", Some("cpu=2")),
//! ] {
//!     let (_, flag) = flags.iter_mut().find(|(n, _)| *n == name).unwrap();
//!     let text = match argument {
//!         Some(text) => text.to_string(),
//!         None => flag.implied_value().unwrap(),
//!     };
//!     flag.parse(&text).unwrap();
//! }
//!
//! assert_eq!(flags[2].1.render(), "[a,b,c]");
//! drop(flags);
//! assert_eq!(timeout, Duration::from_secs(90));
//! assert_eq!(verbosity, 2);
//! assert_eq!(tags, vec!["a", "b", "c"]);
//! assert_eq!(limits["cpu"], 2);
//! ```
//!
//! # Adapters
//! * [`Scalar`]: holds a single element.
//! Each occurrence overwrites it, except counters (see below) which increment it.
//! * [`Sequence`]: holds an ordered `Vec` of elements.
//! The first occurrence replaces the default, and later occurrences extend the content.
//! * [`Mapping`]: holds a string keyed `HashMap` of elements, from `key=value` pairs.
//! The first occurrence replaces the default, and later occurrences merge into the content.
//!
//! Every adapter either writes through to the caller's variable, or owns its storage (pass `None`).
//! A failed parse never modifies the value; in collections, every element converts before any is committed.
//!
//! ### Element types
//! ```console
//! Element                          | Type name (scalar)         | Example text
//! --------------------------------------------------------------------------------------------
//! bool                             | bool                       | true, T, 1, false, F, 0
//! i8 .. i64, isize, u8 .. usize    | i8 .. usize; count         | 42, -0x2a, 0o52, 0b101010, 1_000
//! f32, f64                         | f32, f64                   | 1.5, 1e+06, +Inf, NaN
//! Complex32, Complex64             | complex32, complex64       | (1+2i), 3i, -4
//! String                           | string                     | anything
//! Vec<u8>                          | bytesHex; bytesBase64      | 00ff10; AP8Q
//! Duration                         | duration                   | 1h30m, 250ms
//! DateTime<FixedOffset>            | time                       | 2024-03-01T12:30:00Z
//! IpAddr, Ipv4Addr, Ipv6Addr       | ip, ipv4, ipv6             | 10.0.0.1, ::1
//! IpNet                            | ipNet                      | 10.0.0.0/8
//! IpMask                           | ipMask                     | 255.255.255.0, ffffff00
//! ```
//!
//! Sequence type names append `Slice` (ex: `durationSlice`), and mapping type names prepend `stringTo` (ex: `stringToDuration`).
//! Any other type may be used as an element by implementing [`FlagValue`](prelude::FlagValue) and `Default`, for example via the [derive](./derive/index.html).
//!
//! ### Collection text
//! A collection occurrence is one comma separated record, with `"` quoting for elements which themselves contain commas.
//! One pair of enclosing `'` or `` ` `` quotes around the whole occurrence is removed.
//! Collections render wrapped in brackets (ex: `[a,"b,c"]`), and their structured-text form (see [`TextSeed`]) accepts the same.
//!
//! # Settings
//! Settings change what an adapter does, without changing its contract.
//! * [`bytes_is_base64`]: byte sequences use base64 rather than hex.
//! * [`int_is_counter`]: integer scalars increment on [`COUNTER_INCREMENT`], which is also their implied value.
//! * [`string_sequence_is_repeat`]: string sequences take each occurrence as exactly one element, without splitting.
//! * [`with_time_formats`]: the accepted timestamp formats, the first of which is used to render.
//!
//! # Features
//! * `tracing_debug`: Emit debug logs via the `tracing` crate (ex: when a collection discards its default, or a counter increments).
pub mod derive;
pub use flagvalue_core::*;
