//! Derive Api for `flagvalue` extension types.
//!
//! ### Getting Started
//! Any type `T: FromStr + Display + Default` may become a flag element by instrumenting it with `#[derive(FlagValue)]`.
//! The generated [`FlagValue`](crate::prelude::FlagValue) renders via `Display` and parses via `FromStr`.
//! A failed `FromStr` is reported as [`InvalidValue::InvalidConversion`](crate::InvalidValue::InvalidConversion), carrying the error's `Display` as the reason.
//!
//! ```
//! use flagvalue::derive::*;
//! use flagvalue::prelude::*;
//! use flagvalue::{Scalar, Sequence};
//! use std::str::FromStr;
//!
//! #[derive(Debug, Default, PartialEq, FlagValue)]
//! #[flag_value(type_name = "level")]
//! enum Level {
//!     #[default]
//!     Info,
//!     Debug,
//! }
//!
//! impl FromStr for Level {
//!     type Err = String;
//!
//!     fn from_str(value: &str) -> Result<Self, Self::Err> {
//!         match value {
//!             "info" => Ok(Level::Info),
//!             "debug" => Ok(Level::Debug),
//!             _ => Err(format!("unknown level '{value}'")),
//!         }
//!     }
//! }
//!
//! impl std::fmt::Display for Level {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         match self {
//!             Level::Info => write!(f, "info"),
//!             Level::Debug => write!(f, "debug"),
//!         }
//!     }
//! }
//!
//! let mut flag = Scalar::new(None, Level::Info, []);
//! flag.parse("debug").unwrap();
//! assert_eq!(flag.value(), &Level::Debug);
//! assert!(flag.parse("trace").is_err());
//!
//! let mut flag = Sequence::new(None, Vec::<Level>::default(), []);
//! flag.parse("info,debug").unwrap();
//! assert_eq!(flag.type_name(), "levelSlice");
//! ```
//!
//! ### Attributes
//! The container attribute `#[flag_value(..)]` accepts:
//! ```console
//! Attribute               | Effect
//! ----------------------------------------------------------------------
//! type_name = "NAME"      | type_name() is NAME (default: the type's identifier)
//! implied = "TEXT"        | implied_value() is TEXT (default: none)
//! boolean                 | is_boolean_like() is true (default: false)
//! ```
pub use flagvalue_derive::*;
