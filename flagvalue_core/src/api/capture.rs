use std::ops::{Deref, DerefMut};

use thiserror::Error;

/// The error for a value that cannot be captured.
///
/// Adapters are left unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidValue {
    /// The token is not a well formed literal of the element type.
    #[error("cannot convert '{token}' to {type_name}: {reason}.")]
    InvalidConversion {
        /// The offending text.
        token: String,
        /// The target type name.
        type_name: String,
        /// What is wrong with the text.
        reason: String,
    },
    /// The token is a well formed number, but outside the range of the element type.
    #[error("'{token}' is out of range for {type_name}.")]
    OutOfRange {
        /// The offending text.
        token: String,
        /// The target type name.
        type_name: String,
    },
    /// The token is not a well formed list or `key=value` collection.
    #[error("malformed token '{token}': {reason}.")]
    InvalidFormat {
        /// The offending token or pair.
        token: String,
        /// What is wrong with the token.
        reason: String,
    },
}

impl InvalidValue {
    /// Construct an [`InvalidValue::InvalidConversion`].
    pub fn conversion(
        token: impl Into<String>,
        type_name: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        InvalidValue::InvalidConversion {
            token: token.into(),
            type_name: type_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Construct an [`InvalidValue::OutOfRange`].
    pub fn out_of_range(token: impl Into<String>, type_name: impl Into<String>) -> Self {
        InvalidValue::OutOfRange {
            token: token.into(),
            type_name: type_name.into(),
        }
    }

    /// Construct an [`InvalidValue::InvalidFormat`].
    pub fn format(token: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        InvalidValue::InvalidFormat {
            token: token.into(),
            reason: reason.to_string(),
        }
    }

    /// The offending text.
    pub fn token(&self) -> &str {
        match self {
            InvalidValue::InvalidConversion { token, .. }
            | InvalidValue::OutOfRange { token, .. }
            | InvalidValue::InvalidFormat { token, .. } => token,
        }
    }
}

/// The storage an adapter writes through: either the caller's variable, or its own.
pub(crate) enum Slot<'a, T> {
    Borrowed(&'a mut T),
    Owned(T),
}

impl<'a, T> Slot<'a, T> {
    /// Bind the slot, initialized to `default`.
    pub(crate) fn new(variable: Option<&'a mut T>, default: T) -> Self {
        match variable {
            Some(variable) => {
                *variable = default;
                Slot::Borrowed(variable)
            }
            None => Slot::Owned(default),
        }
    }
}

impl<'a, T> Deref for Slot<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Slot::Borrowed(variable) => &**variable,
            Slot::Owned(value) => value,
        }
    }
}

impl<'a, T> DerefMut for Slot<'a, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self {
            Slot::Borrowed(variable) => &mut **variable,
            Slot::Owned(value) => value,
        }
    }
}
