//! Traits which, typically, may be imported without concern: `use flagvalue::prelude::*`.
use crate::api::InvalidValue;

/// The text contract every flag value satisfies.
///
/// An external flag registration system drives a value exclusively through this trait.
/// It is object safe, so values of different types may be registered together as `Box<dyn FlagValue>`.
///
/// Implement it (together with [`Default`]) on your own type to use that type as a scalar, sequence, or mapping element.
/// The derive macro `flagvalue::derive::FlagValue` does so from `FromStr` and `Display`.
pub trait FlagValue {
    /// The canonical textual form of the current value.
    fn render(&self) -> String;

    /// Parse `text` into the value.
    /// On error the value must remain unchanged.
    fn parse(&mut self, text: &str) -> Result<(), InvalidValue>;

    /// A label for help and introspection.
    fn type_name(&self) -> String;

    /// The text to parse when the flag appears without an argument, if any.
    fn implied_value(&self) -> Option<String> {
        None
    }

    /// Whether the flag takes no argument, like a boolean switch.
    fn is_boolean_like(&self) -> bool {
        false
    }

    /// The structured-text (ex: config file) form of the value.
    fn marshal_text(&self) -> String {
        self.render()
    }

    /// Load the value from its structured-text form.
    fn unmarshal_text(&mut self, text: &str) -> Result<(), InvalidValue> {
        self.parse(text)
    }
}

// Needs to be imported in order to append/replace on a `Sequence` or `Mapping` through the contract.
/// Behaviour for flag values that hold multiple elements.
pub trait CollectionValue: FlagValue {
    /// Add exactly one element, parsed from `text`.
    ///
    /// This does not count as a write: a later [`FlagValue::parse`] still discards the default.
    fn append(&mut self, text: &str) -> Result<(), InvalidValue>;

    /// Clear the content, then add one element per text.
    /// This counts as a write.
    fn replace(&mut self, texts: &[&str]) -> Result<(), InvalidValue>;
}
