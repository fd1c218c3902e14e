/// The implied value for a boolean scalar that appears without an argument.
pub(crate) const BOOLEAN_IMPLIED: &str = "true";

/// The implied value for a counter scalar that appears without an argument.
///
/// Parsing this token increments the counter in place.
/// It is never a valid integer literal, so it cannot collide with an explicit value.
pub const COUNTER_INCREMENT: &str = "++";
