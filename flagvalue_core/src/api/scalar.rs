#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::capture::{InvalidValue, Slot};
use crate::constant::COUNTER_INCREMENT;
use crate::dispatch::{Dispatch, Flaggable};
use crate::model::{IntSemantics, Options, Setting};
use crate::prelude::FlagValue;

/// A flag value holding a single element.
///
/// Each successful parse overwrites the element.
/// Integer scalars configured with [`int_is_counter`](crate::int_is_counter) instead increment on [`COUNTER_INCREMENT`].
///
/// ### Example
/// ```
/// # use flagvalue_core as flagvalue;
/// use flagvalue::prelude::*;
/// use flagvalue::Scalar;
///
/// let mut verbose = false;
/// let mut flag = Scalar::new(Some(&mut verbose), false, []);
/// let implied = flag.implied_value().unwrap();
/// flag.parse(&implied).unwrap();
/// assert_eq!(flag.render(), "true");
/// drop(flag);
/// assert!(verbose);
/// ```
pub struct Scalar<'a, T: Flaggable> {
    slot: Slot<'a, T>,
    dispatch: Dispatch<T>,
    options: Options,
}

impl<'a, T: Flaggable> Scalar<'a, T> {
    /// Create a scalar flag value, initialized to `default`.
    ///
    /// When `variable` is given, the default is written into it immediately, and every later parse writes through to it.
    pub fn new(
        variable: Option<&'a mut T>,
        default: T,
        settings: impl IntoIterator<Item = Setting>,
    ) -> Self {
        Self {
            slot: Slot::new(variable, default),
            dispatch: T::dispatch(),
            options: Options::resolve(settings),
        }
    }

    /// The current element.
    pub fn value(&self) -> &T {
        &self.slot
    }

    /// The resolved options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn counter(&self) -> Option<fn(&T) -> Option<T>> {
        match self.options.int_semantics() {
            IntSemantics::Counter => self.dispatch.increment(),
            IntSemantics::Plain => None,
        }
    }
}

impl<'a, T: Flaggable> FlagValue for Scalar<'a, T> {
    fn render(&self) -> String {
        self.dispatch.format_element(&self.slot, &self.options)
    }

    fn parse(&mut self, text: &str) -> Result<(), InvalidValue> {
        match self.counter() {
            Some(increment) if text == COUNTER_INCREMENT => match increment(&self.slot) {
                Some(next) => {
                    *self.slot = next;
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Incremented counter to {}.", self.render());
                    }
                    Ok(())
                }
                None => Err(InvalidValue::out_of_range(text, self.type_name())),
            },
            _ => self
                .dispatch
                .parse_into(&mut self.slot, text, &self.options),
        }
    }

    fn type_name(&self) -> String {
        match self.counter() {
            Some(_) => "count".to_string(),
            None => self.dispatch.type_name(&self.slot, &self.options),
        }
    }

    fn implied_value(&self) -> Option<String> {
        match self.counter() {
            Some(_) => Some(COUNTER_INCREMENT.to_string()),
            None => self.dispatch.implied_value(&self.slot),
        }
    }

    fn is_boolean_like(&self) -> bool {
        self.dispatch.is_boolean_like(&self.slot)
    }
}

impl<'a, T: Flaggable> std::fmt::Debug for Scalar<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scalar")
            .field("value", &self.render())
            .field("type_name", &self.type_name())
            .field("options", &self.options)
            .finish()
    }
}
