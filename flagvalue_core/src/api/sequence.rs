#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::capture::{InvalidValue, Slot};
use crate::dispatch::{Dispatch, Family, Flaggable};
use crate::model::{Options, SequenceSemantics, Setting};
use crate::prelude::{CollectionValue, FlagValue};
use crate::text::{read_list, unbracket, unquote, write_list};

/// A flag value holding an ordered list of elements.
///
/// The first successful parse replaces the default, and each later parse extends the content.
/// By default each occurrence carries a comma separated list of elements.
/// String sequences configured with [`string_sequence_is_repeat`](crate::string_sequence_is_repeat) instead take each occurrence as exactly one element.
///
/// ### Example
/// ```
/// # use flagvalue_core as flagvalue;
/// use flagvalue::prelude::*;
/// use flagvalue::Sequence;
///
/// let mut flag = Sequence::new(None, vec![1u32], []);
/// flag.parse("2,3").unwrap();
/// flag.parse("4").unwrap();
/// assert_eq!(flag.value(), &vec![2, 3, 4]);
/// assert_eq!(flag.render(), "[2,3,4]");
/// ```
pub struct Sequence<'a, T: Flaggable> {
    slot: Slot<'a, Vec<T>>,
    dispatch: Dispatch<T>,
    options: Options,
    written: bool,
}

impl<'a, T: Flaggable> Sequence<'a, T> {
    /// Create a sequence flag value, initialized to `default`.
    ///
    /// When `variable` is given, the default is written into it immediately, and every later change writes through to it.
    pub fn new(
        variable: Option<&'a mut Vec<T>>,
        default: Vec<T>,
        settings: impl IntoIterator<Item = Setting>,
    ) -> Self {
        Self {
            slot: Slot::new(variable, default),
            dispatch: T::dispatch(),
            options: Options::resolve(settings),
            written: false,
        }
    }

    /// The current elements.
    pub fn value(&self) -> &Vec<T> {
        &self.slot
    }

    /// The resolved options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether a parse (or replace) has discarded the default.
    pub fn is_written(&self) -> bool {
        self.written
    }

    /// The rendered form of each element.
    pub fn elements(&self) -> Vec<String> {
        self.slot
            .iter()
            .map(|element| self.dispatch.format_element(element, &self.options))
            .collect()
    }

    fn repeats(&self) -> bool {
        self.dispatch.family() == Some(Family::Text)
            && self.options.sequence_semantics() == SequenceSemantics::Repeat
    }

    fn read(&self, fields: &[String]) -> Result<Vec<T>, InvalidValue> {
        fields
            .iter()
            .map(|field| self.dispatch.parse_element(field, &self.options))
            .collect()
    }

    fn commit(&mut self, elements: Vec<T>) {
        if !self.written {
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Discarding the default of {} element(s) on first write.",
                    self.slot.len()
                );
            }
            self.slot.clear();
            self.written = true;
        }

        self.slot.extend(elements);
    }
}

impl<'a, T: Flaggable> FlagValue for Sequence<'a, T> {
    fn render(&self) -> String {
        format!("[{}]", write_list(&self.elements()))
    }

    fn parse(&mut self, text: &str) -> Result<(), InvalidValue> {
        let elements = if self.repeats() {
            vec![self.dispatch.parse_element(text, &self.options)?]
        } else {
            self.read(&read_list(unquote(text))?)?
        };

        self.commit(elements);
        Ok(())
    }

    fn type_name(&self) -> String {
        if self.repeats() {
            "stringArray".to_string()
        } else {
            format!("{}Slice", self.dispatch.element_name(&self.options))
        }
    }

    fn unmarshal_text(&mut self, text: &str) -> Result<(), InvalidValue> {
        let elements = self.read(&read_list(unbracket(text))?)?;
        self.commit(elements);
        Ok(())
    }
}

impl<'a, T: Flaggable> CollectionValue for Sequence<'a, T> {
    fn append(&mut self, text: &str) -> Result<(), InvalidValue> {
        let element = self.dispatch.parse_element(text, &self.options)?;
        self.slot.push(element);
        Ok(())
    }

    fn replace(&mut self, texts: &[&str]) -> Result<(), InvalidValue> {
        let elements = texts
            .iter()
            .map(|text| self.dispatch.parse_element(text, &self.options))
            .collect::<Result<Vec<T>, InvalidValue>>()?;
        *self.slot = elements;
        self.written = true;
        Ok(())
    }
}

impl<'a, T: Flaggable> std::fmt::Debug for Sequence<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("elements", &self.elements())
            .field("type_name", &self.type_name())
            .field("written", &self.written)
            .field("options", &self.options)
            .finish()
    }
}
