use std::collections::HashMap;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::capture::{InvalidValue, Slot};
use crate::dispatch::{Dispatch, Flaggable};
use crate::model::{Options, Setting};
use crate::prelude::{CollectionValue, FlagValue};
use crate::text::{read_list, read_pair, unbracket, unquote, write_list};

/// A flag value holding string-keyed elements.
///
/// Each occurrence carries comma separated `key=value` pairs.
/// The first successful parse replaces the default, and each later parse merges into the content (a repeated key overwrites).
///
/// ### Example
/// ```
/// # use flagvalue_core as flagvalue;
/// use flagvalue::prelude::*;
/// use flagvalue::Mapping;
/// use std::collections::HashMap;
///
/// let mut limits: HashMap<String, u32> = HashMap::default();
/// let mut flag = Mapping::new(Some(&mut limits), HashMap::default(), []);
/// flag.parse("cpu=2,memory=512").unwrap();
/// flag.parse("cpu=4").unwrap();
/// assert_eq!(flag.render(), "[cpu=4,memory=512]");
/// drop(flag);
/// assert_eq!(limits["cpu"], 4);
/// ```
pub struct Mapping<'a, T: Flaggable> {
    slot: Slot<'a, HashMap<String, T>>,
    dispatch: Dispatch<T>,
    options: Options,
    written: bool,
}

impl<'a, T: Flaggable> Mapping<'a, T> {
    /// Create a mapping flag value, initialized to `default`.
    ///
    /// When `variable` is given, the default is written into it immediately, and every later change writes through to it.
    pub fn new(
        variable: Option<&'a mut HashMap<String, T>>,
        default: HashMap<String, T>,
        settings: impl IntoIterator<Item = Setting>,
    ) -> Self {
        Self {
            slot: Slot::new(variable, default),
            dispatch: T::dispatch(),
            options: Options::resolve(settings),
            written: false,
        }
    }

    /// The current entries.
    pub fn value(&self) -> &HashMap<String, T> {
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

    /// The rendered form of each entry's element.
    pub fn entries(&self) -> HashMap<String, String> {
        self.slot
            .iter()
            .map(|(key, element)| {
                (
                    key.clone(),
                    self.dispatch.format_element(element, &self.options),
                )
            })
            .collect()
    }

    fn read_entry(&self, field: &str) -> Result<(String, T), InvalidValue> {
        let (key, value) = read_pair(field)?;
        let element = self.dispatch.parse_element(value, &self.options)?;
        Ok((key.to_string(), element))
    }

    fn read(&self, fields: &[String]) -> Result<Vec<(String, T)>, InvalidValue> {
        fields.iter().map(|field| self.read_entry(field)).collect()
    }

    fn commit(&mut self, entries: Vec<(String, T)>) {
        if !self.written {
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Discarding the default of {} entries on first write.",
                    self.slot.len()
                );
            }
            self.slot.clear();
            self.written = true;
        }

        self.slot.extend(entries);
    }
}

impl<'a, T: Flaggable> FlagValue for Mapping<'a, T> {
    fn render(&self) -> String {
        let mut entries: Vec<(String, String)> = self.entries().into_iter().collect();
        entries.sort();
        let fields: Vec<String> = entries
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        format!("[{}]", write_list(&fields))
    }

    fn parse(&mut self, text: &str) -> Result<(), InvalidValue> {
        let entries = self.read(&read_list(unquote(text))?)?;
        self.commit(entries);
        Ok(())
    }

    fn type_name(&self) -> String {
        let element = self.dispatch.element_name(&self.options);
        let mut characters = element.chars();

        match characters.next() {
            Some(first) => format!("stringTo{}{}", first.to_uppercase(), characters.as_str()),
            None => "stringTo".to_string(),
        }
    }

    fn unmarshal_text(&mut self, text: &str) -> Result<(), InvalidValue> {
        let entries = self.read(&read_list(unbracket(text))?)?;
        self.commit(entries);
        Ok(())
    }
}

impl<'a, T: Flaggable> CollectionValue for Mapping<'a, T> {
    fn append(&mut self, text: &str) -> Result<(), InvalidValue> {
        let (key, element) = self.read_entry(text)?;
        self.slot.insert(key, element);
        Ok(())
    }

    fn replace(&mut self, texts: &[&str]) -> Result<(), InvalidValue> {
        let entries = texts
            .iter()
            .map(|text| self.read_entry(text))
            .collect::<Result<Vec<(String, T)>, InvalidValue>>()?;
        self.slot.clear();
        self.slot.extend(entries);
        self.written = true;
        Ok(())
    }
}

impl<'a, T: Flaggable> std::fmt::Debug for Mapping<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapping")
            .field("entries", &self.entries())
            .field("type_name", &self.type_name())
            .field("written", &self.written)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{bytes_is_base64, int_is_counter};
    use crate::test::assert_contains;
    use ipnet::IpNet;
    use rstest::rstest;
    use std::time::Duration;

    fn map<T: Clone>(entries: &[(&str, T)]) -> HashMap<String, T> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn first_parse_clears_default() {
        let mut variable: HashMap<String, i64> = HashMap::default();
        let mut flag = Mapping::new(Some(&mut variable), map(&[("a", 1)]), []);
        assert_eq!(flag.value(), &map(&[("a", 1)]));
        assert!(!flag.is_written());

        flag.parse("b=2").unwrap();
        assert!(flag.is_written());
        assert_eq!(flag.value(), &map(&[("b", 2)]));
        drop(flag);
        assert_eq!(variable, map(&[("b", 2)]));
    }

    #[test]
    fn later_parses_merge() {
        let mut flag = Mapping::new(None, HashMap::<String, i64>::default(), []);
        flag.parse("a=1,b=2").unwrap();
        flag.parse("b=3,c=4").unwrap();
        assert_eq!(flag.value(), &map(&[("a", 1), ("b", 3), ("c", 4)]));
        assert_eq!(flag.render(), "[a=1,b=3,c=4]");
    }

    #[rstest]
    #[case("novalue")]
    #[case("a=1,novalue")]
    fn missing_separator(#[case] text: &str) {
        let mut flag = Mapping::new(None, map(&[("a", 1u8)]), []);
        let error = flag.parse(text).unwrap_err();
        assert_matches!(&error, InvalidValue::InvalidFormat { token, .. } if token == "novalue");
        assert_contains!(error.to_string(), "novalue");
        assert_eq!(flag.value(), &map(&[("a", 1)]));
        assert!(!flag.is_written());
    }

    #[test]
    fn failure_is_atomic() {
        let mut flag = Mapping::new(None, HashMap::<String, u8>::default(), []);
        flag.parse("a=1").unwrap();
        assert_matches!(
            flag.parse("b=2,c=x"),
            Err(InvalidValue::InvalidConversion { token, .. }) if token == "x"
        );
        assert_eq!(flag.value(), &map(&[("a", 1)]));
    }

    #[test]
    fn value_may_contain_separator() {
        let mut flag = Mapping::new(None, HashMap::<String, Vec<u8>>::default(), [bytes_is_base64(true)]);
        flag.parse("greeting=aGk=").unwrap();
        assert_eq!(flag.value(), &map(&[("greeting", b"hi".to_vec())]));
        assert_eq!(flag.render(), "[greeting=aGk=]");
        assert_eq!(flag.type_name(), "stringToBytesBase64");
    }

    #[test]
    fn quoted_pairs() {
        let mut flag = Mapping::new(None, HashMap::<String, String>::default(), []);
        flag.parse("'a=x,b=y'").unwrap();
        assert_eq!(
            flag.value(),
            &map(&[("a", "x".to_string()), ("b", "y".to_string())])
        );

        assert_matches!(
            flag.parse("'a=x,y'"),
            Err(InvalidValue::InvalidFormat { token, .. }) if token == "y"
        );
    }

    #[test]
    fn csv_quoted_values() {
        let mut flag = Mapping::new(None, HashMap::<String, String>::default(), []);
        flag.parse("\"a=x,y\",b=z").unwrap();
        assert_eq!(
            flag.value(),
            &map(&[("a", "x,y".to_string()), ("b", "z".to_string())])
        );
        assert_eq!(flag.render(), "[\"a=x,y\",b=z]");

        let mut target = Mapping::new(None, HashMap::<String, String>::default(), []);
        target.unmarshal_text(&flag.marshal_text()).unwrap();
        assert_eq!(target.value(), flag.value());
    }

    #[test]
    fn empty_parse_is_a_write() {
        let mut flag = Mapping::new(None, map(&[("a", 1u16)]), []);
        flag.parse("").unwrap();
        assert!(flag.is_written());
        assert_eq!(flag.render(), "[]");
    }

    #[test]
    fn append_merges_one_pair() {
        let mut flag = Mapping::new(None, map(&[("a", 1i32)]), []);
        flag.append("b=2").unwrap();
        assert_eq!(flag.value(), &map(&[("a", 1), ("b", 2)]));
        assert!(!flag.is_written());

        flag.append("a=5").unwrap();
        assert_eq!(flag.value(), &map(&[("a", 5), ("b", 2)]));

        assert_matches!(flag.append("c"), Err(InvalidValue::InvalidFormat { .. }));
        flag.parse("z=0").unwrap();
        assert_eq!(flag.value(), &map(&[("z", 0)]));
    }

    #[test]
    fn replace_is_a_write() {
        let mut flag = Mapping::new(None, map(&[("a", 1i32)]), []);
        flag.replace(&["x=1", "y=2"]).unwrap();
        assert!(flag.is_written());
        assert_eq!(flag.value(), &map(&[("x", 1), ("y", 2)]));

        assert_matches!(flag.replace(&["q=1", "r"]), Err(InvalidValue::InvalidFormat { .. }));
        assert_eq!(flag.value(), &map(&[("x", 1), ("y", 2)]));

        flag.parse("y=3").unwrap();
        assert_eq!(flag.value(), &map(&[("x", 1), ("y", 3)]));

        flag.replace(&[]).unwrap();
        assert!(flag.value().is_empty());
    }

    #[rstest]
    #[case("[a=1s,b=2m]")]
    #[case("a=1s,b=2m")]
    #[case("[b=2m,a=1s]")]
    fn unmarshal(#[case] text: &str) {
        let mut flag = Mapping::new(None, map(&[("c", Duration::ZERO)]), []);
        flag.unmarshal_text(text).unwrap();
        assert_eq!(
            flag.value(),
            &map(&[("a", Duration::from_secs(1)), ("b", Duration::from_secs(120))])
        );
        assert_eq!(flag.marshal_text(), "[a=1s,b=2m]");
    }

    #[test]
    fn type_names() {
        assert_eq!(Mapping::new(None, HashMap::<String, i64>::default(), []).type_name(), "stringToI64");
        assert_eq!(Mapping::new(None, HashMap::<String, Duration>::default(), []).type_name(), "stringToDuration");
        assert_eq!(Mapping::new(None, HashMap::<String, IpNet>::default(), []).type_name(), "stringToIpNet");
        assert_eq!(Mapping::new(None, HashMap::<String, String>::default(), []).type_name(), "stringToString");
        assert_eq!(
            Mapping::new(None, HashMap::<String, u8>::default(), [int_is_counter(true)]).type_name(),
            "stringToU8"
        );
    }

    #[test]
    fn entries_rendered() {
        let flag = Mapping::new(None, map(&[("net", "10.0.0.0/8".parse::<IpNet>().unwrap())]), []);
        assert_eq!(flag.entries(), map(&[("net", "10.0.0.0/8".to_string())]));
    }
}
