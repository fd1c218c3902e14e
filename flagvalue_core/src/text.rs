//! The delimited-text form of collections, and the structured-text (serde) boundary.
use serde::de::{self, DeserializeSeed, Deserializer, Visitor};
use serde::{Serialize, Serializer};

use crate::api::{InvalidValue, Mapping, Scalar, Sequence};
use crate::dispatch::Flaggable;
use crate::prelude::FlagValue;

/// Remove one matching pair of enclosing single quotes or backticks.
pub(crate) fn unquote(text: &str) -> &str {
    for quote in ['\'', '`'] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }

    text
}

/// Remove one leading `[` and one trailing `]`, independently.
pub(crate) fn unbracket(text: &str) -> &str {
    let text = text.strip_prefix('[').unwrap_or(text);
    text.strip_suffix(']').unwrap_or(text)
}

/// Read `text` as a single comma separated record.
pub(crate) fn read_list(text: &str) -> Result<Vec<String>, InvalidValue> {
    if text.is_empty() {
        return Ok(Vec::default());
    }

    if text.matches('"').count() % 2 == 1 {
        return Err(InvalidValue::format(text, "unbalanced '\"'"));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let record = match records.next() {
        Some(record) => record.map_err(|error| InvalidValue::format(text, error))?,
        None => return Ok(Vec::default()),
    };

    if records.next().is_some() {
        return Err(InvalidValue::format(text, "expected a single line"));
    }

    Ok(record.iter().map(String::from).collect())
}

/// Write `fields` as a single comma separated record, quoting fields only where necessary.
pub(crate) fn write_list(fields: &[String]) -> String {
    if fields.is_empty() {
        return String::default();
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::default());

    let written = writer
        .write_record(fields)
        .ok()
        .and_then(|_| writer.into_inner().ok())
        .and_then(|bytes| String::from_utf8(bytes).ok());

    match written {
        Some(record) => record.trim_end_matches(['\r', '\n']).to_string(),
        None => unreachable!("internal error - csv record failed to write to memory"),
    }
}

/// Split a mapping field at its first `=`.
pub(crate) fn read_pair(field: &str) -> Result<(&str, &str), InvalidValue> {
    field
        .split_once('=')
        .ok_or_else(|| InvalidValue::format(field, "must be formatted as key=value"))
}

macro_rules! impl_serialize {
    ($($adapter:ident),+) => {$(
        impl<'a, T: Flaggable> Serialize for $adapter<'a, T> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.marshal_text())
            }
        }
    )+};
}

impl_serialize!(Scalar, Sequence, Mapping);

/// Loads a structured-text value into an existing flag value, through [`FlagValue::unmarshal_text`].
///
/// Strings are read as is; booleans and numbers are read through their textual form.
///
/// ### Example
/// ```
/// # use flagvalue_core as flagvalue;
/// use flagvalue::{Sequence, TextSeed};
/// use serde::de::DeserializeSeed;
///
/// let mut ports: Vec<u16> = Vec::default();
/// let mut flag = Sequence::new(Some(&mut ports), vec![80], []);
/// let mut deserializer = serde_json::Deserializer::from_str(r#""[8080,8443]""#);
/// TextSeed(&mut flag).deserialize(&mut deserializer).unwrap();
/// drop(flag);
/// assert_eq!(ports, vec![8080, 8443]);
/// ```
pub struct TextSeed<'v, V: ?Sized>(pub &'v mut V);

impl<'de, 'v, V: FlagValue + ?Sized> DeserializeSeed<'de> for TextSeed<'v, V> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(TextVisitor(self.0))
    }
}

struct TextVisitor<'v, V: ?Sized>(&'v mut V);

impl<'v, V: FlagValue + ?Sized> TextVisitor<'v, V> {
    fn load<E: de::Error>(self, text: &str) -> Result<(), E> {
        self.0.unmarshal_text(text).map_err(E::custom)
    }
}

impl<'de, 'v, V: FlagValue + ?Sized> Visitor<'de> for TextVisitor<'v, V> {
    type Value = ();

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "the text form of a {}", self.0.type_name())
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<(), E> {
        self.load(value)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<(), E> {
        self.load(&value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<(), E> {
        self.load(&value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<(), E> {
        self.load(&value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<(), E> {
        self.load(&value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bytes_is_base64;
    use crate::prelude::CollectionValue;
    use crate::test::assert_contains;
    use rstest::rstest;
    use std::collections::HashMap;

    #[rstest]
    #[case("'a,b'", "a,b")]
    #[case("`a,b`", "a,b")]
    #[case("''", "")]
    #[case("'a,b", "'a,b")]
    #[case("'a,b`", "'a,b`")]
    #[case("'", "'")]
    #[case("\"a\"", "\"a\"")]
    #[case("''a''", "'a'")]
    fn unquote_enclosing(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(unquote(text), expected);
    }

    #[rstest]
    #[case("[a,b]", "a,b")]
    #[case("[a,b", "a,b")]
    #[case("a,b]", "a,b")]
    #[case("[[a]]", "[a]")]
    #[case("[]", "")]
    #[case("]", "")]
    fn unbracket_once(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(unbracket(text), expected);
    }

    #[rstest]
    #[case("", vec![])]
    #[case("a", vec!["a"])]
    #[case("a,b,c", vec!["a", "b", "c"])]
    #[case(" a , b ", vec![" a ", " b "])]
    #[case("a,,c", vec!["a", "", "c"])]
    #[case(",", vec!["", ""])]
    #[case("\"a,b\",c", vec!["a,b", "c"])]
    #[case("\"say \"\"hi\"\"\"", vec!["say \"hi\""])]
    #[case("\"\"", vec![""])]
    #[case("\"line\nbreak\",x", vec!["line\nbreak", "x"])]
    fn read_list_fields(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(read_list(text).unwrap(), expected);
    }

    #[rstest]
    #[case("\"a,b")]
    #[case("a\"b\"c\"")]
    #[case("a\nb")]
    fn read_list_invalid(#[case] text: &str) {
        assert_matches!(
            read_list(text),
            Err(InvalidValue::InvalidFormat { token, .. }) if token == text
        );
    }

    #[rstest]
    #[case(vec![], "")]
    #[case(vec!["a"], "a")]
    #[case(vec!["a", "b"], "a,b")]
    #[case(vec!["a,b", "c"], "\"a,b\",c")]
    #[case(vec!["say \"hi\""], "\"say \"\"hi\"\"\"")]
    #[case(vec![""], "\"\"")]
    fn write_list_fields(#[case] fields: Vec<&str>, #[case] expected: &str) {
        let fields: Vec<String> = fields.into_iter().map(String::from).collect();
        assert_eq!(write_list(&fields), expected);
        assert_eq!(read_list(&write_list(&fields)).unwrap(), fields);
    }

    #[rstest]
    #[case("a=1", ("a", "1"))]
    #[case("a=", ("a", ""))]
    #[case("=1", ("", "1"))]
    #[case("k=aGk=", ("k", "aGk="))]
    fn read_pair_first_separator(#[case] field: &str, #[case] expected: (&str, &str)) {
        assert_eq!(read_pair(field).unwrap(), expected);
    }

    #[test]
    fn read_pair_invalid() {
        let error = read_pair("novalue").unwrap_err();
        assert_matches!(&error, InvalidValue::InvalidFormat { token, .. } if token == "novalue");
        assert_contains!(error.to_string(), "key=value");
    }

    #[test]
    fn serialize_adapters() {
        let flag = Scalar::new(None, 1.5f64, []);
        assert_eq!(serde_json::to_string(&flag).unwrap(), "\"1.5\"");

        let flag = Sequence::new(None, vec!["a,b".to_string(), "c".to_string()], []);
        assert_eq!(serde_json::to_string(&flag).unwrap(), r#""[\"a,b\",c]""#);

        let flag = Mapping::new(None, HashMap::from([("k".to_string(), vec![1u8, 2])]), [bytes_is_base64(true)]);
        assert_eq!(serde_json::to_string(&flag).unwrap(), "\"[k=AQI=]\"");
    }

    #[test]
    fn seed_strings() {
        let mut flag = Sequence::<u32>::new(None, vec![7], []);
        let mut deserializer = serde_json::Deserializer::from_str("\"[1,2,3]\"");
        TextSeed(&mut flag).deserialize(&mut deserializer).unwrap();
        assert_eq!(flag.value(), &vec![1, 2, 3]);
        assert!(flag.is_written());

        flag.append("4").unwrap();
        assert_eq!(flag.render(), "[1,2,3,4]");
    }

    #[rstest]
    #[case("true", "true")]
    #[case("12", "12")]
    #[case("-3", "-3")]
    fn seed_scalars(#[case] json: &str, #[case] expected: &str) {
        let mut flag = Scalar::<String>::new(None, String::default(), []);
        let mut deserializer = serde_json::Deserializer::from_str(json);
        TextSeed(&mut flag).deserialize(&mut deserializer).unwrap();
        assert_eq!(flag.render(), expected);
    }

    #[test]
    fn seed_float() {
        let mut flag = Scalar::<f64>::new(None, 0.0, []);
        let mut deserializer = serde_json::Deserializer::from_str("2.5");
        TextSeed(&mut flag).deserialize(&mut deserializer).unwrap();
        assert_eq!(*flag.value(), 2.5);
    }

    #[test]
    fn seed_invalid() {
        let mut flag = Scalar::<u8>::new(None, 5, []);
        let mut deserializer = serde_json::Deserializer::from_str("\"300\"");
        let error = TextSeed(&mut flag).deserialize(&mut deserializer).unwrap_err();
        assert_contains!(error.to_string(), "out of range for u8");
        assert_eq!(*flag.value(), 5);

        let mut deserializer = serde_json::Deserializer::from_str("[1]");
        assert!(TextSeed(&mut flag).deserialize(&mut deserializer).is_err());
    }
}
