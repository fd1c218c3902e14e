use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use base64::Engine;
use chrono::{DateTime, FixedOffset};
use ipnet::IpNet;
use num_complex::Complex;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::InvalidValue;
use crate::dispatch::Real;
use crate::model::{BytesEncoding, Options};

/// The integer element types, which all share one literal grammar.
pub(crate) trait Integer: Sized + TryFrom<i128> + TryFrom<u128> {
    const SIGNED: bool;
}

macro_rules! impl_integer {
    ($signed:literal: $($t:ty),+) => {$(
        impl Integer for $t {
            const SIGNED: bool = $signed;
        }
    )+};
}

impl_integer!(true: i8, i16, i32, i64, isize);
impl_integer!(false: u8, u16, u32, u64, usize);

pub(crate) fn boolean(text: &str) -> Result<bool, InvalidValue> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(InvalidValue::conversion(
            text,
            "bool",
            "expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False",
        )),
    }
}

pub(crate) fn integer<T: Integer>(text: &str, type_name: &str) -> Result<T, InvalidValue> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if negative && !T::SIGNED {
        return Err(InvalidValue::conversion(
            text,
            type_name,
            "negative value for an unsigned type",
        ));
    }

    let (radix, digits) = match split_radix(unsigned) {
        // A prefix may be followed by a single separator, as in `0x_ff`.
        (radix, digits, true) => (radix, digits.strip_prefix('_').unwrap_or(digits)),
        (radix, digits, false) => (radix, digits),
    };

    if digits.is_empty() {
        return Err(InvalidValue::conversion(text, type_name, "expected digits"));
    }

    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(InvalidValue::conversion(
            text,
            type_name,
            "'_' must separate digits",
        ));
    }

    let digits: String = digits.chars().filter(|c| *c != '_').collect();

    // `from_str_radix` would otherwise accept a second sign.
    if !digits.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(InvalidValue::conversion(text, type_name, "invalid digit"));
    }

    let magnitude = match u128::from_str_radix(&digits, radix) {
        Ok(magnitude) => magnitude,
        Err(error) => {
            return match error.kind() {
                std::num::IntErrorKind::PosOverflow => {
                    Err(InvalidValue::out_of_range(text, type_name))
                }
                _ => Err(InvalidValue::conversion(text, type_name, "invalid digit")),
            };
        }
    };

    let converted = if negative {
        const LIMIT: u128 = 1 << 127;

        let signed = match magnitude {
            LIMIT => i128::MIN,
            m if m < LIMIT => -(m as i128),
            _ => return Err(InvalidValue::out_of_range(text, type_name)),
        };
        <T as TryFrom<i128>>::try_from(signed).ok()
    } else {
        <T as TryFrom<u128>>::try_from(magnitude).ok()
    };

    converted.ok_or_else(|| InvalidValue::out_of_range(text, type_name))
}

fn split_radix(digits: &str) -> (u32, &str, bool) {
    let prefixes = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];

    for (prefix, radix) in prefixes {
        if let Some(rest) = digits.strip_prefix(prefix) {
            return (radix, rest, true);
        }
    }

    match digits.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => (8, rest, true),
        _ => (10, digits, false),
    }
}

/// Why a float component failed to read.
pub(crate) enum RealError {
    Malformed,
    Overflow,
}

pub(crate) fn real_literal<F: Real>(text: &str) -> Result<F, RealError> {
    let value: F = text.parse().map_err(|_| RealError::Malformed)?;

    if value.is_infinite() {
        let spelled = text.trim_start_matches(['+', '-']);

        if !(spelled.eq_ignore_ascii_case("inf") || spelled.eq_ignore_ascii_case("infinity")) {
            return Err(RealError::Overflow);
        }
    }

    Ok(value)
}

pub(crate) fn real<F: Real>(text: &str) -> Result<F, InvalidValue> {
    real_literal(text).map_err(|error| match error {
        RealError::Malformed => {
            InvalidValue::conversion(text, F::NAME, "expected a floating point literal")
        }
        RealError::Overflow => InvalidValue::out_of_range(text, F::NAME),
    })
}

pub(crate) fn complex<F: Real>(text: &str) -> Result<Complex<F>, InvalidValue> {
    let inner = text
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(text);

    let component = |part: &str| {
        real_literal::<F>(part).map_err(|error| match error {
            RealError::Malformed => InvalidValue::conversion(
                text,
                F::COMPLEX_NAME,
                "expected a complex literal like (1+2i)",
            ),
            RealError::Overflow => InvalidValue::out_of_range(text, F::COMPLEX_NAME),
        })
    };

    match inner.strip_suffix('i') {
        Some(imaginary) => {
            let bytes = imaginary.as_bytes();
            let split = (1..bytes.len())
                .rev()
                .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

            match split {
                Some(i) => Ok(Complex::new(
                    component(&imaginary[..i])?,
                    component(&imaginary[i..])?,
                )),
                None => Ok(Complex::new(F::ZERO, component(imaginary)?)),
            }
        }
        None => Ok(Complex::new(component(inner)?, F::ZERO)),
    }
}

pub(crate) fn bytes(text: &str, options: &Options) -> Result<Vec<u8>, InvalidValue> {
    match options.bytes_encoding() {
        BytesEncoding::Hex => hex::decode(text.trim())
            .map_err(|error| InvalidValue::conversion(text, "bytesHex", error)),
        BytesEncoding::Base64 => base64::engine::general_purpose::STANDARD
            .decode(text)
            .map_err(|error| InvalidValue::conversion(text, "bytesBase64", error)),
    }
}

pub(crate) fn duration(text: &str) -> Result<Duration, InvalidValue> {
    humantime::parse_duration(text)
        .map_err(|error| InvalidValue::conversion(text, "duration", error))
}

pub(crate) fn timestamp(
    text: &str,
    options: &Options,
) -> Result<DateTime<FixedOffset>, InvalidValue> {
    for (index, format) in options.time_formats().enumerate() {
        if let Some(timestamp) = format.read(text) {
            if index > 0 {
                #[cfg(feature = "tracing_debug")]
                debug!("Accepted '{text}' through the non-canonical time format {format}.");
            }

            return Ok(timestamp);
        }
    }

    let formats: Vec<String> = options.time_formats().map(|f| f.to_string()).collect();
    Err(InvalidValue::conversion(
        text,
        "time",
        format!("must be one of: {}", formats.join(", ")),
    ))
}

pub(crate) fn address<T: FromStr>(text: &str, type_name: &str) -> Result<T, InvalidValue>
where
    T::Err: std::fmt::Display,
{
    text.trim()
        .parse()
        .map_err(|error| InvalidValue::conversion(text, type_name, error))
}

pub(crate) fn subnet(text: &str) -> Result<IpNet, InvalidValue> {
    let trimmed = text.trim();

    match trimmed.parse::<IpNet>() {
        Ok(subnet) => Ok(subnet.trunc()),
        Err(_) if trimmed.parse::<IpAddr>().is_ok() => Err(InvalidValue::conversion(
            text,
            "ipNet",
            "expected a CIDR prefix length",
        )),
        Err(error) => Err(InvalidValue::conversion(text, "ipNet", error)),
    }
}
