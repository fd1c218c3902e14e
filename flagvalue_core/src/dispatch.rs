//! The closed set of element types, and the strategy each one reads and writes text with.
mod format;
mod parse;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use ipnet::IpNet;
use num_complex::Complex;

use crate::api::InvalidValue;
use crate::constant::BOOLEAN_IMPLIED;
use crate::mask::IpMask;
use crate::model::{BytesEncoding, Options};
use crate::prelude::FlagValue;

mod private {
    pub trait Sealed {}
}

/// An element type the adapters can hold.
///
/// Implemented for the builtin element types (`bool`, the integers, `f32`/`f64`, complex numbers, `String`, `Vec<u8>`,
/// `Duration`, timestamps, and the IP types), as well as any `T: FlagValue + Default`.
/// This trait is sealed, so the set of element types cannot otherwise be extended.
pub trait Flaggable: private::Sealed + Sized {
    #[doc(hidden)]
    fn dispatch() -> Dispatch<Self>;
}

/// How an adapter converts its elements.
#[doc(hidden)]
pub enum Dispatch<T> {
    Builtin(Codec<T>),
    Delegate(Forward<T>),
}

/// The parse/format pair of a builtin element type.
#[doc(hidden)]
pub struct Codec<T> {
    pub(crate) family: Family,
    pub(crate) type_name: fn(&Options) -> &'static str,
    pub(crate) parse: fn(&str, &Options) -> Result<T, InvalidValue>,
    pub(crate) format: fn(&T, &Options) -> String,
    pub(crate) increment: Option<fn(&T) -> Option<T>>,
}

/// Forwards to an extension type's own `FlagValue` implementation.
#[doc(hidden)]
pub struct Forward<T> {
    fresh: fn() -> T,
    render: fn(&T) -> String,
    parse: fn(&mut T, &str) -> Result<(), InvalidValue>,
    type_name: fn(&T) -> String,
    implied_value: fn(&T) -> Option<String>,
    is_boolean_like: fn(&T) -> bool,
}

impl<T: FlagValue + Default> Forward<T> {
    fn of() -> Self {
        Self {
            fresh: T::default,
            render: T::render,
            parse: T::parse,
            type_name: T::type_name,
            implied_value: T::implied_value,
            is_boolean_like: T::is_boolean_like,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Family {
    Boolean,
    Integer,
    Float,
    Complex,
    Text,
    Bytes,
    Duration,
    Timestamp,
    Address,
    Subnet,
    Mask,
}

impl<T> Dispatch<T> {
    pub(crate) fn family(&self) -> Option<Family> {
        match self {
            Dispatch::Builtin(codec) => Some(codec.family),
            Dispatch::Delegate(_) => None,
        }
    }

    /// Read a fresh element from `text`.
    pub(crate) fn parse_element(&self, text: &str, options: &Options) -> Result<T, InvalidValue> {
        match self {
            Dispatch::Builtin(codec) => (codec.parse)(text, options),
            Dispatch::Delegate(forward) => {
                let mut element = (forward.fresh)();
                (forward.parse)(&mut element, text)?;
                Ok(element)
            }
        }
    }

    /// Read `text` into an existing element, leaving it unchanged on error.
    pub(crate) fn parse_into(
        &self,
        element: &mut T,
        text: &str,
        options: &Options,
    ) -> Result<(), InvalidValue> {
        match self {
            Dispatch::Builtin(codec) => {
                *element = (codec.parse)(text, options)?;
                Ok(())
            }
            Dispatch::Delegate(forward) => (forward.parse)(element, text),
        }
    }

    pub(crate) fn format_element(&self, element: &T, options: &Options) -> String {
        match self {
            Dispatch::Builtin(codec) => (codec.format)(element, options),
            Dispatch::Delegate(forward) => (forward.render)(element),
        }
    }

    /// The type name of `element`.
    pub(crate) fn type_name(&self, element: &T, options: &Options) -> String {
        match self {
            Dispatch::Builtin(codec) => (codec.type_name)(options).to_string(),
            Dispatch::Delegate(forward) => (forward.type_name)(element),
        }
    }

    /// The type name of the element type, for collections that may be empty.
    pub(crate) fn element_name(&self, options: &Options) -> String {
        match self {
            Dispatch::Builtin(codec) => (codec.type_name)(options).to_string(),
            Dispatch::Delegate(forward) => (forward.type_name)(&(forward.fresh)()),
        }
    }

    pub(crate) fn increment(&self) -> Option<fn(&T) -> Option<T>> {
        match self {
            Dispatch::Builtin(codec) => codec.increment,
            Dispatch::Delegate(_) => None,
        }
    }

    pub(crate) fn implied_value(&self, element: &T) -> Option<String> {
        match self {
            Dispatch::Builtin(codec) if codec.family == Family::Boolean => {
                Some(BOOLEAN_IMPLIED.to_string())
            }
            Dispatch::Builtin(_) => None,
            Dispatch::Delegate(forward) => (forward.implied_value)(element),
        }
    }

    pub(crate) fn is_boolean_like(&self, element: &T) -> bool {
        match self {
            Dispatch::Builtin(codec) => codec.family == Family::Boolean,
            Dispatch::Delegate(forward) => (forward.is_boolean_like)(element),
        }
    }
}

impl<T: FlagValue + Default> private::Sealed for T {}

impl<T: FlagValue + Default> Flaggable for T {
    fn dispatch() -> Dispatch<Self> {
        Dispatch::Delegate(Forward::of())
    }
}

/// The float element types, and their complex counterparts.
pub(crate) trait Real: Copy + PartialEq + FromStr + std::fmt::LowerExp {
    const NAME: &'static str;
    const COMPLEX_NAME: &'static str;
    const ZERO: Self;

    fn is_nan(self) -> bool;
    fn is_infinite(self) -> bool;
    fn is_sign_negative(self) -> bool;
}

macro_rules! impl_real {
    ($($t:ty => $name:literal, $complex:literal);+ $(;)?) => {$(
        impl Real for $t {
            const NAME: &'static str = $name;
            const COMPLEX_NAME: &'static str = $complex;
            const ZERO: Self = 0.0;

            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            fn is_infinite(self) -> bool {
                <$t>::is_infinite(self)
            }

            fn is_sign_negative(self) -> bool {
                <$t>::is_sign_negative(self)
            }
        }
    )+};
}

impl_real!(
    f32 => "f32", "complex32";
    f64 => "f64", "complex64";
);

fn to_text<T: ToString>(value: &T, _: &Options) -> String {
    value.to_string()
}

macro_rules! impl_flaggable {
    ($t:ty, $family:ident, $type_name:expr, $parse:expr, $format:expr, $increment:expr) => {
        impl private::Sealed for $t {}

        impl Flaggable for $t {
            fn dispatch() -> Dispatch<Self> {
                Dispatch::Builtin(Codec {
                    family: Family::$family,
                    type_name: $type_name,
                    parse: $parse,
                    format: $format,
                    increment: $increment,
                })
            }
        }
    };
}

macro_rules! impl_integers {
    ($($t:ty),+) => {$(
        impl_flaggable!(
            $t,
            Integer,
            |_| stringify!($t),
            |text, _| parse::integer::<$t>(text, stringify!($t)),
            to_text::<$t>,
            Some((|value: &$t| value.checked_add(1)) as fn(&$t) -> Option<$t>)
        );
    )+};
}

macro_rules! impl_reals {
    ($($t:ty),+) => {$(
        impl_flaggable!(
            $t,
            Float,
            |_| <$t as Real>::NAME,
            |text, _| parse::real::<$t>(text),
            |value, _| format::real(*value),
            None
        );

        impl_flaggable!(
            Complex<$t>,
            Complex,
            |_| <$t as Real>::COMPLEX_NAME,
            |text, _| parse::complex::<$t>(text),
            |value, _| format::complex(value),
            None
        );
    )+};
}

macro_rules! impl_addresses {
    ($($t:ty => $name:literal),+) => {$(
        impl_flaggable!(
            $t,
            Address,
            |_| $name,
            |text, _| parse::address::<$t>(text, $name),
            to_text::<$t>,
            None
        );
    )+};
}

impl_flaggable!(
    bool,
    Boolean,
    |_| "bool",
    |text, _| parse::boolean(text),
    to_text::<bool>,
    None
);

impl_integers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl_reals!(f32, f64);

impl_flaggable!(
    String,
    Text,
    |_| "string",
    |text, _| Ok(text.to_string()),
    |value, _| value.clone(),
    None
);

impl_flaggable!(
    Vec<u8>,
    Bytes,
    |options| match options.bytes_encoding() {
        BytesEncoding::Hex => "bytesHex",
        BytesEncoding::Base64 => "bytesBase64",
    },
    parse::bytes,
    |value, options| format::bytes(value, options),
    None
);

impl_flaggable!(
    Duration,
    Duration,
    |_| "duration",
    |text, _| parse::duration(text),
    |value, _| humantime::format_duration(*value).to_string(),
    None
);

impl_flaggable!(
    DateTime<FixedOffset>,
    Timestamp,
    |_| "time",
    parse::timestamp,
    |value, options| options.canonical_time_format().write(value),
    None
);

impl_addresses!(IpAddr => "ip", Ipv4Addr => "ipv4", Ipv6Addr => "ipv6");

impl_flaggable!(
    IpNet,
    Subnet,
    |_| "ipNet",
    |text, _| parse::subnet(text),
    to_text::<IpNet>,
    None
);

impl_flaggable!(
    IpMask,
    Mask,
    |_| "ipMask",
    |text, _| IpMask::from_str(text),
    to_text::<IpMask>,
    None
);
