extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveFlagValue;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Implement `flagvalue::prelude::FlagValue` through the type's `FromStr` and `Display`.
///
/// Supports the container attribute `#[flag_value(..)]`, with:
/// * `type_name = "..."`: the type name (default: the type's identifier).
/// * `implied = "..."`: the implied value.
/// * `boolean`: the flag takes no argument.
#[proc_macro_derive(FlagValue, attributes(flag_value))]
pub fn flag_value(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    DeriveFlagValue::try_from(derive_input)
        .and_then(TokenStream2::try_from)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
