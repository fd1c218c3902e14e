use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::{DeriveAttributes, DeriveFlagValue};

impl TryFrom<DeriveFlagValue> for TokenStream2 {
    type Error = syn::Error;

    fn try_from(value: DeriveFlagValue) -> Result<Self, Self::Error> {
        let DeriveFlagValue {
            type_ident,
            mut generics,
            attributes:
                DeriveAttributes {
                    type_name,
                    implied,
                    boolean,
                },
        } = value;
        let type_name = type_name.unwrap_or_else(|| type_ident.to_string());
        let implied_value = match implied {
            Some(implied) => quote! {
                ::std::option::Option::Some(::std::string::String::from(#implied))
            },
            None => quote! { ::std::option::Option::None },
        };

        if !generics.params.is_empty() {
            let (_, type_generics, _) = generics.split_for_impl();
            let bounds: Vec<syn::WherePredicate> = vec![
                syn::parse_quote! {
                    #type_ident #type_generics: ::std::str::FromStr + ::std::fmt::Display
                },
                syn::parse_quote! {
                    <#type_ident #type_generics as ::std::str::FromStr>::Err: ::std::fmt::Display
                },
            ];
            generics.make_where_clause().predicates.extend(bounds);
        }

        let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

        Ok(quote! {
            impl #impl_generics ::flagvalue::prelude::FlagValue for #type_ident #type_generics #where_clause {
                fn render(&self) -> ::std::string::String {
                    ::std::string::ToString::to_string(self)
                }

                fn parse(&mut self, text: &str) -> ::std::result::Result<(), ::flagvalue::InvalidValue> {
                    match <Self as ::std::str::FromStr>::from_str(text) {
                        ::std::result::Result::Ok(value) => {
                            *self = value;
                            ::std::result::Result::Ok(())
                        }
                        ::std::result::Result::Err(error) => ::std::result::Result::Err(
                            ::flagvalue::InvalidValue::conversion(text, #type_name, error)
                        ),
                    }
                }

                fn type_name(&self) -> ::std::string::String {
                    ::std::string::String::from(#type_name)
                }

                fn implied_value(&self) -> ::std::option::Option<::std::string::String> {
                    #implied_value
                }

                fn is_boolean_like(&self) -> bool {
                    #boolean
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Span;

    #[test]
    fn render_derive_flag_value_empty() {
        // Setup
        let derive_flag_value = DeriveFlagValue {
            type_ident: ident("ByteSize"),
            generics: syn::Generics::default(),
            attributes: DeriveAttributes::default(),
        };

        // Execute
        let token_stream = TokenStream2::try_from(derive_flag_value).unwrap();

        // Verify
        let generated = simple_format(token_stream.to_string());
        assert!(generated.starts_with(
            "impl :: flagvalue :: prelude :: FlagValue for ByteSize {\n"
        ));
        assert!(generated.contains(
            "fn type_name (& self) -> :: std :: string :: String {\n :: std :: string :: String :: from (\"ByteSize\") }\n"
        ));
        assert!(generated.contains(
            "fn implied_value (& self) -> :: std :: option :: Option < :: std :: string :: String > {\n :: std :: option :: Option :: None }\n"
        ));
        assert!(generated.contains("fn is_boolean_like (& self) -> bool {\n false }\n"));
        assert!(generated.contains(
            ":: flagvalue :: InvalidValue :: conversion (text , \"ByteSize\" , error)"
        ));
    }

    #[test]
    fn render_derive_flag_value() {
        // Setup
        let derive_flag_value = DeriveFlagValue {
            type_ident: ident("ByteSize"),
            generics: syn::Generics::default(),
            attributes: DeriveAttributes {
                type_name: Some("byte-size".to_string()),
                implied: Some("1KiB".to_string()),
                boolean: true,
            },
        };

        // Execute
        let token_stream = TokenStream2::try_from(derive_flag_value).unwrap();

        // Verify
        let generated = simple_format(token_stream.to_string());
        assert!(generated.contains(":: std :: string :: String :: from (\"byte-size\")"));
        assert!(generated.contains(
            ":: std :: option :: Option :: Some (:: std :: string :: String :: from (\"1KiB\"))"
        ));
        assert!(generated.contains("fn is_boolean_like (& self) -> bool {\n true }\n"));
    }

    #[test]
    fn render_derive_flag_value_generic() {
        // Setup
        let derive_flag_value = DeriveFlagValue {
            type_ident: ident("Choice"),
            generics: syn::parse_quote! { <T: Clone> },
            attributes: DeriveAttributes::default(),
        };

        // Execute
        let token_stream = TokenStream2::try_from(derive_flag_value).unwrap();

        // Verify
        let generated = simple_format(token_stream.to_string());
        assert!(generated.starts_with(
            "impl < T : Clone > :: flagvalue :: prelude :: FlagValue for Choice < T > where "
        ));
        assert!(generated.contains(
            "Choice < T > : :: std :: str :: FromStr + :: std :: fmt :: Display"
        ));
        assert!(generated.contains(
            "< Choice < T > as :: std :: str :: FromStr > :: Err : :: std :: fmt :: Display"
        ));
        assert!(generated.contains("String :: from (\"Choice\")"));
    }

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    fn simple_format(rust_str: String) -> String {
        rust_str
            .replace("{", "{\n")
            .replace("}", "}\n")
            .replace(";", ";\n")
    }
}
