use crate::model::{DeriveAttributes, DeriveFlagValue};

const ATTRIBUTE: &str = "flag_value";

impl TryFrom<syn::DeriveInput> for DeriveFlagValue {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let mut attributes = DeriveAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident(ATTRIBUTE) {
                load_attribute(attribute, &mut attributes)?;
            }
        }

        Ok(DeriveFlagValue {
            type_ident: value.ident,
            generics: value.generics,
            attributes,
        })
    }
}

fn load_attribute(
    attribute: &syn::Attribute,
    attributes: &mut DeriveAttributes,
) -> Result<(), syn::Error> {
    attribute.parse_nested_meta(|meta| {
        if meta.path.is_ident("type_name") {
            let literal: syn::LitStr = meta.value()?.parse()?;
            set_once(&mut attributes.type_name, literal, "type_name")
        } else if meta.path.is_ident("implied") {
            let literal: syn::LitStr = meta.value()?.parse()?;
            set_once(&mut attributes.implied, literal, "implied")
        } else if meta.path.is_ident("boolean") {
            if attributes.boolean {
                return Err(meta.error("Invalid - `boolean` cannot be repeated."));
            }

            attributes.boolean = true;
            Ok(())
        } else {
            Err(meta.error(
                "Invalid - unknown `flag_value` attribute; expected one of `type_name`, `implied`, `boolean`.",
            ))
        }
    })
}

fn set_once(
    target: &mut Option<String>,
    literal: syn::LitStr,
    key: &str,
) -> Result<(), syn::Error> {
    if target.is_some() {
        return Err(syn::Error::new(
            literal.span(),
            format!("Invalid - `{key}` cannot be repeated."),
        ));
    }

    *target = Some(literal.value());
    Ok(())
}
