pub struct DeriveFlagValue {
    pub type_ident: syn::Ident,
    pub generics: syn::Generics,
    pub attributes: DeriveAttributes,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeriveAttributes {
    pub type_name: Option<String>,
    pub implied: Option<String>,
    pub boolean: bool,
}
