extern crate proc_macro2;

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{Data, DeriveInput, Fields, FieldsNamed, Ident, parse_macro_input, spanned::Spanned};

#[proc_macro_derive(Parse)]
pub fn derive_parseable(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    derive_parse_internal(input).into()
}

/// Mirror of `#[derive(Parse)]`: writes every named field in declaration order.
#[proc_macro_derive(Emit)]
pub fn derive_emit(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    derive_emit_internal(input).into()
}

fn own_crate_path() -> TokenStream {
    let found_crate = crate_name("rsm-files").expect("rsm-files is present in `Cargo.toml`");

    match found_crate {
        FoundCrate::Itself => quote!(crate),
        FoundCrate::Name(name) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(#ident)
        }
    }
}

fn named_fields<'a>(input: &'a DeriveInput, derive: &str) -> &'a FieldsNamed {
    let ident = &input.ident;
    match &input.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(fields) => fields,
            _ => panic!(
                "#[derive({})]` only supports named struct fields at the moment: {}",
                derive, ident
            ),
        },
        _ => panic!("`#[derive({})]` is only available on structs: {}", derive, ident),
    }
}

// taken from sharnoff/derive-syn-parse: put it into a separate function for testability
pub(crate) fn derive_parse_internal(input: DeriveInput) -> TokenStream {
    let crate_name = own_crate_path();
    let ident = &input.ident;

    let recurse = named_fields(&input, "Parse").named.iter().map(|f| {
        let name = &f.ident;
        let ftype = &f.ty;
        // Array and generic field types would need the turbofish form (`<[T; N]>::parse`),
        // records using those implement Parseable by hand.
        quote_spanned! {f.span()=>
            #name: #ftype::parse(rdr)?,
        }
    });

    quote!(
        impl #crate_name::common::reader::Parseable<#ident> for #ident {
            fn parse<R: Read>(rdr: &mut R) -> Result<#ident, #crate_name::ParserError> {
                Ok(#ident{
                    #(#recurse)*
                })
            }
        }
    )
}

pub(crate) fn derive_emit_internal(input: DeriveInput) -> TokenStream {
    let crate_name = own_crate_path();
    let ident = &input.ident;

    let recurse = named_fields(&input, "Emit").named.iter().map(|f| {
        let name = &f.ident;
        quote_spanned! {f.span()=>
            #crate_name::common::writer::Writable::write(&self.#name, wtr)?;
        }
    });

    quote!(
        impl #crate_name::common::writer::Writable for #ident {
            fn write<W: std::io::Write>(&self, wtr: &mut W) -> Result<(), #crate_name::ParserError> {
                #(#recurse)*
                Ok(())
            }
        }
    )
}
