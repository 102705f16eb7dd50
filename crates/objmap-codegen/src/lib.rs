// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenTree;
use quote::{format_ident, quote, ToTokens};
use syn::ext::IdentExt;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Ident, LitStr, Type};

/// Direction keyword accepted as first argument of `#[mapping(...)]`.
#[derive(Clone, Copy)]
enum DirectionKind {
    ToTarget,
    ToSource,
    Both,
}

impl DirectionKind {
    fn tokens(self) -> proc_macro2::TokenStream {
        match self {
            DirectionKind::ToTarget => quote! { ::objmap::AnnotationDirection::ToTarget },
            DirectionKind::ToSource => quote! { ::objmap::AnnotationDirection::ToSource },
            DirectionKind::Both => quote! { ::objmap::AnnotationDirection::Both },
        }
    }
}

/// One parsed `#[mapping(...)]` attribute
struct AnnotationInfo {
    direction: DirectionKind,
    other: Type,
    member: LitStr,
}

/// `#[derive(Mapped)]` macro: generates the static member table + constructor
///
/// Field attributes:
/// - `#[mapping(to_target | to_source | both, other = Type, member = "name")]`
///   (repeatable; direction defaults to `both`)
/// - `#[mapped(skip)]`: leave the field out of the member table
///
/// Struct attributes:
/// - `#[mapped(no_default)]`: do not allocate targets through `Default`
///
/// Every mapped field type must be `Clone + 'static`.
///
/// # Panics
///
/// Never panics; malformed input is reported as a compile error.
///
/// Example:
/// ```ignore
/// use objmap::Mapped;
///
/// #[derive(Mapped, Default)]
/// struct PersonIndexModel {
///     id: u32,
///     #[mapping(to_target, other = Person, member = "first_name")]
///     name: String,
///     #[mapping(to_target, other = Person, member = "last_name")]
///     messy_prop: String,
/// }
/// ```
#[proc_macro_derive(Mapped, attributes(mapping, mapped))]
pub fn derive_mapped(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    // Member tables are statics: no room for type parameters
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Mapped cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(input, "Only structs are supported")),
    };

    let no_default = parse_struct_flags(&input.attrs)?;

    let mut accessor_fns = Vec::new();
    let mut members = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };

        let (skip, annotations) = parse_field_attrs(&field.attrs)?;
        if skip {
            if !annotations.is_empty() {
                return Err(syn::Error::new_spanned(
                    field_ident,
                    "#[mapped(skip)] fields cannot carry #[mapping] annotations",
                ));
            }
            continue;
        }

        // Emitted inside a nested static, where `Self` is out of scope
        let field_ty = replace_self(field.ty.to_token_stream(), name);
        let name_str = field_ident.unraw().to_string();
        let get_fn = format_ident!("__objmap_get_{}", index);
        let get_mut_fn = format_ident!("__objmap_get_mut_{}", index);

        accessor_fns.push(quote! {
            fn #get_fn(o: &#name) -> &dyn ::core::any::Any {
                &o.#field_ident
            }
            fn #get_mut_fn(o: &mut #name) -> &mut dyn ::core::any::Any {
                &mut o.#field_ident
            }
        });

        let annotation_tokens: Vec<_> = annotations
            .iter()
            .map(|a| {
                let direction = a.direction.tokens();
                let other = replace_self(a.other.to_token_stream(), name);
                let member = &a.member;
                quote! {
                    ::objmap::MappingAnnotation {
                        direction: #direction,
                        other_type: ::core::any::TypeId::of::<#other>,
                        other_type_name: ::core::any::type_name::<#other>,
                        member: #member,
                    }
                }
            })
            .collect();

        members.push(quote! {
            ::objmap::Member {
                name: #name_str,
                value_type: ::core::any::TypeId::of::<#field_ty>,
                value_type_name: ::core::any::type_name::<#field_ty>,
                get: #get_fn,
                get_mut: #get_mut_fn,
                assign: ::objmap::member::assign::<#field_ty>,
                annotations: &[#(#annotation_tokens),*],
            }
        });
    }

    let construct = if no_default {
        quote! {}
    } else {
        quote! {
            fn construct() -> ::objmap::Result<Self> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }
        }
    };

    Ok(quote! {
        impl ::objmap::Mapped for #name {
            fn members() -> &'static [::objmap::Member<Self>] {
                #(#accessor_fns)*

                static MEMBERS: &[::objmap::Member<#name>] = &[#(#members),*];
                MEMBERS
            }

            #construct
        }
    })
}

/// Substitute `Self` with the struct name, descending into groups.
fn replace_self(tokens: proc_macro2::TokenStream, name: &Ident) -> proc_macro2::TokenStream {
    tokens
        .into_iter()
        .map(|tree| match tree {
            TokenTree::Ident(ident) if ident == "Self" => {
                let mut renamed = name.clone();
                renamed.set_span(ident.span());
                TokenTree::Ident(renamed)
            }
            TokenTree::Group(group) => {
                let mut inner =
                    proc_macro2::Group::new(group.delimiter(), replace_self(group.stream(), name));
                inner.set_span(group.span());
                TokenTree::Group(inner)
            }
            other => other,
        })
        .collect()
}

/// Parse struct-level `#[mapped(...)]`; returns the `no_default` flag.
fn parse_struct_flags(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut no_default = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident("mapped")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("no_default") {
                no_default = true;
                Ok(())
            } else {
                Err(meta.error("unsupported struct option, expected `no_default`"))
            }
        })?;
    }
    Ok(no_default)
}

/// Parse field-level attributes; returns (skip, annotations).
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<(bool, Vec<AnnotationInfo>)> {
    let mut skip = false;
    let mut annotations = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("mapped") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported field option, expected `skip`"))
                }
            })?;
        } else if attr.path().is_ident("mapping") {
            annotations.push(parse_mapping(attr)?);
        }
    }

    Ok((skip, annotations))
}

/// Parse `#[mapping(direction, other = Type, member = "name")]`
fn parse_mapping(attr: &Attribute) -> syn::Result<AnnotationInfo> {
    let mut direction: Option<DirectionKind> = None;
    let mut other: Option<Type> = None;
    let mut member: Option<LitStr> = None;

    attr.parse_nested_meta(|meta| {
        let keyword = if meta.path.is_ident("to_target") {
            Some(DirectionKind::ToTarget)
        } else if meta.path.is_ident("to_source") {
            Some(DirectionKind::ToSource)
        } else if meta.path.is_ident("both") {
            Some(DirectionKind::Both)
        } else {
            None
        };

        if let Some(kind) = keyword {
            if direction.replace(kind).is_some() {
                return Err(meta.error("mapping direction given twice"));
            }
            return Ok(());
        }

        if meta.path.is_ident("other") {
            other = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("member") {
            let lit: LitStr = meta.value()?.parse()?;
            if lit.value().is_empty() {
                return Err(syn::Error::new_spanned(lit, "member name cannot be empty"));
            }
            member = Some(lit);
            Ok(())
        } else {
            Err(meta.error(
                "unsupported mapping argument, expected `to_target`, `to_source`, `both`, `other` or `member`",
            ))
        }
    })?;

    let Some(other) = other else {
        return Err(syn::Error::new_spanned(attr, "mapping requires `other = Type`"));
    };
    let Some(member) = member else {
        return Err(syn::Error::new_spanned(
            attr,
            "mapping requires `member = \"name\"`",
        ));
    };

    Ok(AnnotationInfo {
        direction: direction.unwrap_or(DirectionKind::Both),
        other,
        member,
    })
}
