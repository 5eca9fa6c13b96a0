//! Implementation of the `#[signal]` attribute macro.
//!
//! This macro lowers a function type alias into a candidate signal declaration.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned};
use syn::{GenericArgument, ItemType, PathArguments, ReturnType, Type, TypeBareFn, parse_macro_input};

/// Parsed `#[signal(...)]` attributes.
#[derive(Debug, Default)]
pub struct SignalAttrs {
    /// Script type that declares the signal.
    pub owner: Option<String>,
    /// Override the declared name.
    pub name: Option<String>,
}

impl SignalAttrs {
    pub fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        use syn::{Token, punctuated::Punctuated};

        let mut result = Self::default();

        if input.is_empty() {
            return Ok(result);
        }

        let items = Punctuated::<SignalAttrItem, Token![,]>::parse_terminated(input)?;

        for item in items {
            match item {
                SignalAttrItem::Owner(owner) => result.owner = Some(owner),
                SignalAttrItem::Name(name) => result.name = Some(name),
            }
        }

        Ok(result)
    }
}

/// Individual signal attribute item.
enum SignalAttrItem {
    Owner(String),
    Name(String),
}

impl syn::parse::Parse for SignalAttrItem {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        use syn::{LitStr, Token};

        let ident: syn::Ident = input.parse()?;
        let _: Token![=] = input.parse()?;
        let value: LitStr = input.parse()?;

        if ident == "owner" {
            Ok(SignalAttrItem::Owner(value.value()))
        } else if ident == "name" {
            Ok(SignalAttrItem::Name(value.value()))
        } else {
            Err(syn::Error::new(
                ident.span(),
                format!("unknown signal attribute: {}", ident),
            ))
        }
    }
}

struct SignalAttrsParser(SignalAttrs);

impl syn::parse::Parse for SignalAttrsParser {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        SignalAttrs::parse(input).map(SignalAttrsParser)
    }
}

pub fn signal_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = match syn::parse::<SignalAttrsParser>(attr) {
        Ok(parser) => parser.0,
        Err(err) => return err.to_compile_error().into(),
    };

    let input = parse_macro_input!(item as ItemType);

    match signal_inner(&attrs, &input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn signal_inner(attrs: &SignalAttrs, input: &ItemType) -> syn::Result<TokenStream2> {
    let alias = &input.ident;
    let vis = &input.vis;

    let Some(owner) = attrs.owner.as_deref() else {
        return Err(syn::Error::new_spanned(
            alias,
            "signal requires the declaring type: #[signal(owner = \"Type\")]",
        ));
    };
    let declared = attrs.name.clone().unwrap_or_else(|| alias.to_string());

    let bare_fn = match input.ty.as_ref() {
        Type::BareFn(bare_fn) => bare_fn,
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "signal requires a bare function type like `fn(amount: i32)`",
            ));
        }
    };
    if let Some(variadic) = &bare_fn.variadic {
        return Err(syn::Error::new_spanned(
            variadic,
            "variadic signals are not supported",
        ));
    }

    let parameters = lower_parameters(bare_fn);
    let returns_void = returns_unit(&bare_fn.output);

    let meta_fn_name = syn::Ident::new(&format!("__signal_{}_candidate", alias), alias.span());
    let location = quote_spanned! {alias.span()=>
        ::sigbridge_core::Location::member(#owner, #declared)
            .at(::core::file!(), ::core::line!(), ::core::column!())
    };

    Ok(quote! {
        #input

        /// Candidate declaration for signal registration.
        #[doc(hidden)]
        #[allow(non_snake_case)]
        #vis fn #meta_fn_name() -> ::sigbridge_core::CandidateSignal {
            ::sigbridge_core::CandidateSignal::new(#owner, #declared)
                #(#parameters)*
                .with_returns_void(#returns_void)
                .with_location(#location)
        }
    })
}

fn lower_parameters(bare_fn: &TypeBareFn) -> Vec<TokenStream2> {
    bare_fn
        .inputs
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let name = match &arg.name {
                Some((ident, _)) => ident.to_string(),
                None => format!("arg{}", i),
            };
            let (inner, ref_kind) = match &arg.ty {
                Type::Reference(reference) if reference.mutability.is_some() => {
                    (reference.elem.as_ref(), quote!(Out))
                }
                Type::Reference(reference) => (reference.elem.as_ref(), quote!(Ref)),
                ty => (ty, quote!(None)),
            };
            let managed = lower_type(inner);
            quote! {
                .with_parameter(
                    ::sigbridge_core::CandidateParameter::new(#name, #managed)
                        .with_ref_kind(::sigbridge_core::RefKind::#ref_kind)
                )
            }
        })
        .collect()
}

fn returns_unit(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => is_unit(ty),
    }
}

fn is_unit(ty: &Type) -> bool {
    match ty {
        Type::Tuple(tuple) => tuple.elems.is_empty(),
        Type::Paren(paren) => is_unit(&paren.elem),
        _ => false,
    }
}

/// Map a Rust type to a `ManagedType` expression.
fn lower_type(ty: &Type) -> TokenStream2 {
    if is_unit(ty) {
        return quote!(::sigbridge_core::ManagedType::Unit);
    }

    if let Type::Path(type_path) = ty
        && type_path.qself.is_none()
        && let Some(segment) = type_path.path.segments.last()
    {
        let ident = segment.ident.to_string();
        let simple = match (ident.as_str(), &segment.arguments) {
            ("bool", PathArguments::None) => Some(quote!(Bool)),
            ("i8", PathArguments::None) => Some(quote!(Int8)),
            ("i16", PathArguments::None) => Some(quote!(Int16)),
            ("i32", PathArguments::None) => Some(quote!(Int32)),
            ("i64", PathArguments::None) => Some(quote!(Int64)),
            ("u8", PathArguments::None) => Some(quote!(UInt8)),
            ("u16", PathArguments::None) => Some(quote!(UInt16)),
            ("u32", PathArguments::None) => Some(quote!(UInt32)),
            ("u64", PathArguments::None) => Some(quote!(UInt64)),
            ("f32", PathArguments::None) => Some(quote!(Float32)),
            ("f64", PathArguments::None) => Some(quote!(Float64)),
            ("String", PathArguments::None) => Some(quote!(String)),
            ("StringName", PathArguments::None) => Some(quote!(StringName)),
            ("Variant", PathArguments::None) => Some(quote!(Variant)),
            _ => None,
        };
        if let Some(variant) = simple {
            return quote!(::sigbridge_core::ManagedType::#variant);
        }

        if ident == "Gd"
            && let Some(class) = object_class(&segment.arguments)
        {
            return quote!(::sigbridge_core::ManagedType::object(#class));
        }
    }

    let name = quote!(#ty).to_string().replace(' ', "");
    quote!(::sigbridge_core::ManagedType::other(#name))
}

/// Class name of `Gd<Class>`.
fn object_class(arguments: &PathArguments) -> Option<String> {
    let PathArguments::AngleBracketed(generics) = arguments else {
        return None;
    };
    if generics.args.len() != 1 {
        return None;
    }
    match generics.args.first()? {
        GenericArgument::Type(Type::Path(path)) => {
            path.path.segments.last().map(|s| s.ident.to_string())
        }
        _ => None,
    }
}
