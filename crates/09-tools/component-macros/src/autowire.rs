//! 自动装配派生宏实现

use crate::utils::{classify_type, has_default_attr, parse_struct_args, registration_fn_name, FieldType};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, Result};

/// 实现 #[derive(Autowire)] 宏
pub fn derive_autowire_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(error) => error.to_compile_error().into(),
    }
}

/// 单个构造参数的生成结果
struct ParameterTokens {
    descriptor: TokenStream2,
    value: TokenStream2,
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Autowire cannot be derived for generic structs",
        ));
    }

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            struct_name,
            "Autowire can only be derived for structs",
        ));
    };

    let args = parse_struct_args(&input.attrs)?;
    let type_name = args.name.unwrap_or_else(|| struct_name.to_string());
    let implements = &args.implements;

    let (descriptors, construct_body) = match &data.fields {
        Fields::Named(fields) => {
            let mut descriptors = Vec::new();
            let mut initializers = Vec::new();
            for field in &fields.named {
                let Some(ident) = &field.ident else {
                    continue;
                };
                let tokens = parameter_tokens(&ident.to_string(), &type_name, field)?;
                descriptors.push(tokens.descriptor);
                let value = tokens.value;
                initializers.push(quote! { #ident: #value });
            }
            (descriptors, quote! { Self { #(#initializers),* } })
        }
        Fields::Unnamed(fields) => {
            let mut descriptors = Vec::new();
            let mut values = Vec::new();
            for (index, field) in fields.unnamed.iter().enumerate() {
                let tokens = parameter_tokens(&format!("arg{index}"), &type_name, field)?;
                descriptors.push(tokens.descriptor);
                values.push(tokens.value);
            }
            (descriptors, quote! { Self(#(#values),*) })
        }
        Fields::Unit => (Vec::new(), quote! { Self }),
    };

    let registration_fn = registration_fn_name(struct_name);

    Ok(quote! {
        impl ::di_abstractions::Constructible for #struct_name {
            const NAME: &'static str = #type_name;

            fn parameters() -> ::std::vec::Vec<::di_abstractions::Parameter> {
                ::std::vec![#(#descriptors),*]
            }

            #[allow(unreachable_code, unused_mut, unused_variables)]
            fn construct(
                mut arguments: ::di_abstractions::Arguments,
            ) -> ::di_abstractions::ContainerResult<Self> {
                ::std::result::Result::Ok(#construct_body)
            }

            fn implements() -> ::std::vec::Vec<&'static str> {
                ::std::vec![#(#implements),*]
            }
        }

        // 使用 ctor 在程序启动时登记到全局类型注册表
        #[::ctor::ctor]
        fn #registration_fn() {
            ::di_abstractions::register_global_type::<#struct_name>();
        }
    })
}

fn parameter_tokens(name: &str, owner: &str, field: &syn::Field) -> Result<ParameterTokens> {
    let optional = has_default_attr(&field.attrs)?;
    let field_type = classify_type(&field.ty);

    let kind = match field_type.type_name() {
        Some(type_name) => quote! { ::di_abstractions::ParameterType::Named(#type_name) },
        None => quote! { ::di_abstractions::ParameterType::Unknown },
    };
    let descriptor = quote! {
        ::di_abstractions::Parameter {
            name: #name,
            kind: #kind,
            optional: #optional,
        }
    };

    let ty = &field.ty;
    let value = if optional {
        quote! { <#ty as ::std::default::Default>::default() }
    } else {
        match field_type {
            FieldType::Shared { inner, .. } => quote! { arguments.next::<#inner>()? },
            FieldType::Cloned { .. } => quote! { arguments.next_cloned::<#ty>()? },
            FieldType::Unknown => quote! {
                return ::std::result::Result::Err(
                    ::di_abstractions::AutowireError::UnknownParameterType {
                        owner: ::std::string::String::from(#owner),
                        parameter: ::std::string::String::from(#name),
                    }
                    .into(),
                )
            },
        }
    };

    Ok(ParameterTokens { descriptor, value })
}
