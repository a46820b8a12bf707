//! 宏工具函数

use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::{Attribute, GenericArgument, Ident, LitStr, PathArguments, Result, Token, Type};

/// 构造参数类型的分类
#[derive(Clone)]
pub enum FieldType {
    /// `Arc<T>`，从容器取得共享实例
    Shared { inner: Type, name: String },
    /// 不带泛型参数的具名类型，从容器取得后克隆
    Cloned { name: String },
    /// 无法确定类型
    Unknown,
}

impl FieldType {
    /// 具名类型的名称
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Shared { name, .. } | Self::Cloned { name } => Some(name),
            Self::Unknown => None,
        }
    }
}

/// 对字段类型分类
pub fn classify_type(ty: &Type) -> FieldType {
    let Some(segment) = plain_last_segment(ty) else {
        return classify_arc(ty).unwrap_or(FieldType::Unknown);
    };
    FieldType::Cloned {
        name: segment.to_string(),
    }
}

/// `Arc<T>` 且 `T` 为不带泛型参数的路径
fn classify_arc(ty: &Type) -> Option<FieldType> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let Some(GenericArgument::Type(inner)) = args.args.first() else {
        return None;
    };
    let name = plain_last_segment(inner)?.to_string();
    Some(FieldType::Shared {
        inner: inner.clone(),
        name,
    })
}

/// 路径类型的最后一段，任何一段带泛型参数时返回 `None`
fn plain_last_segment(ty: &Type) -> Option<&Ident> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    if type_path
        .path
        .segments
        .iter()
        .any(|segment| !segment.arguments.is_none())
    {
        return None;
    }
    type_path.path.segments.last().map(|segment| &segment.ident)
}

/// 结构体级别的 `#[autowire(...)]` 参数
#[derive(Debug, Default)]
pub struct StructArgs {
    /// 自定义类型名
    pub name: Option<String>,
    /// 满足的能力名
    pub implements: Vec<String>,
}

/// 解析结构体上的 `#[autowire(name = "...", implements("A", "B"))]`
pub fn parse_struct_args(attrs: &[Attribute]) -> Result<StructArgs> {
    let mut args = StructArgs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("autowire")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                args.name = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("implements") {
                let content;
                syn::parenthesized!(content in meta.input);
                let names = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                args.implements
                    .extend(names.iter().map(LitStr::value));
                Ok(())
            } else {
                Err(meta.error("unsupported autowire attribute, expected `name` or `implements`"))
            }
        })?;
    }
    Ok(args)
}

/// 字段上是否标注了 `#[autowire(default)]`
pub fn has_default_attr(attrs: &[Attribute]) -> Result<bool> {
    let mut found = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("autowire")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                found = true;
                Ok(())
            } else {
                Err(meta.error("unsupported autowire field attribute, expected `default`"))
            }
        })?;
    }
    Ok(found)
}

/// 生成全局注册函数名
pub fn registration_fn_name(struct_name: &Ident) -> Ident {
    Ident::new(
        &format!(
            "__register_autowire_{}",
            struct_name.to_string().to_lowercase()
        ),
        Span::call_site(),
    )
}
