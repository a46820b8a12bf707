//! # Component Macros
//!
//! 这个 crate 提供了用于自动装配的派生宏。
//!
//! ## 核心宏
//!
//! - [`Autowire`] - 为结构体实现 `di_abstractions::Constructible` 并自动登记到全局类型注册表
//!
//! ## 使用示例
//!
//! ```ignore
//! use component_macros::Autowire;
//! use std::sync::Arc;
//!
//! #[derive(Autowire)]
//! pub struct UserRepository;
//!
//! #[derive(Autowire)]
//! #[autowire(implements("Service"))]
//! pub struct UserService {
//!     repository: Arc<UserRepository>,
//!     #[autowire(default)]
//!     page_size: usize,
//! }
//! ```
//!
//! 使用方需要同时依赖 `di-abstractions` 与 `ctor`。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod autowire;
mod utils;

/// 自动装配派生宏
///
/// 每个字段对应一个构造参数，按声明顺序排列：
///
/// - `Arc<T>`：参数类型为 `T` 的类型名，构造时直接取共享实例
/// - 不带泛型参数的具名类型 `U`：参数类型为 `U`，构造时克隆（要求 `U: Clone`）
/// - 其他类型：参数类型无法确定，自动装配时报错
/// - `#[autowire(default)]`：可选参数，不参与自动装配，使用 `Default::default()`
///
/// 结构体级别参数：
///
/// - `name = "custom_name"` - 自定义类型名（默认为结构体名）
/// - `implements("A", "B")` - 满足的能力名，供类型键扩展器匹配
#[proc_macro_derive(Autowire, attributes(autowire))]
pub fn derive_autowire(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    autowire::derive_autowire_impl(input)
}
