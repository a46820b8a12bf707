//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义容器、定义、扩展器与自动装配的核心接口。
//!
//! ## 核心接口
//!
//! - [`DiContainer`] - 对象安全的容器接口
//! - [`ContainerExt`] - 泛型便捷方法
//! - [`Definition`] - 字面值或工厂定义
//! - [`Value`] - 类型擦除的解析值
//! - [`Provider`] - 外部注册钩子
//! - [`Constructible`] - 可自动装配的类型
//! - [`TypeRegistry`] - 可构造类型注册表

pub mod autowire;
pub mod container;
pub mod definition;
pub mod provider;
pub mod registry;
pub mod value;

pub use autowire::*;
pub use container::*;
pub use definition::*;
pub use provider::*;
pub use registry::*;
pub use value::*;

pub use infrastructure_common::{AutowireError, ContainerError, ContainerResult};
