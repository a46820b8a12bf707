//! 自动装配抽象
//!
//! Rust 没有运行时反射，可构造类型通过 [`Constructible`] 自行声明构造参数：
//! 每个参数有名称、可选的具名类型以及是否有默认值。自动装配容器据此递归定义依赖，
//! 再按参数顺序把解析结果交给 [`Constructible::construct`]。
//!
//! 通常由 `component_macros::Autowire` 派生宏生成实现；也可以手写。
//!
//! ```
//! use di_abstractions::{Arguments, Constructible, Parameter};
//! use infrastructure_common::ContainerResult;
//! use std::sync::Arc;
//!
//! struct Engine;
//!
//! impl Constructible for Engine {
//!     const NAME: &'static str = "Engine";
//!     fn parameters() -> Vec<Parameter> { Vec::new() }
//!     fn construct(_: Arguments) -> ContainerResult<Self> { Ok(Engine) }
//! }
//!
//! struct Car { engine: Arc<Engine> }
//!
//! impl Constructible for Car {
//!     const NAME: &'static str = "Car";
//!     fn parameters() -> Vec<Parameter> {
//!         vec![Parameter::required("engine", "Engine")]
//!     }
//!     fn construct(mut args: Arguments) -> ContainerResult<Self> {
//!         Ok(Car { engine: args.next::<Engine>()? })
//!     }
//! }
//! ```

use crate::value::Value;
use infrastructure_common::{AutowireError, ContainerError, ContainerResult};
use std::any::Any;
use std::sync::Arc;

/// 可被自动装配的类型
pub trait Constructible: Any + Send + Sync + Sized {
    /// 类型名，同时也是自动装配时使用的标识符
    const NAME: &'static str;

    /// 构造参数，按构造顺序排列
    fn parameters() -> Vec<Parameter>;

    /// 以已解析的必需参数构造实例
    ///
    /// `arguments` 只包含非可选参数，顺序与 [`Constructible::parameters`] 一致。
    fn construct(arguments: Arguments) -> ContainerResult<Self>;

    /// 该类型满足的能力名，类型键扩展器据此匹配
    fn implements() -> Vec<&'static str> {
        Vec::new()
    }
}

/// 构造参数的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    /// 单一具名类型
    Named(&'static str),
    /// 无法确定类型（泛型、元组、trait 对象等）
    Unknown,
}

impl ParameterType {
    /// 具名类型的名称
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Unknown => None,
        }
    }
}

/// 构造参数描述
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// 参数名
    pub name: &'static str,
    /// 参数类型
    pub kind: ParameterType,
    /// 是否有默认值，有默认值的参数不会被自动装配
    pub optional: bool,
}

impl Parameter {
    /// 必需的具名类型参数
    pub const fn required(name: &'static str, type_name: &'static str) -> Self {
        Self {
            name,
            kind: ParameterType::Named(type_name),
            optional: false,
        }
    }

    /// 有默认值的参数
    pub const fn optional(name: &'static str, kind: ParameterType) -> Self {
        Self {
            name,
            kind,
            optional: true,
        }
    }

    /// 类型无法确定的必需参数
    pub const fn untyped(name: &'static str) -> Self {
        Self {
            name,
            kind: ParameterType::Unknown,
            optional: false,
        }
    }
}

/// 传给 [`Constructible::construct`] 的实参
#[derive(Debug)]
pub struct Arguments {
    owner: &'static str,
    values: std::vec::IntoIter<Value>,
    supplied: usize,
    position: usize,
}

impl Arguments {
    /// 创建实参列表
    pub fn new(owner: &'static str, values: Vec<Value>) -> Self {
        let supplied = values.len();
        Self {
            owner,
            values: values.into_iter(),
            supplied,
            position: 0,
        }
    }

    /// 所属类型名
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// 尚未取出的实参数量
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// 取出下一个原始值
    pub fn next_value(&mut self) -> ContainerResult<Value> {
        let index = self.position;
        let value = self.values.next().ok_or_else(|| AutowireError::MissingArgument {
            owner: self.owner.to_string(),
            index,
            supplied: self.supplied,
        })?;
        self.position += 1;
        Ok(value)
    }

    /// 取出下一个实参并转换为 `Arc<T>`
    pub fn next<T: Any + Send + Sync>(&mut self) -> ContainerResult<Arc<T>> {
        let index = self.position;
        let value = self.next_value()?;
        value.downcast::<T>().ok_or_else(|| ContainerError::TypeMismatch {
            id: format!("{}::new()#{}", self.owner, index),
            expected: std::any::type_name::<T>(),
            actual: value.type_name(),
        })
    }

    /// 取出下一个实参并克隆为 `T`
    pub fn next_cloned<T: Any + Send + Sync + Clone>(&mut self) -> ContainerResult<T> {
        self.next::<T>().map(|value| T::clone(&value))
    }
}
