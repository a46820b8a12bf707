//! 定义与生命周期

use crate::container::DiContainer;
use crate::value::Value;
use infrastructure_common::ContainerResult;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 工厂函数类型
///
/// 以容器为唯一参数，返回解析值。工厂内部可以继续调用 `get` 解析依赖。
pub type Factory = Arc<dyn Fn(&dyn DiContainer) -> ContainerResult<Value> + Send + Sync>;

/// 组件生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
    /// 瞬时模式 - 每次请求都重新执行工厂
    #[default]
    Transient,
    /// 单例模式 - 首次解析后缓存，之后不再执行工厂
    Singleton,
}

/// 标识符对应的定义
#[derive(Clone)]
pub enum Definition {
    /// 字面值，解析时原样返回
    Value(Value),
    /// 延迟工厂，解析时以容器为参数调用
    Factory(Factory),
}

impl Definition {
    /// 字面值定义
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Self::Value(Value::new(value))
    }

    /// 工厂定义
    pub fn factory<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn DiContainer) -> ContainerResult<T> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(move |container| factory(container).map(Value::new)))
    }

    /// 定义的种类
    pub fn kind(&self) -> DefinitionKind {
        match self {
            Self::Value(_) => DefinitionKind::Value,
            Self::Factory(_) => DefinitionKind::Factory,
        }
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.debug_tuple("Factory").field(&"<function>").finish(),
        }
    }
}

impl From<Value> for Definition {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Factory> for Definition {
    fn from(factory: Factory) -> Self {
        Self::Factory(factory)
    }
}

/// 把可调用的值当作普通字面值保存
///
/// 容器不会把结果当作工厂执行，`get` 返回的就是这个可调用值本身。
///
/// ```
/// use di_abstractions::{as_is, DefinitionKind};
///
/// let callback: Box<dyn Fn() -> u32 + Send + Sync> = Box::new(|| 7);
/// let definition = as_is(callback);
/// assert_eq!(definition.kind(), DefinitionKind::Value);
/// ```
pub fn as_is<T: Any + Send + Sync>(value: T) -> Definition {
    Definition::value(value)
}

/// 定义的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// 字面值
    Value,
    /// 工厂
    Factory,
}

/// 已注册定义的只读描述，供导出工具等外部协作者使用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionInfo {
    /// 标识符
    pub id: String,
    /// 定义种类
    pub kind: DefinitionKind,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 标签（注册顺序）
    pub tags: Vec<String>,
    /// 指向该标识符的别名
    pub aliases: Vec<String>,
}
