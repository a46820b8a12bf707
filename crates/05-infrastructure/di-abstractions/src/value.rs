//! 类型擦除的解析值

use infrastructure_common::{ContainerError, ContainerResult};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 容器中保存和返回的值
///
/// 内部是 `Arc<dyn Any + Send + Sync>`，克隆只增加引用计数，
/// 因此单例缓存返回的总是同一个实例。
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// 包装任意值
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 包装已共享的值，不会重新分配
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 具体类型的 `TypeId`
    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// 具体类型的名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 是否为类型 `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// 借用为 `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// 转换为 `Arc<T>`
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.inner.clone().downcast::<T>().ok()
    }

    /// 转换为 `Arc<T>`，失败时返回带标识符的 [`ContainerError::TypeMismatch`]
    pub fn expect_type<T: Any + Send + Sync>(&self, id: &str) -> ContainerResult<Arc<T>> {
        self.downcast::<T>()
            .ok_or_else(|| ContainerError::TypeMismatch {
                id: id.to_string(),
                expected: std::any::type_name::<T>(),
                actual: self.type_name,
            })
    }

    /// 两个值是否指向同一个实例
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
