//! 提供者抽象接口
//!
//! 提供者是一段外部的注册逻辑，容器只负责调用它的 `register`。

use crate::container::DiContainer;
use infrastructure_common::ContainerResult;

/// 提供者 trait
pub trait Provider: Send + Sync {
    /// 向容器注册定义、单例或扩展器
    fn register(&self, container: &dyn DiContainer) -> ContainerResult<()>;

    /// 提供者名称，用于日志
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Provider for F
where
    F: Fn(&dyn DiContainer) -> ContainerResult<()> + Send + Sync,
{
    fn register(&self, container: &dyn DiContainer) -> ContainerResult<()> {
        self(container)
    }
}
