//! 索引风格访问
//!
//! `entries.read(id)` 等价于 `get`，`write` 等价于无标签的 `add`，
//! `contains` 等价于 `has`。删除条目总是失败。

use di_abstractions::{Definition, DiContainer, Value};
use infrastructure_common::{ContainerError, ContainerResult};

/// 容器条目视图
#[derive(Debug, Clone, Copy)]
pub struct Entries<'a, C: DiContainer + ?Sized> {
    container: &'a C,
}

impl<'a, C: DiContainer + ?Sized> Entries<'a, C> {
    /// 包装容器
    pub fn new(container: &'a C) -> Self {
        Self { container }
    }

    /// 读取条目
    pub fn read(&self, id: &str) -> ContainerResult<Value> {
        self.container.get(id)
    }

    /// 写入条目
    pub fn write(&self, id: &str, definition: impl Into<Definition>) -> ContainerResult<()> {
        self.container.add_definition(id, definition.into(), &[])
    }

    /// 条目是否存在
    pub fn contains(&self, id: &str) -> bool {
        self.container.has(id)
    }

    /// 删除条目（容器只允许追加，总是返回错误）
    pub fn remove(&self, _id: &str) -> ContainerResult<()> {
        Err(ContainerError::unset_not_allowed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiContainerImpl;

    #[test]
    fn test_entries_delegate() {
        let container = DiContainerImpl::new();
        let entries = container.entries();
        entries.write("port", Definition::value(8080_u16)).unwrap();

        assert!(entries.contains("port"));
        assert_eq!(entries.read("port").unwrap().downcast_ref::<u16>(), Some(&8080));
        assert!(entries.write("port", Value::new(1_u16)).is_err());
    }

    #[test]
    fn test_remove_not_allowed() {
        let container = DiContainerImpl::new();
        let entries = container.entries();
        entries.write("port", Value::new(8080_u16)).unwrap();

        let error = entries.remove("port").unwrap_err();
        assert_eq!(error.to_string(), "Unset not allowed");
        assert!(entries.contains("port"));
    }
}
