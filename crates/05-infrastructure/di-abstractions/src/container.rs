//! 依赖注入容器抽象接口
//!
//! [`DiContainer`] 是对象安全的核心接口，工厂和扩展器拿到的都是 `&dyn DiContainer`；
//! [`ContainerExt`] 在其上提供泛型便捷方法，对所有容器（包括 trait 对象）自动实现。

use crate::autowire::Constructible;
use crate::definition::{Definition, DefinitionInfo, Factory};
use crate::provider::Provider;
use crate::value::Value;
use infrastructure_common::ContainerResult;
use std::any::Any;
use std::sync::Arc;

/// 扩展器函数类型
///
/// 接收当前值和容器，返回变换后的值。同一个键下的扩展器按注册顺序串联执行。
pub type Extender = Arc<dyn Fn(Value, &dyn DiContainer) -> ContainerResult<Value> + Send + Sync>;

/// 依赖注入容器 trait
///
/// 容器只允许追加：标识符一旦注册就不能被覆盖或删除。
pub trait DiContainer: Send + Sync {
    /// 是否存在定义（别名同样计入）
    fn has(&self, id: &str) -> bool;

    /// 按注册顺序返回全部标识符（不含别名）
    fn keys(&self) -> Vec<String>;

    /// 注册定义
    ///
    /// 标识符为空或任一标签为空时返回 `InvalidArgument`，
    /// 标识符已存在时返回 `AlreadyDefined`。
    fn add_definition(&self, id: &str, definition: Definition, tags: &[&str])
        -> ContainerResult<()>;

    /// 注册单例工厂，首次解析后的结果会被永久缓存
    fn add_shared_factory(&self, id: &str, factory: Factory, tags: &[&str])
        -> ContainerResult<()>;

    /// 为标识符或类型名追加扩展器，键不需要已经存在
    fn extend_with(&self, key: &str, extender: Extender) -> ContainerResult<()>;

    /// 为已有标识符注册别名
    fn symlink(&self, id: &str, alias: &str) -> ContainerResult<()>;

    /// 解析标识符
    fn get(&self, id: &str) -> ContainerResult<Value>;

    /// 按注册顺序解析带有指定标签的全部标识符
    fn get_by_tag(&self, tag: &str) -> ContainerResult<Vec<Value>>;

    /// 调用提供者向容器注册定义
    fn add_provider(&self, provider: &dyn Provider) -> ContainerResult<()>;

    /// 已注册定义的描述（注册顺序）
    fn definitions(&self) -> Vec<DefinitionInfo>;
}

macro_rules! forward_container {
    ($($wrapper:ident),*) => {$(
        impl<C: DiContainer + ?Sized> DiContainer for $wrapper<C> {
            fn has(&self, id: &str) -> bool {
                (**self).has(id)
            }

            fn keys(&self) -> Vec<String> {
                (**self).keys()
            }

            fn add_definition(&self, id: &str, definition: Definition, tags: &[&str])
                -> ContainerResult<()> {
                (**self).add_definition(id, definition, tags)
            }

            fn add_shared_factory(&self, id: &str, factory: Factory, tags: &[&str])
                -> ContainerResult<()> {
                (**self).add_shared_factory(id, factory, tags)
            }

            fn extend_with(&self, key: &str, extender: Extender) -> ContainerResult<()> {
                (**self).extend_with(key, extender)
            }

            fn symlink(&self, id: &str, alias: &str) -> ContainerResult<()> {
                (**self).symlink(id, alias)
            }

            fn get(&self, id: &str) -> ContainerResult<Value> {
                (**self).get(id)
            }

            fn get_by_tag(&self, tag: &str) -> ContainerResult<Vec<Value>> {
                (**self).get_by_tag(tag)
            }

            fn add_provider(&self, provider: &dyn Provider) -> ContainerResult<()> {
                (**self).add_provider(provider)
            }

            fn definitions(&self) -> Vec<DefinitionInfo> {
                (**self).definitions()
            }
        }
    )*};
}

// 共享或装箱的容器同样是容器
forward_container!(Box, Arc);

/// 容器便捷方法
pub trait ContainerExt: DiContainer {
    /// 注册字面值
    fn add<T: Any + Send + Sync>(&self, id: &str, value: T) -> ContainerResult<()> {
        self.add_definition(id, Definition::value(value), &[])
    }

    /// 注册带标签的字面值
    fn add_tagged<T: Any + Send + Sync>(
        &self,
        id: &str,
        value: T,
        tags: &[&str],
    ) -> ContainerResult<()> {
        self.add_definition(id, Definition::value(value), tags)
    }

    /// 注册瞬时工厂
    fn add_factory<T, F>(&self, id: &str, factory: F) -> ContainerResult<()>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn DiContainer) -> ContainerResult<T> + Send + Sync + 'static,
    {
        self.add_definition(id, Definition::factory(factory), &[])
    }

    /// 注册带标签的瞬时工厂
    fn add_factory_tagged<T, F>(&self, id: &str, factory: F, tags: &[&str]) -> ContainerResult<()>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn DiContainer) -> ContainerResult<T> + Send + Sync + 'static,
    {
        self.add_definition(id, Definition::factory(factory), tags)
    }

    /// 注册单例工厂
    fn add_shared<T, F>(&self, id: &str, factory: F) -> ContainerResult<()>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn DiContainer) -> ContainerResult<T> + Send + Sync + 'static,
    {
        self.add_shared_tagged(id, factory, &[])
    }

    /// 注册带标签的单例工厂
    fn add_shared_tagged<T, F>(&self, id: &str, factory: F, tags: &[&str]) -> ContainerResult<()>
    where
        T: Any + Send + Sync,
        F: Fn(&dyn DiContainer) -> ContainerResult<T> + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move |container| factory(container).map(Value::new));
        self.add_shared_factory(id, factory, tags)
    }

    /// 追加未类型化的扩展器
    fn extend<F>(&self, key: &str, extender: F) -> ContainerResult<()>
    where
        F: Fn(Value, &dyn DiContainer) -> ContainerResult<Value> + Send + Sync + 'static,
    {
        self.extend_with(key, Arc::new(extender))
    }

    /// 追加类型化的扩展器
    ///
    /// 匹配到的值不是 `T` 时解析失败并返回 `TypeMismatch`。
    fn extend_as<T, F>(&self, key: &str, extender: F) -> ContainerResult<()>
    where
        T: Any + Send + Sync,
        F: Fn(Arc<T>, &dyn DiContainer) -> ContainerResult<Arc<T>> + Send + Sync + 'static,
    {
        let owned_key = key.to_string();
        self.extend_with(
            key,
            Arc::new(move |value, container| {
                let typed = value.expect_type::<T>(&owned_key)?;
                extender(typed, container).map(Value::from_arc)
            }),
        )
    }

    /// 按 Rust 类型追加扩展器，键为 `std::any::type_name::<T>()`
    fn extend_type<T, F>(&self, extender: F) -> ContainerResult<()>
    where
        T: Any + Send + Sync,
        F: Fn(Arc<T>, &dyn DiContainer) -> ContainerResult<Arc<T>> + Send + Sync + 'static,
    {
        self.extend_as(std::any::type_name::<T>(), extender)
    }

    /// 解析并转换为 `Arc<T>`
    fn get_as<T: Any + Send + Sync>(&self, id: &str) -> ContainerResult<Arc<T>> {
        self.get(id)?.expect_type::<T>(id)
    }

    /// 按标签解析并逐个转换为 `Arc<T>`
    fn get_by_tag_as<T: Any + Send + Sync>(&self, tag: &str) -> ContainerResult<Vec<Arc<T>>> {
        self.get_by_tag(tag)?
            .iter()
            .map(|value| value.expect_type::<T>(tag))
            .collect()
    }

    /// 以类型名解析可构造类型
    fn resolve<T: Constructible>(&self) -> ContainerResult<Arc<T>> {
        self.get_as::<T>(T::NAME)
    }
}

impl<C: DiContainer + ?Sized> ContainerExt for C {}
