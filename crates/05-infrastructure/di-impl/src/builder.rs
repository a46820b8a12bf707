//! 容器构建器

use crate::autowire::AutowireContainerImpl;
use crate::container::DiContainerImpl;
use di_abstractions::{
    Constructible, Definition, DiContainer, Factory, Provider, TypeDescriptor, Value,
};
use infrastructure_common::{ContainerConfig, ContainerResult};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info};

/// 待注册的初始定义
enum Seed {
    Plain {
        id: String,
        definition: Definition,
        tags: Vec<String>,
    },
    Shared {
        id: String,
        factory: Factory,
        tags: Vec<String>,
    },
}

/// 容器构建器
///
/// 使用建造者模式收集配置、初始定义、类型与提供者，
/// 再按 `ContainerConfig::autowire` 构建对应的容器。
pub struct DiContainerBuilder {
    /// 容器配置
    config: ContainerConfig,
    /// 初始定义（注册顺序）
    seeds: Vec<Seed>,
    /// 本地可构造类型
    types: Vec<TypeDescriptor>,
    /// 提供者，在定义之后依次调用
    providers: Vec<Box<dyn Provider>>,
}

impl DiContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            seeds: Vec::new(),
            types: Vec::new(),
            providers: Vec::new(),
        }
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 启用或关闭自动装配
    pub fn autowire(mut self, enabled: bool) -> Self {
        self.config.autowire = enabled;
        self
    }

    /// 设置最大解析深度，0 表示不限制
    pub fn max_resolution_depth(mut self, depth: usize) -> Self {
        self.config.max_resolution_depth = depth;
        self
    }

    /// 添加初始定义
    pub fn definition<S: Into<String>>(mut self, id: S, definition: Definition) -> Self {
        self.seeds.push(Seed::Plain {
            id: id.into(),
            definition,
            tags: Vec::new(),
        });
        self
    }

    /// 添加带标签的初始定义
    pub fn tagged_definition<S: Into<String>>(
        mut self,
        id: S,
        definition: Definition,
        tags: &[&str],
    ) -> Self {
        self.seeds.push(Seed::Plain {
            id: id.into(),
            definition,
            tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
        });
        self
    }

    /// 添加单例工厂
    pub fn shared<S, T, F>(mut self, id: S, factory: F) -> Self
    where
        S: Into<String>,
        T: Any + Send + Sync,
        F: Fn(&dyn DiContainer) -> ContainerResult<T> + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move |container| factory(container).map(Value::new));
        self.seeds.push(Seed::Shared {
            id: id.into(),
            factory,
            tags: Vec::new(),
        });
        self
    }

    /// 登记可构造类型
    pub fn register_type<T: Constructible>(mut self) -> Self {
        debug!("构建器登记类型: {}", T::NAME);
        self.types.push(TypeDescriptor::of::<T>());
        self
    }

    /// 添加提供者
    pub fn add_provider<P: Provider + 'static>(mut self, provider: P) -> Self {
        debug!("构建器添加提供者: {}", provider.name());
        self.providers.push(Box::new(provider));
        self
    }

    /// 构建基础容器，忽略 `autowire` 设置
    pub fn build_plain(self) -> ContainerResult<DiContainerImpl> {
        let container = DiContainerImpl::with_config(self.config.clone());
        for descriptor in &self.types {
            container.engine().register_descriptor(descriptor.clone());
        }
        Self::populate(&container, self.seeds, &self.providers)?;
        Ok(container)
    }

    /// 构建自动装配容器，忽略 `autowire` 设置
    pub fn build_autowire(self) -> ContainerResult<AutowireContainerImpl> {
        let container = AutowireContainerImpl::with_config(self.config.clone());
        for descriptor in &self.types {
            container.engine().register_descriptor(descriptor.clone());
        }
        Self::populate(&container, self.seeds, &self.providers)?;
        Ok(container)
    }

    /// 按配置构建容器
    pub fn build(self) -> ContainerResult<Box<dyn DiContainer>> {
        if self.config.autowire {
            Ok(Box::new(self.build_autowire()?))
        } else {
            Ok(Box::new(self.build_plain()?))
        }
    }

    fn populate(
        container: &dyn DiContainer,
        seeds: Vec<Seed>,
        providers: &[Box<dyn Provider>],
    ) -> ContainerResult<()> {
        for seed in seeds {
            match seed {
                Seed::Plain {
                    id,
                    definition,
                    tags,
                } => {
                    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                    container.add_definition(&id, definition, &tags)?;
                }
                Seed::Shared { id, factory, tags } => {
                    let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
                    container.add_shared_factory(&id, factory, &tags)?;
                }
            }
        }

        for provider in providers {
            container.add_provider(provider.as_ref())?;
        }

        info!("容器构建完成，共 {} 个定义", container.keys().len());
        Ok(())
    }
}

impl Default for DiContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
