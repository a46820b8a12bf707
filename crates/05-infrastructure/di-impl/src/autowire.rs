//! 自动装配容器
//!
//! 请求未定义的标识符时，如果它是已注册的可构造类型名，容器会先为它规划一个工厂定义：
//! 逐个检查必需的构造参数，递归定义尚未定义的参数类型，最后注册按顺序解析参数并构造实例的工厂。
//! 规划与解析共用同一个解析栈，构造参数之间的循环在任一阶段都会被发现。

use crate::engine::Engine;
use crate::index::Entries;
use di_abstractions::{
    Arguments, Constructible, Definition, DefinitionInfo, DiContainer, Extender, Factory,
    Lifetime, Provider, Value,
};
use infrastructure_common::{AutowireError, ContainerConfig, ContainerResult};
use std::sync::Arc;
use tracing::{debug, info};

/// 带自动装配的依赖注入容器
#[derive(Debug)]
pub struct AutowireContainerImpl {
    engine: Engine,
}

impl AutowireContainerImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::autowired())
    }

    /// 使用指定配置创建容器
    pub fn with_config(config: ContainerConfig) -> Self {
        info!("创建自动装配容器 (最大解析深度 {})", config.max_resolution_depth);
        Self {
            engine: Engine::new(config),
        }
    }

    /// 以初始定义创建容器，校验规则与 `add` 相同
    pub fn with_definitions<I, S>(definitions: I) -> ContainerResult<Self>
    where
        I: IntoIterator<Item = (S, Definition)>,
        S: AsRef<str>,
    {
        let container = Self::new();
        for (id, definition) in definitions {
            container.add_definition(id.as_ref(), definition, &[])?;
        }
        Ok(container)
    }

    /// 当前配置
    pub fn config(&self) -> &ContainerConfig {
        self.engine.config()
    }

    /// 在本容器的类型注册表登记可构造类型
    pub fn register_type<T: Constructible>(&self) -> bool {
        self.engine.register_type::<T>()
    }

    /// 单例缓存中的实例数量
    pub fn cached_singletons(&self) -> usize {
        self.engine.cached_singletons()
    }

    /// 索引风格的访问入口，读取时同样会自动装配
    pub fn entries(&self) -> Entries<'_, Self> {
        Entries::new(self)
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.engine
    }

    /// 为可构造类型规划工厂定义
    ///
    /// 标识符不是已知类型名时什么也不做，由随后的解析报告未找到。
    fn define(&self, id: &str) -> ContainerResult<()> {
        let Some(descriptor) = self.engine.find_type(id) else {
            return Ok(());
        };

        let _session = self.engine.session();
        if self.engine.has(id) {
            return Ok(());
        }
        let _frame = self.engine.enter(id)?;
        debug!("规划自动装配: {}", id);

        let mut dependencies = Vec::new();
        for parameter in descriptor.parameters() {
            if parameter.optional {
                continue;
            }

            let Some(type_name) = parameter.kind.name() else {
                return Err(AutowireError::UnknownParameterType {
                    owner: descriptor.name().to_string(),
                    parameter: parameter.name.to_string(),
                }
                .into());
            };

            if !self.engine.has(type_name) {
                if self.engine.find_type(type_name).is_none() {
                    return Err(AutowireError::UnresolvableParameterType {
                        owner: descriptor.name().to_string(),
                        parameter: parameter.name.to_string(),
                        type_name: type_name.to_string(),
                    }
                    .into());
                }
                self.define(type_name)?;
            }

            dependencies.push(type_name);
        }

        let owner = descriptor.name();
        let factory: Factory = Arc::new(move |container: &dyn DiContainer| {
            let arguments = dependencies
                .iter()
                .map(|dependency| container.get(dependency))
                .collect::<ContainerResult<Vec<_>>>()?;
            descriptor.construct(Arguments::new(owner, arguments))
        });

        self.engine.add(
            "AutowireContainer::define",
            id,
            Definition::Factory(factory),
            &[],
            Lifetime::Transient,
        )
    }
}

impl Default for AutowireContainerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl DiContainer for AutowireContainerImpl {
    fn has(&self, id: &str) -> bool {
        self.engine.has(id)
    }

    fn keys(&self) -> Vec<String> {
        self.engine.keys()
    }

    fn add_definition(&self, id: &str, definition: Definition, tags: &[&str]) -> ContainerResult<()> {
        self.engine
            .add("DiContainer::add", id, definition, tags, Lifetime::Transient)
    }

    fn add_shared_factory(&self, id: &str, factory: Factory, tags: &[&str]) -> ContainerResult<()> {
        self.engine.add(
            "DiContainer::add_shared",
            id,
            Definition::Factory(factory),
            tags,
            Lifetime::Singleton,
        )
    }

    fn extend_with(&self, key: &str, extender: Extender) -> ContainerResult<()> {
        self.engine.extend(key, extender)
    }

    fn symlink(&self, id: &str, alias: &str) -> ContainerResult<()> {
        self.engine.symlink(id, alias)
    }

    fn get(&self, id: &str) -> ContainerResult<Value> {
        let _session = self.engine.session();
        if !self.engine.has(id) {
            self.define(id)?;
        }
        self.engine.resolve(id, self)
    }

    fn get_by_tag(&self, tag: &str) -> ContainerResult<Vec<Value>> {
        self.engine.resolve_tag(tag, self)
    }

    fn add_provider(&self, provider: &dyn Provider) -> ContainerResult<()> {
        self.engine.add_provider(provider, self)
    }

    fn definitions(&self) -> Vec<DefinitionInfo> {
        self.engine.definitions()
    }
}
