//! 基础容器实现

use crate::engine::Engine;
use crate::index::Entries;
use di_abstractions::{
    Constructible, Definition, DefinitionInfo, DiContainer, Extender, Factory, Lifetime, Provider,
    Value,
};
use infrastructure_common::{ContainerConfig, ContainerResult};
use tracing::{info, warn};

/// 具体的依赖注入容器实现
///
/// 只解析已注册的标识符，不做自动装配。
#[derive(Debug)]
pub struct DiContainerImpl {
    engine: Engine,
}

impl DiContainerImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// 使用指定配置创建容器
    ///
    /// 本类型从不自动装配，`config.autowire` 会被忽略并记录警告。
    /// 需要按配置选择容器时使用 [`DiContainerBuilder::build`](crate::DiContainerBuilder::build)。
    pub fn with_config(config: ContainerConfig) -> Self {
        if config.autowire {
            warn!("DiContainerImpl 不支持自动装配，已忽略 autowire = true，请改用 DiContainerBuilder::build");
        }
        info!("创建依赖注入容器 (最大解析深度 {})", config.max_resolution_depth);
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
    ///
    /// 基础容器不会据此自动装配，但类型名和能力名可用作扩展器键。
    pub fn register_type<T: Constructible>(&self) -> bool {
        self.engine.register_type::<T>()
    }

    /// 单例缓存中的实例数量
    pub fn cached_singletons(&self) -> usize {
        self.engine.cached_singletons()
    }

    /// 索引风格的访问入口
    pub fn entries(&self) -> Entries<'_, Self> {
        Entries::new(self)
    }

    pub(crate) fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl Default for DiContainerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl DiContainer for DiContainerImpl {
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
