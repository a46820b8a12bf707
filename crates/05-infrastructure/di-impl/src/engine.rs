//! 解析引擎
//!
//! 两种容器共用的核心：定义存储、扩展器链、单例缓存、解析栈与类型注册表。
//! 引擎本身不实现 [`DiContainer`]，解析时由外层容器把自己作为 `outer` 传入，
//! 工厂与扩展器拿到的总是外层容器。

use crate::extenders::ExtenderChain;
use crate::stack::{ResolutionStack, StackFrame};
use crate::store::{ensure_id, DefinitionStore};
use dashmap::DashMap;
use di_abstractions::{
    global_type, global_type_by_id, Constructible, Definition, DefinitionInfo, DiContainer,
    Extender, Lifetime, Provider, TypeDescriptor, TypeRegistry, Value,
};
use infrastructure_common::{ContainerConfig, ContainerError, ContainerResult};
use parking_lot::{ReentrantMutex, ReentrantMutexGuard, RwLock};
use std::any::TypeId;
use std::sync::Arc;
use tracing::{debug, info, trace};

pub(crate) struct Engine {
    config: ContainerConfig,
    store: RwLock<DefinitionStore>,
    extenders: ExtenderChain,
    singletons: DashMap<String, Value>,
    stack: ResolutionStack,
    types: RwLock<TypeRegistry>,
    /// 同一线程可重入，其他线程的解析会话在此等待
    session: ReentrantMutex<()>,
}

impl Engine {
    pub(crate) fn new(config: ContainerConfig) -> Self {
        Self {
            config,
            store: RwLock::new(DefinitionStore::default()),
            extenders: ExtenderChain::default(),
            singletons: DashMap::new(),
            stack: ResolutionStack::default(),
            types: RwLock::new(TypeRegistry::new()),
            session: ReentrantMutex::new(()),
        }
    }

    pub(crate) fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 开始（或重入）一个解析会话
    pub(crate) fn session(&self) -> ReentrantMutexGuard<'_, ()> {
        self.session.lock()
    }

    pub(crate) fn enter(&self, id: &str) -> ContainerResult<StackFrame<'_>> {
        self.stack.enter(id, self.config.max_resolution_depth)
    }

    pub(crate) fn add(
        &self,
        callee: &'static str,
        id: &str,
        definition: Definition,
        tags: &[&str],
        lifetime: Lifetime,
    ) -> ContainerResult<()> {
        let kind = definition.kind();
        self.store
            .write()
            .insert(callee, id, definition, tags, lifetime)?;
        debug!("注册定义: {} ({:?}, {:?}, 标签 {:?})", id, kind, lifetime, tags);
        Ok(())
    }

    pub(crate) fn symlink(&self, id: &str, alias: &str) -> ContainerResult<()> {
        self.store.write().insert_alias(id, alias)?;
        debug!("注册别名: {} -> {}", alias, id);
        Ok(())
    }

    pub(crate) fn extend(&self, key: &str, extender: Extender) -> ContainerResult<()> {
        ensure_id("DiContainer::extend", 1, key)?;
        self.extenders.push(key, extender);
        debug!("注册扩展器: {}", key);
        Ok(())
    }

    pub(crate) fn has(&self, id: &str) -> bool {
        self.store.read().contains(id)
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.store.read().keys()
    }

    pub(crate) fn definitions(&self) -> Vec<DefinitionInfo> {
        self.store.read().describe()
    }

    pub(crate) fn add_provider(
        &self,
        provider: &dyn Provider,
        outer: &dyn DiContainer,
    ) -> ContainerResult<()> {
        let before = self.store.read().len();
        provider.register(outer)?;
        let added = self.store.read().len().saturating_sub(before);
        info!("提供者 {} 注册完成，新增定义 {} 个", provider.name(), added);
        Ok(())
    }

    /// 在本地注册表登记可构造类型
    pub(crate) fn register_type<T: Constructible>(&self) -> bool {
        self.register_descriptor(TypeDescriptor::of::<T>())
    }

    pub(crate) fn register_descriptor(&self, descriptor: TypeDescriptor) -> bool {
        let name = descriptor.name();
        let added = self.types.write().insert(descriptor);
        if added {
            info!("注册可构造类型: {}", name);
        }
        added
    }

    /// 按类型名查找可构造类型，本地注册表优先
    pub(crate) fn find_type(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.types.read().get(name).or_else(|| global_type(name))
    }

    fn find_type_by_id(&self, type_id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.types
            .read()
            .find_by_type_id(type_id)
            .or_else(|| global_type_by_id(type_id))
    }

    /// 值是否属于键所描述的类型
    fn value_satisfies(&self, value: &Value, key: &str) -> bool {
        value.type_name() == key
            || self
                .find_type_by_id(value.type_id())
                .is_some_and(|descriptor| descriptor.satisfies(key))
    }

    /// 解析标识符
    pub(crate) fn resolve(&self, id: &str, outer: &dyn DiContainer) -> ContainerResult<Value> {
        let _session = self.session();

        let canonical = self.store.read().canonical(id).to_string();
        if let Some(cached) = self.singletons.get(&canonical) {
            trace!("命中单例缓存: {}", canonical);
            return Ok(cached.value().clone());
        }

        let (definition, lifetime, names) = {
            let store = self.store.read();
            let (definition, lifetime) = store
                .lookup(&canonical)
                .ok_or_else(|| ContainerError::not_found(id))?;
            (definition, lifetime, store.names_of(&canonical))
        };

        let frame = self.enter(&canonical)?;
        if self.config.trace_resolutions {
            debug!("解析: {}", self.stack.path());
        } else {
            trace!("解析: {} (深度 {})", canonical, self.stack.depth());
        }

        let raw = match definition {
            Definition::Value(value) => value,
            Definition::Factory(factory) => factory(outer)?,
        };

        // 标识符与其全部别名共用扩展器
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let extenders = self
            .extenders
            .matching(&names, |key| self.value_satisfies(&raw, key));
        let value = ExtenderChain::apply(&extenders, raw, outer)?;
        drop(frame);

        if lifetime == Lifetime::Singleton {
            let cached = self
                .singletons
                .entry(canonical)
                .or_insert_with(|| value.clone())
                .value()
                .clone();
            return Ok(cached);
        }
        Ok(value)
    }

    /// 按注册顺序解析带有标签的全部标识符
    pub(crate) fn resolve_tag(&self, tag: &str, outer: &dyn DiContainer) -> ContainerResult<Vec<Value>> {
        ensure_id("DiContainer::get_by_tag", 1, tag)?;
        let _session = self.session();

        let ids = self.store.read().tagged(tag);
        if ids.is_empty() {
            return Err(ContainerError::not_found(tag));
        }
        ids.iter().map(|id| self.resolve(id, outer)).collect()
    }

    /// 单例缓存中的条目数
    pub(crate) fn cached_singletons(&self) -> usize {
        self.singletons.len()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("definitions", &self.store.read().len())
            .field("extenders", &self.extenders.len())
            .field("singletons", &self.singletons.len())
            .field("types", &self.types.read().len())
            .finish_non_exhaustive()
    }
}
