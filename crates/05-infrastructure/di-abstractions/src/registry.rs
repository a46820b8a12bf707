//! 可构造类型注册表
//!
//! 类型可以显式注册到某个容器的本地注册表，也可以在程序启动时通过
//! `#[derive(Autowire)]` 生成的 `ctor` 函数自注册到全局注册表。

use crate::autowire::{Arguments, Constructible, Parameter};
use crate::value::Value;
use indexmap::IndexMap;
use infrastructure_common::ContainerResult;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// 构造函数指针
pub type ConstructFn = fn(Arguments) -> ContainerResult<Value>;

/// 可构造类型的描述
#[derive(Clone)]
pub struct TypeDescriptor {
    name: &'static str,
    type_id: TypeId,
    rust_name: &'static str,
    parameters: Vec<Parameter>,
    implements: Vec<&'static str>,
    construct: ConstructFn,
}

impl TypeDescriptor {
    /// 为类型 `T` 生成描述
    pub fn of<T: Constructible>() -> Self {
        Self {
            name: T::NAME,
            type_id: TypeId::of::<T>(),
            rust_name: std::any::type_name::<T>(),
            parameters: T::parameters(),
            implements: T::implements(),
            construct: construct_value::<T>,
        }
    }

    /// 类型名（自动装配标识符）
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 类型的 `TypeId`
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// 完整的 Rust 类型路径
    pub fn rust_name(&self) -> &'static str {
        self.rust_name
    }

    /// 构造参数
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// 满足的能力名
    pub fn implements(&self) -> &[&'static str] {
        &self.implements
    }

    /// 该类型的实例是否满足键 `key`（类型名、Rust 路径或能力名）
    pub fn satisfies(&self, key: &str) -> bool {
        self.name == key || self.rust_name == key || self.implements.contains(&key)
    }

    /// 构造实例
    pub fn construct(&self, arguments: Arguments) -> ContainerResult<Value> {
        (self.construct)(arguments)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("rust_name", &self.rust_name)
            .field("parameters", &self.parameters)
            .field("implements", &self.implements)
            .finish_non_exhaustive()
    }
}

fn construct_value<T: Constructible>(arguments: Arguments) -> ContainerResult<Value> {
    T::construct(arguments).map(Value::new)
}

/// 类型注册表
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    by_name: IndexMap<&'static str, Arc<TypeDescriptor>>,
    by_type: HashMap<TypeId, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册类型 `T`
    pub fn register<T: Constructible>(&mut self) -> bool {
        self.insert(TypeDescriptor::of::<T>())
    }

    /// 插入描述，返回是否为新注册
    ///
    /// 同名但不同类型的描述会被忽略并记录警告，先注册者保留。
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> bool {
        if let Some(existing) = self.by_name.get(descriptor.name) {
            if existing.type_id != descriptor.type_id {
                warn!(
                    "类型名 {} 已被 {} 占用，忽略 {}",
                    descriptor.name, existing.rust_name, descriptor.rust_name
                );
            }
            return false;
        }

        let descriptor = Arc::new(descriptor);
        self.by_type.insert(descriptor.type_id, descriptor.clone());
        self.by_name.insert(descriptor.name, descriptor);
        true
    }

    /// 按类型名查找
    pub fn get(&self, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.by_name.get(name).cloned()
    }

    /// 按 `TypeId` 查找
    pub fn find_by_type_id(&self, type_id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.by_type.get(&type_id).cloned()
    }

    /// 是否注册了类型名
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// 按注册顺序返回类型名
    pub fn names(&self) -> Vec<&'static str> {
        self.by_name.keys().copied().collect()
    }

    /// 已注册类型数量
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// 全局类型注册表
static GLOBAL_TYPE_REGISTRY: Lazy<RwLock<TypeRegistry>> =
    Lazy::new(|| RwLock::new(TypeRegistry::new()));

/// 向全局注册表注册类型 `T`
pub fn register_global_type<T: Constructible>() -> bool {
    GLOBAL_TYPE_REGISTRY.write().register::<T>()
}

/// 在全局注册表中按类型名查找
pub fn global_type(name: &str) -> Option<Arc<TypeDescriptor>> {
    GLOBAL_TYPE_REGISTRY.read().get(name)
}

/// 在全局注册表中按 `TypeId` 查找
pub fn global_type_by_id(type_id: TypeId) -> Option<Arc<TypeDescriptor>> {
    GLOBAL_TYPE_REGISTRY.read().find_by_type_id(type_id)
}
