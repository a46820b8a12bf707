//! # 依赖注入具体实现
//!
//! 提供基础容器 [`DiContainerImpl`] 与自动装配容器 [`AutowireContainerImpl`]，
//! 两者共用同一个解析引擎：
//!
//! - 定义只允许追加，标识符非空且唯一
//! - 解析是惰性的，单例工厂只执行一次
//! - 解析栈做循环检测，自动装配规划与值解析共用
//! - 扩展器按标识符或值的类型匹配，按注册顺序串联
//!
//! ```
//! use di_abstractions::{ContainerExt, DiContainer};
//! use di_impl::DiContainerImpl;
//!
//! let container = DiContainerImpl::new();
//! container.add("name", String::from("lorn")).unwrap();
//! container
//!     .add_shared("greeting", |c: &dyn DiContainer| {
//!         Ok(format!("hello {}", c.get_as::<String>("name")?))
//!     })
//!     .unwrap();
//!
//! assert_eq!(*container.get_as::<String>("greeting").unwrap(), "hello lorn");
//! ```

mod engine;
mod extenders;
mod stack;
mod store;

pub mod autowire;
pub mod builder;
pub mod container;
pub mod index;
pub mod standard;

pub use autowire::AutowireContainerImpl;
pub use builder::DiContainerBuilder;
pub use container::DiContainerImpl;
pub use index::Entries;
pub use standard::{LocatorAdapter, LocatorError, ServiceLocator};
