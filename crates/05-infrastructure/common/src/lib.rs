//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn DI 各层共享的错误类型、配置与日志初始化。
//!
//! ## 核心组件
//!
//! - [`ContainerError`] - 容器错误类型
//! - [`AutowireError`] - 自动装配错误类型
//! - [`DiSettings`] - 容器与日志配置
//! - [`init_logging`] - tracing 订阅者初始化

pub mod configuration;
pub mod errors;
pub mod logging;

pub use configuration::*;
pub use errors::*;
pub use logging::*;
