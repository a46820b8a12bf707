//! 标准服务定位器适配
//!
//! 把容器错误映射为消费方熟悉的两类错误：未找到与其他容器错误。
//! 原始消息保持不变，原始错误可通过 `source()` 取得。

use di_abstractions::{DiContainer, Value};
use infrastructure_common::ContainerError;
use thiserror::Error;

/// 定位器错误
#[derive(Error, Debug)]
pub enum LocatorError {
    /// 服务不存在
    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        source: ContainerError,
    },

    /// 其他容器错误
    #[error("{message}")]
    General {
        message: String,
        #[source]
        source: ContainerError,
    },
}

impl From<ContainerError> for LocatorError {
    fn from(error: ContainerError) -> Self {
        let message = error.to_string();
        if error.is_not_found() {
            Self::NotFound {
                message,
                source: error,
            }
        } else {
            Self::General {
                message,
                source: error,
            }
        }
    }
}

impl LocatorError {
    /// 是否为未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// 原始容器错误
    pub fn container_error(&self) -> &ContainerError {
        match self {
            Self::NotFound { source, .. } | Self::General { source, .. } => source,
        }
    }
}

/// 标准服务定位器接口
pub trait ServiceLocator {
    /// 获取服务
    fn get(&self, id: &str) -> Result<Value, LocatorError>;

    /// 服务是否存在
    fn has(&self, id: &str) -> bool;
}

/// 把任意容器适配为 [`ServiceLocator`]
#[derive(Debug)]
pub struct LocatorAdapter<C> {
    container: C,
}

impl<C: DiContainer> LocatorAdapter<C> {
    /// 包装容器
    pub fn new(container: C) -> Self {
        Self { container }
    }

    /// 被包装的容器
    pub fn inner(&self) -> &C {
        &self.container
    }

    /// 取回容器
    pub fn into_inner(self) -> C {
        self.container
    }
}

impl<C: DiContainer> ServiceLocator for LocatorAdapter<C> {
    fn get(&self, id: &str) -> Result<Value, LocatorError> {
        self.container.get(id).map_err(LocatorError::from)
    }

    fn has(&self, id: &str) -> bool {
        self.container.has(id)
    }
}
