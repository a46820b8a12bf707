//! 错误类型定义

use thiserror::Error;

/// 容器错误类型
///
/// 依赖注入引擎所有公开操作都返回此错误。消息文本是对外契约的一部分，
/// 调用方可以直接展示或断言。
#[derive(Error, Debug)]
pub enum ContainerError {
    /// 标识符或标签没有任何定义
    #[error("The resource '{id}' was not found.")]
    NotFound { id: String },

    /// 标识符在当前解析栈中再次出现
    #[error("Circular dependency detected: {path}")]
    CircularDependency { path: String },

    /// 标识符已经存在定义（容器只允许追加）
    #[error("The resource '{id}' already defined")]
    AlreadyDefined { id: String },

    /// 调用方传入的标识符、标签或标签列表不合法
    #[error("{callee}() expects parameter {position} to be {expected}")]
    InvalidArgument {
        callee: &'static str,
        position: usize,
        expected: String,
    },

    /// 自动装配失败
    #[error(transparent)]
    Autowire(#[from] AutowireError),

    /// 设计上禁止的操作
    #[error("{message}")]
    General { message: String },

    /// 解析结果无法转换为期望的类型
    #[error("The resource '{id}' holds a value of type {actual}, expected {expected}")]
    TypeMismatch {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// 用户工厂或扩展器返回的外部错误
    #[error("Factory for '{id}' failed: {source}")]
    Factory {
        id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 解析栈深度超过配置上限
    #[error("Resolution depth limit of {limit} exceeded while resolving '{id}'")]
    DepthExceeded { id: String, limit: usize },
}

impl ContainerError {
    /// 创建未找到错误
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// 根据当前解析栈创建循环依赖错误
    pub fn circular_dependency<S: AsRef<str>>(stack: &[S], id: &str) -> Self {
        let path = stack
            .iter()
            .map(AsRef::as_ref)
            .chain(std::iter::once(id))
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::CircularDependency { path }
    }

    /// 创建重复定义错误
    pub fn already_defined(id: impl Into<String>) -> Self {
        Self::AlreadyDefined { id: id.into() }
    }

    /// 创建参数非法错误
    pub fn invalid_argument(
        callee: &'static str,
        position: usize,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            callee,
            position,
            expected: expected.into(),
        }
    }

    /// 创建通用容器错误
    pub fn general(message: impl Into<String>) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// 通过索引语法删除条目
    pub fn unset_not_allowed() -> Self {
        Self::general("Unset not allowed")
    }

    /// 别名与目标标识符相同
    pub fn symlink_equals_id() -> Self {
        Self::general("The symlink can not be identical to id")
    }

    /// 包装用户工厂的错误
    pub fn factory<E>(id: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Factory {
            id: id.into(),
            source: source.into(),
        }
    }

    /// 是否为未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// 是否为循环依赖错误
    pub fn is_circular_dependency(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }
}

/// 自动装配错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AutowireError {
    /// 构造参数没有可确定的具名类型
    #[error("The type of parameter \"{parameter}\" of {owner}::new() can't be determined.")]
    UnknownParameterType {
        owner: String,
        parameter: String,
    },

    /// 构造参数的类型既不是已知类型也不是已定义的标识符
    #[error("The type of parameter \"{parameter}\" of {owner}::new() is not resolvable.")]
    UnresolvableParameterType {
        owner: String,
        parameter: String,
        type_name: String,
    },

    /// 构造时实参数量不足
    #[error("{owner}::new() expects argument #{index}, but only {supplied} were supplied")]
    MissingArgument {
        owner: String,
        index: usize,
        supplied: usize,
    },
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置加载失败: {source}")]
    LoadError {
        #[from]
        source: config::ConfigError,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },

    #[error("日志初始化失败: {message}")]
    LoggingInitFailed { message: String },
}

/// 结果类型别名
pub type ContainerResult<T> = Result<T, ContainerError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
