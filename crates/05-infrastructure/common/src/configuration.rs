//! 容器与日志配置
//!
//! 配置来源按优先级从低到高叠加：内置默认值、可选的配置文件
//! （TOML/JSON/YAML，按扩展名识别）、`LORN_DI__` 前缀的环境变量。

use crate::errors::{ConfigError, ConfigResult};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 环境变量前缀，例如 `LORN_DI__CONTAINER__AUTOWIRE=true`
pub const ENV_PREFIX: &str = "LORN_DI";

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 是否为未定义的可构造类型自动生成工厂
    pub autowire: bool,
    /// 最大解析深度，0 表示不限制
    pub max_resolution_depth: usize,
    /// 是否为每次解析输出 trace 日志
    pub trace_resolutions: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            autowire: false,
            max_resolution_depth: 100,
            trace_resolutions: false,
        }
    }
}

impl ContainerConfig {
    /// 启用自动装配的默认配置
    pub fn autowired() -> Self {
        Self {
            autowire: true,
            ..Self::default()
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志过滤指令，语法同 `RUST_LOG`
    pub level: String,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiSettings {
    /// 容器配置
    pub container: ContainerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl DiSettings {
    /// 加载配置
    ///
    /// `path` 为 `None` 时只读取环境变量；给定的文件必须存在。
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载配置文件: {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        let settings: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// 验证配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "logging.level 不能为空".to_string(),
            });
        }
        Ok(())
    }
}
