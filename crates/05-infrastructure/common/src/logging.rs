//! 日志初始化

use crate::configuration::LoggingConfig;
use crate::errors::{ConfigError, ConfigResult};
use tracing_subscriber::EnvFilter;

/// 按配置初始化全局 tracing 订阅者
///
/// 重复初始化会返回 [`ConfigError::LoggingInitFailed`]，调用方（例如测试）可以忽略该错误。
pub fn init_logging(config: &LoggingConfig) -> ConfigResult<()> {
    let filter = EnvFilter::try_new(&config.level).map_err(|e| ConfigError::LoggingInitFailed {
        message: format!("无效的日志级别 '{}': {}", config.level, e),
    })?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    let result = if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    result.map_err(|e| ConfigError::LoggingInitFailed {
        message: e.to_string(),
    })
}
