//! # 示例应用程序
//!
//! 演示如何使用 Lorn DI：加载配置、初始化日志、通过提供者注册定义、
//! 自动装配派生类型、扩展器与标签查询。

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use component_macros::Autowire;
use di_abstractions::{ContainerExt, DiContainer, Provider};
use di_impl::{DiContainerBuilder, LocatorAdapter, ServiceLocator};
use infrastructure_common::{init_logging, ContainerResult, DiSettings};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn DI 示例应用")]
struct Args {
    /// 配置文件路径（TOML/JSON/YAML）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 强制启用自动装配
    #[arg(long)]
    autowire: bool,

    /// 覆盖日志级别
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 运行完整演示（默认）
    Demo,
    /// 列出全部定义
    Keys,
    /// 解析单个标识符并打印其类型
    Resolve {
        /// 标识符
        id: String,
    },
}

// 示例组件

/// 单调递增的时钟
#[derive(Debug, Default, Autowire)]
pub struct Clock {
    #[autowire(default)]
    ticks: AtomicU64,
}

impl Clock {
    fn tick(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// 邮件通知
#[derive(Debug, Autowire)]
#[autowire(implements("Notifier"))]
pub struct EmailNotifier {
    clock: Arc<Clock>,
}

impl EmailNotifier {
    fn notify(&self, message: &str) {
        info!("[邮件 #{}] {}", self.clock.tick(), message);
    }
}

/// 订单服务
#[derive(Debug, Autowire)]
pub struct OrderService {
    notifier: Arc<EmailNotifier>,
    #[autowire(default)]
    retries: u32,
}

impl OrderService {
    fn place(&self, item: &str) {
        self.notifier
            .notify(&format!("订单已创建: {item} (重试上限 {})", self.retries));
    }
}

/// 应用级定义
struct AppProvider;

impl Provider for AppProvider {
    fn register(&self, container: &dyn DiContainer) -> ContainerResult<()> {
        container.add("app.name", String::from("example-app"))?;
        container.add_shared("Clock", |_: &dyn DiContainer| Ok(Clock::default()))?;
        container.add_tagged("plugin.audit", String::from("audit"), &["plugin"])?;
        container.add_tagged("plugin.metrics", String::from("metrics"), &["plugin"])?;
        container.add_factory("banner", |c: &dyn DiContainer| {
            let name = c.get_as::<String>("app.name")?;
            Ok(format!("*** {name} ***"))
        })?;
        container.symlink("banner", "motd")?;
        container.extend_as::<EmailNotifier, _>("Notifier", |notifier, _| {
            info!("通知组件已就绪");
            Ok(notifier)
        })
    }

    fn name(&self) -> &str {
        "AppProvider"
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings =
        DiSettings::load(args.config.as_deref()).context("加载配置失败")?;
    if let Some(level) = &args.log_level {
        settings.logging.level = level.clone();
    }
    if args.autowire {
        settings.container.autowire = true;
    }
    init_logging(&settings.logging).context("初始化日志失败")?;

    info!("启动 Lorn DI 示例应用");

    let container = DiContainerBuilder::new()
        .with_config(settings.container.clone())
        .add_provider(AppProvider)
        .build()
        .context("构建容器失败")?;

    match args.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(&*container, settings.container.autowire)?,
        Command::Keys => {
            for definition in container.definitions() {
                println!(
                    "{:<16} {:?}/{:?} tags={:?} aliases={:?}",
                    definition.id,
                    definition.kind,
                    definition.lifetime,
                    definition.tags,
                    definition.aliases
                );
            }
        }
        Command::Resolve { id } => {
            let locator = LocatorAdapter::new(container);
            let value = locator.get(&id)?;
            println!("{id}: {}", value.type_name());
        }
    }

    info!("应用已退出");
    Ok(())
}

/// 演示解析、标签与自动装配
fn run_demo(container: &dyn DiContainer, autowire: bool) -> Result<()> {
    let banner = container.get_as::<String>("motd")?;
    println!("{banner}");

    let plugins = container.get_by_tag_as::<String>("plugin")?;
    info!("已加载插件: {:?}", plugins);

    if autowire {
        let orders = container.resolve::<OrderService>()?;
        orders.place("键盘");
        orders.place("显示器");
    } else {
        warn!("未启用自动装配，跳过 OrderService（使用 --autowire 启用）");
        match container.resolve::<OrderService>() {
            Ok(_) => warn!("意外解析成功"),
            Err(error) => info!("预期的错误: {}", error),
        }
    }

    Ok(())
}
