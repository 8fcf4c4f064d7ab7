//! # 示例应用程序
//!
//! 演示如何通过配置的插件目录发现并解析类

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use class_resolver::{BindingArena, ClassBinder, ClassInfo, ClassSet, ResolverContext};
use config_impl::LayeredConfigProvider;
use di_abstractions::{AsyncResolvable, SyncResolvable};
use di_impl::{DiContainerImpl, TypeRegistryImpl};
use infrastructure_common::{DependencyResult, Lifetime};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn ADSP 类解析示例")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "config/app.toml")]
    config: PathBuf,

    /// 插件目录的基准路径
    #[arg(long, default_value = env!("CARGO_MANIFEST_DIR"))]
    base_dir: PathBuf,

    /// 插件文件过滤模式
    #[arg(long, default_value = "*.plugin")]
    filter: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("启动 Lorn ADSP 类解析示例");

    let context = build_context(&args)?;
    info!("容器初始状态: {:?}", context.container().stats());

    let mut arena = BindingArena::new();
    arena.bind(
        "handler_list",
        ClassBinder::list_from_files(&args.filter, "plugins.handlers")?,
        context.clone(),
    )?;
    arena.bind(
        "handlers",
        ClassBinder::resolve_from_files(&args.filter, "plugins.handlers")?,
        context.clone(),
    )?;
    arena.bind(
        "mailers",
        ClassBinder::resolve_from_files(&args.filter, "plugins.mailers")?
            .with_type_matcher(pascal_case_mailer),
        context.clone(),
    )?;
    info!("已创建 {} 个绑定，尚未求值", arena.len());

    for property in ["handler_list", "handlers", "mailers"] {
        let classes = match arena.get_by_name(property)? {
            ClassSet::Ready(classes) => {
                info!("{}: 同步完成", property);
                classes.clone()
            }
            pending @ ClassSet::Pending(_) => {
                info!("{}: 包含异步类，等待解析", property);
                pending.resolve().await?
            }
        };
        report(property, &classes);
    }

    if let Some(mailer) = arena
        .get_by_name("mailers")?
        .resolve()
        .await?
        .iter()
        .find_map(ClassInfo::instance_as::<SmtpMailer>)
    {
        mailer.send("campaign-42 已上线");
    }

    if let Some(pricing) = arena
        .get_by_name("handlers")?
        .as_ready()
        .and_then(|classes| classes.iter().find_map(ClassInfo::instance_as::<PricingHandler>))
    {
        info!("出价底价: {}", pricing.floor_price);
    }

    info!("容器最终状态: {:?}", context.container().stats());
    Ok(())
}

/// 构建解析上下文：分层配置、注册表和容器
fn build_context(args: &Args) -> anyhow::Result<ResolverContext> {
    let config_file = args.base_dir.join(&args.config);
    if !config_file.exists() {
        warn!("配置文件 {} 不存在，使用默认配置和环境变量", config_file.display());
    }

    let config = LayeredConfigProvider::builder()
        .set_default("plugins.handlers", "plugins/handlers")?
        .add_optional_file(&config_file)
        .add_env_vars("ADSP")
        .build()
        .context("加载配置失败")?;

    let registry = TypeRegistryImpl::new();
    registry.register_sync::<AuditHandler>("audit")?;
    registry.register_sync::<PricingHandler>("pricing")?;
    registry.register_async::<SmtpMailer>("SmtpMailer")?;

    let context = ResolverContext::builder()
        .with_config(Arc::new(config))
        .with_registry(Arc::new(registry))
        .with_container(Arc::new(DiContainerImpl::new()))
        .with_base_dir(&args.base_dir)
        .build()?;
    Ok(context)
}

fn pascal_case_mailer(base_name: &str) -> String {
    let mut chars = base_name.chars();
    match chars.next() {
        Some(first) => format!("{}{}Mailer", first.to_ascii_uppercase(), chars.as_str()),
        None => "Mailer".to_string(),
    }
}

fn report(property: &str, classes: &[ClassInfo]) {
    info!("{}: 共 {} 个类", property, classes.len());
    for class in classes {
        info!(
            "  {} <- {} ({}, 实例: {})",
            class.name,
            class.file.display(),
            class.class_type.contract(),
            if class.has_instance() { "有" } else { "无" }
        );
    }
}

// 示例插件

/// 审计处理器
#[derive(Debug)]
pub struct AuditHandler;

impl SyncResolvable for AuditHandler {
    fn create() -> DependencyResult<Self> {
        Ok(Self)
    }
}

/// 出价处理器，全局共享
#[derive(Debug)]
pub struct PricingHandler {
    floor_price: f64,
}

impl SyncResolvable for PricingHandler {
    fn create() -> DependencyResult<Self> {
        Ok(Self { floor_price: 0.5 })
    }

    fn lifetime() -> Lifetime {
        Lifetime::Singleton
    }
}

/// SMTP 通知器，创建时需要建立连接
#[derive(Debug)]
pub struct SmtpMailer {
    host: String,
}

impl SmtpMailer {
    fn send(&self, message: &str) {
        info!("通过 {} 发送通知: {}", self.host, message);
    }
}

#[async_trait]
impl AsyncResolvable for SmtpMailer {
    async fn create() -> DependencyResult<Self> {
        // 模拟连接建立
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(Self {
            host: "smtp.lorn-adsp.local".to_string(),
        })
    }
}
