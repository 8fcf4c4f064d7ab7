//! # Class Resolver
//!
//! 目录驱动、惰性求值的类解析器。
//!
//! 给定 glob 过滤模式和指向一个或多个目录的配置键，解析器发现匹配的源文件，
//! 加载每个文件导出的类，然后返回类信息（列表模式）或交给依赖注入容器创建实例
//! （解析模式）。结果通过惰性绑定暴露：批量中没有异步成员时是普通的有序集合，
//! 否则是解析该集合的共享 future。
//!
//! ## 核心组件
//!
//! - [`DirectoryResolver`] - 配置目录解析
//! - [`FileScanner`] - 按 glob 扫描文件
//! - [`TypeLoader`] - 符号名推导与类加载
//! - [`ResolutionStrategy`] - 按解析契约产生立即或延迟结果
//! - [`ResultAggregator`] - 有序、失败即停的结果聚合
//! - [`ClassBinder`] / [`LazyBinding`] / [`BindingArena`] - 惰性绑定
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use class_resolver::{ClassBinder, ClassSet, ResolverContext};
//! use config_impl::LayeredConfigProvider;
//! use di_impl::{DiContainerImpl, TypeRegistryImpl};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LayeredConfigProvider::builder()
//!     .add_file("config/app.toml")?
//!     .build()?;
//! let context = ResolverContext::builder()
//!     .with_config(Arc::new(config))
//!     .with_registry(Arc::new(TypeRegistryImpl::new()))
//!     .with_container(Arc::new(DiContainerImpl::new()))
//!     .build()?;
//!
//! let handlers = ClassBinder::resolve_from_files("**/*.rs", "plugins.handlers")?.bind(context);
//! match handlers.get()? {
//!     ClassSet::Ready(classes) => println!("同步得到 {} 个类", classes.len()),
//!     pending => println!("异步得到 {} 个类", pending.resolve().await?.len()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod binding;
pub mod class_info;
pub mod context;
pub mod directory;
pub mod loader;
mod pipeline;
pub mod scanner;
pub mod strategy;

pub use aggregator::ResultAggregator;
pub use binding::{BindingArena, BindingId, ClassBinder, LazyBinding};
pub use class_info::{ClassInfo, ClassList, ClassSet, SharedClassFuture, SharedError};
pub use context::{ResolverContext, ResolverContextBuilder};
pub use directory::{normalize_path, DirectoryResolver};
pub use loader::{LoadedClass, ModuleLoader, RegistryModuleLoader, TypeLoader, TypeMatcher};
pub use scanner::{FileScanner, FileSystem, OsFileSystem};
pub use strategy::{Outcome, ResolutionStrategy, ResolveMode};
