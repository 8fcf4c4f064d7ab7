//! # Infrastructure Common
//!
//! 类解析器各基础设施 crate 共享的错误类型、元数据和生命周期定义。
//!
//! ## 核心类型
//!
//! - [`ResolveError`] - 目录发现与类解析错误
//! - [`DependencyError`] - 依赖注入错误
//! - [`ConfigError`] - 配置读取错误
//! - [`TypeInfo`] - 类型描述
//! - [`Lifetime`] - 组件生命周期

pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
