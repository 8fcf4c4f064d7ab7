//! # Configuration Implementation
//!
//! 配置读取的具体实现。
//!
//! ## 主要组件
//!
//! - [`LayeredConfigProvider`] - 基于 `config` crate 的分层配置（文件 + 环境变量）
//! - [`MemoryConfigProvider`] - 内存配置，适用于测试和程序内注入

pub mod providers;

pub use providers::*;
