//! # Configuration Abstractions
//!
//! 配置读取抽象层，定义类解析器消费配置的统一接口。
//!
//! ## 核心接口
//!
//! - [`ConfigProvider`] - 配置提供者接口

pub mod provider;

pub use provider::*;
