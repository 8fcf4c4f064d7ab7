//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义类注册和实例解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ClassRegistry`] - 类注册表接口（名称 → 类描述）
//! - [`ClassContainer`] - 容器接口，按类的解析契约同步或异步创建实例
//! - [`SyncResolvable`] / [`AsyncResolvable`] - 类声明的两种解析能力

pub mod container;
pub mod factory;
pub mod registry;

pub use container::*;
pub use factory::*;
pub use registry::*;
