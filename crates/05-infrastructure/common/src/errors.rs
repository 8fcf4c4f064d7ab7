//! 错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置类型转换失败: {key}, 原因: {message}")]
    TypeConversionError { key: String, message: String },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("组件解析契约不匹配: {type_name}, 期望 {expected}, 实际 {actual}")]
    ContractMismatch {
        type_name: String,
        expected: String,
        actual: String,
    },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },
}

impl DependencyError {
    /// 创建组件创建失败错误
    pub fn creation_failed(
        type_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// 类解析错误类型
///
/// 目录发现、类型加载和批量解析过程中的所有失败都归入此类型。
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("参数无效: {argument}, 原因: {message}")]
    InvalidArgument { argument: String, message: String },

    #[error("反射失败: 文件 {} 未导出符号 {symbol}", file.display())]
    MissingSymbol { symbol: String, file: PathBuf },

    #[error("文件扫描失败: {pattern}, 原因: {message}")]
    Scan { pattern: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dependency(#[from] DependencyError),
}

impl ResolveError {
    /// 创建参数无效错误
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// 创建符号缺失错误
    pub fn missing_symbol(symbol: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self::MissingSymbol {
            symbol: symbol.into(),
            file: file.into(),
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ResolveResult<T> = Result<T, ResolveError>;
