//! 配置提供者实现

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use config_abstractions::ConfigProvider;
use infrastructure_common::{ConfigError, ConfigResult};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// 分层配置提供者
///
/// 后添加的配置源覆盖先添加的配置源，环境变量通常放在最后。
#[derive(Debug)]
pub struct LayeredConfigProvider {
    settings: config::Config,
}

impl LayeredConfigProvider {
    /// 创建构建器
    pub fn builder() -> LayeredConfigProviderBuilder {
        LayeredConfigProviderBuilder::new()
    }
}

impl ConfigProvider for LayeredConfigProvider {
    fn get_value(&self, key: &str) -> ConfigResult<Option<Value>> {
        match self.settings.get::<Value>(key) {
            Ok(value) => Ok(Some(value)),
            Err(config::ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(ConfigError::ParseError {
                source: Box::new(e),
            }),
        }
    }

    fn name(&self) -> &str {
        "LayeredConfigProvider"
    }
}

/// 分层配置提供者构建器
pub struct LayeredConfigProviderBuilder {
    builder: ConfigBuilder<DefaultState>,
}

impl LayeredConfigProviderBuilder {
    fn new() -> Self {
        Self {
            builder: config::Config::builder(),
        }
    }

    /// 添加必需的配置文件，格式由扩展名决定（toml/json/yaml）
    pub fn add_file<P: AsRef<Path>>(mut self, path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!("添加配置文件: {}", path.display());
        self.builder = self.builder.add_source(File::from(path).required(true));
        Ok(self)
    }

    /// 添加可选配置文件，文件不存在时忽略
    pub fn add_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        debug!("添加可选配置文件: {}", path.display());
        self.builder = self.builder.add_source(File::from(path).required(false));
        self
    }

    /// 添加环境变量配置源
    ///
    /// `PREFIX__PLUGINS__DIRS=a,b` 对应键 `plugins.dirs`，逗号分隔的值解析为列表。
    pub fn add_env_vars(mut self, prefix: &str) -> Self {
        debug!("添加环境变量配置源，前缀: {}", prefix);
        self.builder = self.builder.add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .try_parsing(true),
        );
        self
    }

    /// 设置默认值
    pub fn set_default(mut self, key: &str, value: &str) -> ConfigResult<Self> {
        self.builder = self
            .builder
            .set_default(key, value)
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;
        Ok(self)
    }

    /// 构建提供者
    pub fn build(self) -> ConfigResult<LayeredConfigProvider> {
        let settings = self.builder.build().map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;
        Ok(LayeredConfigProvider { settings })
    }
}

/// 内存配置提供者
#[derive(Debug)]
pub struct MemoryConfigProvider {
    root: RwLock<Value>,
}

impl Default for MemoryConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryConfigProvider {
    /// 创建空的内存配置
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Value::Object(Map::new())),
        }
    }

    /// 从 JSON 值创建
    pub fn from_json(root: Value) -> Self {
        Self {
            root: RwLock::new(root),
        }
    }

    /// 设置配置值，按 `.` 创建中间节点
    pub fn set(&self, key: &str, value: Value) -> ConfigResult<()> {
        let mut root = self.root.write();
        let mut current = &mut *root;
        let mut parts = key.split('.').peekable();

        while let Some(part) = parts.next() {
            let table = match current {
                Value::Object(table) => table,
                _ => {
                    return Err(ConfigError::TypeConversionError {
                        key: key.to_string(),
                        message: format!("路径段 {} 的父节点不是对象", part),
                    })
                }
            };

            if parts.peek().is_none() {
                table.insert(part.to_string(), value);
                return Ok(());
            }

            current = table
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        Ok(())
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_value(&self, key: &str) -> ConfigResult<Option<Value>> {
        let root = self.root.read();
        let mut current = &*root;
        for part in key.split('.') {
            match current.get(part) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current.clone()))
    }

    fn name(&self) -> &str {
        "MemoryConfigProvider"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_memory_provider_nested_lookup() {
        let provider = MemoryConfigProvider::from_json(json!({
            "plugins": { "dirs": ["a", "b"] }
        }));

        assert_eq!(
            provider.get_value("plugins.dirs").unwrap(),
            Some(json!(["a", "b"]))
        );
        assert_eq!(provider.get_value("plugins.missing").unwrap(), None);
        assert!(provider.contains_key("plugins").unwrap());
    }

    #[test]
    fn test_memory_provider_set_creates_sections() {
        let provider = MemoryConfigProvider::new();
        provider.set("resolver.handlers.dirs", json!("handlers")).unwrap();

        assert_eq!(
            provider.get_string_list("resolver.handlers.dirs").unwrap(),
            vec!["handlers"]
        );

        provider.set("resolver.leaf", json!(1)).unwrap();
        assert!(provider.set("resolver.leaf.child", json!(2)).is_err());
    }

    #[test]
    fn test_memory_provider_default_accepts_writes() {
        let provider = MemoryConfigProvider::default();
        provider.set("plugins.dirs", json!("handlers")).unwrap();

        assert_eq!(provider.get_string_list("plugins.dirs").unwrap(), vec!["handlers"]);
    }

    #[test]
    fn test_layered_provider_reads_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[plugins]\ndirs = [\"first\", \"second\"]\nsingle = \"only\"").unwrap();

        let provider = LayeredConfigProvider::builder()
            .add_file(file.path())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            provider.get_string_list("plugins.dirs").unwrap(),
            vec!["first", "second"]
        );
        assert_eq!(provider.get_string_list("plugins.single").unwrap(), vec!["only"]);
        assert_eq!(provider.get_value("plugins.absent").unwrap(), None);
    }

    #[test]
    fn test_layered_provider_missing_required_file() {
        let result = LayeredConfigProvider::builder().add_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_layered_provider_defaults() {
        let provider = LayeredConfigProvider::builder()
            .add_optional_file("/definitely/not/here.toml")
            .set_default("plugins.dirs", "fallback")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(provider.get_string_list("plugins.dirs").unwrap(), vec!["fallback"]);
    }

    #[test]
    fn test_env_vars_override_file_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[plugins]\ndirs = [\"from-file\"]\nkept = \"file-only\"").unwrap();

        std::env::set_var("LAYERTEST__PLUGINS__DIRS", "a,b");
        std::env::set_var("LAYERTEST__PLUGINS__SINGLE", "handlers");

        let provider = LayeredConfigProvider::builder()
            .add_file(file.path())
            .unwrap()
            .add_env_vars("LAYERTEST")
            .build()
            .unwrap();

        std::env::remove_var("LAYERTEST__PLUGINS__DIRS");
        std::env::remove_var("LAYERTEST__PLUGINS__SINGLE");

        assert_eq!(provider.get_string_list("plugins.dirs").unwrap(), vec!["a", "b"]);
        assert_eq!(provider.get_string_list("plugins.single").unwrap(), vec!["handlers"]);
        assert_eq!(provider.get_string_list("plugins.kept").unwrap(), vec!["file-only"]);
    }
}
