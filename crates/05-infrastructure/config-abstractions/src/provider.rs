//! 配置提供者抽象接口

use infrastructure_common::{ConfigError, ConfigResult};
use serde_json::Value;

/// 配置提供者 trait
///
/// 定义从不同数据源同步读取配置的统一接口。键使用 `.` 分隔的嵌套路径。
pub trait ConfigProvider: Send + Sync {
    /// 获取配置值，键不存在时返回 `Ok(None)`
    fn get_value(&self, key: &str) -> ConfigResult<Option<Value>>;

    /// 获取提供者名称
    fn name(&self) -> &str;

    /// 检查配置键是否存在
    fn contains_key(&self, key: &str) -> ConfigResult<bool> {
        Ok(self.get_value(key)?.is_some())
    }

    /// 获取字符串列表配置
    ///
    /// 单个字符串视为单元素列表；键不存在、`null`、空字符串和空数组都得到空列表。
    /// 数组中的空字符串会被忽略。
    fn get_string_list(&self, key: &str) -> ConfigResult<Vec<String>> {
        match self.get_value(key)? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(single)) if single.is_empty() => Ok(Vec::new()),
            Some(Value::String(single)) => Ok(vec![single]),
            Some(Value::Array(items)) => items
                .into_iter()
                .filter(|item| !matches!(item, Value::String(s) if s.is_empty()))
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(ConfigError::TypeConversionError {
                        key: key.to_string(),
                        message: format!("列表元素必须是字符串, 实际为 {}", other),
                    }),
                })
                .collect(),
            Some(other) => Err(ConfigError::TypeConversionError {
                key: key.to_string(),
                message: format!("期望字符串或字符串列表, 实际为 {}", other),
            }),
        }
    }
}
