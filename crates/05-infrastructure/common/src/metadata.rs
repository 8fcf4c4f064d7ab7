//! 元数据定义
//!
//! 提供类型描述和类型擦除实例的公共表示

use std::any::{Any, TypeId};
use std::sync::Arc;

/// 类型擦除的组件实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称（不含模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub type_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: 'static>() -> Self {
        let type_path = std::any::type_name::<T>();
        Self {
            name: short_type_name(type_path).to_string(),
            id: TypeId::of::<T>(),
            type_path: type_path.to_string(),
        }
    }

    /// 检查是否描述类型 `T`
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

/// 去掉模块路径和泛型参数，得到简短类型名
fn short_type_name(type_path: &str) -> &str {
    let without_generics = type_path.split('<').next().unwrap_or(type_path);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReportService;

    #[test]
    fn test_type_info_short_name() {
        let info = TypeInfo::of::<ReportService>();
        assert_eq!(info.name, "ReportService");
        assert!(info.type_path.ends_with("::ReportService"));
        assert!(info.is::<ReportService>());
        assert!(!info.is::<String>());
    }

    #[test]
    fn test_generic_type_name_is_trimmed() {
        let info = TypeInfo::of::<Vec<ReportService>>();
        assert_eq!(info.name, "Vec");
    }
}
