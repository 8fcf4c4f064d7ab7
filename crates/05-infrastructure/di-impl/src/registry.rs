//! 类注册表实现

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use di_abstractions::{AsyncResolvable, ClassRegistry, ClassType, SyncResolvable};
use infrastructure_common::{DependencyError, DependencyResult};
use tracing::info;

/// 基于并发哈希表的类注册表
#[derive(Debug, Default)]
pub struct TypeRegistryImpl {
    classes: DashMap<String, ClassType>,
}

impl TypeRegistryImpl {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册同步可解析类型
    pub fn register_sync<T: SyncResolvable>(&self, name: &str) -> DependencyResult<()> {
        self.register(name, ClassType::of_sync::<T>())
    }

    /// 注册异步可解析类型
    pub fn register_async<T: AsyncResolvable>(&self, name: &str) -> DependencyResult<()> {
        self.register(name, ClassType::of_async::<T>())
    }

    /// 已注册类的数量
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ClassRegistry for TypeRegistryImpl {
    fn register(&self, name: &str, class_type: ClassType) -> DependencyResult<()> {
        if name.is_empty() {
            return Err(DependencyError::RegistrationError {
                type_name: class_type.type_info().type_path.clone(),
                message: "注册名称不能为空".to_string(),
            });
        }

        match self.classes.entry(name.to_string()) {
            Entry::Occupied(existing) => Err(DependencyError::RegistrationError {
                type_name: class_type.type_info().type_path.clone(),
                message: format!("名称 {} 已被 {} 占用", name, existing.get().name()),
            }),
            Entry::Vacant(slot) => {
                info!("注册类: {} -> {} ({})", name, class_type.name(), class_type.contract());
                slot.insert(class_type);
                Ok(())
            }
        }
    }

    fn lookup(&self, name: &str) -> Option<ClassType> {
        self.classes.get(name).map(|entry| entry.value().clone())
    }

    fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.classes.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }
}
