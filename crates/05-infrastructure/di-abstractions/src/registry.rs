//! 类注册表抽象接口

use crate::factory::{AsyncResolvable, Constructor, ResolutionContract, SyncResolvable};
use infrastructure_common::{DependencyResult, Lifetime, TypeInfo};
use std::fmt;

/// 类描述
///
/// 尚未实例化的类：类型信息、生命周期和构造器。
#[derive(Clone)]
pub struct ClassType {
    type_info: TypeInfo,
    lifetime: Lifetime,
    constructor: Constructor,
}

impl ClassType {
    /// 创建新的类描述
    pub fn new(type_info: TypeInfo, lifetime: Lifetime, constructor: Constructor) -> Self {
        Self {
            type_info,
            lifetime,
            constructor,
        }
    }

    /// 描述同步可解析类型
    pub fn of_sync<T: SyncResolvable>() -> Self {
        Self::new(TypeInfo::of::<T>(), T::lifetime(), Constructor::of_sync::<T>())
    }

    /// 描述异步可解析类型
    pub fn of_async<T: AsyncResolvable>() -> Self {
        Self::new(TypeInfo::of::<T>(), T::lifetime(), Constructor::of_async::<T>())
    }

    /// 覆盖生命周期
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// 类型名称
    pub fn name(&self) -> &str {
        &self.type_info.name
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// 构造器
    pub fn constructor(&self) -> &Constructor {
        &self.constructor
    }

    /// 解析契约
    pub fn contract(&self) -> ResolutionContract {
        self.constructor.contract()
    }

    /// 是否为异步解析
    pub fn is_async(&self) -> bool {
        self.contract() == ResolutionContract::Async
    }
}

impl fmt::Debug for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassType")
            .field("type_path", &self.type_info.type_path)
            .field("lifetime", &self.lifetime)
            .field("contract", &self.contract())
            .finish()
    }
}

/// 类注册表 trait
///
/// 插件在发现开始之前把逻辑名称映射到类描述。
pub trait ClassRegistry: Send + Sync {
    /// 注册类，名称重复时返回错误
    fn register(&self, name: &str, class_type: ClassType) -> DependencyResult<()>;

    /// 按名称查找类
    fn lookup(&self, name: &str) -> Option<ClassType>;

    /// 检查名称是否已注册
    fn is_registered(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// 获取所有已注册名称
    fn registered_names(&self) -> Vec<String>;
}
