//! 依赖注入容器抽象接口

use crate::registry::ClassType;
use futures::future::BoxFuture;
use infrastructure_common::{DependencyResult, Instance};

/// 类容器 trait
///
/// `resolve` 只接受同步契约的类，`resolve_async` 只接受异步契约的类；
/// 调用方按 [`ClassType::contract`] 分派。
pub trait ClassContainer: Send + Sync {
    /// 同步解析实例
    fn resolve(&self, class_type: &ClassType) -> DependencyResult<Instance>;

    /// 异步解析实例
    fn resolve_async(
        &self,
        class_type: &ClassType,
    ) -> BoxFuture<'static, DependencyResult<Instance>>;

    /// 获取容器统计信息
    fn stats(&self) -> ContainerStats;
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStats {
    /// 成功解析次数
    pub resolved_components: usize,
    /// 活跃单例数量
    pub active_singletons: usize,
    /// 解析错误数量
    pub resolution_errors: usize,
}
