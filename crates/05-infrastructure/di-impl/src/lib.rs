//! # 依赖注入具体实现
//!
//! 提供具体的类容器和类注册表实现

mod registry;

pub use registry::TypeRegistryImpl;

use di_abstractions::{ClassContainer, ClassType, Constructor, ContainerStats, ResolutionContract};
use dashmap::DashMap;
use futures::future::{self, BoxFuture, FutureExt};
use infrastructure_common::{DependencyError, DependencyResult, Instance};
use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 容器共享状态，异步解析的 future 持有其引用
#[derive(Default)]
struct ContainerState {
    /// 单例实例（包括预注册实例）
    singletons: DashMap<TypeId, Instance>,
    resolved: AtomicUsize,
    errors: AtomicUsize,
}

impl ContainerState {
    /// 记录解析结果，单例按先写入者为准
    fn settle(
        &self,
        class_type: &ClassType,
        result: DependencyResult<Instance>,
    ) -> DependencyResult<Instance> {
        match result {
            Ok(instance) => {
                self.resolved.fetch_add(1, Ordering::Relaxed);
                if class_type.lifetime().is_singleton() {
                    let stored = self
                        .singletons
                        .entry(class_type.type_info().id)
                        .or_insert(instance)
                        .value()
                        .clone();
                    Ok(stored)
                } else {
                    Ok(instance)
                }
            }
            Err(e) => {
                self.errors.fetch_add(1, Ordering::Relaxed);
                warn!("组件解析失败: {}", e);
                Err(e)
            }
        }
    }

    fn cached(&self, class_type: &ClassType) -> Option<Instance> {
        self.singletons
            .get(&class_type.type_info().id)
            .map(|entry| entry.value().clone())
    }

    fn mismatch(&self, class_type: &ClassType, expected: ResolutionContract) -> DependencyError {
        self.errors.fetch_add(1, Ordering::Relaxed);
        DependencyError::ContractMismatch {
            type_name: class_type.type_info().type_path.clone(),
            expected: expected.to_string(),
            actual: class_type.contract().to_string(),
        }
    }
}

/// 具体的类容器实现
#[derive(Clone, Default)]
pub struct DiContainerImpl {
    state: Arc<ContainerState>,
}

impl DiContainerImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册预先构建的实例，之后对该类型的解析都返回此实例
    pub fn register_instance<T>(&self, instance: T)
    where
        T: Send + Sync + 'static,
    {
        info!("注册单例实例: {}", std::any::type_name::<T>());
        self.state
            .singletons
            .insert(TypeId::of::<T>(), Arc::new(instance) as Instance);
    }

    /// 检查类型是否已有单例实例
    pub fn has_instance<T: 'static>(&self) -> bool {
        self.state.singletons.contains_key(&TypeId::of::<T>())
    }
}

impl ClassContainer for DiContainerImpl {
    fn resolve(&self, class_type: &ClassType) -> DependencyResult<Instance> {
        if let Some(instance) = self.state.cached(class_type) {
            debug!("使用已缓存实例: {}", class_type.name());
            return Ok(instance);
        }

        let Constructor::Sync(factory) = class_type.constructor() else {
            return Err(self.state.mismatch(class_type, ResolutionContract::Sync));
        };

        debug!("同步解析组件: {}", class_type.name());
        self.state.settle(class_type, factory())
    }

    fn resolve_async(
        &self,
        class_type: &ClassType,
    ) -> BoxFuture<'static, DependencyResult<Instance>> {
        if let Some(instance) = self.state.cached(class_type) {
            debug!("使用已缓存实例: {}", class_type.name());
            return future::ready(Ok(instance)).boxed();
        }

        let Constructor::Async(factory) = class_type.constructor() else {
            let error = self.state.mismatch(class_type, ResolutionContract::Async);
            return future::ready(Err(error)).boxed();
        };

        debug!("异步解析组件: {}", class_type.name());
        let state = Arc::clone(&self.state);
        let class_type = class_type.clone();
        factory()
            .map(move |result| state.settle(&class_type, result))
            .boxed()
    }

    fn stats(&self) -> ContainerStats {
        ContainerStats {
            resolved_components: self.state.resolved.load(Ordering::Relaxed),
            active_singletons: self.state.singletons.len(),
            resolution_errors: self.state.errors.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::Lifetime;

    #[derive(Debug)]
    struct Counter(u32);

    #[test]
    fn test_transient_creates_new_instances() {
        let container = DiContainerImpl::new();
        let class_type = ClassType::new(
            infrastructure_common::TypeInfo::of::<Counter>(),
            Lifetime::Transient,
            Constructor::sync_fn(|| Ok(Counter(1))),
        );

        let first = container.resolve(&class_type).unwrap();
        let second = container.resolve(&class_type).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(container.stats().resolved_components, 2);
        assert_eq!(container.stats().active_singletons, 0);
    }

    #[test]
    fn test_sync_resolve_rejects_async_contract() {
        let container = DiContainerImpl::new();
        let class_type = ClassType::new(
            infrastructure_common::TypeInfo::of::<Counter>(),
            Lifetime::Transient,
            Constructor::async_fn(|| async { Ok(Counter(1)) }),
        );

        let result = container.resolve(&class_type);
        assert!(matches!(result, Err(DependencyError::ContractMismatch { .. })));
        assert_eq!(container.stats().resolution_errors, 1);
    }
}
