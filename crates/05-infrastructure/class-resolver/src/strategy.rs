//! 解析策略
//!
//! 按模式和类声明的解析契约，把每个已加载的类转换为立即结果或延迟结果。

use crate::class_info::ClassInfo;
use crate::loader::LoadedClass;
use di_abstractions::{ClassContainer, ResolutionContract};
use futures::future::{self, BoxFuture, FutureExt};
use infrastructure_common::{Instance, ResolveError, ResolveResult};
use tracing::trace;

/// 解析模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveMode {
    /// 只列出类信息，不创建实例
    List,
    /// 通过容器创建实例
    Resolve,
}

/// 单个文件的解析结果
pub enum Outcome {
    /// 已经得到的结果
    Immediate(ResolveResult<ClassInfo>),
    /// 容器异步解析中的结果
    Deferred(BoxFuture<'static, ResolveResult<ClassInfo>>),
}

impl Outcome {
    /// 是否为延迟结果
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// 立即结果的值
    pub fn into_immediate(self) -> Option<ResolveResult<ClassInfo>> {
        match self {
            Self::Immediate(result) => Some(result),
            Self::Deferred(_) => None,
        }
    }

    /// 统一转换为 future，立即结果成为已完成的 future
    pub fn into_future(self) -> BoxFuture<'static, ResolveResult<ClassInfo>> {
        match self {
            Self::Immediate(result) => future::ready(result).boxed(),
            Self::Deferred(future) => future,
        }
    }
}

/// 解析策略
pub struct ResolutionStrategy<'a> {
    mode: ResolveMode,
    container: &'a dyn ClassContainer,
}

impl<'a> ResolutionStrategy<'a> {
    /// 创建解析策略
    pub fn new(mode: ResolveMode, container: &'a dyn ClassContainer) -> Self {
        Self { mode, container }
    }

    /// 该类是否会产生延迟结果
    pub fn defers(&self, class: &LoadedClass) -> bool {
        self.mode == ResolveMode::Resolve
            && class.class_type.contract() == ResolutionContract::Async
    }

    /// 产生单个文件的解析结果
    pub fn outcome(&self, class: LoadedClass) -> Outcome {
        if self.mode == ResolveMode::List {
            return Outcome::Immediate(Ok(into_info(class, None)));
        }

        match class.class_type.contract() {
            ResolutionContract::Sync => {
                trace!("同步解析 {}", class.name);
                let result = self
                    .container
                    .resolve(&class.class_type)
                    .map(|instance| into_info(class, Some(instance)))
                    .map_err(ResolveError::from);
                Outcome::Immediate(result)
            }
            ResolutionContract::Async => {
                trace!("异步解析 {}", class.name);
                let pending = self.container.resolve_async(&class.class_type);
                Outcome::Deferred(
                    pending
                        .map(move |result| {
                            result
                                .map(|instance| into_info(class, Some(instance)))
                                .map_err(ResolveError::from)
                        })
                        .boxed(),
                )
            }
        }
    }
}

fn into_info(class: LoadedClass, instance: Option<Instance>) -> ClassInfo {
    ClassInfo {
        file: class.file,
        name: class.name,
        class_type: class.class_type,
        instance,
    }
}
