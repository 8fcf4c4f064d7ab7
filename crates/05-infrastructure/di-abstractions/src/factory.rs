//! 组件工厂抽象接口
//!
//! 类通过实现 [`SyncResolvable`] 或 [`AsyncResolvable`] 声明自己的解析契约，
//! 注册时被包装成 [`Constructor`] 这一带标签的联合类型。

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use infrastructure_common::{DependencyResult, Instance, Lifetime};
use std::fmt;
use std::sync::Arc;

/// 同步解析能力
pub trait SyncResolvable: Send + Sync + Sized + 'static {
    /// 创建实例
    fn create() -> DependencyResult<Self>;

    /// 默认生命周期
    fn lifetime() -> Lifetime {
        Lifetime::Transient
    }
}

/// 异步解析能力
#[async_trait]
pub trait AsyncResolvable: Send + Sync + Sized + 'static {
    /// 异步创建实例
    async fn create() -> DependencyResult<Self>;

    /// 默认生命周期
    fn lifetime() -> Lifetime {
        Lifetime::Transient
    }
}

/// 同步工厂函数类型
pub type SyncFactoryFn = Arc<dyn Fn() -> DependencyResult<Instance> + Send + Sync>;

/// 异步工厂函数类型
pub type AsyncFactoryFn =
    Arc<dyn Fn() -> BoxFuture<'static, DependencyResult<Instance>> + Send + Sync>;

/// 解析契约
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionContract {
    /// 容器直接返回实例
    Sync,
    /// 容器返回实例的 future
    Async,
}

impl fmt::Display for ResolutionContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync => f.write_str("sync"),
            Self::Async => f.write_str("async"),
        }
    }
}

/// 构造器
#[derive(Clone)]
pub enum Constructor {
    /// 同步构造
    Sync(SyncFactoryFn),
    /// 异步构造
    Async(AsyncFactoryFn),
}

impl Constructor {
    /// 从同步可解析类型创建构造器
    pub fn of_sync<T: SyncResolvable>() -> Self {
        Self::Sync(Arc::new(|| T::create().map(|value| Arc::new(value) as Instance)))
    }

    /// 从异步可解析类型创建构造器
    pub fn of_async<T: AsyncResolvable>() -> Self {
        Self::Async(Arc::new(|| {
            async { T::create().await.map(|value| Arc::new(value) as Instance) }.boxed()
        }))
    }

    /// 从同步闭包创建构造器
    pub fn sync_fn<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> DependencyResult<T> + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(move || factory().map(|value| Arc::new(value) as Instance)))
    }

    /// 从返回 future 的闭包创建构造器
    pub fn async_fn<T, F, Fut>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = DependencyResult<T>> + Send + 'static,
    {
        Self::Async(Arc::new(move || {
            factory()
                .map(|result| result.map(|value| Arc::new(value) as Instance))
                .boxed()
        }))
    }

    /// 获取解析契约
    pub fn contract(&self) -> ResolutionContract {
        match self {
            Self::Sync(_) => ResolutionContract::Sync,
            Self::Async(_) => ResolutionContract::Async,
        }
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constructor")
            .field(&self.contract())
            .field(&"<function>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Clock;

    impl SyncResolvable for Clock {
        fn create() -> DependencyResult<Self> {
            Ok(Self)
        }
    }

    struct Mailer;

    #[async_trait]
    impl AsyncResolvable for Mailer {
        async fn create() -> DependencyResult<Self> {
            Ok(Self)
        }
    }

    #[test]
    fn test_contract_follows_declared_capability() {
        assert_eq!(Constructor::of_sync::<Clock>().contract(), ResolutionContract::Sync);
        assert_eq!(Constructor::of_async::<Mailer>().contract(), ResolutionContract::Async);
    }

    #[tokio::test]
    async fn test_async_constructor_produces_instance() {
        let Constructor::Async(factory) = Constructor::of_async::<Mailer>() else {
            panic!("expected async constructor");
        };
        let instance = factory().await.unwrap();
        assert!(instance.downcast::<Mailer>().is_ok());
    }

    #[test]
    fn test_sync_closure_constructor() {
        let Constructor::Sync(factory) = Constructor::sync_fn(|| Ok(42_u32)) else {
            panic!("expected sync constructor");
        };
        let instance = factory().unwrap();
        assert_eq!(*instance.downcast::<u32>().unwrap(), 42);
    }
}
