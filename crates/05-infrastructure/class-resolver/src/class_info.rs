//! 类信息与批量解析结果

use di_abstractions::ClassType;
use futures::future::{BoxFuture, Shared};
use infrastructure_common::{Instance, ResolveError};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// 已发现文件对应的类信息
#[derive(Clone)]
pub struct ClassInfo {
    /// 产生此条目的源文件绝对路径
    pub file: PathBuf,
    /// 查找时使用的符号名（经过名称映射之后）
    pub name: String,
    /// 加载得到的类描述
    pub class_type: ClassType,
    /// 解析得到的实例，仅解析模式下存在
    pub instance: Option<Instance>,
}

impl ClassInfo {
    /// 以具体类型访问实例
    pub fn instance_as<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.instance.clone()?.downcast::<T>().ok()
    }

    /// 是否已有实例
    pub fn has_instance(&self) -> bool {
        self.instance.is_some()
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInfo")
            .field("file", &self.file)
            .field("name", &self.name)
            .field("class_type", &self.class_type)
            .field("instance", &self.instance.as_ref().map(|_| "<instance>"))
            .finish()
    }
}

/// 有序类信息集合
pub type ClassList = Arc<Vec<ClassInfo>>;

/// 可在多个读取者之间共享的错误
pub type SharedError = Arc<ResolveError>;

/// 共享的批量解析 future，所有克隆观察同一个计算
pub type SharedClassFuture = Shared<BoxFuture<'static, Result<ClassList, SharedError>>>;

/// 绑定的值：同步得到的集合，或解析该集合的共享 future
#[derive(Clone)]
pub enum ClassSet {
    /// 批量中没有异步成员
    Ready(ClassList),
    /// 批量中至少有一个异步成员
    Pending(SharedClassFuture),
}

impl ClassSet {
    /// 空集合
    pub fn empty() -> Self {
        Self::Ready(Arc::new(Vec::new()))
    }

    /// 是否为 future 形态
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// 同步形态下的集合
    pub fn as_ready(&self) -> Option<&[ClassInfo]> {
        match self {
            Self::Ready(list) => Some(list.as_slice()),
            Self::Pending(_) => None,
        }
    }

    /// future 形态下的共享 future
    pub fn as_pending(&self) -> Option<&SharedClassFuture> {
        match self {
            Self::Ready(_) => None,
            Self::Pending(future) => Some(future),
        }
    }

    /// 统一消费两种形态
    pub async fn resolve(&self) -> Result<ClassList, SharedError> {
        match self {
            Self::Ready(list) => Ok(Arc::clone(list)),
            Self::Pending(future) => future.clone().await,
        }
    }

    /// 是否指向同一个集合或同一个 future
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Ready(a), Self::Ready(b)) => Arc::ptr_eq(a, b),
            (Self::Pending(a), Self::Pending(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(list) => f.debug_tuple("Ready").field(list).finish(),
            Self::Pending(_) => f.debug_tuple("Pending").field(&"<future>").finish(),
        }
    }
}
