//! 惰性绑定
//!
//! [`ClassBinder`] 在构建时校验参数，[`LazyBinding`] 在第一次读取时执行流水线
//! 并记住结果（集合、共享 future 或错误），之后的读取都返回同一个值。

use crate::class_info::{ClassList, ClassSet, SharedError};
use crate::context::ResolverContext;
use crate::loader::TypeMatcher;
use crate::pipeline::{self, ResolutionRequest};
use crate::strategy::ResolveMode;
use glob::Pattern;
use infrastructure_common::{ResolveError, ResolveResult};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 绑定构建器
#[derive(Clone)]
pub struct ClassBinder {
    filter: String,
    config_path: String,
    mode: ResolveMode,
    type_matcher: Option<TypeMatcher>,
}

impl ClassBinder {
    /// 解析模式：为每个发现的类创建实例
    pub fn resolve_from_files(
        filter: impl Into<String>,
        config_path: impl Into<String>,
    ) -> ResolveResult<Self> {
        Self::new(ResolveMode::Resolve, filter.into(), config_path.into())
    }

    /// 列表模式：只报告类信息
    pub fn list_from_files(
        filter: impl Into<String>,
        config_path: impl Into<String>,
    ) -> ResolveResult<Self> {
        Self::new(ResolveMode::List, filter.into(), config_path.into())
    }

    fn new(mode: ResolveMode, filter: String, config_path: String) -> ResolveResult<Self> {
        if filter.trim().is_empty() {
            return Err(ResolveError::invalid_argument("filter", "不能为空"));
        }
        if config_path.trim().is_empty() {
            return Err(ResolveError::invalid_argument("config_path", "不能为空"));
        }
        Pattern::new(&filter).map_err(|e| ResolveError::invalid_argument("filter", e.to_string()))?;

        Ok(Self {
            filter,
            config_path,
            mode,
            type_matcher: None,
        })
    }

    /// 设置名称映射函数，文件基础名经过它得到要查找的符号名
    pub fn with_type_matcher<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.type_matcher = Some(Arc::new(matcher));
        self
    }

    /// glob 过滤模式
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// 目录配置键
    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    /// 解析模式
    pub fn mode(&self) -> ResolveMode {
        self.mode
    }

    /// 绑定到上下文
    pub fn bind(self, context: ResolverContext) -> LazyBinding {
        LazyBinding {
            binder: self,
            context,
            value: OnceCell::new(),
        }
    }
}

impl fmt::Debug for ClassBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassBinder")
            .field("filter", &self.filter)
            .field("config_path", &self.config_path)
            .field("mode", &self.mode)
            .field("type_matcher", &self.type_matcher.as_ref().map(|_| "<function>"))
            .finish()
    }
}

/// 惰性绑定
pub struct LazyBinding {
    binder: ClassBinder,
    context: ResolverContext,
    value: OnceCell<Result<ClassSet, SharedError>>,
}

impl LazyBinding {
    /// 读取绑定值，首次读取时执行流水线
    pub fn get(&self) -> Result<&ClassSet, SharedError> {
        self.value
            .get_or_init(|| {
                debug!(
                    "首次读取绑定: filter={}, config_path={}, mode={:?}",
                    self.binder.filter, self.binder.config_path, self.binder.mode
                );
                let request = ResolutionRequest {
                    filter: &self.binder.filter,
                    config_path: &self.binder.config_path,
                    mode: self.binder.mode,
                    type_matcher: self.binder.type_matcher.as_ref(),
                };
                pipeline::run(&request, &self.context).map_err(Arc::new)
            })
            .as_ref()
            .map_err(Arc::clone)
    }

    /// 读取并等待最终集合
    pub async fn resolve(&self) -> Result<ClassList, SharedError> {
        self.get()?.resolve().await
    }

    /// 是否已经求值
    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }

    /// 绑定构建器
    pub fn binder(&self) -> &ClassBinder {
        &self.binder
    }
}

impl fmt::Debug for LazyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyBinding")
            .field("binder", &self.binder)
            .field("evaluated", &self.is_evaluated())
            .finish()
    }
}

/// 绑定标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

/// 绑定存储
///
/// 一个拥有者对象的所有绑定，按属性名各占一项。
#[derive(Debug, Default)]
pub struct BindingArena {
    entries: Vec<LazyBinding>,
    names: HashMap<String, BindingId>,
}

impl BindingArena {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 为属性创建绑定
    pub fn bind(
        &mut self,
        property: &str,
        binder: ClassBinder,
        context: ResolverContext,
    ) -> ResolveResult<BindingId> {
        if property.is_empty() {
            return Err(ResolveError::invalid_argument("property", "不能为空"));
        }
        if self.names.contains_key(property) {
            return Err(ResolveError::invalid_argument(property, "属性已绑定"));
        }

        let id = BindingId(self.entries.len());
        self.entries.push(binder.bind(context));
        self.names.insert(property.to_string(), id);
        Ok(id)
    }

    /// 读取绑定值
    pub fn get(&self, id: BindingId) -> Result<&ClassSet, SharedError> {
        let binding = self.binding(id).ok_or_else(|| {
            Arc::new(ResolveError::invalid_argument("binding", format!("未知绑定 {:?}", id)))
        })?;
        binding.get()
    }

    /// 按属性名读取绑定值
    pub fn get_by_name(&self, property: &str) -> Result<&ClassSet, SharedError> {
        let id = self
            .names
            .get(property)
            .copied()
            .ok_or_else(|| Arc::new(ResolveError::invalid_argument(property, "属性未绑定")))?;
        self.get(id)
    }

    /// 获取绑定
    pub fn binding(&self, id: BindingId) -> Option<&LazyBinding> {
        self.entries.get(id.0)
    }

    /// 绑定数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否没有绑定
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_impl::MemoryConfigProvider;
    use di_impl::{DiContainerImpl, TypeRegistryImpl};
    use serde_json::json;

    fn context(config: serde_json::Value) -> ResolverContext {
        ResolverContext::builder()
            .with_config(Arc::new(MemoryConfigProvider::from_json(config)))
            .with_registry(Arc::new(TypeRegistryImpl::new()))
            .with_container(Arc::new(DiContainerImpl::new()))
            .with_base_dir("/")
            .build()
            .unwrap()
    }

    #[test]
    fn test_arguments_are_validated_eagerly() {
        assert!(matches!(
            ClassBinder::resolve_from_files("", "plugins.dirs"),
            Err(ResolveError::InvalidArgument { ref argument, .. }) if argument == "filter"
        ));
        assert!(matches!(
            ClassBinder::list_from_files("**/*.rs", "  "),
            Err(ResolveError::InvalidArgument { ref argument, .. }) if argument == "config_path"
        ));
        assert!(ClassBinder::list_from_files("[*.rs", "plugins.dirs").is_err());

        let binder = ClassBinder::list_from_files("**/*.rs", "plugins.dirs").unwrap();
        assert_eq!(binder.mode(), ResolveMode::List);
        assert_eq!(binder.filter(), "**/*.rs");
        assert_eq!(binder.config_path(), "plugins.dirs");
    }

    #[test]
    fn test_binding_is_lazy_and_memoized() {
        let binding = ClassBinder::resolve_from_files("*.rs", "plugins.dirs")
            .unwrap()
            .bind(context(json!({})));
        assert!(!binding.is_evaluated());

        let first = binding.get().unwrap();
        assert!(binding.is_evaluated());
        assert!(first.as_ready().unwrap().is_empty());

        let second = binding.get().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(first.ptr_eq(second));
    }

    #[test]
    fn test_failure_is_memoized() {
        let binding = ClassBinder::list_from_files("*.rs", "plugins.dirs")
            .unwrap()
            .bind(context(json!({ "plugins": { "dirs": 7 } })));

        let first = binding.get().unwrap_err();
        let second = binding.get().unwrap_err();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(matches!(*first, ResolveError::Config(_)));
    }

    #[test]
    fn test_arena_rejects_duplicate_property() {
        let mut arena = BindingArena::new();
        let binder = ClassBinder::list_from_files("*.rs", "plugins.dirs").unwrap();

        let id = arena.bind("handlers", binder.clone(), context(json!({}))).unwrap();
        assert!(arena.bind("handlers", binder.clone(), context(json!({}))).is_err());
        assert!(arena.bind("", binder, context(json!({}))).is_err());
        assert_eq!(arena.len(), 1);

        assert!(arena.get(id).unwrap().as_ready().unwrap().is_empty());
        assert!(arena.get_by_name("handlers").unwrap().ptr_eq(arena.get(id).unwrap()));
        assert!(arena.get_by_name("unknown").is_err());
        assert!(arena.binding(id).unwrap().is_evaluated());
    }
}
