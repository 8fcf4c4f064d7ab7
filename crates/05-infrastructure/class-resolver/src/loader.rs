//! 模块加载与符号查找

use di_abstractions::{ClassRegistry, ClassType};
use infrastructure_common::{ResolveError, ResolveResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// 名称映射函数：文件基础名 → 导出符号名
pub type TypeMatcher = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// 模块加载器 trait
pub trait ModuleLoader: Send + Sync {
    /// 加载文件对应的模块并取出指定导出
    ///
    /// 模块可以加载但没有该导出时返回 `Ok(None)`。
    fn load_export(&self, file: &Path, symbol: &str) -> ResolveResult<Option<ClassType>>;
}

/// 基于类注册表的模块加载器
///
/// 插件注册步骤先把名称写入注册表，之后任何被发现的文件都通过名称查找导出。
pub struct RegistryModuleLoader {
    registry: Arc<dyn ClassRegistry>,
}

impl RegistryModuleLoader {
    /// 创建加载器
    pub fn new(registry: Arc<dyn ClassRegistry>) -> Self {
        Self { registry }
    }
}

impl ModuleLoader for RegistryModuleLoader {
    fn load_export(&self, _file: &Path, symbol: &str) -> ResolveResult<Option<ClassType>> {
        Ok(self.registry.lookup(symbol))
    }
}

/// 已加载但未实例化的类
#[derive(Debug, Clone)]
pub struct LoadedClass {
    /// 源文件
    pub file: PathBuf,
    /// 查找使用的符号名
    pub name: String,
    /// 类描述
    pub class_type: ClassType,
}

/// 类型加载器
pub struct TypeLoader<'a> {
    loader: &'a dyn ModuleLoader,
    matcher: Option<&'a TypeMatcher>,
}

impl<'a> TypeLoader<'a> {
    /// 创建类型加载器
    pub fn new(loader: &'a dyn ModuleLoader, matcher: Option<&'a TypeMatcher>) -> Self {
        Self { loader, matcher }
    }

    /// 计算文件应导出的符号名
    pub fn symbol_for(&self, file: &Path) -> String {
        let base_name = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.matcher {
            Some(matcher) => matcher(&base_name),
            None => base_name,
        }
    }

    /// 加载文件导出的类，符号缺失时失败
    pub fn load(&self, file: PathBuf) -> ResolveResult<LoadedClass> {
        let name = self.symbol_for(&file);
        trace!("加载 {} 的导出 {}", file.display(), name);

        match self.loader.load_export(&file, &name)? {
            Some(class_type) => Ok(LoadedClass {
                file,
                name,
                class_type,
            }),
            None => Err(ResolveError::missing_symbol(name, file)),
        }
    }
}
