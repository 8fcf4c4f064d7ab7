//! 解析上下文
//!
//! 汇集类解析过程依赖的所有外部协作者。

use crate::loader::{ModuleLoader, RegistryModuleLoader};
use crate::scanner::{FileSystem, OsFileSystem};
use config_abstractions::ConfigProvider;
use di_abstractions::{ClassContainer, ClassRegistry};
use infrastructure_common::{ResolveError, ResolveResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 解析上下文
#[derive(Clone)]
pub struct ResolverContext {
    config: Arc<dyn ConfigProvider>,
    file_system: Arc<dyn FileSystem>,
    module_loader: Arc<dyn ModuleLoader>,
    container: Arc<dyn ClassContainer>,
    base_dir: PathBuf,
}

impl ResolverContext {
    /// 创建构建器
    pub fn builder() -> ResolverContextBuilder {
        ResolverContextBuilder::default()
    }

    /// 配置提供者
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// 文件系统
    pub fn file_system(&self) -> &dyn FileSystem {
        self.file_system.as_ref()
    }

    /// 模块加载器
    pub fn module_loader(&self) -> &dyn ModuleLoader {
        self.module_loader.as_ref()
    }

    /// 类容器
    pub fn container(&self) -> &dyn ClassContainer {
        self.container.as_ref()
    }

    /// 相对目录的基准路径
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// 解析上下文构建器
#[derive(Default)]
pub struct ResolverContextBuilder {
    config: Option<Arc<dyn ConfigProvider>>,
    file_system: Option<Arc<dyn FileSystem>>,
    module_loader: Option<Arc<dyn ModuleLoader>>,
    container: Option<Arc<dyn ClassContainer>>,
    base_dir: Option<PathBuf>,
}

impl ResolverContextBuilder {
    /// 设置配置提供者
    pub fn with_config(mut self, config: Arc<dyn ConfigProvider>) -> Self {
        self.config = Some(config);
        self
    }

    /// 设置文件系统，默认为 [`OsFileSystem`]
    pub fn with_file_system(mut self, file_system: Arc<dyn FileSystem>) -> Self {
        self.file_system = Some(file_system);
        self
    }

    /// 设置模块加载器
    pub fn with_module_loader(mut self, module_loader: Arc<dyn ModuleLoader>) -> Self {
        self.module_loader = Some(module_loader);
        self
    }

    /// 使用类注册表作为模块加载器
    pub fn with_registry(self, registry: Arc<dyn ClassRegistry>) -> Self {
        self.with_module_loader(Arc::new(RegistryModuleLoader::new(registry)))
    }

    /// 设置类容器
    pub fn with_container(mut self, container: Arc<dyn ClassContainer>) -> Self {
        self.container = Some(container);
        self
    }

    /// 设置相对目录的基准路径，默认为当前工作目录
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// 构建上下文
    pub fn build(self) -> ResolveResult<ResolverContext> {
        let config = self
            .config
            .ok_or_else(|| ResolveError::invalid_argument("config", "未设置配置提供者"))?;
        let module_loader = self
            .module_loader
            .ok_or_else(|| ResolveError::invalid_argument("module_loader", "未设置模块加载器"))?;
        let container = self
            .container
            .ok_or_else(|| ResolveError::invalid_argument("container", "未设置类容器"))?;
        let base_dir = match self.base_dir {
            Some(base_dir) => base_dir,
            None => std::env::current_dir()
                .map_err(|e| ResolveError::invalid_argument("base_dir", e.to_string()))?,
        };

        Ok(ResolverContext {
            config,
            file_system: self.file_system.unwrap_or_else(|| Arc::new(OsFileSystem)),
            module_loader,
            container,
            base_dir,
        })
    }
}
