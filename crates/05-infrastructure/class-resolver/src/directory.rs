//! 配置目录解析

use crate::scanner::FileSystem;
use config_abstractions::ConfigProvider;
use infrastructure_common::ResolveResult;
use std::path::{Component, Path, PathBuf};
use tracing::{trace, warn};

/// 目录解析器
///
/// 把配置中的目录或目录列表转换为有序、去重、确实存在的绝对路径。
pub struct DirectoryResolver<'a> {
    config: &'a dyn ConfigProvider,
    file_system: &'a dyn FileSystem,
    base_dir: &'a Path,
}

impl<'a> DirectoryResolver<'a> {
    /// 创建目录解析器，相对路径基于 `base_dir`
    pub fn new(
        config: &'a dyn ConfigProvider,
        file_system: &'a dyn FileSystem,
        base_dir: &'a Path,
    ) -> Self {
        Self {
            config,
            file_system,
            base_dir,
        }
    }

    /// 读取配置并解析目录
    ///
    /// 未配置时返回空列表；不存在的目录记录警告后跳过。
    pub fn resolve(&self, config_path: &str) -> ResolveResult<Vec<PathBuf>> {
        let configured = self.config.get_string_list(config_path)?;
        trace!("配置 {} 包含 {} 个目录", config_path, configured.len());

        let mut directories: Vec<PathBuf> = Vec::with_capacity(configured.len());
        for raw in configured {
            let directory = normalize_path(self.base_dir, &raw);
            if !self.file_system.exists(&directory) {
                warn!("配置 {} 中的目录不存在，已跳过: {}", config_path, directory.display());
                continue;
            }
            if directories.contains(&directory) {
                trace!("忽略重复目录: {}", directory.display());
                continue;
            }
            directories.push(directory);
        }

        Ok(directories)
    }
}

/// 词法规范化路径：相对路径拼接到 `base` 上，并折叠 `.` 和 `..`
pub fn normalize_path(base: &Path, raw: &str) -> PathBuf {
    let raw = Path::new(raw);
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        base.join(raw)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::OsFileSystem;
    use config_impl::MemoryConfigProvider;
    use serde_json::json;

    #[test]
    fn test_normalize_path_collapses_dots() {
        let base = Path::new("/srv/app");
        assert_eq!(normalize_path(base, "plugins/./a/../b"), PathBuf::from("/srv/app/plugins/b"));
        assert_eq!(normalize_path(base, "/opt/x/.."), PathBuf::from("/opt"));
        assert_eq!(normalize_path(base, "../../../.."), PathBuf::from("/"));
        assert_eq!(normalize_path(Path::new("rel"), "../../up"), PathBuf::from("../up"));
    }

    #[test]
    fn test_missing_directories_are_dropped_in_order() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("alpha")).unwrap();
        std::fs::create_dir(root.path().join("beta")).unwrap();

        let config = MemoryConfigProvider::from_json(json!({
            "dirs": ["beta", "missing", "alpha", "./beta/../beta"]
        }));
        let resolver = DirectoryResolver::new(&config, &OsFileSystem, root.path());

        let directories = resolver.resolve("dirs").unwrap();
        assert_eq!(
            directories,
            vec![root.path().join("beta"), root.path().join("alpha")]
        );
    }

    #[test]
    fn test_unconfigured_key_yields_no_directories() {
        let config = MemoryConfigProvider::new();
        let resolver = DirectoryResolver::new(&config, &OsFileSystem, Path::new("/"));
        assert!(resolver.resolve("nothing.here").unwrap().is_empty());
    }

    #[test]
    fn test_single_string_value() {
        let root = tempfile::tempdir().unwrap();
        let config =
            MemoryConfigProvider::from_json(json!({ "dirs": root.path().to_str().unwrap() }));
        let resolver = DirectoryResolver::new(&config, &OsFileSystem, Path::new("/unused"));
        assert_eq!(resolver.resolve("dirs").unwrap(), vec![root.path().to_path_buf()]);
    }
}
