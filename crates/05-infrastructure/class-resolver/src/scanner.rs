//! 文件系统访问与文件扫描

use glob::{MatchOptions, Pattern};
use infrastructure_common::{ResolveError, ResolveResult};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// 文件系统 trait
pub trait FileSystem: Send + Sync {
    /// 路径是否存在
    fn exists(&self, path: &Path) -> bool;

    /// 在 `dir` 下按 glob 模式匹配文件，按匹配顺序返回绝对路径
    fn glob(&self, dir: &Path, pattern: &str) -> ResolveResult<Vec<PathBuf>>;
}

/// 操作系统文件系统
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OsFileSystem {
    /// glob 匹配选项：`*` 不跨越目录，隐藏文件需要显式匹配
    const MATCH_OPTIONS: MatchOptions = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };
}

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn glob(&self, dir: &Path, pattern: &str) -> ResolveResult<Vec<PathBuf>> {
        let escaped_dir = Pattern::escape(&dir.to_string_lossy());
        let full_pattern = Path::new(&escaped_dir).join(pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let entries =
            glob::glob_with(&full_pattern, Self::MATCH_OPTIONS).map_err(|e| ResolveError::Scan {
                pattern: full_pattern.to_string(),
                message: e.to_string(),
            })?;

        let mut files = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(path) => trace!("跳过非文件路径: {}", path.display()),
                Err(e) => trace!("跳过无法读取的路径: {}", e),
            }
        }
        Ok(files)
    }
}

/// 文件扫描器
pub struct FileScanner<'a> {
    file_system: &'a dyn FileSystem,
}

impl<'a> FileScanner<'a> {
    /// 创建文件扫描器
    pub fn new(file_system: &'a dyn FileSystem) -> Self {
        Self { file_system }
    }

    /// 依次扫描每个目录
    ///
    /// 结果先按目录顺序、再按匹配顺序排列；不同目录下的重复匹配都会保留。
    pub fn scan(&self, directories: &[PathBuf], filter: &str) -> ResolveResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for directory in directories {
            let matched = self.file_system.glob(directory, filter)?;
            debug!("目录 {} 匹配 {} 个文件", directory.display(), matched.len());
            files.extend(matched);
        }
        Ok(files)
    }
}
