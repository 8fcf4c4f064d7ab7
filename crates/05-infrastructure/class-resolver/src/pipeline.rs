//! 发现与解析流水线

use crate::aggregator::ResultAggregator;
use crate::class_info::ClassSet;
use crate::context::ResolverContext;
use crate::directory::DirectoryResolver;
use crate::loader::{TypeLoader, TypeMatcher};
use crate::scanner::FileScanner;
use crate::strategy::{Outcome, ResolutionStrategy, ResolveMode};
use infrastructure_common::ResolveResult;
use tracing::debug;

/// 一次完整的目录发现与类解析请求
pub(crate) struct ResolutionRequest<'a> {
    pub filter: &'a str,
    pub config_path: &'a str,
    pub mode: ResolveMode,
    pub type_matcher: Option<&'a TypeMatcher>,
}

/// 执行流水线：目录解析 → 文件扫描 → 类型加载 → 解析策略 → 结果聚合
pub(crate) fn run(
    request: &ResolutionRequest<'_>,
    context: &ResolverContext,
) -> ResolveResult<ClassSet> {
    let directories =
        DirectoryResolver::new(context.config(), context.file_system(), context.base_dir())
            .resolve(request.config_path)?;
    if directories.is_empty() {
        debug!("配置 {} 没有可用目录，返回空集合", request.config_path);
        return Ok(ClassSet::empty());
    }

    let files = FileScanner::new(context.file_system()).scan(&directories, request.filter)?;
    debug!("配置 {} 发现 {} 个文件", request.config_path, files.len());

    let type_loader = TypeLoader::new(context.module_loader(), request.type_matcher);
    let loaded: Vec<_> = files.into_iter().map(|file| type_loader.load(file)).collect();

    // 批量形态只取决于已加载类的契约，需在调用容器之前确定
    let strategy = ResolutionStrategy::new(request.mode, context.container());
    let batch_deferred = loaded.iter().flatten().any(|class| strategy.defers(class));

    let mut outcomes = Vec::with_capacity(loaded.len());
    for class in loaded {
        let outcome = match class {
            Ok(class) => strategy.outcome(class),
            Err(e) => Outcome::Immediate(Err(e)),
        };
        if !batch_deferred {
            if let Outcome::Immediate(Err(e)) = outcome {
                return Err(e);
            }
        }
        outcomes.push(outcome);
    }

    ResultAggregator::aggregate(outcomes)
}
