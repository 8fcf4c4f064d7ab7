//! 结果聚合

use crate::class_info::ClassSet;
use crate::strategy::Outcome;
use futures::future::{self, FutureExt};
use infrastructure_common::ResolveResult;
use std::sync::Arc;
use tracing::debug;

/// 结果聚合器
///
/// 全部为立即结果时同步返回有序集合；只要存在延迟结果，就返回一个共享 future，
/// 它在所有成员成功后得到完整的有序集合，任一成员失败即以该错误失败。
pub struct ResultAggregator;

impl ResultAggregator {
    /// 聚合按发现顺序排列的结果
    pub fn aggregate(outcomes: Vec<Outcome>) -> ResolveResult<ClassSet> {
        if outcomes.iter().any(Outcome::is_deferred) {
            debug!("批量包含异步成员，共 {} 项", outcomes.len());
            let tasks: Vec<_> = outcomes.into_iter().map(Outcome::into_future).collect();
            let joined = future::try_join_all(tasks)
                .map(|result| result.map(Arc::new).map_err(Arc::new))
                .boxed()
                .shared();
            return Ok(ClassSet::Pending(joined));
        }

        let classes = outcomes
            .into_iter()
            .filter_map(Outcome::into_immediate)
            .collect::<ResolveResult<Vec<_>>>()?;
        debug!("批量同步完成，共 {} 项", classes.len());
        Ok(ClassSet::Ready(Arc::new(classes)))
    }
}
