// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 爬取核心模块
///
/// 实现并发爬取引擎与递归爬取任务：
/// - 引擎（engine）：构建每次调用的共享状态，发起并汇总整棵任务树
/// - 任务（task）：单个URL的递归处理单元
pub mod engine;
pub mod task;


use crate::domain::models::crawl_result::CrawlResult;
use async_trait::async_trait;
use thiserror::Error;

/// 爬取错误类型
///
/// 只包含对整次调用致命的错误；单个页面的失败在任务内部消化
#[derive(Error, Debug)]
pub enum CrawlError {
    /// 工作任务崩溃或无法汇入
    #[error("Crawl worker failed: {0}")]
    WorkerFailed(String),
    /// 工作池已不可用
    #[error("Worker pool unavailable")]
    PoolUnavailable,
}

/// 爬虫特质
///
/// 爬取的唯一入口；计时装饰器与引擎实现同一特质
#[async_trait]
pub trait WebCrawler: Send + Sync {
    /// 从种子URL开始爬取并产出结果
    async fn crawl(&self, seeds: &[String]) -> Result<CrawlResult, CrawlError>;

    /// 硬件可用的最大并行度
    fn max_parallelism(&self) -> usize {
        num_cpus::get()
    }
}
