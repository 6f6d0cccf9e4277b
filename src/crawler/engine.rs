// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::CrawlSettings;
use crate::crawler::task::{CrawlContext, CrawlTask};
use crate::crawler::{CrawlError, WebCrawler};
use crate::domain::models::crawl_result::CrawlResult;
use crate::domain::services::ignore_rules::IgnoreRuleSet;
use crate::domain::services::visited_registry::VisitedRegistry;
use crate::domain::services::word_counts::WordCountAggregate;
use crate::engines::traits::PageParser;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;

/// 并发爬取引擎
///
/// 每次crawl调用都会新建登记表、汇总表和抓取许可，
/// 调用结束后一并丢弃，调用之间不保留任何状态
pub struct CrawlEngine {
    timeout: Duration,
    popular_word_count: usize,
    max_depth: u32,
    parallelism: usize,
    ignore_rules: IgnoreRuleSet,
    parser: Arc<dyn PageParser>,
}

impl CrawlEngine {
    /// 从配置创建爬取引擎
    ///
    /// 并行度取配置提示与可用核心数中的较小者，至少为1；
    /// 提示为0表示使用全部可用核心
    ///
    /// # 参数
    ///
    /// * `settings` - 爬取配置
    /// * `parser` - 页面解析引擎
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlEngine)` - 爬取引擎实例
    /// * `Err(regex::Error)` - 忽略模式非法
    pub fn from_settings(
        settings: &CrawlSettings,
        parser: Arc<dyn PageParser>,
    ) -> Result<Self, regex::Error> {
        let cores = num_cpus::get();
        let hint = if settings.parallelism == 0 {
            cores
        } else {
            settings.parallelism
        };

        Ok(Self {
            timeout: Duration::from_secs(settings.timeout_seconds),
            popular_word_count: settings.popular_word_count,
            max_depth: settings.max_depth,
            parallelism: hint.min(cores).max(1),
            ignore_rules: IgnoreRuleSet::new(&settings.ignored_urls)?,
            parser,
        })
    }

    /// 本次引擎实例解析后的并行度
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }
}

#[async_trait]
impl WebCrawler for CrawlEngine {
    /// 从种子URL开始爬取并产出结果
    ///
    /// 阻塞直到整棵任务树（含所有递归子任务）完成，然后对汇总表
    /// 排名一次并组装结果。页面访问顺序不做任何保证；结果的确定性
    /// 来自排名的平局规则。
    async fn crawl(&self, seeds: &[String]) -> Result<CrawlResult, CrawlError> {
        let ctx = Arc::new(CrawlContext {
            deadline: Instant::now() + self.timeout,
            ignore_rules: self.ignore_rules.clone(),
            visited: VisitedRegistry::new(),
            counts: WordCountAggregate::new(),
            parser: Arc::clone(&self.parser),
            fetch_slots: Semaphore::new(self.parallelism),
        });

        info!(
            seeds = seeds.len(),
            max_depth = self.max_depth,
            parallelism = self.parallelism,
            "starting crawl"
        );

        let mut roots = JoinSet::new();
        for seed in seeds {
            let task = CrawlTask::new(seed.clone(), self.max_depth, Arc::clone(&ctx));
            roots.spawn(task.run());
        }
        while let Some(joined) = roots.join_next().await {
            joined.map_err(|e| CrawlError::WorkerFailed(e.to_string()))??;
        }

        // The aggregate is read exactly once, after the task tree has settled
        let word_counts = ctx.counts.rank(self.popular_word_count);
        let urls_visited = ctx.visited.len();

        info!(urls_visited, words = word_counts.len(), "crawl finished");

        Ok(CrawlResult {
            word_counts,
            urls_visited,
        })
    }
}
