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

use crate::crawler::CrawlError;
use crate::domain::services::ignore_rules::IgnoreRuleSet;
use crate::domain::services::visited_registry::VisitedRegistry;
use crate::domain::services::word_counts::WordCountAggregate;
use crate::engines::traits::PageParser;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// 单次爬取调用的共享上下文
///
/// 登记表和汇总表是整棵任务树仅有的共享可变状态，
/// 生命周期与一次爬取调用相同
pub(crate) struct CrawlContext {
    /// 爬取截止时刻
    pub deadline: Instant,
    /// URL忽略规则
    pub ignore_rules: IgnoreRuleSet,
    /// 已访问URL登记表
    pub visited: VisitedRegistry,
    /// 词频汇总表
    pub counts: WordCountAggregate,
    /// 页面解析引擎
    pub parser: Arc<dyn PageParser>,
    /// 抓取许可（限制同时进行的抓取数量）
    pub fetch_slots: Semaphore,
}

/// 爬取任务
///
/// 递归的处理单元：每个任务独自决定是否处理自己的URL，
/// 并为页面上发现的每个链接派生一个子任务
pub(crate) struct CrawlTask {
    url: String,
    depth_remaining: u32,
    ctx: Arc<CrawlContext>,
}

impl CrawlTask {
    pub(crate) fn new(url: String, depth_remaining: u32, ctx: Arc<CrawlContext>) -> Self {
        Self {
            url,
            depth_remaining,
            ctx,
        }
    }

    /// 执行任务
    ///
    /// 检查顺序是算法的一部分：忽略规则在认领之前检查，避免为永远不会
    /// 处理的URL占用登记名额；认领在抓取之前完成，保证同一URL不会被
    /// 并发抓取两次。
    ///
    /// 返回装箱的future以便递归派生子任务
    pub(crate) fn run(self) -> BoxFuture<'static, Result<(), CrawlError>> {
        Box::pin(async move {
            if self.depth_remaining == 0 {
                return Ok(());
            }
            if Instant::now() >= self.ctx.deadline {
                debug!(url = %self.url, "deadline reached, skipping");
                return Ok(());
            }
            if self.ctx.ignore_rules.should_ignore(&self.url) {
                debug!(url = %self.url, "url matches ignore rules, skipping");
                return Ok(());
            }
            if !self.ctx.visited.claim(&self.url) {
                return Ok(());
            }

            // The permit covers only the fetch+parse call. Holding it across
            // the child join would deadlock once the tree grows deeper than
            // the permit count.
            let content = {
                let _permit = self
                    .ctx
                    .fetch_slots
                    .acquire()
                    .await
                    .map_err(|_| CrawlError::PoolUnavailable)?;

                match self.ctx.parser.parse(&self.url).await {
                    Ok(content) => content,
                    Err(error) => {
                        // A failed page contributes nothing; the rest of the
                        // crawl is unaffected.
                        debug!(url = %self.url, %error, "page parse failed, skipping");
                        return Ok(());
                    }
                }
            };

            self.ctx.counts.merge(content.word_counts);

            // All children of one parent are spawned as a single batch; the
            // parent does not complete until the whole subtree has settled.
            let mut children = JoinSet::new();
            for link in content.links {
                let child = CrawlTask::new(link, self.depth_remaining - 1, Arc::clone(&self.ctx));
                children.spawn(child.run());
            }
            while let Some(joined) = children.join_next().await {
                joined.map_err(|e| CrawlError::WorkerFailed(e.to_string()))??;
            }

            Ok(())
        })
    }
}
