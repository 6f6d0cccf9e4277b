// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::crawler::{CrawlError, WebCrawler};
use crate::domain::models::crawl_result::CrawlResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 装饰器为crawl操作记录耗时使用的操作名
pub const CRAWL_OPERATION: &str = "crawl";

/// 单个操作的累计计时
#[derive(Debug, Clone, Copy, Default)]
struct OperationTiming {
    calls: u64,
    total: Duration,
}

/// 调用计时器
///
/// 跨操作共享的只追加计时记录，按操作名聚合调用次数与总耗时
pub struct Profiler {
    started_at: DateTime<Utc>,
    timings: Mutex<BTreeMap<&'static str, OperationTiming>>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    /// 创建新的计时器实例
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            timings: Mutex::new(BTreeMap::new()),
        }
    }

    /// 记录一次操作耗时
    pub fn record(&self, operation: &'static str, elapsed: Duration) {
        let mut timings = self.timings.lock();
        let timing = timings.entry(operation).or_default();
        timing.calls += 1;
        timing.total += elapsed;
    }

    /// 某个操作的累计调用次数
    pub fn recorded_calls(&self, operation: &str) -> u64 {
        self.timings
            .lock()
            .get(operation)
            .map(|t| t.calls)
            .unwrap_or(0)
    }

    /// 写出聚合计时报告
    pub fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "Run at {}", self.started_at.to_rfc2822())?;
        for (operation, timing) in self.timings.lock().iter() {
            writeln!(
                writer,
                "{}: {} call(s), total {:?}",
                operation, timing.calls, timing.total
            )?;
        }
        writeln!(writer)
    }

    /// 将聚合计时报告追加到文件
    ///
    /// 文件不存在时创建，存在时在末尾追加
    pub fn write_report_to_path(&self, path: &Path) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_report(&mut file)
    }
}

/// 带计时的爬虫装饰器
///
/// 实现与被装饰对象相同的特质：转发每次调用，并把标记为计时的
/// 操作耗时写入共享计时器。无论调用成功与否都会记录。
pub struct ProfiledCrawler<C> {
    inner: C,
    profiler: Arc<Profiler>,
}

impl<C> ProfiledCrawler<C> {
    /// 包装一个爬虫实例
    pub fn new(inner: C, profiler: Arc<Profiler>) -> Self {
        Self { inner, profiler }
    }
}

#[async_trait]
impl<C: WebCrawler> WebCrawler for ProfiledCrawler<C> {
    async fn crawl(&self, seeds: &[String]) -> Result<CrawlResult, CrawlError> {
        let start = Instant::now();
        let result = self.inner.crawl(seeds).await;
        self.profiler.record(CRAWL_OPERATION, start.elapsed());
        result
    }

    fn max_parallelism(&self) -> usize {
        self.inner.max_parallelism()
    }
}
