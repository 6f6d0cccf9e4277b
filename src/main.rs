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

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use wordcrawl::config::settings::Settings;
use wordcrawl::crawler::engine::CrawlEngine;
use wordcrawl::crawler::WebCrawler;
use wordcrawl::domain::models::crawl_result::CrawlResult;
use wordcrawl::engines::fetch_engine::FetchEngine;
use wordcrawl::engines::traits::PageParser;
use wordcrawl::utils::profiler::{ProfiledCrawler, Profiler};
use wordcrawl::utils::telemetry;

/// 命令行参数
#[derive(Parser)]
#[command(
    name = "wordcrawl",
    about = "Crawl seed pages and report the most popular words"
)]
struct Cli {
    /// Path to the crawl configuration file
    config: String,
}

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并执行一次爬取
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting wordcrawl...");

    // 2. Parse command line and load configuration
    let cli = Cli::parse();
    let settings = Settings::new(&cli.config).context("failed to load configuration")?;
    info!("Configuration loaded");

    // 3. Build the page parser
    let parser: Arc<dyn PageParser> = Arc::new(FetchEngine::new(&settings.fetch)?);

    // 4. Build the crawl engine and wrap it with the call timer
    let engine = CrawlEngine::from_settings(&settings.crawl, parser)?;
    let profiler = Arc::new(Profiler::new());
    let crawler = ProfiledCrawler::new(engine, Arc::clone(&profiler));

    // 5. Run the crawl
    let result = crawler.crawl(&settings.crawl.start_pages).await?;

    // 6. Write the crawl result
    write_result(&result, &settings.output.result_path)?;

    // 7. Write the timing report
    write_profile(&profiler, &settings.output.profile_path)?;

    Ok(())
}

/// 写出爬取结果
///
/// 路径为空时写到标准输出，否则写入文件
fn write_result(result: &CrawlResult, path: &str) -> anyhow::Result<()> {
    if path.is_empty() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, result)?;
        writeln!(handle)?;
    } else {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create result file {}", path))?;
        serde_json::to_writer_pretty(file, result)?;
        info!(path, "crawl result written");
    }
    Ok(())
}

/// 写出计时报告
///
/// 路径为空时写到标准输出，否则追加到文件
fn write_profile(profiler: &Profiler, path: &str) -> anyhow::Result<()> {
    if path.is_empty() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        profiler.write_report(&mut handle)?;
    } else {
        profiler
            .write_report_to_path(Path::new(path))
            .with_context(|| format!("failed to write timing report to {}", path))?;
        info!(path, "timing report written");
    }
    Ok(())
}
