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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 爬取任务配置设置
///
/// 包含爬取、抓取和输出等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 爬取配置
    pub crawl: CrawlSettings,
    /// 抓取配置
    pub fetch: FetchSettings,
    /// 输出配置
    pub output: OutputSettings,
}

/// 爬取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 种子页面列表
    pub start_pages: Vec<String>,
    /// 忽略URL的正则模式（整串匹配）
    pub ignored_urls: Vec<String>,
    /// 最大爬取深度（0表示不处理任何页面）
    pub max_depth: u32,
    /// 爬取截止时间（秒）
    pub timeout_seconds: u64,
    /// 报告的热门词数量
    pub popular_word_count: usize,
    /// 并发度提示（0表示使用全部可用核心）
    pub parallelism: usize,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// 忽略单词的正则模式（整串匹配）
    pub ignored_words: Vec<String>,
    /// 单次请求超时时间（秒）
    pub request_timeout_seconds: u64,
    /// User-Agent请求头
    pub user_agent: String,
}

/// 输出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 结果输出路径（空字符串表示标准输出）
    pub result_path: String,
    /// 计时报告输出路径（空字符串表示标准输出）
    pub profile_path: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 按默认值、配置文件、环境变量的顺序加载配置
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径（不带扩展名亦可，支持config crate的所有格式）
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Default crawl settings
            .set_default("crawl.start_pages", Vec::<String>::new())?
            .set_default("crawl.ignored_urls", Vec::<String>::new())?
            .set_default("crawl.max_depth", 1)?
            .set_default("crawl.timeout_seconds", 30)?
            .set_default("crawl.popular_word_count", 10)?
            .set_default("crawl.parallelism", 0)?
            // Default fetch settings
            .set_default("fetch.ignored_words", Vec::<String>::new())?
            .set_default("fetch.request_timeout_seconds", 10)?
            .set_default(
                "fetch.user_agent",
                "Mozilla/5.0 (compatible; wordcrawl/0.1; +https://github.com/Kirky-X)",
            )?
            // Default output settings (empty path means stdout)
            .set_default("output.result_path", "")?
            .set_default("output.profile_path", "")?
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("WORDCRAWL").separator("__"));

        builder.build()?.try_deserialize()
    }
}
