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

use crate::config::settings::FetchSettings;
use crate::engines::traits::{EngineError, PageContent, PageParser};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::debug;
use url::Url;

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// 抓取引擎
///
/// 基于reqwest和scraper实现的页面抓取与分词解析引擎
pub struct FetchEngine {
    client: reqwest::Client,
    ignored_words: Vec<Regex>,
}

impl FetchEngine {
    /// 创建新的抓取引擎实例
    ///
    /// # 参数
    ///
    /// * `settings` - 抓取配置
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchEngine)` - 抓取引擎实例
    /// * `Err(EngineError)` - HTTP客户端构建失败或单词模式非法
    pub fn new(settings: &FetchSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()?;

        let ignored_words = settings
            .ignored_words
            .iter()
            // Word filters match whole tokens, same as the URL ignore rules.
            .map(|p| Regex::new(&format!("^(?:{})$", p)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            client,
            ignored_words,
        })
    }

    /// 统计文档中的词频
    ///
    /// 跳过script/style/noscript内的文本；单词去除首尾非字母数字字符并转为小写，
    /// 空单词和匹配忽略模式的单词不计入
    fn collect_words(&self, document: &Html) -> HashMap<String, u64> {
        let mut counts = HashMap::new();

        for node in document.tree.nodes() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            if let Some(parent) = node.parent().and_then(|p| p.value().as_element()) {
                if matches!(parent.name(), "script" | "style" | "noscript") {
                    continue;
                }
            }

            for token in text.split_whitespace() {
                let token = token.trim_matches(|c: char| !c.is_alphanumeric());
                if token.is_empty() {
                    continue;
                }
                let word = token.to_lowercase();
                if self.ignored_words.iter().any(|p| p.is_match(&word)) {
                    continue;
                }
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        counts
    }
}

/// 从文档中提取出站链接
///
/// 相对链接根据最终响应URL解析为绝对链接，仅保留http/https，
/// 去掉fragment以改进去重，并按首次出现的顺序去重
fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        // Ignore fragment identifiers, mailto and javascript links
        if href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("javascript:")
        {
            continue;
        }

        let Ok(mut url) = base.join(href) else {
            continue;
        };
        if url.scheme() != "http" && url.scheme() != "https" {
            continue;
        }
        url.set_fragment(None);

        let url = url.to_string();
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    links
}

#[async_trait]
impl PageParser for FetchEngine {
    /// 抓取并解析单个页面
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(PageContent)` - 页面词频与出站链接
    /// * `Err(EngineError)` - 请求失败、非成功状态码或非HTML内容
    async fn parse(&self, url: &str) -> Result<PageContent, EngineError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        // A missing content type is treated as HTML; anything else must say so
        if !content_type.is_empty() && !content_type.contains("text/html") {
            return Err(EngineError::UnsupportedContent(content_type));
        }

        // Relative links resolve against the final URL after redirects
        let base = response.url().clone();
        let body = response.text().await?;

        let document = Html::parse_document(&body);
        let word_counts = self.collect_words(&document);
        let links = extract_links(&document, &base);

        debug!(
            url = %url,
            words = word_counts.len(),
            links = links.len(),
            "parsed page"
        );

        Ok(PageContent { word_counts, links })
    }

    /// 引擎名称
    fn name(&self) -> &'static str {
        "fetch"
    }
}
