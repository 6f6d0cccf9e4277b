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

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// 引擎错误类型
///
/// 解析单个页面的失败只影响该页面，不会中断整个爬取
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 非成功的HTTP状态码
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    /// 不支持的内容类型
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),
    /// 非法的单词过滤模式
    #[error("Invalid word pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// 页面解析结果
///
/// 单个页面的词频和出站链接
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// 页面内的词频统计
    pub word_counts: HashMap<String, u64>,
    /// 页面内发现的出站链接（按出现顺序去重）
    pub links: Vec<String>,
}

/// 页面解析引擎特质
#[async_trait]
pub trait PageParser: Send + Sync {
    /// 抓取并解析单个页面
    async fn parse(&self, url: &str) -> Result<PageContent, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
