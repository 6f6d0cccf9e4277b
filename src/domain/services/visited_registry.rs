// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashSet;

/// 已访问URL登记表
///
/// 一次爬取调用内的并发安全URL去重集合。
/// 对同一个URL，至多只有一个任务能够认领成功。
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    urls: DashSet<String>,
}

impl VisitedRegistry {
    /// 创建空的登记表
    pub fn new() -> Self {
        Self::default()
    }

    /// 认领URL
    ///
    /// 登记必须是单个原子步骤：先查后插在并发下会导致重复处理。
    ///
    /// # 返回值
    ///
    /// 首次认领返回true，URL已被认领过则返回false
    pub fn claim(&self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    /// 已认领的去重URL数量
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// 登记表是否为空
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
