// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashMap;
use std::collections::HashMap;

/// 词频汇总表
///
/// 一次爬取调用内跨所有页面的并发安全词频累加器。
/// 爬取期间只写入，结束后只读取一次用于排名。
#[derive(Debug, Default)]
pub struct WordCountAggregate {
    counts: DashMap<String, u64>,
}

impl WordCountAggregate {
    /// 创建空的汇总表
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并单个页面的词频
    ///
    /// 每个键的累加在其分片锁内完成，并发合并不会丢失更新。
    pub fn merge(&self, page_counts: HashMap<String, u64>) {
        for (word, count) in page_counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }

    /// 汇总表是否为空
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 对汇总结果排名并截断
    ///
    /// 排序规则：出现次数降序，次数相同时词长降序，仍相同时按字典序升序。
    /// 必须在所有合并完成之后调用一次。
    ///
    /// # 参数
    ///
    /// * `limit` - 保留的条目数上限
    pub fn rank(&self, limit: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();

        ranked.sort_unstable_by(|(a_word, a_count), (b_word, b_count)| {
            b_count
                .cmp(a_count)
                .then_with(|| b_word.chars().count().cmp(&a_word.chars().count()))
                .then_with(|| a_word.cmp(b_word))
        });
        ranked.truncate(limit);
        ranked
    }
}
