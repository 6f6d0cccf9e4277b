// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 爬取结果
///
/// 一次爬取调用的最终产出，创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// 已排序并截断的热门词及其出现次数
    #[serde(serialize_with = "serialize_word_counts")]
    pub word_counts: Vec<(String, u64)>,
    /// 实际开始处理的去重URL数量
    pub urls_visited: usize,
}

// The ranked order is part of the contract, so the word counts serialize
// as a JSON object in ranking order rather than as an array of pairs.
fn serialize_word_counts<S>(counts: &[(String, u64)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for (word, count) in counts {
        map.serialize_entry(word, count)?;
    }
    map.end()
}
