// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use regex::Regex;

/// URL忽略规则集
///
/// 根据配置的正则模式判断URL是否应当跳过处理。
/// 模式必须匹配整个URL，而不是其中的子串。
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    patterns: Vec<Regex>,
}

impl IgnoreRuleSet {
    /// 编译忽略规则
    ///
    /// # 参数
    ///
    /// * `patterns` - 正则模式列表
    ///
    /// # 返回值
    ///
    /// * `Ok(IgnoreRuleSet)` - 编译好的规则集
    /// * `Err(regex::Error)` - 模式非法
    pub fn new(patterns: &[String]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            // Anchor each pattern so it must match the whole URL.
            .map(|p| Regex::new(&format!("^(?:{})$", p)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// 判断URL是否应当忽略
    ///
    /// 空规则集不忽略任何URL
    pub fn should_ignore(&self, url: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(url))
    }
}
