//! 排除规则

use autowire_common::normalize_lexically;
use std::path::Path;

/// 不可变的排除集合
///
/// 任何路径只要以子串形式包含其中一个前缀就会被丢弃。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    prefixes: Vec<String>,
}

impl ExclusionSet {
    /// 由分析根目录和相对路径列表构建排除集合
    pub fn new<I, S>(root: &Path, relative_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes = relative_paths
            .into_iter()
            .map(|relative| {
                normalize_lexically(&root.join(relative.as_ref()))
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        Self { prefixes }
    }

    /// 检查路径是否被排除
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.prefixes.is_empty() {
            return false;
        }
        let path = path.to_string_lossy();
        self.prefixes.iter().any(|prefix| path.contains(prefix.as_str()))
    }

    /// 已注册的排除前缀
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}
