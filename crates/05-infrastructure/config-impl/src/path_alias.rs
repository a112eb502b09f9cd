//! tsconfig 路径别名表

use autowire_common::{absolutize, normalize_lexically};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 单条路径别名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAlias {
    /// 去掉通配符后的字面前缀，例如 `@app/`
    pub prefix: String,
    /// 去掉通配符后的替换前缀，例如 `src/`
    pub replacement: String,
}

/// 路径别名表
///
/// 条目顺序与配置文件中的声明顺序一致，第一条匹配的条目生效。
/// 配置文件缺失或无法解析时得到空表。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAliasTable {
    entries: Vec<PathAlias>,
    /// 命中别名后使用的解析根目录
    resolution_root: PathBuf,
}

impl PathAliasTable {
    /// 从 tsconfig 文件加载，任何失败都降级为空表
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("未读取到 tsconfig {}: {}", path.display(), e);
                return Self::default();
            }
        };

        // 别名的解析根目录必须与规范化后的分析根目录可比
        let path = absolutize(path);
        let config_dir = path.parent().unwrap_or_else(|| Path::new(""));
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => {
                let table = Self::from_value(&value, config_dir);
                debug!(
                    "从 {} 加载了 {} 条路径别名",
                    path.display(),
                    table.entries.len()
                );
                table
            }
            Err(e) => {
                warn!("tsconfig 解析失败，忽略路径别名 {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// 从已解析的 tsconfig 内容构建
    pub fn from_value(value: &Value, config_dir: &Path) -> Self {
        let compiler_options = value.get("compilerOptions");

        let resolution_root = match compiler_options
            .and_then(|options| options.get("baseUrl"))
            .and_then(Value::as_str)
        {
            Some(base_url) => normalize_lexically(&config_dir.join(base_url)),
            None => config_dir.to_path_buf(),
        };

        let mut entries = Vec::new();
        if let Some(Value::Object(paths)) = compiler_options.and_then(|options| options.get("paths")) {
            for (pattern, targets) in paths {
                let Some(target) = targets
                    .as_array()
                    .and_then(|targets| targets.first())
                    .and_then(Value::as_str)
                else {
                    debug!("路径别名 {} 没有可用的替换目标，忽略", pattern);
                    continue;
                };

                let prefix = strip_wildcard(pattern);
                if prefix.is_empty() {
                    debug!("路径别名 {} 没有字面前缀，忽略", pattern);
                    continue;
                }

                entries.push(PathAlias {
                    prefix: prefix.to_string(),
                    replacement: strip_wildcard(target).to_string(),
                });
            }
        }

        Self {
            entries,
            resolution_root,
        }
    }

    /// 使用第一条匹配的别名重写导入路径
    ///
    /// 返回重写后的路径和新的解析根目录；没有匹配时返回 `None`。
    pub fn remap(&self, import_path: &str) -> Option<(String, &Path)> {
        self.entries
            .iter()
            .find(|alias| import_path.contains(alias.prefix.as_str()))
            .map(|alias| {
                (
                    import_path.replacen(alias.prefix.as_str(), &alias.replacement, 1),
                    self.resolution_root.as_path(),
                )
            })
    }

    /// 别名条目
    pub fn entries(&self) -> &[PathAlias] {
        &self.entries
    }

    /// 命中别名后使用的解析根目录
    pub fn resolution_root(&self) -> &Path {
        &self.resolution_root
    }

    /// 是否为空表
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn strip_wildcard(pattern: &str) -> &str {
    pattern.strip_suffix('*').unwrap_or(pattern)
}
