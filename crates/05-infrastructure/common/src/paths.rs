//! 路径工具

use std::path::{Component, Path, PathBuf};

/// 按词法规则规范化路径，折叠 `.` 与 `..`，不访问文件系统
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component.as_os_str()),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// 转换为绝对路径
///
/// 存在的路径取规范路径（解析符号链接），否则以当前工作目录为基准按词法规范化。
pub fn absolutize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return normalize_lexically(path);
    }
    std::env::current_dir().map_or_else(
        |_| normalize_lexically(path),
        |cwd| normalize_lexically(&cwd.join(path)),
    )
}
