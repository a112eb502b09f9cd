//! 源码树遍历

use config_impl::ExclusionSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// 源码树遍历器
///
/// 深度优先、惰性地产出根目录下所有文件的绝对路径。同一目录内按文件名排序，
/// 命中排除集合的路径（包括整个目录）被静默丢弃。不读取文件内容。
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
    exclusions: ExclusionSet,
}

impl TreeWalker {
    /// 创建新的遍历器
    pub fn new<P: AsRef<Path>>(root: P, exclusions: ExclusionSet) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclusions,
        }
    }

    /// 遍历根目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 惰性文件序列
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                let excluded = self.exclusions.is_excluded(entry.path());
                if excluded {
                    debug!("排除路径: {}", entry.path().display());
                }
                !excluded
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("读取目录项失败: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
    }
}
