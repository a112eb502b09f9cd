//! 命名空间解析

use autowire_common::{Namespace, NamespaceError, ServiceIdentifier};
use std::path::{Component, Path, PathBuf};

/// 命名空间解析器
///
/// 只看分析根目录之下的路径部分：去掉文件名，保留首字母大写的目录。
#[derive(Debug, Clone)]
pub struct NamespaceResolver {
    root: PathBuf,
}

impl NamespaceResolver {
    /// 创建新的命名空间解析器
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// 分析根目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 计算文件所在的命名空间
    pub fn namespace_of(&self, path: &Path) -> Result<Namespace, NamespaceError> {
        let relative = path
            .strip_prefix(&self.root)
            .map_err(|_| NamespaceError::MalformedPath {
                path: path.display().to_string(),
                root: self.root.display().to_string(),
            })?;

        let mut components: Vec<&str> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .collect();
        components.pop();

        Ok(Namespace::new(components.into_iter().filter(|segment| {
            segment.chars().next().is_some_and(char::is_uppercase)
        })))
    }

    /// 由文件路径和类名计算服务标识符
    pub fn identifier_for(
        &self,
        path: &Path,
        class_name: &str,
    ) -> Result<ServiceIdentifier, NamespaceError> {
        let namespace = self.namespace_of(path)?;
        Ok(ServiceIdentifier::new(&namespace, class_name))
    }
}
