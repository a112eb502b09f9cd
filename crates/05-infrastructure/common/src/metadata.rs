//! 元数据定义
//!
//! 提供服务标识符、引用和服务定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 逻辑命名空间
///
/// 由文件路径中位于分析根目录之下、首字母大写的目录组成，不含文件名本身。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// 创建新的命名空间
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// 命名空间段
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// 嵌套深度
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// 是否为根命名空间
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// 服务标识符
///
/// 容器中注册服务定义所用的键。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceIdentifier(String);

impl ServiceIdentifier {
    /// 由命名空间和类名计算标识符
    pub fn new(namespace: &Namespace, class_name: &str) -> Self {
        if namespace.is_root() {
            Self(class_name.to_string())
        } else {
            Self(format!("{namespace}.{class_name}"))
        }
    }

    /// 直接使用已有字符串
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 标识符字符串
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceIdentifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// 对另一个服务的符号引用
///
/// 只保存标识符，真正的解析在容器实例化阶段完成。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    id: ServiceIdentifier,
}

impl Reference {
    /// 创建新的引用
    pub fn new(id: ServiceIdentifier) -> Self {
        Self { id }
    }

    /// 被引用服务的标识符
    pub fn id(&self) -> &ServiceIdentifier {
        &self.id
    }
}

impl From<ServiceIdentifier> for Reference {
    fn from(id: ServiceIdentifier) -> Self {
        Self::new(id)
    }
}

/// 类的静态符号
///
/// 代替运行时加载模块读取类名，只记录解析得到的信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTarget {
    /// 类名
    pub class_name: String,
    /// 声明该类的源文件
    pub source_path: PathBuf,
}

impl ClassTarget {
    /// 创建新的类符号
    pub fn new(class_name: impl Into<String>, source_path: impl AsRef<Path>) -> Self {
        Self {
            class_name: class_name.into(),
            source_path: source_path.as_ref().to_path_buf(),
        }
    }
}

/// 服务定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// 目标类
    pub target: ClassTarget,
    /// 是否为抽象类
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    /// 父类服务标识符
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ServiceIdentifier>,
    /// 构造函数参数引用（按声明顺序）
    pub arguments: Vec<Reference>,
}

impl Definition {
    /// 创建新的服务定义
    pub fn new(target: ClassTarget) -> Self {
        Self {
            target,
            is_abstract: false,
            parent: None,
            arguments: Vec::new(),
        }
    }

    /// 设置抽象标记
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// 设置父类
    pub fn with_parent(mut self, parent: ServiceIdentifier) -> Self {
        self.parent = Some(parent);
        self
    }

    /// 追加构造函数参数
    pub fn add_argument(&mut self, reference: Reference) {
        self.arguments.push(reference);
    }

    /// 参数引用的标识符列表
    pub fn argument_ids(&self) -> Vec<&str> {
        self.arguments.iter().map(|r| r.id().as_str()).collect()
    }
}
