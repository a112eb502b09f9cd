//! 服务发现结果
//!
//! 用显式的结果类型代替异常来表达“跳过此文件/此参数”

use crate::metadata::ServiceIdentifier;
use std::fmt;

/// 文件被跳过的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// 不是可识别的类源文件扩展名
    UnsupportedExtension,
    /// 读取文件失败
    ReadFailed,
    /// 语法解析失败
    ParseFailed,
    /// 没有找到导出的类声明
    NoExportedClass,
    /// 文件路径不在分析根目录之下
    MalformedPath,
    /// 分析任务异常终止
    TaskFailed,
}

impl SkipReason {
    /// 原因的简短名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedExtension => "unsupported_extension",
            Self::ReadFailed => "read_failed",
            Self::ParseFailed => "parse_failed",
            Self::NoExportedClass => "no_exported_class",
            Self::MalformedPath => "malformed_path",
            Self::TaskFailed => "task_failed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 类型引用无法解析的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// 没有导入语句绑定该名称
    NoImport { name: String },
    /// 导入目标不在分析根目录之下
    OutsideRoot { path: String },
    /// 不支持的类型形式（例如父类或接口使用限定名）
    UnsupportedForm { text: String },
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoImport { name } => write!(f, "没有导入语句绑定 {name}"),
            Self::OutsideRoot { path } => write!(f, "导入目标不在分析根目录之下: {path}"),
            Self::UnsupportedForm { text } => write!(f, "不支持的类型形式: {text}"),
        }
    }
}

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// 成功注册服务定义
    Registered {
        /// 注册使用的标识符
        id: ServiceIdentifier,
        /// 本次注册的别名数量
        aliases: usize,
        /// 被跳过的构造函数参数数量
        skipped_arguments: usize,
    },
    /// 文件被跳过
    Skipped(SkipReason),
}

impl FileOutcome {
    /// 是否成功注册
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }
}

impl From<SkipReason> for FileOutcome {
    fn from(reason: SkipReason) -> Self {
        Self::Skipped(reason)
    }
}
