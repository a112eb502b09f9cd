//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
///
/// 只在构造阶段出现，出现即拒绝运行。
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("未设置分析根目录，无法启用自动装配")]
    RootNotSet,

    #[error("分析根目录不存在或不是目录: {path}")]
    RootNotFound { path: String },

    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置项无效: {message}")]
    InvalidOption { message: String },
}

impl ConfigError {
    /// 创建配置项无效错误
    pub fn invalid_option(message: impl Into<String>) -> Self {
        Self::InvalidOption {
            message: message.into(),
        }
    }
}

/// 命名空间解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("路径不在分析根目录之下: {path} (根目录: {root})")]
    MalformedPath { path: String, root: String },
}

/// 清单导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("清单写入失败: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("清单序列化失败: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// 自动装配错误类型
#[derive(Error, Debug)]
pub enum AutowireError {
    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("清单导出失败: {source}")]
    Export {
        #[from]
        source: ExportError,
    },

    #[error("目录遍历失败: {message}")]
    Walk { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ExportResult<T> = Result<T, ExportError>;
pub type AutowireResult<T> = Result<T, AutowireError>;
