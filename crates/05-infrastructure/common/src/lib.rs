//! # Autowire Common
//!
//! 这个 crate 提供了自动装配引擎在各层之间共享的数据模型和错误类型。
//!
//! ## 核心类型
//!
//! - [`ServiceIdentifier`] - 服务标识符
//! - [`Reference`] - 指向其他服务的符号引用
//! - [`Definition`] - 待注册到容器的服务定义
//! - [`SkipReason`] - 单个文件被跳过的原因
//!
//! ## 设计原则
//!
//! - 纯静态分析，不加载、不执行目标模块
//! - 单个文件失败只影响该文件
//! - 同一路径与类名总是得到同一标识符

pub mod discovery;
pub mod errors;
pub mod metadata;
pub mod paths;

pub use discovery::*;
pub use errors::*;
pub use metadata::*;
pub use paths::{absolutize, normalize_lexically};
