//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义自动装配引擎与外部容器之间的窄接口。
//!
//! ## 核心接口
//!
//! - [`DefinitionContainer`] - 服务定义与别名的存储接口
//! - [`ManifestExporter`] - 将已完成的容器导出为静态清单的接口

pub mod container;
pub mod exporter;

pub use container::*;
pub use exporter::*;
