//! # 自动装配引擎
//!
//! 静态分析 TypeScript 源码树，发现服务类并把它们注册到依赖注入容器中，
//! 不需要手写任何服务配置。
//!
//! ## 处理流水线
//!
//! - [`TreeWalker`] - 遍历候选文件，应用排除规则
//! - [`NamespaceResolver`] - 由文件路径计算逻辑命名空间
//! - [`syntax`] - 把 tree-sitter 语法树降级为带标签的类型化 AST
//! - [`locate_class`] - 找到文件导出的类声明
//! - [`IdentifierResolver`] - 把类型名解析为服务标识符
//! - [`DefinitionAssembler`] - 组装服务定义
//! - [`AliasRegistrar`] - 为实现的接口注册别名
//! - [`Autowire`] - 并发驱动整个流水线
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use config_impl::AutowireOptions;
//! use di_autowire::Autowire;
//! use di_impl::DiContainerImpl;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let container = Arc::new(DiContainerImpl::new());
//!     let mut autowire = Autowire::new(container.clone(), AutowireOptions::new("./src")?);
//!     autowire.add_exclude("Legacy");
//!
//!     let report = autowire.process().await?;
//!     println!("注册了 {} 个服务", report.registered_count());
//!     Ok(())
//! }
//! ```

pub mod alias;
pub mod assembler;
pub mod autowire;
pub mod locator;
pub mod namespace;
pub mod report;
pub mod resolver;
pub mod syntax;
pub mod walker;

pub use alias::AliasRegistrar;
pub use assembler::{AssembledClass, DefinitionAssembler};
pub use autowire::Autowire;
pub use locator::locate_class;
pub use namespace::NamespaceResolver;
pub use report::ProcessReport;
pub use resolver::IdentifierResolver;
pub use walker::TreeWalker;
