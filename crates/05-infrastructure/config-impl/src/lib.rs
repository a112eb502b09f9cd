//! # Configuration Implementation
//!
//! 自动装配引擎的配置层，在构造阶段一次性加载，之后不再变化。
//!
//! ## 主要组件
//!
//! - [`AutowireOptions`] - 分析根目录、tsconfig 位置、排除列表
//! - [`PathAliasTable`] - 从 tsconfig 的 `compilerOptions.paths` 加载的路径别名表
//! - [`ExclusionSet`] - 遍历阶段使用的不可变排除集合

pub mod exclusion;
pub mod options;
pub mod path_alias;

pub use exclusion::*;
pub use options::*;
pub use path_alias::*;
