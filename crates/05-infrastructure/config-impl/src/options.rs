//! 自动装配选项

use crate::exclusion::ExclusionSet;
use crate::path_alias::PathAliasTable;
use autowire_common::{absolutize, ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 默认的类源文件扩展名
pub const DEFAULT_EXTENSION: &str = "ts";

/// 默认的 tsconfig 文件名，位于分析根目录的上一级
pub const DEFAULT_TSCONFIG_FILE: &str = "tsconfig.json";

/// 自动装配选项
///
/// 构造时校验分析根目录，之后只读。
#[derive(Debug, Clone)]
pub struct AutowireOptions {
    root_dir: PathBuf,
    tsconfig_path: PathBuf,
    extension: String,
    excludes: Vec<String>,
}

/// TOML 文件中的 `[autowire]` 节
#[derive(Debug, Deserialize)]
struct AutowireSection {
    root: Option<PathBuf>,
    tsconfig: Option<PathBuf>,
    extension: Option<String>,
    #[serde(default)]
    exclude: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct OptionsFile {
    autowire: AutowireSection,
}

impl AutowireOptions {
    /// 创建新的选项，分析根目录必须存在
    pub fn new<P: AsRef<Path>>(root_dir: P) -> ConfigResult<Self> {
        let root_dir = root_dir.as_ref();
        if root_dir.as_os_str().is_empty() {
            return Err(ConfigError::RootNotSet);
        }
        if !root_dir.is_dir() {
            return Err(ConfigError::RootNotFound {
                path: root_dir.display().to_string(),
            });
        }

        let root_dir = root_dir.canonicalize()?;
        let tsconfig_path = root_dir
            .parent()
            .unwrap_or(&root_dir)
            .join(DEFAULT_TSCONFIG_FILE);

        debug!("分析根目录: {}", root_dir.display());
        Ok(Self {
            root_dir,
            tsconfig_path,
            extension: DEFAULT_EXTENSION.to_string(),
            excludes: Vec::new(),
        })
    }

    /// 从 TOML 文件加载选项，相对路径以该文件所在目录为基准
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        info!("加载自动装配配置文件: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let file: OptionsFile = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            source: Box::new(e),
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let section = file.autowire;
        let root = section.root.ok_or(ConfigError::RootNotSet)?;

        let mut options = Self::new(base_dir.join(root))?;
        if let Some(tsconfig) = section.tsconfig {
            options = options.with_tsconfig(base_dir.join(tsconfig));
        }
        if let Some(extension) = section.extension {
            options = options.with_extension(extension)?;
        }
        for relative in section.exclude {
            options.add_exclude(relative);
        }
        Ok(options)
    }

    /// 指定 tsconfig 文件位置，相对路径以当前工作目录为基准
    pub fn with_tsconfig<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.tsconfig_path = absolutize(path.as_ref());
        self
    }

    /// 指定类源文件扩展名（不含点）
    pub fn with_extension(mut self, extension: impl Into<String>) -> ConfigResult<Self> {
        let extension = extension.into();
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(ConfigError::invalid_option("类源文件扩展名不能为空"));
        }
        self.extension = extension.to_string();
        Ok(self)
    }

    /// 添加排除路径（相对于分析根目录）
    pub fn add_exclude(&mut self, relative_path: impl Into<String>) {
        let relative_path = relative_path.into();
        debug!("添加排除路径: {}", relative_path);
        self.excludes.push(relative_path);
    }

    /// 链式添加排除路径
    pub fn exclude(mut self, relative_path: impl Into<String>) -> Self {
        self.add_exclude(relative_path);
        self
    }

    /// 分析根目录
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// tsconfig 文件位置
    pub fn tsconfig_path(&self) -> &Path {
        &self.tsconfig_path
    }

    /// 类源文件扩展名
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// 已登记的排除路径
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// 冻结为不可变的排除集合
    pub fn exclusion_set(&self) -> ExclusionSet {
        ExclusionSet::new(&self.root_dir, &self.excludes)
    }

    /// 加载路径别名表
    pub fn load_path_aliases(&self) -> PathAliasTable {
        PathAliasTable::load(&self.tsconfig_path)
    }
}
