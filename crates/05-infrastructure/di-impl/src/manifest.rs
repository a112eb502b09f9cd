//! JSON 清单导出器

use async_trait::async_trait;
use autowire_common::{Definition, ExportResult};
use di_abstractions::{DefinitionContainer, ManifestExporter};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// 清单文件结构
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    services: BTreeMap<&'a str, &'a Definition>,
    aliases: BTreeMap<&'a str, &'a str>,
}

/// 将容器内容写为 JSON 文件的导出器
#[derive(Debug, Clone)]
pub struct JsonManifestExporter {
    output_path: PathBuf,
}

impl JsonManifestExporter {
    /// 创建新的导出器
    pub fn new<P: AsRef<Path>>(output_path: P) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    /// 输出文件路径
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 将容器渲染为 JSON 文本，键按字典序排列
    pub fn render(container: &dyn DefinitionContainer) -> ExportResult<String> {
        let definitions = container.definitions();
        let aliases = container.aliases();

        let manifest = Manifest {
            services: definitions
                .iter()
                .map(|(id, definition)| (id.as_str(), definition))
                .collect(),
            aliases: aliases
                .iter()
                .map(|(alias, id)| (alias.as_str(), id.as_str()))
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&manifest)?)
    }
}

#[async_trait]
impl ManifestExporter for JsonManifestExporter {
    async fn export(&self, container: &dyn DefinitionContainer) -> ExportResult<()> {
        let content = Self::render(container)?;

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.output_path, content).await?;

        info!("服务清单已写入: {}", self.output_path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "JsonManifestExporter"
    }
}
