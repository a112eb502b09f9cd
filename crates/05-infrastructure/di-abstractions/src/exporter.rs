//! 清单导出抽象接口

use crate::container::DefinitionContainer;
use async_trait::async_trait;
use autowire_common::ExportResult;

/// 清单导出器 trait
///
/// 在全部文件处理完成后被调用一次，接收已填充完毕的容器。
#[async_trait]
pub trait ManifestExporter: Send + Sync {
    /// 导出容器内容
    async fn export(&self, container: &dyn DefinitionContainer) -> ExportResult<()>;

    /// 获取导出器名称
    fn name(&self) -> &str;
}
