//! 自动装配编排

use crate::alias::AliasRegistrar;
use crate::assembler::DefinitionAssembler;
use crate::locator::locate_class;
use crate::namespace::NamespaceResolver;
use crate::report::ProcessReport;
use crate::resolver::IdentifierResolver;
use crate::syntax::parse_source;
use crate::walker::TreeWalker;
use autowire_common::{AutowireError, AutowireResult, FileOutcome, SkipReason};
use config_impl::AutowireOptions;
use di_abstractions::{DefinitionContainer, ManifestExporter};
use futures::future::join_all;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 自动装配引擎
///
/// 构造时加载路径别名表；`process()` 遍历源码树，每个文件一个任务并发分析，
/// 全部完成后调用一次清单导出器。
pub struct Autowire {
    container: Arc<dyn DefinitionContainer>,
    options: AutowireOptions,
    resolver: Arc<IdentifierResolver>,
    exporter: Option<Arc<dyn ManifestExporter>>,
}

impl Autowire {
    /// 创建新的自动装配引擎
    pub fn new(container: Arc<dyn DefinitionContainer>, options: AutowireOptions) -> Self {
        let aliases = options.load_path_aliases();
        debug!(
            "从 {} 加载了 {} 个路径别名",
            options.tsconfig_path().display(),
            aliases.entries().len()
        );
        let resolver = IdentifierResolver::new(NamespaceResolver::new(options.root_dir()), aliases);

        Self {
            container,
            options,
            resolver: Arc::new(resolver),
            exporter: None,
        }
    }

    /// 设置清单导出器
    pub fn with_manifest_exporter(mut self, exporter: Arc<dyn ManifestExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// 设置清单导出器
    pub fn set_manifest_exporter(&mut self, exporter: Arc<dyn ManifestExporter>) {
        self.exporter = Some(exporter);
    }

    /// 添加排除路径（相对于分析根目录），必须在 `process()` 之前调用
    pub fn add_exclude(&mut self, relative_path: impl Into<String>) {
        self.options.add_exclude(relative_path);
    }

    /// 当前选项
    pub fn options(&self) -> &AutowireOptions {
        &self.options
    }

    /// 目标容器
    pub fn container(&self) -> &Arc<dyn DefinitionContainer> {
        &self.container
    }

    /// 处理整个源码树
    ///
    /// 单个文件的失败只体现在报告中，不会中断处理。只有导出器失败会返回错误。
    pub async fn process(&self) -> AutowireResult<ProcessReport> {
        let root = self.options.root_dir().to_path_buf();
        info!("开始自动装配: {}", root.display());

        let walker = TreeWalker::new(&root, self.options.exclusion_set());
        let files = tokio::task::spawn_blocking(move || walker.files().collect::<Vec<_>>())
            .await
            .map_err(|e| AutowireError::Walk {
                message: e.to_string(),
            })?;
        debug!("发现 {} 个候选文件", files.len());

        let analyzer = Arc::new(FileAnalyzer {
            container: Arc::clone(&self.container),
            resolver: Arc::clone(&self.resolver),
            extension: self.options.extension().to_string(),
        });

        let handles: Vec<_> = files
            .into_iter()
            .map(|path| {
                let analyzer = Arc::clone(&analyzer);
                tokio::spawn(async move { analyzer.analyze(path).await })
            })
            .collect();

        let report: ProcessReport = join_all(handles)
            .await
            .into_iter()
            .map(|result| {
                result.unwrap_or_else(|e| {
                    warn!("分析任务异常终止: {}", e);
                    SkipReason::TaskFailed.into()
                })
            })
            .collect();

        info!("自动装配完成: {}", report);

        if let Some(exporter) = &self.exporter {
            info!("调用清单导出器: {}", exporter.name());
            exporter.export(self.container.as_ref()).await?;
        }

        Ok(report)
    }
}

/// 单文件分析器，在所有任务之间共享
struct FileAnalyzer {
    container: Arc<dyn DefinitionContainer>,
    resolver: Arc<IdentifierResolver>,
    extension: String,
}

impl FileAnalyzer {
    async fn analyze(&self, path: PathBuf) -> FileOutcome {
        match self.try_analyze(&path).await {
            Ok(outcome) => outcome,
            Err(reason) => {
                debug!("跳过 {}: {}", path.display(), reason);
                reason.into()
            }
        }
    }

    async fn try_analyze(&self, path: &Path) -> Result<FileOutcome, SkipReason> {
        if path.extension().and_then(OsStr::to_str) != Some(self.extension.as_str()) {
            return Err(SkipReason::UnsupportedExtension);
        }

        let namespace = self
            .resolver
            .namespaces()
            .namespace_of(path)
            .map_err(|_| SkipReason::MalformedPath)?;

        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            warn!("读取文件 {} 失败: {}", path.display(), e);
            SkipReason::ReadFailed
        })?;

        let file = parse_source(&source).map_err(|e| {
            debug!("解析 {} 失败: {}", path.display(), e);
            SkipReason::ParseFailed
        })?;

        let class =
            locate_class(&file, namespace.depth()).ok_or(SkipReason::NoExportedClass)?;

        let assembled = DefinitionAssembler::new(&self.resolver).assemble(class, &file, path)?;
        let id = assembled.id;
        debug!("注册服务 {} ({})", id, path.display());
        self.container.set_definition(id.clone(), assembled.definition);

        let aliases = AliasRegistrar::new(&self.resolver, self.container.as_ref())
            .register(class, &file, path, &id);

        Ok(FileOutcome::Registered {
            id,
            aliases,
            skipped_arguments: assembled.skipped_arguments,
        })
    }
}
