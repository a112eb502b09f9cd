//! # 依赖注入具体实现
//!
//! 提供内存中的服务定义容器和 JSON 清单导出器

pub mod manifest;

pub use manifest::JsonManifestExporter;

use autowire_common::{Definition, ServiceIdentifier};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use di_abstractions::DefinitionContainer;
use tracing::{debug, info};

/// 具体的服务定义容器实现
///
/// 定义和别名分别保存在 `DashMap` 中，可被多个分析任务并发写入。
#[derive(Debug, Default)]
pub struct DiContainerImpl {
    /// 服务定义
    definitions: DashMap<ServiceIdentifier, Definition>,
    /// 别名 -> 服务标识符
    aliases: DashMap<ServiceIdentifier, ServiceIdentifier>,
}

impl DiContainerImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 已注册的服务定义数量
    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// 已注册的别名数量
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

impl DefinitionContainer for DiContainerImpl {
    fn set_definition(&self, id: ServiceIdentifier, definition: Definition) {
        info!("注册服务定义: {}", id);
        self.definitions.insert(id, definition);
    }

    fn set_alias(&self, alias: ServiceIdentifier, id: ServiceIdentifier) {
        debug!("注册别名: {} -> {}", alias, id);
        self.aliases.insert(alias, id);
    }

    fn has_alias(&self, alias: &ServiceIdentifier) -> bool {
        self.aliases.contains_key(alias)
    }

    fn try_set_alias(&self, alias: ServiceIdentifier, id: ServiceIdentifier) -> bool {
        match self.aliases.entry(alias) {
            Entry::Occupied(existing) => {
                debug!(
                    "别名 {} 已指向 {}，忽略 {}",
                    existing.key(),
                    existing.get(),
                    id
                );
                false
            }
            Entry::Vacant(slot) => {
                debug!("注册别名: {} -> {}", slot.key(), id);
                slot.insert(id);
                true
            }
        }
    }

    fn definition(&self, id: &ServiceIdentifier) -> Option<Definition> {
        self.definitions.get(id).map(|entry| entry.value().clone())
    }

    fn alias(&self, alias: &ServiceIdentifier) -> Option<ServiceIdentifier> {
        self.aliases.get(alias).map(|entry| entry.value().clone())
    }

    fn definitions(&self) -> Vec<(ServiceIdentifier, Definition)> {
        let mut all: Vec<_> = self
            .definitions
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }

    fn aliases(&self) -> Vec<(ServiceIdentifier, ServiceIdentifier)> {
        let mut all: Vec<_> = self
            .aliases
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        all.sort();
        all
    }
}
