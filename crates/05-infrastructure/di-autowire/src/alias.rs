//! 接口别名注册

use crate::resolver::IdentifierResolver;
use crate::syntax::{ClassDecl, SourceFile};
use autowire_common::ServiceIdentifier;
use di_abstractions::DefinitionContainer;
use std::path::Path;
use tracing::debug;

/// 接口别名注册器
///
/// 同一接口只有第一个注册的实现类生效，由容器的 `try_set_alias` 原子保证。
pub struct AliasRegistrar<'a> {
    resolver: &'a IdentifierResolver,
    container: &'a dyn DefinitionContainer,
}

impl<'a> AliasRegistrar<'a> {
    /// 创建新的别名注册器
    pub fn new(resolver: &'a IdentifierResolver, container: &'a dyn DefinitionContainer) -> Self {
        Self {
            resolver,
            container,
        }
    }

    /// 为类实现的每个接口注册别名，返回实际注册的数量
    pub fn register(
        &self,
        class: &ClassDecl,
        file: &SourceFile,
        path: &Path,
        service_id: &ServiceIdentifier,
    ) -> usize {
        let mut registered = 0;

        for interface in &class.implements {
            let alias = match self.resolver.resolve_bare_type(interface, file, path) {
                Ok(alias) => alias,
                Err(reason) => {
                    debug!("{} 实现的接口 {} 未解析: {}", service_id, interface.text(), reason);
                    continue;
                }
            };

            if self.container.try_set_alias(alias.clone(), service_id.clone()) {
                debug!("注册别名 {} -> {}", alias, service_id);
                registered += 1;
            } else {
                debug!("别名 {} 已存在，忽略 {}", alias, service_id);
            }
        }

        registered
    }
}
