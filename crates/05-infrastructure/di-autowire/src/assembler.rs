//! 服务定义组装

use crate::resolver::IdentifierResolver;
use crate::syntax::{ClassDecl, Parameter, SourceFile};
use autowire_common::{
    ClassTarget, Definition, Reference, ServiceIdentifier, SkipReason, Unresolved,
};
use std::path::Path;
use tracing::debug;

/// 组装完成的类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledClass {
    /// 注册使用的服务标识符（命名空间 + 类名）
    pub id: ServiceIdentifier,
    pub definition: Definition,
    /// 无法解析而被跳过的构造参数数量
    pub skipped_arguments: usize,
}

/// 服务定义组装器
#[derive(Debug, Clone, Copy)]
pub struct DefinitionAssembler<'a> {
    resolver: &'a IdentifierResolver,
}

impl<'a> DefinitionAssembler<'a> {
    /// 创建新的组装器
    pub fn new(resolver: &'a IdentifierResolver) -> Self {
        Self { resolver }
    }

    /// 为类组装服务定义
    ///
    /// 父类和构造参数解析失败都不影响定义本身：父类留空，参数直接跳过。
    pub fn assemble(
        &self,
        class: &ClassDecl,
        file: &SourceFile,
        path: &Path,
    ) -> Result<AssembledClass, SkipReason> {
        let id = self
            .resolver
            .identifier_for(path, &class.name)
            .map_err(|_| SkipReason::MalformedPath)?;

        let mut definition =
            Definition::new(ClassTarget::new(&class.name, path)).with_abstract(class.is_abstract);

        if let Some(superclass) = &class.superclass {
            match self.resolver.resolve_bare_type(superclass, file, path) {
                Ok(parent) => definition = definition.with_parent(parent),
                Err(reason) => debug!("{} 的父类未解析: {}", id, reason),
            }
        }

        let mut skipped_arguments = 0;
        if let Some(constructor) = class.constructor() {
            for parameter in &constructor.parameters {
                match self.resolve_parameter(parameter, file, path) {
                    Ok(argument) => definition.add_argument(Reference::new(argument)),
                    Err(reason) => {
                        skipped_arguments += 1;
                        debug!("{} 的构造参数 {} 被跳过: {}", id, parameter.name, reason);
                    }
                }
            }
        }

        Ok(AssembledClass {
            id,
            definition,
            skipped_arguments,
        })
    }

    fn resolve_parameter(
        &self,
        parameter: &Parameter,
        file: &SourceFile,
        path: &Path,
    ) -> Result<ServiceIdentifier, Unresolved> {
        let type_ref = parameter
            .type_ref
            .as_ref()
            .ok_or_else(|| Unresolved::UnsupportedForm {
                text: parameter.name.clone(),
            })?;
        self.resolver.resolve_argument_type(type_ref, file, path)
    }
}
