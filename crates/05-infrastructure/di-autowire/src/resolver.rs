//! 标识符解析
//!
//! 把类中引用的类型名（构造参数、父类、接口）解析回声明它的文件和服务标识符

use crate::namespace::NamespaceResolver;
use crate::syntax::{SourceFile, TypeRef};
use autowire_common::{normalize_lexically, NamespaceError, ServiceIdentifier, Unresolved};
use config_impl::PathAliasTable;
use std::path::{Path, PathBuf};
use tracing::trace;

/// 标识符解析器
#[derive(Debug, Clone)]
pub struct IdentifierResolver {
    namespaces: NamespaceResolver,
    aliases: PathAliasTable,
}

impl IdentifierResolver {
    /// 创建新的标识符解析器
    pub fn new(namespaces: NamespaceResolver, aliases: PathAliasTable) -> Self {
        Self {
            namespaces,
            aliases,
        }
    }

    /// 命名空间解析器
    pub fn namespaces(&self) -> &NamespaceResolver {
        &self.namespaces
    }

    /// 路径别名表
    pub fn aliases(&self) -> &PathAliasTable {
        &self.aliases
    }

    /// 由文件路径和类名计算服务标识符
    pub fn identifier_for(
        &self,
        path: &Path,
        class_name: &str,
    ) -> Result<ServiceIdentifier, NamespaceError> {
        self.namespaces.identifier_for(path, class_name)
    }

    /// 解析类型名
    ///
    /// `aka_name` 用于限定类型：导入语句绑定的是左侧的命名空间名称，
    /// 而计算标识符用的是右侧成员名称 `type_name`。
    pub fn resolve(
        &self,
        type_name: &str,
        file: &SourceFile,
        file_path: &Path,
        aka_name: Option<&str>,
    ) -> Result<ServiceIdentifier, Unresolved> {
        let local_name = aka_name.unwrap_or(type_name);
        let import = file
            .find_import(local_name)
            .ok_or_else(|| Unresolved::NoImport {
                name: local_name.to_string(),
            })?;

        let target = self.resolve_import_path(&import.source, file_path);
        trace!("{} 解析到 {}", type_name, target.display());

        self.identifier_for(&target, type_name)
            .map_err(|_| Unresolved::OutsideRoot {
                path: target.display().to_string(),
            })
    }

    /// 解析构造参数类型，支持简单名称和限定名称
    ///
    /// 限定名称 `A.B.C` 以最左侧的 `A` 查找导入语句，以 `C` 计算标识符。
    pub fn resolve_argument_type(
        &self,
        type_ref: &TypeRef,
        file: &SourceFile,
        file_path: &Path,
    ) -> Result<ServiceIdentifier, Unresolved> {
        match type_ref {
            TypeRef::Simple(name) => self.resolve(name, file, file_path, None),
            TypeRef::Qualified { qualifier, member } => {
                let aka_name = qualifier.first().map(String::as_str);
                self.resolve(member, file, file_path, aka_name)
            }
            TypeRef::Other(text) => Err(Unresolved::UnsupportedForm { text: text.clone() }),
        }
    }

    /// 解析父类或接口类型，只支持简单名称
    pub fn resolve_bare_type(
        &self,
        type_ref: &TypeRef,
        file: &SourceFile,
        file_path: &Path,
    ) -> Result<ServiceIdentifier, Unresolved> {
        match type_ref {
            TypeRef::Simple(name) => self.resolve(name, file, file_path, None),
            other => Err(Unresolved::UnsupportedForm { text: other.text() }),
        }
    }

    /// 把导入来源转换为绝对路径
    ///
    /// 命中路径别名时以别名的解析根目录为基准，否则以导入文件所在目录为基准。
    /// 来源一律按相对路径处理，`'events'` 这样的裸模块名同样拼接到文件所在目录。
    pub fn resolve_import_path(&self, import_source: &str, file_path: &Path) -> PathBuf {
        let (relative, root) = match self.aliases.remap(import_source) {
            Some((remapped, root)) => (remapped, root),
            None => (
                import_source.to_string(),
                file_path.parent().unwrap_or_else(|| Path::new("")),
            ),
        };

        normalize_lexically(&root.join(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_source;
    use serde_json::json;

    fn resolver_with_aliases(aliases: PathAliasTable) -> IdentifierResolver {
        IdentifierResolver::new(NamespaceResolver::new("/project/src"), aliases)
    }

    fn resolver() -> IdentifierResolver {
        resolver_with_aliases(PathAliasTable::default())
    }

    #[test]
    fn test_relative_import_resolves_to_identifier() {
        let file = parse_source("import Bar from './Bar';").unwrap();
        let id = resolver()
            .resolve("Bar", &file, Path::new("/project/src/Foo.ts"), None)
            .unwrap();
        assert_eq!(id.as_str(), "Bar");
    }

    #[test]
    fn test_parent_directory_import_keeps_namespace() {
        let file = parse_source("import { UserRepository } from '../User/UserRepository';")
            .unwrap();
        let id = resolver()
            .resolve(
                "UserRepository",
                &file,
                Path::new("/project/src/Domain/Order/OrderService.ts"),
                None,
            )
            .unwrap();
        assert_eq!(id.as_str(), "Domain.User.UserRepository");
    }

    #[test]
    fn test_missing_import_is_unresolved() {
        let file = parse_source("import Bar from './Bar';").unwrap();
        let result = resolver().resolve("Baz", &file, Path::new("/project/src/Foo.ts"), None);
        assert_eq!(
            result,
            Err(Unresolved::NoImport {
                name: "Baz".to_string()
            })
        );
    }

    #[test]
    fn test_bare_specifier_joins_file_directory() {
        let file = parse_source("import Bar from 'Bar';\nimport { EventEmitter } from 'events';")
            .unwrap();
        let resolver = resolver();

        let path = resolver.resolve_import_path("Bar", Path::new("/project/src/Foo.ts"));
        assert_eq!(path, Path::new("/project/src/Bar"));

        let bar = resolver
            .resolve("Bar", &file, Path::new("/project/src/Foo.ts"), None)
            .unwrap();
        assert_eq!(bar.as_str(), "Bar");

        let emitter = resolver
            .resolve(
                "EventEmitter",
                &file,
                Path::new("/project/src/Domain/Foo.ts"),
                None,
            )
            .unwrap();
        assert_eq!(emitter.as_str(), "Domain.EventEmitter");
    }

    #[test]
    fn test_import_outside_root_is_unresolved() {
        let file = parse_source("import Shared from '../../shared/Shared';").unwrap();
        let result = resolver().resolve("Shared", &file, Path::new("/project/src/Foo.ts"), None);
        assert!(matches!(result, Err(Unresolved::OutsideRoot { .. })));
    }

    #[test]
    fn test_alias_remaps_against_config_directory() {
        let table = PathAliasTable::from_value(
            &json!({ "compilerOptions": { "paths": { "@app/*": ["src/*"] } } }),
            Path::new("/project"),
        );
        let resolver = resolver_with_aliases(table);

        let path =
            resolver.resolve_import_path("@app/Foo", Path::new("/project/src/Deep/Nested/Thing.ts"));
        assert_eq!(path, Path::new("/project").join("src/Foo"));

        let file = parse_source("import { Repo } from '@app/Domain/Repo';").unwrap();
        let id = resolver
            .resolve("Repo", &file, Path::new("/project/src/Deep/Thing.ts"), None)
            .unwrap();
        assert_eq!(id.as_str(), "Domain.Repo");
    }

    #[test]
    fn test_qualified_argument_uses_leftmost_qualifier_for_import() {
        let file = parse_source("import * as Domain from '../Domain/User/UserRepository';").unwrap();
        let type_ref = TypeRef::Qualified {
            qualifier: vec!["Domain".into(), "User".into()],
            member: "UserRepository".into(),
        };
        let id = resolver()
            .resolve_argument_type(&type_ref, &file, Path::new("/project/src/App/Handler.ts"))
            .unwrap();
        assert_eq!(id.as_str(), "Domain.User.UserRepository");
    }

    #[test]
    fn test_bare_type_rejects_qualified_names() {
        let file = parse_source("import * as Ns from './Ns';").unwrap();
        let type_ref = TypeRef::Qualified {
            qualifier: vec!["Ns".into()],
            member: "Base".into(),
        };
        let result =
            resolver().resolve_bare_type(&type_ref, &file, Path::new("/project/src/Foo.ts"));
        assert_eq!(
            result,
            Err(Unresolved::UnsupportedForm {
                text: "Ns.Base".to_string()
            })
        );
    }

    #[test]
    fn test_aka_name_selects_namespace_import() {
        let file = parse_source("import { Domain } from '../Domain/User/UserRepository';").unwrap();
        let id = resolver()
            .resolve(
                "UserRepository",
                &file,
                Path::new("/project/src/App/Handler.ts"),
                Some("Domain"),
            )
            .unwrap();
        assert_eq!(id.as_str(), "Domain.User.UserRepository");
    }
}
