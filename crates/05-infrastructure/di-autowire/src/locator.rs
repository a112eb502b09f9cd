//! 类声明定位

use crate::syntax::{ClassDecl, Declaration, ExportDecl, NamespaceDecl, SourceFile, Statement};

/// 查找文件导出的类声明
///
/// 优先使用 `export default` 导出的类；命名空间深度大于零时，再沿导出的命名空间
/// 逐层下降恰好 `depth` 层，取该层命名导出的类。找不到时返回 `None`，文件被跳过。
pub fn locate_class(file: &SourceFile, depth: usize) -> Option<&ClassDecl> {
    default_exported_class(file).or_else(|| {
        if depth > 0 {
            descend(&file.body, depth)
        } else {
            None
        }
    })
}

fn default_exported_class(file: &SourceFile) -> Option<&ClassDecl> {
    file.body.iter().find_map(|statement| match statement {
        Statement::Export(ExportDecl {
            is_default: true,
            declaration,
        }) => match declaration {
            Declaration::Class(class) => Some(class),
            Declaration::Identifier(name) => file.find_top_level_class(name),
            _ => None,
        },
        _ => None,
    })
}

fn exported_namespaces(body: &[Statement]) -> impl Iterator<Item = &NamespaceDecl> {
    body.iter().filter_map(|statement| match statement {
        Statement::Export(ExportDecl {
            is_default: false,
            declaration: Declaration::Namespace(namespace),
        }) => Some(namespace),
        _ => None,
    })
}

fn named_exported_class(body: &[Statement]) -> Option<&ClassDecl> {
    body.iter().find_map(|statement| match statement {
        Statement::Export(ExportDecl {
            is_default: false,
            declaration: Declaration::Class(class),
        }) => Some(class),
        _ => None,
    })
}

fn descend(body: &[Statement], remaining: usize) -> Option<&ClassDecl> {
    if remaining == 0 {
        // 允许再多包一层命名空间
        return named_exported_class(body).or_else(|| {
            exported_namespaces(body).find_map(|namespace| named_exported_class(&namespace.body))
        });
    }

    exported_namespaces(body)
        .filter(|namespace| !namespace.path.is_empty() && namespace.path.len() <= remaining)
        .find_map(|namespace| descend(&namespace.body, remaining - namespace.path.len()))
}
