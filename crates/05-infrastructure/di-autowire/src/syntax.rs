//! 类型化语法树
//!
//! 把 tree-sitter 的 TypeScript 语法树降级为一组带标签的枚举。之后的所有分析
//! 都只读这里的类型，不再访问原始节点，也不会执行目标模块的任何代码。

use thiserror::Error;
use tree_sitter::{Node, Parser};

/// 语法解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("无法加载 TypeScript 语法: {message}")]
    Language { message: String },

    #[error("解析器没有产出语法树")]
    NoTree,

    #[error("语法错误，位于第 {line} 行第 {column} 列")]
    Invalid { line: usize, column: usize },
}

/// 已解析的源文件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// 顶层语句
    pub body: Vec<Statement>,
}

impl SourceFile {
    /// 查找绑定了指定本地名称的顶层导入语句
    pub fn find_import(&self, local_name: &str) -> Option<&ImportDecl> {
        self.body.iter().find_map(|statement| match statement {
            Statement::Import(import) if import.binds(local_name) => Some(import),
            _ => None,
        })
    }

    /// 查找顶层声明的类（无论是否导出）
    pub fn find_top_level_class(&self, name: &str) -> Option<&ClassDecl> {
        self.body.iter().find_map(|statement| match statement {
            Statement::Class(class)
            | Statement::Export(ExportDecl {
                declaration: Declaration::Class(class),
                ..
            }) if class.name == name => Some(class),
            _ => None,
        })
    }
}

/// 语句
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// 导入语句
    Import(ImportDecl),
    /// 导出语句
    Export(ExportDecl),
    /// 未导出的类声明
    Class(ClassDecl),
    /// 未导出的命名空间
    Namespace(NamespaceDecl),
    /// 与装配无关的其他语句
    Other,
}

/// 导出语句
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDecl {
    /// 是否为 `export default`
    pub is_default: bool,
    /// 被导出的声明
    pub declaration: Declaration,
}

/// 被导出的声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// 类声明
    Class(ClassDecl),
    /// 命名空间
    Namespace(NamespaceDecl),
    /// 导出一个标识符，例如 `export default Foo;`
    Identifier(String),
    /// 其他声明
    Other,
}

/// 命名空间块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// 名称路径，`namespace A.B {}` 为 `["A", "B"]`
    pub path: Vec<String>,
    /// 块内语句
    pub body: Vec<Statement>,
}

/// 类声明
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub is_abstract: bool,
    /// `extends` 子句
    pub superclass: Option<TypeRef>,
    /// `implements` 子句，按声明顺序
    pub implements: Vec<TypeRef>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    /// 构造函数
    pub fn constructor(&self) -> Option<&MethodDecl> {
        self.methods.iter().find(|method| method.name == "constructor")
    }
}

/// 方法声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub parameters: Vec<Parameter>,
}

/// 方法参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    /// 类型标注，未标注时为 `None`
    pub type_ref: Option<TypeRef>,
}

/// 类型引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// 简单名称，泛型只保留基础名称（`Repo<User>` 为 `Repo`）
    Simple(String),
    /// 限定名称 `A.B.C`
    Qualified {
        /// 左侧限定部分，`["A", "B"]`
        qualifier: Vec<String>,
        /// 右侧成员名称，`C`
        member: String,
    },
    /// 无法用于装配的其他类型（联合类型、内置类型等）
    Other(String),
}

impl TypeRef {
    /// 类型的源码文本
    pub fn text(&self) -> String {
        match self {
            Self::Simple(name) => name.clone(),
            Self::Qualified { qualifier, member } => format!("{}.{member}", qualifier.join(".")),
            Self::Other(text) => text.clone(),
        }
    }
}

/// 导入语句
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// 模块来源字符串（已去掉引号）
    pub source: String,
    pub bindings: Vec<ImportBinding>,
}

impl ImportDecl {
    /// 是否绑定了指定的本地名称
    pub fn binds(&self, local_name: &str) -> bool {
        self.bindings.iter().any(|binding| binding.local == local_name)
    }
}

/// 导入绑定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// 本地名称
    pub local: String,
    pub kind: BindingKind,
}

/// 导入绑定形式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    /// `import Foo from '..'`
    Default,
    /// `import { Foo as Bar } from '..'`，记录导出名
    Named { imported: String },
    /// `import * as Foo from '..'`
    Namespace,
    /// `import Foo = require('..')`
    Require,
}

/// 解析 TypeScript 源码
pub fn parse_source(source: &str) -> Result<SourceFile, SyntaxError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .map_err(|e| SyntaxError::Language {
            message: e.to_string(),
        })?;

    let tree = parser.parse(source, None).ok_or(SyntaxError::NoTree)?;
    let root = tree.root_node();
    if root.has_error() {
        let (line, column) = first_error_position(root);
        return Err(SyntaxError::Invalid { line, column });
    }

    Ok(SourceFile {
        body: lower_statements(root, source),
    })
}

fn first_error_position(root: Node<'_>) -> (usize, usize) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let position = node.start_position();
            return (position.row + 1, position.column + 1);
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
    (0, 0)
}

fn node_text(node: Node<'_>, src: &str) -> String {
    node.utf8_text(src.as_bytes()).unwrap_or_default().to_string()
}

fn split_qualified(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn lower_statements(parent: Node<'_>, src: &str) -> Vec<Statement> {
    let mut cursor = parent.walk();
    parent
        .named_children(&mut cursor)
        .map(|child| lower_statement(child, src))
        .filter(|statement| !matches!(statement, Statement::Other))
        .collect()
}

fn lower_statement(node: Node<'_>, src: &str) -> Statement {
    match node.kind() {
        "import_statement" => lower_import(node, src).map_or(Statement::Other, Statement::Import),
        "export_statement" => Statement::Export(lower_export(node, src)),
        "class_declaration" | "abstract_class_declaration" => lower_class(node, src)
            .map_or(Statement::Other, Statement::Class),
        "internal_module" | "module" => Statement::Namespace(lower_namespace(node, src)),
        "expression_statement" => match node.named_child(0) {
            Some(inner) if inner.kind() == "internal_module" => {
                Statement::Namespace(lower_namespace(inner, src))
            }
            _ => Statement::Other,
        },
        _ => Statement::Other,
    }
}

fn lower_export(node: Node<'_>, src: &str) -> ExportDecl {
    let is_default = (0..node.child_count())
        .filter_map(|i| node.child(i))
        .any(|child| child.kind() == "default");

    let declaration = if let Some(declaration) = node.child_by_field_name("declaration") {
        lower_declaration(declaration, src)
    } else if let Some(value) = node.child_by_field_name("value") {
        match value.kind() {
            "identifier" => Declaration::Identifier(node_text(value, src)),
            _ => lower_declaration(value, src),
        }
    } else {
        Declaration::Other
    };

    ExportDecl {
        is_default,
        declaration,
    }
}

fn lower_declaration(node: Node<'_>, src: &str) -> Declaration {
    match node.kind() {
        "class_declaration" | "abstract_class_declaration" | "class" => {
            lower_class(node, src).map_or(Declaration::Other, Declaration::Class)
        }
        "internal_module" | "module" => Declaration::Namespace(lower_namespace(node, src)),
        _ => Declaration::Other,
    }
}

fn lower_namespace(node: Node<'_>, src: &str) -> NamespaceDecl {
    let path = node
        .child_by_field_name("name")
        .map(|name| split_qualified(&node_text(name, src)))
        .unwrap_or_default();
    let body = node
        .child_by_field_name("body")
        .map(|body| lower_statements(body, src))
        .unwrap_or_default();

    NamespaceDecl { path, body }
}

fn lower_class(node: Node<'_>, src: &str) -> Option<ClassDecl> {
    let name = node_text(node.child_by_field_name("name")?, src);
    let mut class = ClassDecl {
        name,
        is_abstract: node.kind() == "abstract_class_declaration",
        ..ClassDecl::default()
    };

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "class_heritage" {
            lower_heritage(child, src, &mut class);
        }
    }

    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        class.methods = body
            .named_children(&mut cursor)
            .filter(|member| member.kind() == "method_definition")
            .filter_map(|member| lower_method(member, src))
            .collect();
    }

    Some(class)
}

fn lower_heritage(node: Node<'_>, src: &str, class: &mut ClassDecl) {
    let mut cursor = node.walk();
    for clause in node.named_children(&mut cursor) {
        match clause.kind() {
            "extends_clause" => {
                class.superclass = clause
                    .child_by_field_name("value")
                    .map(|value| lower_expression_type(value, src));
            }
            "implements_clause" => {
                let mut inner = clause.walk();
                class.implements = clause
                    .named_children(&mut inner)
                    .map(|ty| lower_type(ty, src))
                    .collect();
            }
            _ => {}
        }
    }
}

fn lower_method(node: Node<'_>, src: &str) -> Option<MethodDecl> {
    let name = node_text(node.child_by_field_name("name")?, src);
    let parameters = node
        .child_by_field_name("parameters")
        .map(|params| lower_parameters(params, src))
        .unwrap_or_default();

    Some(MethodDecl { name, parameters })
}

fn lower_parameters(node: Node<'_>, src: &str) -> Vec<Parameter> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|param| matches!(param.kind(), "required_parameter" | "optional_parameter"))
        .map(|param| Parameter {
            name: param
                .child_by_field_name("pattern")
                .map(|pattern| node_text(pattern, src))
                .unwrap_or_default(),
            type_ref: param
                .child_by_field_name("type")
                .and_then(|annotation| annotation.named_child(0))
                .map(|ty| lower_type(ty, src)),
        })
        .collect()
}

fn lower_type(node: Node<'_>, src: &str) -> TypeRef {
    match node.kind() {
        "type_identifier" | "identifier" => TypeRef::Simple(node_text(node, src)),
        "nested_type_identifier" => qualified_from_text(&node_text(node, src)),
        "generic_type" => node
            .child_by_field_name("name")
            .map_or_else(|| TypeRef::Other(node_text(node, src)), |name| lower_type(name, src)),
        _ => TypeRef::Other(node_text(node, src)),
    }
}

fn lower_expression_type(node: Node<'_>, src: &str) -> TypeRef {
    match node.kind() {
        "identifier" => TypeRef::Simple(node_text(node, src)),
        "member_expression" => qualified_from_text(&node_text(node, src)),
        _ => TypeRef::Other(node_text(node, src)),
    }
}

fn qualified_from_text(text: &str) -> TypeRef {
    let mut parts = split_qualified(text);
    match parts.pop() {
        Some(member) if !parts.is_empty() => TypeRef::Qualified {
            qualifier: parts,
            member,
        },
        Some(member) => TypeRef::Simple(member),
        None => TypeRef::Other(text.to_string()),
    }
}

fn lower_import(node: Node<'_>, src: &str) -> Option<ImportDecl> {
    let mut bindings = Vec::new();
    let mut source_node = node.child_by_field_name("source");

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_clause" => lower_import_clause(child, src, &mut bindings),
            "import_require_clause" => {
                if let Some(local) = child.named_child(0).filter(|n| n.kind() == "identifier") {
                    bindings.push(ImportBinding {
                        local: node_text(local, src),
                        kind: BindingKind::Require,
                    });
                }
                source_node = source_node.or_else(|| child.child_by_field_name("source"));
            }
            _ => {}
        }
    }

    let source = node_text(source_node?, src);
    Some(ImportDecl {
        source: source.trim_matches(|c| matches!(c, '"' | '\'' | '`')).to_string(),
        bindings,
    })
}

fn lower_import_clause(node: Node<'_>, src: &str, bindings: &mut Vec<ImportBinding>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => bindings.push(ImportBinding {
                local: node_text(child, src),
                kind: BindingKind::Default,
            }),
            "namespace_import" => {
                let mut inner = child.walk();
                let local = child
                    .named_children(&mut inner)
                    .find(|n| n.kind() == "identifier");
                if let Some(local) = local {
                    bindings.push(ImportBinding {
                        local: node_text(local, src),
                        kind: BindingKind::Namespace,
                    });
                }
            }
            "named_imports" => {
                let mut inner = child.walk();
                for specifier in child
                    .named_children(&mut inner)
                    .filter(|n| n.kind() == "import_specifier")
                {
                    let Some(name) = specifier.child_by_field_name("name") else {
                        continue;
                    };
                    let imported = node_text(name, src);
                    let local = specifier
                        .child_by_field_name("alias")
                        .map_or_else(|| imported.clone(), |alias| node_text(alias, src));
                    bindings.push(ImportBinding {
                        local,
                        kind: BindingKind::Named { imported },
                    });
                }
            }
            _ => {}
        }
    }
}
