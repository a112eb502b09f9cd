//! 自动装配端到端测试
//!
//! 每个测试在临时目录中构造一棵 TypeScript 源码树，运行完整的处理流程后检查容器内容。

use autowire_common::{ServiceIdentifier, SkipReason};
use config_impl::AutowireOptions;
use di_abstractions::DefinitionContainer;
use di_autowire::{Autowire, ProcessReport};
use di_impl::{DiContainerImpl, JsonManifestExporter};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Once};
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// 临时项目：`<tmp>/tsconfig.json` 与 `<tmp>/src/...`
struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        init_logging();
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        Self { dir }
    }

    fn file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    fn src(&self) -> std::path::PathBuf {
        self.dir.path().join("src")
    }

    fn autowire(&self) -> (Arc<DiContainerImpl>, Autowire) {
        let container = Arc::new(DiContainerImpl::new());
        let options = AutowireOptions::new(self.src()).unwrap();
        (container.clone(), Autowire::new(container, options))
    }

    async fn run(&self) -> (Arc<DiContainerImpl>, ProcessReport) {
        let (container, autowire) = self.autowire();
        let report = autowire.process().await.unwrap();
        (container, report)
    }
}

fn id(value: &str) -> ServiceIdentifier {
    ServiceIdentifier::from(value)
}

#[tokio::test]
async fn test_constructor_dependency_is_wired() {
    let project = Project::new()
        .file(
            "src/Foo.ts",
            "import Bar from './Bar';\nexport default class Foo {\n    constructor(bar: Bar) {}\n}\n",
        )
        .file("src/Bar.ts", "export default class Bar {}\n");

    let (container, report) = project.run().await;

    let ids: Vec<_> = container.definitions().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![id("Bar"), id("Foo")]);
    assert_eq!(
        container.definition(&id("Foo")).unwrap().argument_ids(),
        vec!["Bar"]
    );
    assert!(container.definition(&id("Bar")).unwrap().arguments.is_empty());
    assert!(container.aliases().is_empty());
    assert_eq!(report.registered_count(), 2);
}

#[tokio::test]
async fn test_interface_alias_is_registered_once() {
    let project = Project::new()
        .file("src/IFoo.ts", "export default interface IFoo {}\n")
        .file(
            "src/Impl.ts",
            "import IFoo from './IFoo';\nexport default class Impl implements IFoo {}\n",
        )
        .file(
            "src/OtherImpl.ts",
            "import IFoo from './IFoo';\nexport default class OtherImpl implements IFoo {}\n",
        );

    let (container, report) = project.run().await;

    assert_eq!(container.alias_count(), 1);
    let target = container.alias(&id("IFoo")).unwrap();
    assert!(target == id("Impl") || target == id("OtherImpl"));
    assert_eq!(report.aliases_registered, 1);
    assert_eq!(report.registered_count(), 2);
    assert_eq!(report.skipped_count(SkipReason::NoExportedClass), 1);
}

#[tokio::test]
async fn test_excluded_files_never_produce_definitions() {
    let project = Project::new()
        .file("src/Foo.ts", "export default class Foo {}\n")
        .file("src/Legacy/Old.ts", "export default class Old {}\n")
        .file("src/Generated/Api.ts", "export default class Api {}\n");

    let (container, mut autowire) = project.autowire();
    autowire.add_exclude("Legacy");
    autowire.add_exclude("Generated/Api.ts");
    let report = autowire.process().await.unwrap();

    assert_eq!(report.files_seen, 1);
    assert_eq!(container.definition_count(), 1);
    assert!(container.definition(&id("Legacy.Old")).is_none());
    assert!(container.definition(&id("Generated.Api")).is_none());
}

#[tokio::test]
async fn test_zero_parameter_constructor_has_no_arguments() {
    let project = Project::new().file(
        "src/Clock.ts",
        "export default class Clock {\n    constructor() {}\n    now(): number { return 0; }\n}\n",
    );

    let (container, _) = project.run().await;

    let clock = container.definition(&id("Clock")).unwrap();
    assert!(clock.arguments.is_empty());
    assert!(!clock.is_abstract);
}

#[tokio::test]
async fn test_results_are_deterministic() {
    let project = Project::new()
        .file(
            "src/App/Controller.ts",
            "import { Service } from '../Core/Service';\nimport Logger from '../Core/Logger';\n\
             export default class Controller {\n    constructor(service: Service, logger: Logger) {}\n}\n",
        )
        .file(
            "src/Core/Service.ts",
            "import Logger from './Logger';\nexport namespace Core {\n    export class Service {\n        constructor(logger: Logger) {}\n    }\n}\n",
        )
        .file("src/Core/Logger.ts", "export default class Logger {}\n");

    let (first, first_report) = project.run().await;
    let (second, second_report) = project.run().await;

    assert_eq!(first.definitions(), second.definitions());
    assert_eq!(first_report, second_report);
    assert_eq!(
        first.definition(&id("App.Controller")).unwrap().argument_ids(),
        vec!["Core.Service", "Core.Logger"]
    );
}

#[tokio::test]
async fn test_namespaced_class_identifier() {
    let project = Project::new()
        .file(
            "src/Domain/User/UserService.ts",
            r"
import { UserRepository } from './UserRepository';

export namespace Domain {
    export namespace User {
        export class UserService {
            constructor(private readonly repository: UserRepository) {}
        }
    }
}
",
        )
        .file(
            "src/Domain/User/UserRepository.ts",
            "export default class UserRepository {}\n",
        )
        .file(
            "src/Domain/services/Helper.ts",
            "export default class Helper {}\n",
        );

    let (container, _) = project.run().await;

    let service = container.definition(&id("Domain.User.UserService")).unwrap();
    assert_eq!(service.argument_ids(), vec!["Domain.User.UserRepository"]);
    assert!(container.definition(&id("Domain.User.UserRepository")).is_some());
    // 小写目录不计入命名空间
    assert!(container.definition(&id("Domain.Helper")).is_some());
}

#[tokio::test]
async fn test_named_export_without_namespace_is_skipped() {
    let project = Project::new().file("src/Domain/Plain.ts", "export class Plain {}\n");

    let (container, report) = project.run().await;

    assert_eq!(container.definition_count(), 0);
    assert_eq!(report.skipped_count(SkipReason::NoExportedClass), 1);
}

#[tokio::test]
async fn test_tsconfig_path_alias_is_applied() {
    let project = Project::new()
        .file(
            "tsconfig.json",
            r#"{ "compilerOptions": { "paths": { "@app/*": ["src/*"] } } }"#,
        )
        .file(
            "src/Domain/Order/OrderService.ts",
            "import { Repo } from '@app/Infra/Repo';\nexport default class OrderService {\n    constructor(repo: Repo) {}\n}\n",
        )
        .file("src/Infra/Repo.ts", "export default class Repo {}\n");

    let (container, _) = project.run().await;

    assert_eq!(
        container
            .definition(&id("Domain.Order.OrderService"))
            .unwrap()
            .argument_ids(),
        vec!["Infra.Repo"]
    );
}

#[tokio::test]
async fn test_unmapped_specifiers_join_file_directory() {
    let project = Project::new()
        .file(
            "src/Foo.ts",
            "import { Repo } from '@app/Repo';\nimport Bar from 'Bar';\n\
             export default class Foo {\n    constructor(repo: Repo, bar: Bar) {}\n}\n",
        )
        .file("src/Bar.ts", "export default class Bar {}\n");

    let (container, report) = project.run().await;

    assert_eq!(
        container.definition(&id("Foo")).unwrap().argument_ids(),
        vec!["Repo", "Bar"]
    );
    assert_eq!(report.skipped_arguments, 0);
}

#[tokio::test]
async fn test_abstract_class_and_parent() {
    let project = Project::new()
        .file(
            "src/Base/Repository.ts",
            "export default abstract class Repository {}\n",
        )
        .file(
            "src/Users.ts",
            "import Repository from './Base/Repository';\nexport default class Users extends Repository {}\n",
        );

    let (container, _) = project.run().await;

    let base = container.definition(&id("Base.Repository")).unwrap();
    assert!(base.is_abstract);
    let users = container.definition(&id("Users")).unwrap();
    assert_eq!(users.parent, Some(id("Base.Repository")));
    assert!(!users.is_abstract);
}

#[tokio::test]
async fn test_manifest_is_written_once() -> anyhow::Result<()> {
    let project = Project::new()
        .file(
            "src/Foo.ts",
            "import Bar from './Bar';\nimport IFoo from './IFoo';\n\
             export default class Foo implements IFoo {\n    constructor(bar: Bar) {}\n}\n",
        )
        .file("src/Bar.ts", "export default class Bar {}\n")
        .file("src/IFoo.ts", "export default interface IFoo {}\n");
    let manifest_path = project.dir.path().join("out/manifest.json");

    let (_, autowire) = project.autowire();
    let autowire =
        autowire.with_manifest_exporter(Arc::new(JsonManifestExporter::new(&manifest_path)));
    autowire.process().await?;

    let manifest: serde_json::Value = serde_json::from_str(&fs::read_to_string(&manifest_path)?)?;
    assert_eq!(manifest["services"]["Foo"]["arguments"][0]["id"], "Bar");
    assert_eq!(manifest["services"]["Foo"]["abstract"], false);
    assert_eq!(manifest["aliases"]["IFoo"], "Foo");
    assert_eq!(
        Path::new(manifest["services"]["Bar"]["target"]["source_path"].as_str().unwrap())
            .file_name()
            .unwrap(),
        "Bar.ts"
    );
    Ok(())
}

#[tokio::test]
async fn test_unreadable_and_foreign_files_are_isolated() {
    let project = Project::new()
        .file("src/Foo.ts", "export default class Foo {}\n")
        .file("src/Broken.ts", "export default class Broken {\n")
        .file("src/notes.txt", "not typescript")
        .file("src/util.ts", "export const value = 1;\n");

    let (container, report) = project.run().await;

    assert_eq!(container.definition_count(), 1);
    assert_eq!(report.files_seen, 4);
    assert_eq!(report.skipped_count(SkipReason::ParseFailed), 1);
    assert_eq!(report.skipped_count(SkipReason::UnsupportedExtension), 1);
    assert_eq!(report.skipped_count(SkipReason::NoExportedClass), 1);
}
