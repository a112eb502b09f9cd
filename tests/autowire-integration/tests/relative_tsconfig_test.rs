//! 以相对路径指定 tsconfig 时的路径别名解析
//!
//! 会修改进程的当前工作目录，因此单独放在一个测试二进制中。

use autowire_common::ServiceIdentifier;
use config_impl::AutowireOptions;
use di_abstractions::DefinitionContainer;
use di_autowire::Autowire;
use di_impl::DiContainerImpl;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_relative_tsconfig_path_still_remaps_aliases() {
    let dir = TempDir::new().unwrap();
    let project = dir.path();
    fs::create_dir_all(project.join("src/Domain")).unwrap();
    fs::write(
        project.join("tsconfig.json"),
        r#"{ "compilerOptions": { "paths": { "@app/*": ["src/*"] } } }"#,
    )
    .unwrap();
    fs::write(
        project.join("src/Foo.ts"),
        "import { Repo } from '@app/Domain/Repo';\nexport default class Foo {\n    constructor(r: Repo) {}\n}\n",
    )
    .unwrap();
    fs::write(
        project.join("src/Domain/Repo.ts"),
        "export default class Repo {}\n",
    )
    .unwrap();
    std::env::set_current_dir(project).unwrap();

    let container = Arc::new(DiContainerImpl::new());
    let options = AutowireOptions::new("src")
        .unwrap()
        .with_tsconfig("tsconfig.json");
    let report = Autowire::new(container.clone(), options)
        .process()
        .await
        .unwrap();

    assert_eq!(report.skipped_arguments, 0);
    assert_eq!(
        container
            .definition(&ServiceIdentifier::from("Foo"))
            .unwrap()
            .argument_ids(),
        vec!["Domain.Repo"]
    );
}
