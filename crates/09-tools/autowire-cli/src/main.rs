//! # autowire
//!
//! 对一个 TypeScript 源码目录运行自动装配引擎，打印汇总并可选地写出服务清单。

use anyhow::{Context, Result};
use clap::Parser;
use config_impl::AutowireOptions;
use di_abstractions::DefinitionContainer;
use di_autowire::{Autowire, ProcessReport};
use di_impl::{DiContainerImpl, JsonManifestExporter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "autowire")]
#[command(about = "静态分析 TypeScript 源码树并生成依赖注入服务定义")]
struct Args {
    /// 分析根目录
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    root: Option<PathBuf>,

    /// tsconfig 文件路径，默认为根目录上一级的 tsconfig.json
    #[arg(long)]
    tsconfig: Option<PathBuf>,

    /// 排除路径（相对于根目录），可重复
    #[arg(short, long = "exclude")]
    excludes: Vec<String>,

    /// 包含 [autowire] 节的 TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 服务清单输出路径
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let options = build_options(&args)?;
    info!("分析根目录: {}", options.root_dir().display());

    let container = Arc::new(DiContainerImpl::new());
    let mut autowire = Autowire::new(container.clone(), options);
    if let Some(manifest) = &args.manifest {
        autowire.set_manifest_exporter(Arc::new(JsonManifestExporter::new(manifest)));
    }

    let report = autowire.process().await.context("自动装配失败")?;
    print_summary(&report, container.as_ref());

    Ok(())
}

/// 初始化日志
fn init_logging(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if args.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// 由命令行参数和配置文件构造选项，命令行参数追加在配置文件之后
fn build_options(args: &Args) -> Result<AutowireOptions> {
    let mut options = match (&args.config, &args.root) {
        (Some(config), _) => AutowireOptions::from_toml_file(config)
            .with_context(|| format!("无法加载配置文件 {}", config.display()))?,
        (None, Some(root)) => AutowireOptions::new(root)
            .with_context(|| format!("无效的分析根目录 {}", root.display()))?,
        (None, None) => anyhow::bail!("必须指定分析根目录或配置文件"),
    };

    if let Some(tsconfig) = &args.tsconfig {
        options = options.with_tsconfig(tsconfig);
    }
    for exclude in &args.excludes {
        options.add_exclude(exclude.clone());
    }

    Ok(options)
}

fn print_summary(report: &ProcessReport, container: &dyn DefinitionContainer) {
    println!("{report}");
    for (id, definition) in container.definitions() {
        println!("  {} <- {}", id, definition.argument_ids().join(", "));
    }
    for (alias, id) in container.aliases() {
        println!("  {alias} => {id}");
    }
}
