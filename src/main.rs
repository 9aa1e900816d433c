// ==========================================
// 发布管理控制台 - 命令行入口
// ==========================================
// 子命令:
//   import   - 批量导入 CSV（--dry-run 只校验不提交）
//   template - 输出样例模板
// ==========================================

use anyhow::Context;
use clap::{Parser, Subcommand};
use deploy_console::api::{ApiResult, ImportApi, ImportHooks};
use deploy_console::config::{ConfigManager, ImportSchemaKind};
use deploy_console::domain::{ImportMode, ImportOutcome, SchemaDescriptor};
use deploy_console::logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "deploy-console", version, about = "Deploy Console bulk import tool")]
struct Cli {
    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import a CSV file through the bulk create/update endpoints
    Import {
        /// CSV file to upload
        #[arg(long)]
        file: PathBuf,

        /// Schema: client-bulk-add | client-bulk-update
        #[arg(long, default_value = "client-bulk-add")]
        schema: ImportSchemaKind,

        /// Mode: create | update
        #[arg(long, default_value = "create")]
        mode: ImportMode,

        /// Parse, validate and coerce only; print the batch without sending it
        #[arg(long)]
        dry_run: bool,

        /// Override the backend base url
        #[arg(long, env = "DEPLOY_CONSOLE_BACKEND_URL")]
        backend_url: Option<String>,
    },

    /// Print the sample template for a schema
    Template {
        #[arg(long, default_value = "client-bulk-add")]
        schema: ImportSchemaKind,
    },
}

/// 命令行下的成功回调：只记录日志
struct CliHooks;

impl ImportHooks for CliHooks {
    fn on_success(&self, outcome: &ImportOutcome) {
        tracing::info!(dispatched = outcome.dispatched(), "导入成功，依赖视图需刷新");
    }
}

/// 加载配置并组装导入 API
fn prepare_import(
    schema: ImportSchemaKind,
    backend_url: Option<String>,
) -> ApiResult<(ImportApi, SchemaDescriptor)> {
    let mut config = ConfigManager::load()?;
    if let Some(url) = backend_url {
        config.backend.base_url = url;
    }

    let descriptor = schema.descriptor()?;
    let api = ImportApi::from_config(&config)?;
    Ok((api, descriptor))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.json_log);

    tracing::info!("{} v{}", deploy_console::APP_NAME, deploy_console::VERSION);

    match cli.command {
        Command::Template { schema } => {
            print!("{}", schema.sample_template());
            Ok(ExitCode::SUCCESS)
        }
        Command::Import {
            file,
            schema,
            mode,
            dry_run,
            backend_url,
        } => {
            let (api, descriptor) = prepare_import(schema, backend_url)?;

            if dry_run {
                let content = tokio::fs::read(&file)
                    .await
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let records = api.preview(&content, &descriptor)?;
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(ExitCode::SUCCESS);
            }

            let outcome = api.import_file(&file, &descriptor, mode, &CliHooks).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);

            if outcome.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
