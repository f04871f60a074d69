// transformコマンドハンドラー
//
// マイグレーションSQLを読み込み、変換エンジンを実行して結果を出力します。
// - 設定ファイルとコマンドラインフラグのマージ（フラグ優先）
// - 未サポートのステートメントがある場合の中断判定（--force なし）
// - 出力先の決定（--output / 設定の出力ディレクトリ / 標準出力）

use crate::cli::commands::unsupported_formatter::UnsupportedStatementFormatter;
use crate::cli::commands::{render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::error::{IoError, TransformError};
use crate::core::naming;
use crate::core::transform::{TransformOptions, TransformResult};
use crate::services::config_loader::ConfigLoader;
use crate::services::migration_transformer::MigrationTransformerService;
use crate::services::stats_reporter::StatsReporter;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// transformコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct TransformCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// 入力SQLファイル（None または "-" の場合は標準入力）
    pub input: Option<PathBuf>,
    /// 出力ファイル
    pub output: Option<PathBuf>,
    /// 未サポートのステートメントがあっても続行
    pub force: bool,
    /// 生成ヘッダーを省略
    pub no_header: bool,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// transformコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct TransformOutput {
    /// 変換結果
    #[serde(flatten)]
    pub result: TransformResult,
    /// SQLの書き込み先（標準出力の場合はNone）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// 強制実行で削除した未サポート構文の警告
    #[serde(skip)]
    pub unsupported_warning: Option<String>,
}

impl CommandOutput for TransformOutput {
    fn to_text(&self) -> String {
        let Some(path) = &self.output_path else {
            return self.result.sql.trim_end().to_string();
        };

        let mut lines = Vec::new();
        if let Some(warning) = &self.unsupported_warning {
            lines.push(warning.trim_end().to_string());
        }
        lines.extend(StatsReporter::new().format_lines(&self.result));
        lines.push(format!("Transformed migration written to {}", path));
        lines.join("\n")
    }
}

/// transformコマンドハンドラー
#[derive(Debug, Default)]
pub struct TransformCommandHandler {
    transformer: MigrationTransformerService,
}

impl TransformCommandHandler {
    /// 新しいTransformCommandHandlerを作成
    pub fn new() -> Self {
        Self {
            transformer: MigrationTransformerService::new(),
        }
    }

    /// transformコマンドを実行
    pub fn execute(&self, command: &TransformCommand) -> Result<String> {
        let sql = self.read_input(command)?;
        self.execute_with_sql(command, &sql)
    }

    /// 読み込み済みのSQLに対してtransformコマンドを実行
    pub fn execute_with_sql(&self, command: &TransformCommand, sql: &str) -> Result<String> {
        let config = self.load_config(command)?;
        let options = resolve_options(&config, command);
        debug!(
            include_header = options.include_header,
            force = options.force,
            "Executing transform command"
        );

        let result = self.transformer.transform(sql, &options);
        let formatter = UnsupportedStatementFormatter::new();

        let unsupported_warning = if result.has_unsupported() {
            if !options.force {
                let error = TransformError::UnsupportedStatements {
                    count: result.unsupported_statements.len(),
                    statements: result.unsupported_statements.clone(),
                };
                let command_name = format!("{} transform", naming::APP_NAME);
                return Err(anyhow::Error::new(error).context(
                    formatter.format_error(&result.unsupported_statements, &command_name),
                ));
            }
            warn!(
                count = result.unsupported_statements.len(),
                "Unsupported statements dropped with --force"
            );
            Some(formatter.format_warning(&result.unsupported_statements))
        } else {
            None
        };

        let output_path = resolve_output_path(&config, command);
        if let Some(path) = &output_path {
            write_output(path, &result.sql)?;
            info!(path = ?path, "Wrote transformed migration");
        } else if let Some(warning) = &unsupported_warning {
            // 標準出力はSQL本体のみとし、警告は標準エラーへ出力する
            eprint!("{}", warning);
        }

        let output = TransformOutput {
            result,
            output_path: output_path.map(|p| p.display().to_string()),
            unsupported_warning,
        };

        render_output(&output, &command.format)
    }

    /// 入力SQLを読み込む
    fn read_input(&self, command: &TransformCommand) -> Result<String> {
        match command.input.as_deref() {
            Some(path) if path != Path::new("-") => {
                let path = resolve_path(&command.project_path, path);
                if !path.exists() {
                    return Err(IoError::FileNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                fs::read_to_string(&path).map_err(|e| {
                    IoError::FileRead {
                        path: path.display().to_string(),
                        cause: e.to_string(),
                    }
                    .into()
                })
            }
            _ => {
                let mut sql = String::new();
                std::io::stdin()
                    .read_to_string(&mut sql)
                    .with_context(|| "Failed to read SQL from stdin")?;
                Ok(sql)
            }
        }
    }

    /// 設定ファイルを読み込む（未指定かつ存在しない場合はデフォルト）
    fn load_config(&self, command: &TransformCommand) -> Result<Config> {
        match &command.config_path {
            Some(path) => ConfigLoader::from_file(&resolve_path(&command.project_path, path)),
            None => ConfigLoader::load_or_default(
                &command.project_path.join(Config::DEFAULT_CONFIG_PATH),
            ),
        }
    }
}

/// 設定とフラグから変換オプションを決定
fn resolve_options(config: &Config, command: &TransformCommand) -> TransformOptions {
    TransformOptions {
        include_header: config.include_header && !command.no_header,
        force: config.force || command.force,
        generated_at: Some(Utc::now()),
    }
}

/// 出力先ファイルパスを決定
fn resolve_output_path(config: &Config, command: &TransformCommand) -> Option<PathBuf> {
    command
        .output
        .as_deref()
        .map(Path::to_path_buf)
        .or_else(|| config.output_path())
        .map(|path| resolve_path(&command.project_path, &path))
}

fn resolve_path(project_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_path.join(path)
    }
}

/// SQLをファイルに書き込む（親ディレクトリは必要に応じて作成）
fn write_output(path: &Path, sql: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    fs::write(path, sql).map_err(|e| {
        IoError::FileWrite {
            path: path.display().to_string(),
            cause: e.to_string(),
        }
        .into()
    })
}
