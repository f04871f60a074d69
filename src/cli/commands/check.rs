// checkコマンドハンドラー
//
// Prismaスキーマファイルを静的にチェックし、Aurora DSQL で使用できない機能を報告します。
// エラーレベルの問題が1つでもあればコマンドは失敗します。

use crate::cli::commands::{render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::error::IoError;
use crate::core::schema_check::{IssueKind, SchemaCheckReport};
use crate::services::schema_checker::SchemaCheckerService;
use anyhow::{anyhow, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// checkコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct CheckCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// チェック対象のスキーマファイル
    pub schema_path: PathBuf,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// checkコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    /// チェックしたファイル
    pub file: String,
    /// チェック結果
    #[serde(flatten)]
    pub report: SchemaCheckReport,
}

impl CommandOutput for CheckOutput {
    fn to_text(&self) -> String {
        let mut lines = Vec::new();

        for issue in &self.report.issues {
            let text = issue.format();
            let colored = match issue.kind {
                IssueKind::Error => text.red().to_string(),
                IssueKind::Warning => text.yellow().to_string(),
            };
            lines.push(format!("  {}", colored));
        }

        let errors = self.report.errors().count();
        let warnings = self.report.warnings().count();
        let summary = format!(
            "{}: {} error(s), {} warning(s)",
            self.file, errors, warnings
        );
        if self.report.valid {
            lines.insert(0, format!("{} {}", "✓".green(), summary));
        } else {
            lines.insert(0, format!("{} {}", "✗".red(), summary));
        }

        lines.join("\n")
    }
}

/// checkコマンドハンドラー
#[derive(Debug, Default)]
pub struct CheckCommandHandler {
    checker: SchemaCheckerService,
}

impl CheckCommandHandler {
    /// 新しいCheckCommandHandlerを作成
    pub fn new() -> Self {
        Self {
            checker: SchemaCheckerService::new(),
        }
    }

    /// checkコマンドを実行
    pub fn execute(&self, command: &CheckCommand) -> Result<String> {
        let path = if command.schema_path.is_absolute() {
            command.schema_path.clone()
        } else {
            command.project_path.join(&command.schema_path)
        };
        debug!(path = ?path, "Executing check command");

        let schema = read_schema(&path)?;
        let report = self.checker.check(&schema);
        let valid = report.valid;
        let error_count = report.errors().count();

        let output = CheckOutput {
            file: command.schema_path.display().to_string(),
            report,
        };
        let rendered = render_output(&output, &command.format)?;

        if valid {
            Ok(rendered)
        } else {
            Err(anyhow!(
                "{}\nSchema check failed with {} error(s)",
                rendered,
                error_count
            ))
        }
    }
}

fn read_schema(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    fs::read_to_string(path).map_err(|e| {
        IoError::FileRead {
            path: path.display().to_string(),
            cause: e.to_string(),
        }
        .into()
    })
}
