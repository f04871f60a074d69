// initコマンドハンドラー
//
// デフォルト設定ファイル（.dsql-migrate.yaml）を生成します。
// 既存の設定ファイルは --force 指定時のみ上書きします。

use crate::core::config::Config;
use crate::services::config_serializer::ConfigSerializer;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// initコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct InitCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// 強制的に初期化（既存の設定を上書き）
    pub force: bool,
}

/// initコマンドハンドラー
#[derive(Debug, Default)]
pub struct InitCommandHandler {}

impl InitCommandHandler {
    /// 新しいInitCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// initコマンドを実行
    ///
    /// 成功時は生成した設定ファイルのパスを返します。
    pub fn execute(&self, command: &InitCommand) -> Result<PathBuf> {
        let config_path = self.config_path(command);

        if self.is_already_initialized(&config_path) && !command.force {
            return Err(anyhow!(
                "Config file already exists: {:?}. Use --force option to overwrite it.",
                config_path
            ));
        }

        self.generate_config_file(&config_path)?;
        debug!(path = ?config_path, "Generated config file");

        Ok(config_path)
    }

    /// 設定ファイルのパスを決定
    fn config_path(&self, command: &InitCommand) -> PathBuf {
        match &command.config_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => command.project_path.join(path),
            None => command.project_path.join(Config::DEFAULT_CONFIG_PATH),
        }
    }

    /// 設定ファイルが既に存在するかチェック
    pub fn is_already_initialized(&self, config_path: &Path) -> bool {
        config_path.exists()
    }

    /// デフォルト設定ファイルを生成
    pub fn generate_config_file(&self, config_path: &Path) -> Result<()> {
        let yaml = ConfigSerializer::to_yaml(&Config::default())?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        fs::write(config_path, yaml)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }
}
