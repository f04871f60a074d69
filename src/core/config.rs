// 設定ファイル管理
//
// プロジェクトの設定ファイル（YAML形式）の構造と検証を提供します。
// ファイルI/Oは services::config_loader に集約します。

use crate::core::error::ConfigError;
use crate::core::naming;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// プロジェクト設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// 設定ファイルのバージョン
    pub version: String,

    /// 生成ヘッダーを付与するか
    #[serde(default = "default_include_header")]
    pub include_header: bool,

    /// 未サポートのステートメントがあっても続行するか
    #[serde(default)]
    pub force: bool,

    /// 変換結果の出力ディレクトリ（未指定の場合は標準出力）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// 出力ディレクトリ内のファイル名
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_include_header() -> bool {
    true
}

fn default_output_file() -> String {
    naming::OUTPUT_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            include_header: default_include_header(),
            force: false,
            output_dir: None,
            output_file: default_output_file(),
        }
    }
}

impl Config {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = naming::CONFIG_FILE;

    /// 設定の妥当性を検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version.trim().is_empty() {
            return Err(ConfigError::MissingVersion);
        }

        if self.output_file.trim().is_empty() {
            return Err(ConfigError::EmptyOutputFile);
        }

        if self.output_file.contains('/') || self.output_file.contains('\\') {
            return Err(ConfigError::InvalidOutputFile {
                name: self.output_file.clone(),
            });
        }

        Ok(())
    }

    /// 出力先ファイルパス（出力ディレクトリ未指定の場合は None）
    pub fn output_path(&self) -> Option<PathBuf> {
        self.output_dir
            .as_ref()
            .map(|dir| dir.join(&self.output_file))
    }
}
