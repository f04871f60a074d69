// 設定ファイル書き出しサービス
//
// init コマンドがプロジェクトに置く .dsql-migrate.yaml の内容を生成する。
// 書き出したYAMLは transform コマンドの ConfigLoader がそのまま読み戻せる形に保つ。

use crate::core::config::Config;
use anyhow::{Context, Result};

/// 設定ファイル書き出しサービス
#[derive(Debug, Clone, Default)]
pub struct ConfigSerializer;

impl ConfigSerializer {
    /// 設定をYAML文字列に変換
    ///
    /// `output_dir` が未設定の場合はキーごと省略され、
    /// transform は結果を標準出力へ書き出します。
    pub fn to_yaml(config: &Config) -> Result<String> {
        serde_saphyr::to_string(config).with_context(|| "Failed to serialize config file")
    }
}
