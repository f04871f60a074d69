// 変換オプションと変換結果
//
// エンジンの唯一の入出力。結果は呼び出しごとに新しく作成され、
// 呼び出し間で共有される状態はありません。

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 変換オプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// 生成ヘッダーを先頭に付与するか
    pub include_header: bool,
    /// 未サポートのステートメントがあっても処理を続行するか（判断は境界層が行う）
    pub force: bool,
    /// ヘッダーに埋め込む生成時刻（None の場合は時刻行を出力しない）
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            force: false,
            generated_at: None,
        }
    }
}

impl TransformOptions {
    /// ヘッダーなしのオプションを作成
    pub fn without_header() -> Self {
        Self {
            include_header: false,
            ..Self::default()
        }
    }

    /// force フラグを設定
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// 生成時刻を設定
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }
}

/// 変換の統計情報
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformStats {
    /// 出力に到達したステートメント数
    pub statements_processed: usize,
    /// ASYNC に変換したインデックス数
    pub indexes_converted: usize,
    /// 削除した外部キー数
    pub foreign_keys_removed: usize,
}

/// 変換結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformResult {
    /// 最終的なSQLテキスト
    pub sql: String,
    /// 統計情報
    pub stats: TransformStats,
    /// 警告メッセージ（トリガーごとに重複排除）
    pub warnings: Vec<String>,
    /// 削除・スキップした未サポート構文の説明
    pub unsupported_statements: Vec<String>,
}

impl TransformResult {
    /// 未サポートのステートメントが含まれているか
    pub fn has_unsupported(&self) -> bool {
        !self.unsupported_statements.is_empty()
    }

    /// 警告を追加（同一の警告は1回だけ記録）
    pub fn push_warning(&mut self, warning: &str) {
        if !self.warnings.iter().any(|w| w == warning) {
            self.warnings.push(warning.to_string());
        }
    }
}
