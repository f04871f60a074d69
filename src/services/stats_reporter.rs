// 統計レポート
//
// 変換結果の統計情報を人間向けの短いサマリーに整形します。
// 値が0のカテゴリは出力しません。

use crate::core::transform::TransformResult;

/// 警告行の先頭に付ける記号
pub const WARNING_GLYPH: &str = "⚠";

/// 統計レポートのフォーマッター
#[derive(Debug, Clone, Default)]
pub struct StatsReporter;

impl StatsReporter {
    /// 新しいStatsReporterを作成
    pub fn new() -> Self {
        Self
    }

    /// 統計情報と警告を行単位で整形
    pub fn format_lines(&self, result: &TransformResult) -> Vec<String> {
        let stats = &result.stats;
        let mut lines = Vec::new();

        if stats.statements_processed > 0 {
            lines.push(format!(
                "✓ {} statement(s) wrapped in transactions",
                stats.statements_processed
            ));
        }
        if stats.indexes_converted > 0 {
            lines.push(format!(
                "✓ {} index(es) converted to CREATE INDEX ASYNC",
                stats.indexes_converted
            ));
        }
        if stats.foreign_keys_removed > 0 {
            lines.push(format!(
                "✓ {} foreign key constraint(s) removed",
                stats.foreign_keys_removed
            ));
        }

        lines.extend(
            result
                .warnings
                .iter()
                .map(|warning| format!("{} {}", WARNING_GLYPH, warning)),
        );

        lines
    }

    /// 統計情報と警告を改行区切りのテキストに整形
    pub fn format(&self, result: &TransformResult) -> String {
        self.format_lines(result).join("\n")
    }
}

/// 統計情報と警告を整形
pub fn format_stats(result: &TransformResult) -> String {
    StatsReporter::new().format(result)
}
