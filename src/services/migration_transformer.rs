// マイグレーション変換エンジン
//
// 分割・分類済みのステートメントに種別ごとの書き換え規則を適用し、
// Aurora DSQL で実行可能なSQLテキストと統計情報を返します。
// 変換はI/Oを持たない純粋な処理で、失敗しません。

use crate::core::statement::{
    AlterTableStatement, ClassifiedStatement, ClauseKind, StatementKind,
};
use crate::core::transform::{TransformOptions, TransformResult};
use crate::services::output_composer::{ComposedStatement, OutputComposer};
use crate::services::sql_lexer::{tokenize, trim_trailing_comments};
use crate::services::statement_classifier::StatementClassifier;
use crate::services::statement_splitter::split_statements;
use std::collections::HashSet;
use tracing::debug;

/// 外部キー削除時の警告メッセージ
pub const FOREIGN_KEY_WARNING: &str = "Foreign key constraints were removed because Aurora DSQL does not support them. \
Set relationMode = \"prisma\" in your Prisma schema and enforce referential integrity at the application-layer.";

/// 1ステートメントへの規則適用結果
#[derive(Debug, Clone, PartialEq, Eq)]
enum RuleOutcome {
    /// 出力する（書き換え後の本体）
    Emit(String),
    /// 出力しない
    Drop,
}

/// マイグレーション変換サービス
#[derive(Debug, Clone, Default)]
pub struct MigrationTransformerService {
    classifier: StatementClassifier,
    composer: OutputComposer,
}

impl MigrationTransformerService {
    /// 新しいMigrationTransformerServiceを作成
    pub fn new() -> Self {
        Self {
            classifier: StatementClassifier::new(),
            composer: OutputComposer::new(),
        }
    }

    /// SQLマイグレーションテキストを変換
    ///
    /// 未サポート構文は `unsupported_statements` に記録するだけで、
    /// `force` による中断判断は呼び出し側が行います。
    pub fn transform(&self, sql: &str, options: &TransformOptions) -> TransformResult {
        let mut result = TransformResult::default();
        let mut emitted = Vec::new();

        for unit in split_statements(sql) {
            let classified = self.classifier.classify(unit);
            debug!(
                kind = classified.kind.label(),
                already_wrapped = classified.unit.already_wrapped,
                "Classified statement"
            );

            match self.apply_rules(&classified, &mut result) {
                RuleOutcome::Emit(body) => {
                    result.stats.statements_processed += 1;
                    emitted.push(ComposedStatement::new(
                        classified.unit.leading_comment,
                        body,
                    ));
                }
                RuleOutcome::Drop => {
                    debug!(kind = classified.kind.label(), "Dropped statement");
                }
            }
        }

        if result.stats.foreign_keys_removed > 0 {
            result.push_warning(FOREIGN_KEY_WARNING);
        }

        result.sql = self.composer.compose(&emitted, options);

        debug!(
            statements = result.stats.statements_processed,
            indexes = result.stats.indexes_converted,
            foreign_keys = result.stats.foreign_keys_removed,
            unsupported = result.unsupported_statements.len(),
            "Transformation finished"
        );

        result
    }

    /// 種別ごとの書き換え規則を適用
    fn apply_rules(
        &self,
        statement: &ClassifiedStatement,
        result: &mut TransformResult,
    ) -> RuleOutcome {
        let body = &statement.unit.body;
        match &statement.kind {
            StatementKind::CreateIndex {
                already_async: false,
                ..
            } => match convert_index_to_async(body) {
                Some(converted) => {
                    result.stats.indexes_converted += 1;
                    RuleOutcome::Emit(converted)
                }
                None => RuleOutcome::Emit(body.clone()),
            },
            StatementKind::AlterTable(alter) => filter_alter_table(body, alter, result),
            StatementKind::CreateIndex { .. }
            | StatementKind::CreateTable
            | StatementKind::Drop
            | StatementKind::Other => RuleOutcome::Emit(body.clone()),
        }
    }
}

/// SQLマイグレーションテキストを変換
pub fn transform(sql: &str, options: &TransformOptions) -> TransformResult {
    MigrationTransformerService::new().transform(sql, options)
}

/// `INDEX` の直後に `ASYNC` を挿入（`CONCURRENTLY` は `ASYNC` に置き換え）
fn convert_index_to_async(body: &str) -> Option<String> {
    let tokens = tokenize(body);
    let index_pos = tokens.iter().position(|t| t.is_keyword("INDEX"))?;
    let index_token = tokens[index_pos];

    if let Some(next) = tokens.get(index_pos + 1) {
        if next.is_keyword("ASYNC") {
            return None;
        }
        if next.is_keyword("CONCURRENTLY") {
            return Some(format!(
                "{}ASYNC{}",
                &body[..next.start],
                &body[next.end..]
            ));
        }
    }

    Some(format!(
        "{} ASYNC{}",
        &body[..index_token.end],
        &body[index_token.end..]
    ))
}

/// ALTER TABLE の句をフィルタリング
///
/// DROP CONSTRAINT は対応の有無にかかわらず削除して未サポートとして記録し、
/// 同名の ADD CONSTRAINT も合わせて削除します。外部キー追加句は常に削除します。
fn filter_alter_table(
    body: &str,
    alter: &AlterTableStatement,
    result: &mut TransformResult,
) -> RuleOutcome {
    let dropped_names: HashSet<&str> = alter
        .clauses
        .iter()
        .filter_map(|clause| match &clause.kind {
            ClauseKind::DropConstraint(name) => Some(name.normalized.as_str()),
            _ => None,
        })
        .collect();

    let mut removed_foreign_keys: HashSet<&str> = HashSet::new();
    let mut unnamed_foreign_keys = 0;
    let mut kept = Vec::with_capacity(alter.clauses.len());

    for clause in &alter.clauses {
        match &clause.kind {
            ClauseKind::DropConstraint(name) => {
                result.unsupported_statements.push(format!(
                    "{} {}",
                    alter.prefix.trim(),
                    trim_trailing_comments(&clause.text)
                ));
                if name.looks_like_foreign_key() {
                    removed_foreign_keys.insert(name.normalized.as_str());
                }
                debug!(table = %alter.table, constraint = %name.raw, "Removed DROP CONSTRAINT clause");
            }
            ClauseKind::AddConstraintForeignKey(Some(name)) => {
                removed_foreign_keys.insert(name.normalized.as_str());
                debug!(table = %alter.table, constraint = %name.raw, "Removed foreign key clause");
            }
            ClauseKind::AddConstraintForeignKey(None) => {
                unnamed_foreign_keys += 1;
                debug!(table = %alter.table, "Removed unnamed foreign key clause");
            }
            ClauseKind::AddConstraintOther(name)
                if dropped_names.contains(name.normalized.as_str()) =>
            {
                debug!(table = %alter.table, constraint = %name.raw, "Removed paired ADD CONSTRAINT clause");
            }
            ClauseKind::AddConstraintOther(_) | ClauseKind::AddColumn | ClauseKind::Other => {
                // 区切りのカンマが行コメントに飲み込まれないよう、末尾のコメントは落とす
                kept.push(trim_trailing_comments(&clause.text));
            }
        }
    }

    result.stats.foreign_keys_removed += removed_foreign_keys.len() + unnamed_foreign_keys;

    if kept.is_empty() {
        return RuleOutcome::Drop;
    }
    if kept.len() == alter.clauses.len() {
        return RuleOutcome::Emit(body.to_string());
    }
    RuleOutcome::Emit(format!("{} {}", alter.prefix.trim_end(), kept.join(",\n")))
}
