// ステートメント分類
//
// 字句トークン列の先頭キーワードでステートメント種別を判定します。
// 文字列の部分一致は使わず、引用符付き識別子は不透明なトークンとして扱うため、
// `references` という名前のテーブルが外部キーと誤判定されることはありません。

use crate::core::statement::{
    AlterClause, AlterTableStatement, ClassifiedStatement, ClauseKind, ConstraintName,
    StatementKind, StatementUnit,
};
use crate::services::sql_lexer::{split_top_level_commas, tokenize, Token};

/// ステートメント分類サービス
#[derive(Debug, Clone, Default)]
pub struct StatementClassifier;

impl StatementClassifier {
    /// 新しいStatementClassifierを作成
    pub fn new() -> Self {
        Self
    }

    /// ステートメント単位を分類
    pub fn classify(&self, unit: StatementUnit) -> ClassifiedStatement {
        let kind = self.classify_body(&unit.body);
        ClassifiedStatement { unit, kind }
    }

    /// ステートメント本体の種別を判定
    pub fn classify_body(&self, body: &str) -> StatementKind {
        let tokens = tokenize(body);
        let keyword = |index: usize, word: &str| tokens.get(index).is_some_and(|t| t.is_keyword(word));

        if keyword(0, "CREATE") {
            let mut index = 1;
            if keyword(index, "UNIQUE") {
                index += 1;
                if keyword(index, "INDEX") {
                    return StatementKind::CreateIndex {
                        unique: true,
                        already_async: keyword(index + 1, "ASYNC"),
                    };
                }
                return StatementKind::Other;
            }
            if keyword(index, "INDEX") {
                return StatementKind::CreateIndex {
                    unique: false,
                    already_async: keyword(index + 1, "ASYNC"),
                };
            }
            while ["GLOBAL", "LOCAL", "TEMP", "TEMPORARY", "UNLOGGED"]
                .iter()
                .any(|modifier| keyword(index, *modifier))
            {
                index += 1;
            }
            if keyword(index, "TABLE") {
                return StatementKind::CreateTable;
            }
            return StatementKind::Other;
        }

        if keyword(0, "ALTER") && keyword(1, "TABLE") {
            return match parse_alter_table(body, &tokens) {
                Some(alter) => StatementKind::AlterTable(alter),
                None => StatementKind::Other,
            };
        }

        if keyword(0, "DROP") && (keyword(1, "TABLE") || keyword(1, "INDEX")) {
            return StatementKind::Drop;
        }

        StatementKind::Other
    }
}

/// ALTER TABLE 文を前置部分と句のリストに分解
///
/// `ALTER TABLE [IF EXISTS] [ONLY] <name>` の後ろをトップレベルのカンマで分割します。
/// テーブル名が読み取れない場合や句が1つもない場合は None を返します。
fn parse_alter_table(body: &str, tokens: &[Token<'_>]) -> Option<AlterTableStatement> {
    let mut index = 2;
    if tokens.get(index).is_some_and(|t| t.is_keyword("IF"))
        && tokens.get(index + 1).is_some_and(|t| t.is_keyword("EXISTS"))
    {
        index += 2;
    }
    if tokens.get(index).is_some_and(|t| t.is_keyword("ONLY")) {
        index += 1;
    }

    let (name_start, name_end) = qualified_name_span(tokens, index)?;
    let table = body[name_start..name_end].to_string();
    let prefix = body[..name_end].to_string();

    let clauses: Vec<AlterClause> = split_top_level_commas(&body[name_end..])
        .into_iter()
        .map(|text| AlterClause {
            text: text.to_string(),
            kind: classify_clause(text),
        })
        .collect();

    if clauses.is_empty() {
        return None;
    }

    Some(AlterTableStatement {
        table,
        prefix,
        clauses,
    })
}

/// `schema.table` 形式を含む修飾名のバイト範囲を取得
fn qualified_name_span(tokens: &[Token<'_>], start: usize) -> Option<(usize, usize)> {
    let first = tokens.get(start).filter(|t| t.is_identifier())?;
    let mut end = first.end;
    let mut index = start + 1;

    while tokens.get(index).is_some_and(|t| t.is_symbol('.')) {
        match tokens.get(index + 1).filter(|t| t.is_identifier()) {
            Some(part) => {
                end = part.end;
                index += 2;
            }
            None => break,
        }
    }

    Some((first.start, end))
}

/// ALTER TABLE の1句を分類
fn classify_clause(text: &str) -> ClauseKind {
    let tokens = tokenize(text);
    let keyword = |index: usize, word: &str| tokens.get(index).is_some_and(|t| t.is_keyword(word));
    let identifier = |index: usize| {
        tokens
            .get(index)
            .filter(|t| t.is_identifier())
            .map(|t| ConstraintName::from_identifier(t.text))
    };

    if keyword(0, "DROP") && keyword(1, "CONSTRAINT") {
        let name_index = if keyword(2, "IF") && keyword(3, "EXISTS") { 4 } else { 2 };
        return match identifier(name_index) {
            Some(name) => ClauseKind::DropConstraint(name),
            None => ClauseKind::Other,
        };
    }

    if !keyword(0, "ADD") {
        return ClauseKind::Other;
    }

    if keyword(1, "CONSTRAINT") {
        let Some(name) = identifier(2) else {
            return ClauseKind::Other;
        };
        return if has_foreign_key_keywords(&tokens[3..]) {
            ClauseKind::AddConstraintForeignKey(Some(name))
        } else {
            ClauseKind::AddConstraintOther(name)
        };
    }

    if keyword(1, "FOREIGN") && keyword(2, "KEY") {
        return ClauseKind::AddConstraintForeignKey(None);
    }

    // 名前なしの表制約（PRIMARY KEY / UNIQUE / CHECK / EXCLUDE）
    if ["PRIMARY", "UNIQUE", "CHECK", "EXCLUDE"]
        .iter()
        .any(|word| keyword(1, *word))
    {
        return ClauseKind::Other;
    }

    if keyword(1, "COLUMN") || identifier(1).is_some() {
        return ClauseKind::AddColumn;
    }

    ClauseKind::Other
}

/// 制約定義が `FOREIGN KEY` キーワード列を含むか
fn has_foreign_key_keywords(tokens: &[Token<'_>]) -> bool {
    tokens
        .windows(2)
        .any(|pair| pair[0].is_keyword("FOREIGN") && pair[1].is_keyword("KEY"))
}
