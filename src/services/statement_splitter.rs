// SQLステートメント分割
//
// SQL文字列をセミコロン区切りで個別のステートメント単位に分割します。
// シングルクォート、ダブルクォート、PostgreSQLドル引用符、コメント、
// 括弧内のセミコロンはステートメント区切りとして扱いません。
// 各ステートメントには直前のコメント行（空行を挟まないもの）を付与し、
// トップレベルの BEGIN; / COMMIT; はマーカーとして取り除きます。

use crate::core::statement::StatementUnit;
use crate::services::sql_lexer::{
    tokenize, trim_trailing_comments, CharClass, SqlScanner, TokenKind,
};
use tracing::debug;

/// トランザクション制御マーカー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionMarker {
    Begin,
    Commit,
}

/// コメントと本体に分けた切り出し直後のステートメント
#[derive(Debug)]
struct RawStatement {
    leading_comment: Vec<String>,
    body: String,
}

/// SQL文字列をステートメント単位に分割
///
/// # Arguments
///
/// * `sql` - 分割するSQL文字列
///
/// # Returns
///
/// 入力順のステートメント単位。空行やコメントのみの部分は含まれません。
pub fn split_statements(sql: &str) -> Vec<StatementUnit> {
    let raw = split_raw_statements(sql);
    debug!(raw_statements = raw.len(), "Split SQL text");
    attach_transaction_markers(raw)
}

/// セミコロンで分割し、各チャンクをコメントと本体に分ける
fn split_raw_statements(sql: &str) -> Vec<RawStatement> {
    let mut statements = Vec::new();
    let mut chunk_start = 0;

    for step in SqlScanner::new(sql) {
        if step.is_top_level(';') {
            if let Some(statement) = separate_leading_comment(&sql[chunk_start..step.start]) {
                statements.push(statement);
            }
            chunk_start = step.end;
        }
    }

    // 末尾のセミコロンなしステートメント（閉じられていないクォート・括弧を含む場合も残りをまとめて扱う）
    if let Some(statement) = separate_leading_comment(&sql[chunk_start..]) {
        statements.push(statement);
    }

    statements
}

/// チャンクを先頭コメントブロックと本体に分ける
///
/// 本体の直前に空行を挟まずに続く `--` コメント行のみを先頭コメントとして保持します。
/// 空行で切り離されたコメントブロックや、本体の後ろに残るコメントのみの行は捨てます。
/// 本体にSQLトークンが含まれない場合は None を返します。
fn separate_leading_comment(chunk: &str) -> Option<RawStatement> {
    let lines: Vec<&str> = chunk.lines().collect();
    let mut leading_comment = Vec::new();
    let mut body_start = None;

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            leading_comment.clear();
        } else if trimmed.starts_with("--") {
            leading_comment.push(trimmed.to_string());
        } else {
            body_start = Some(index);
            break;
        }
    }

    let body = normalize_body(&lines[body_start?..].join("\n"));
    if tokenize(&body).is_empty() {
        return None;
    }

    Some(RawStatement {
        leading_comment,
        body,
    })
}

/// 本体の空白を正規化
///
/// 末尾のコメント・空白はスキャナーの分類で判定して取り除きます。
/// 行末の空白は、改行がリテラルの外にある行でのみ除去します。
fn normalize_body(raw: &str) -> String {
    let raw = trim_trailing_comments(raw);
    let mut body = String::with_capacity(raw.len());

    for step in SqlScanner::new(raw) {
        if step.ch == '\n' && matches!(step.class, CharClass::Code | CharClass::Comment) {
            let kept = body.trim_end_matches([' ', '\t', '\r']).len();
            body.truncate(kept);
        }
        body.push_str(&raw[step.start..step.end]);
    }

    body.trim().to_string()
}

/// トップレベルのトランザクション制御文を判定
fn transaction_marker(body: &str) -> Option<TransactionMarker> {
    let tokens = tokenize(body);
    if tokens.iter().any(|t| t.kind != TokenKind::Word) {
        return None;
    }
    let words: Vec<String> = tokens.iter().map(|t| t.text.to_ascii_uppercase()).collect();
    let words: Vec<&str> = words.iter().map(String::as_str).collect();

    match words.as_slice() {
        ["BEGIN"] | ["BEGIN", "TRANSACTION"] | ["BEGIN", "WORK"] | ["START", "TRANSACTION"] => {
            Some(TransactionMarker::Begin)
        }
        ["COMMIT"] | ["COMMIT", "TRANSACTION"] | ["COMMIT", "WORK"] | ["END"]
        | ["END", "TRANSACTION"] => Some(TransactionMarker::Commit),
        _ => None,
    }
}

/// BEGIN; / COMMIT; マーカーを取り除き、囲まれていた単位に印を付ける
///
/// BEGIN の先頭コメントは直後のステートメントに引き継ぎます。
/// 対応する COMMIT がない BEGIN や、単独の COMMIT も取り除きます
/// （トランザクションの付与は出力時にステートメントごとに行うため）。
fn attach_transaction_markers(raw: Vec<RawStatement>) -> Vec<StatementUnit> {
    // 先に BEGIN〜COMMIT の範囲を確定させ、単位は一度だけ作成する
    let mut wrapped = vec![false; raw.len()];
    let mut open_begin: Option<usize> = None;
    for (index, statement) in raw.iter().enumerate() {
        match transaction_marker(&statement.body) {
            Some(TransactionMarker::Begin) => {
                if open_begin.is_none() {
                    open_begin = Some(index);
                }
            }
            Some(TransactionMarker::Commit) => {
                if let Some(begin) = open_begin.take() {
                    wrapped[begin..index].iter_mut().for_each(|w| *w = true);
                }
            }
            None => {}
        }
    }

    let mut units = Vec::new();
    let mut carried_comment: Vec<String> = Vec::new();
    for (statement, already_wrapped) in raw.into_iter().zip(wrapped) {
        match transaction_marker(&statement.body) {
            Some(TransactionMarker::Begin) => {
                carried_comment.extend(statement.leading_comment);
            }
            Some(TransactionMarker::Commit) => {}
            None => {
                let mut leading_comment = std::mem::take(&mut carried_comment);
                leading_comment.extend(statement.leading_comment);
                units.push(if already_wrapped {
                    StatementUnit::wrapped(leading_comment, statement.body)
                } else {
                    StatementUnit::new(leading_comment, statement.body)
                });
            }
        }
    }

    units
}
