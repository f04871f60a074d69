// 出力組み立て
//
// 生き残ったステートメントを入力順に並べ、先頭コメントの直後に
// BEGIN; / 本体; / COMMIT; の形で出力します。ステートメント間は空行1つで区切ります。

use crate::core::naming::HEADER_TITLE;
use crate::core::transform::TransformOptions;
use crate::services::sql_lexer::trim_trailing_comments;
use chrono::{DateTime, SecondsFormat, Utc};

/// 出力対象のステートメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedStatement {
    /// 先頭コメント行
    pub leading_comment: Vec<String>,
    /// 書き換え後の本体（末尾のセミコロンなし）
    pub body: String,
}

impl ComposedStatement {
    pub fn new(leading_comment: Vec<String>, body: impl Into<String>) -> Self {
        Self {
            leading_comment,
            body: body.into(),
        }
    }

    /// トランザクションで囲んだブロックとして出力
    fn render(&self) -> String {
        let mut block = String::new();
        for line in &self.leading_comment {
            block.push_str(line);
            block.push('\n');
        }
        block.push_str("BEGIN;\n");
        block.push_str(&terminate_statement(&self.body));
        block.push_str("\nCOMMIT;");
        block
    }
}

/// 出力組み立てサービス
#[derive(Debug, Clone, Default)]
pub struct OutputComposer;

impl OutputComposer {
    /// 新しいOutputComposerを作成
    pub fn new() -> Self {
        Self
    }

    /// ステートメント列を最終的なSQLテキストに組み立てる
    ///
    /// ヘッダーはステートメントが1つ以上ある場合のみ付与します。
    /// 空でない出力は末尾の改行をちょうど1つ持ちます。
    pub fn compose(&self, statements: &[ComposedStatement], options: &TransformOptions) -> String {
        let mut blocks = Vec::with_capacity(statements.len() + 1);

        if options.include_header && !statements.is_empty() {
            blocks.push(render_header(options.generated_at));
        }
        blocks.extend(statements.iter().map(ComposedStatement::render));

        let output = blocks.join("\n\n");
        let trimmed = output.trim_end();
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}\n", trimmed)
        }
    }
}

/// 生成ヘッダーを作成
fn render_header(generated_at: Option<DateTime<Utc>>) -> String {
    let mut lines = vec![format!("-- {}", HEADER_TITLE)];
    if let Some(timestamp) = generated_at {
        lines.push(format!(
            "-- Generated at: {}",
            timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    lines.push("-- Each statement runs in its own transaction; indexes are built asynchronously.".to_string());
    lines.join("\n")
}

/// 本体の末尾にセミコロンを付与
///
/// 本体が行コメントで終わる場合は、コメントに飲み込まれないよう改行してから付与します。
/// リテラル内の `--` はコメントとして扱いません。
fn terminate_statement(body: &str) -> String {
    let body = body.trim_end();
    let comment_tail = &body[trim_trailing_comments(body).len()..];
    if comment_tail.contains("--") {
        return format!("{}\n;", body);
    }
    if body.ends_with(';') {
        return body.to_string();
    }
    format!("{};", body)
}
