// スキーマチェック結果
//
// スキーマ定義テキストの静的チェックで検出された問題を表現します。

use serde::Serialize;

/// 問題の重大度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::Error => write!(f, "error"),
            IssueKind::Warning => write!(f, "warning"),
        }
    }
}

/// スキーマチェックで検出された問題
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    /// 重大度
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// メッセージ
    pub message: String,
    /// 行番号（1始まり）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl SchemaIssue {
    /// エラーを作成
    pub fn error(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            kind: IssueKind::Error,
            message: message.into(),
            line,
        }
    }

    /// 警告を作成
    pub fn warning(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            kind: IssueKind::Warning,
            message: message.into(),
            line,
        }
    }

    /// 表示用にフォーマット
    pub fn format(&self) -> String {
        match self.line {
            Some(line) => format!("{} (line {}): {}", self.kind, line, self.message),
            None => format!("{}: {}", self.kind, self.message),
        }
    }
}

/// スキーマチェックレポート
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaCheckReport {
    /// エラーがない場合 true
    pub valid: bool,
    /// 検出された問題（行番号順）
    pub issues: Vec<SchemaIssue>,
}

impl SchemaCheckReport {
    /// 問題リストからレポートを作成
    pub fn from_issues(mut issues: Vec<SchemaIssue>) -> Self {
        issues.sort_by_key(|issue| issue.line.unwrap_or(0));
        let valid = !issues.iter().any(|issue| issue.kind == IssueKind::Error);
        Self { valid, issues }
    }

    /// エラーのみを取得
    pub fn errors(&self) -> impl Iterator<Item = &SchemaIssue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Error)
    }

    /// 警告のみを取得
    pub fn warnings(&self) -> impl Iterator<Item = &SchemaIssue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Warning)
    }
}
