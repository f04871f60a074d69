// スキーマ静的チェックサービス
//
// Prisma形式のスキーマ定義テキストを行単位で走査し、
// Aurora DSQL で使用できない・注意が必要な記述を検出します。

use crate::core::schema_check::{IssueKind, SchemaCheckReport, SchemaIssue};
use regex::Regex;
use tracing::debug;

/// 行単位のチェックルール
#[derive(Debug, Clone)]
struct LineRule {
    pattern: Regex,
    kind: IssueKind,
    message: &'static str,
}

/// ルール定義（パターン, 重大度, メッセージ）
const LINE_RULES: &[(&str, IssueKind, &str)] = &[
    (
        r"autoincrement\(\s*\)",
        IssueKind::Error,
        "autoincrement() is not supported because Aurora DSQL has no sequences. Use @default(uuid()) or @default(cuid()) instead",
    ),
    (
        r"^\s*extensions\s*=\s*\[",
        IssueKind::Error,
        "PostgreSQL extensions are not supported by Aurora DSQL",
    ),
    (
        r"^\s*\w+\s+Json\??(\s|$)",
        IssueKind::Warning,
        "Json columns are not supported by Aurora DSQL and will be stored as text",
    ),
    (
        r"\bon(Delete|Update)\s*:",
        IssueKind::Warning,
        "Referential actions are not enforced by Aurora DSQL and must be emulated by the application",
    ),
    (
        r"@@fulltext\b",
        IssueKind::Warning,
        "Full-text indexes are not supported by Aurora DSQL",
    ),
];

const RELATION_PATTERN: &str = r"@relation\(";
const RELATION_MODE_PATTERN: &str = r#"relationMode\s*=\s*"prisma""#;
const RELATION_MODE_MESSAGE: &str = "Relations require relationMode = \"prisma\" in the datasource block because Aurora DSQL does not support foreign key constraints";

/// スキーマ静的チェックサービス
#[derive(Debug, Clone)]
pub struct SchemaCheckerService {
    rules: Vec<LineRule>,
    relation: Option<Regex>,
    relation_mode: Option<Regex>,
}

impl Default for SchemaCheckerService {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaCheckerService {
    /// 新しいSchemaCheckerServiceを作成
    pub fn new() -> Self {
        let rules = LINE_RULES
            .iter()
            .filter_map(|(pattern, kind, message)| {
                Regex::new(pattern).ok().map(|pattern| LineRule {
                    pattern,
                    kind: *kind,
                    message: *message,
                })
            })
            .collect();

        Self {
            rules,
            relation: Regex::new(RELATION_PATTERN).ok(),
            relation_mode: Regex::new(RELATION_MODE_PATTERN).ok(),
        }
    }

    /// スキーマテキストをチェック
    pub fn check(&self, schema: &str) -> SchemaCheckReport {
        let mut issues = Vec::new();
        let mut first_relation_line = None;
        let mut has_relation_mode = false;

        for (index, line) in schema.lines().enumerate() {
            let line_number = index + 1;
            if line.trim_start().starts_with("//") {
                continue;
            }

            for rule in &self.rules {
                if rule.pattern.is_match(line) {
                    issues.push(SchemaIssue {
                        kind: rule.kind,
                        message: rule.message.to_string(),
                        line: Some(line_number),
                    });
                }
            }

            if first_relation_line.is_none()
                && self.relation.as_ref().is_some_and(|re| re.is_match(line))
            {
                first_relation_line = Some(line_number);
            }
            if self
                .relation_mode
                .as_ref()
                .is_some_and(|re| re.is_match(line))
            {
                has_relation_mode = true;
            }
        }

        if let (Some(line), false) = (first_relation_line, has_relation_mode) {
            issues.push(SchemaIssue::error(RELATION_MODE_MESSAGE, Some(line)));
        }

        let report = SchemaCheckReport::from_issues(issues);
        debug!(
            valid = report.valid,
            issues = report.issues.len(),
            "Schema check finished"
        );
        report
    }
}

/// スキーマテキストをチェック
pub fn check_schema(schema: &str) -> SchemaCheckReport {
    SchemaCheckerService::new().check(schema)
}
