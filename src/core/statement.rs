// ステートメントモデル
//
// 分割器が切り出したステートメント単位と、分類器が付与する種別を表現します。
// ALTER TABLE はトップレベルのカンマで区切られた句のリストを保持し、
// 制約名で DROP / ADD の対応付けを行えるようにします。

/// 分割器が切り出した1つのSQLステートメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementUnit {
    /// 直前のコメント行（空行を挟まずに続くもののみ、原文のまま）
    pub leading_comment: Vec<String>,
    /// ステートメント本体（末尾のセミコロンは含まない）
    pub body: String,
    /// 入力時点で BEGIN; / COMMIT; に囲まれていたかどうか
    pub already_wrapped: bool,
}

impl StatementUnit {
    /// 新しいステートメント単位を作成
    pub fn new(leading_comment: Vec<String>, body: impl Into<String>) -> Self {
        Self {
            leading_comment,
            body: body.into(),
            already_wrapped: false,
        }
    }

    /// 既にトランザクションで囲まれていた単位として作成
    pub fn wrapped(leading_comment: Vec<String>, body: impl Into<String>) -> Self {
        Self {
            leading_comment,
            body: body.into(),
            already_wrapped: true,
        }
    }
}

/// ステートメントの種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// CREATE TABLE
    CreateTable,
    /// CREATE [UNIQUE] INDEX
    CreateIndex {
        unique: bool,
        /// 既に ASYNC キーワードを持つ
        already_async: bool,
    },
    /// ALTER TABLE（句のリスト付き）
    AlterTable(AlterTableStatement),
    /// DROP TABLE / DROP INDEX
    Drop,
    /// その他
    Other,
}

impl StatementKind {
    /// ログ出力用の短いラベル
    pub fn label(&self) -> &'static str {
        match self {
            StatementKind::CreateTable => "create-table",
            StatementKind::CreateIndex { unique: false, .. } => "create-index",
            StatementKind::CreateIndex { unique: true, .. } => "create-unique-index",
            StatementKind::AlterTable(_) => "alter-table",
            StatementKind::Drop => "drop-statement",
            StatementKind::Other => "other",
        }
    }
}

/// ALTER TABLE ステートメントの構造
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTableStatement {
    /// 対象テーブル名（原文の表記のまま）
    pub table: String,
    /// `ALTER TABLE <name>` までの前置部分
    pub prefix: String,
    /// トップレベルの句
    pub clauses: Vec<AlterClause>,
}

/// ALTER TABLE の1句
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterClause {
    /// 句のテキスト（前後の空白はトリム済み）
    pub text: String,
    /// 句の種別
    pub kind: ClauseKind,
}

/// ALTER TABLE の句の種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseKind {
    /// DROP CONSTRAINT <name>
    DropConstraint(ConstraintName),
    /// ADD [CONSTRAINT <name>] FOREIGN KEY ... REFERENCES ...
    AddConstraintForeignKey(Option<ConstraintName>),
    /// ADD CONSTRAINT <name> （外部キー以外）
    AddConstraintOther(ConstraintName),
    /// ADD [COLUMN] ...
    AddColumn,
    /// その他
    Other,
}

impl ClauseKind {
    /// 句が持つ制約名
    pub fn constraint_name(&self) -> Option<&ConstraintName> {
        match self {
            ClauseKind::DropConstraint(name) | ClauseKind::AddConstraintOther(name) => Some(name),
            ClauseKind::AddConstraintForeignKey(name) => name.as_ref(),
            ClauseKind::AddColumn | ClauseKind::Other => None,
        }
    }
}

/// 制約名
///
/// 原文の表記と、比較用に正規化した名前の両方を持ちます。
/// 引用符付き識別子は引用符を外したまま、引用符なし識別子は小文字化して比較します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintName {
    pub raw: String,
    pub normalized: String,
}

impl ConstraintName {
    /// 識別子トークンから制約名を作成
    pub fn from_identifier(raw: &str) -> Self {
        let normalized = match raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            Some(inner) => inner.replace("\"\"", "\""),
            None => raw.to_lowercase(),
        };
        Self {
            raw: raw.to_string(),
            normalized,
        }
    }

    /// 名前が外部キー制約の命名規則に見えるか
    ///
    /// `*_fkey`（PostgreSQL / Prisma の既定）、`*_fk`、`fk_*` を外部キーとみなします。
    pub fn looks_like_foreign_key(&self) -> bool {
        let name = self.normalized.to_lowercase();
        name.ends_with("_fkey") || name.ends_with("_fk") || name.starts_with("fk_")
    }
}

/// 分類済みステートメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedStatement {
    pub unit: StatementUnit,
    pub kind: StatementKind,
}
