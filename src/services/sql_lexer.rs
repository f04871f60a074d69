// SQL字句スキャナー
//
// 文法を持たない構造スキャナーです。文字ごとに以下の状態を追跡します。
// - 通常 / シングルクォート / ダブルクォート / ドル引用符（タグ付き）
// - 行コメント（`--`）/ ブロックコメント（`/* */`、ネスト対応）
// - 括弧の深さ
// 分割器（セミコロン）、句分割（カンマ）、キーワード分類はすべてこのスキャナーを共有します。

/// スキャナーの状態
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    DollarQuoted(String),
    LineComment,
    /// ブロックコメント（ネスト深さを保持。PostgreSQLのネストされたコメントに対応）
    BlockComment(u32),
}

/// 1ステップで読み進めた文字の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// 通常のSQLコード
    Code,
    /// 文字列リテラル（'...'、区切り文字を含む）
    StringLiteral,
    /// 引用符付き識別子（"..."、区切り文字を含む）
    QuotedIdent,
    /// ドル引用符ブロック（タグを含む）
    DollarQuoted,
    /// コメント
    Comment,
}

/// スキャナーが1ステップで読み進めた範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScanStep {
    /// 開始バイト位置
    pub start: usize,
    /// 終了バイト位置（排他的）
    pub end: usize,
    /// 先頭の文字
    pub ch: char,
    /// 文字の分類
    pub class: CharClass,
    /// この文字を読む直前の括弧の深さ
    pub depth: u32,
}

impl ScanStep {
    /// トップレベル（括弧の外、通常コード）の指定文字か
    pub fn is_top_level(&self, ch: char) -> bool {
        self.class == CharClass::Code && self.depth == 0 && self.ch == ch
    }
}

/// クォート・コメント・括弧を考慮して SQL を走査するスキャナー
#[derive(Debug, Clone)]
pub(crate) struct SqlScanner<'a> {
    sql: &'a str,
    pos: usize,
    state: ScanState,
    depth: u32,
}

impl<'a> SqlScanner<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self {
            sql,
            pos: 0,
            state: ScanState::Normal,
            depth: 0,
        }
    }
}

impl Iterator for SqlScanner<'_> {
    type Item = ScanStep;

    fn next(&mut self) -> Option<ScanStep> {
        let rest = &self.sql[self.pos..];
        let ch = rest.chars().next()?;
        let start = self.pos;
        let depth = self.depth;
        let mut len = ch.len_utf8();

        let class = match &self.state {
            ScanState::Normal => match ch {
                '\'' => {
                    self.state = ScanState::SingleQuoted;
                    CharClass::StringLiteral
                }
                '"' => {
                    self.state = ScanState::DoubleQuoted;
                    CharClass::QuotedIdent
                }
                '-' if rest.starts_with("--") => {
                    self.state = ScanState::LineComment;
                    len = 2;
                    CharClass::Comment
                }
                '/' if rest.starts_with("/*") => {
                    self.state = ScanState::BlockComment(1);
                    len = 2;
                    CharClass::Comment
                }
                '$' => match dollar_tag_at(rest) {
                    Some(tag) => {
                        len = tag.len();
                        self.state = ScanState::DollarQuoted(tag.to_string());
                        CharClass::DollarQuoted
                    }
                    None => CharClass::Code,
                },
                '(' => {
                    self.depth += 1;
                    CharClass::Code
                }
                ')' => {
                    self.depth = self.depth.saturating_sub(1);
                    CharClass::Code
                }
                _ => CharClass::Code,
            },
            ScanState::SingleQuoted => {
                if ch == '\'' {
                    if rest[1..].starts_with('\'') {
                        // エスケープされたシングルクォート('')
                        len = 2;
                    } else {
                        self.state = ScanState::Normal;
                    }
                }
                CharClass::StringLiteral
            }
            ScanState::DoubleQuoted => {
                if ch == '"' {
                    if rest[1..].starts_with('"') {
                        // エスケープされたダブルクォート("")
                        len = 2;
                    } else {
                        self.state = ScanState::Normal;
                    }
                }
                CharClass::QuotedIdent
            }
            ScanState::DollarQuoted(tag) => {
                if ch == '$' && rest.starts_with(tag.as_str()) {
                    len = tag.len();
                    self.state = ScanState::Normal;
                }
                CharClass::DollarQuoted
            }
            ScanState::LineComment => {
                if ch == '\n' {
                    self.state = ScanState::Normal;
                }
                CharClass::Comment
            }
            ScanState::BlockComment(level) => {
                let level = *level;
                if rest.starts_with("/*") {
                    len = 2;
                    self.state = ScanState::BlockComment(level + 1);
                } else if rest.starts_with("*/") {
                    len = 2;
                    self.state = if level == 1 {
                        ScanState::Normal
                    } else {
                        ScanState::BlockComment(level - 1)
                    };
                }
                CharClass::Comment
            }
        };

        self.pos += len;
        Some(ScanStep {
            start,
            end: self.pos,
            ch,
            class,
            depth,
        })
    }
}

/// `$tag$` 形式のドル引用符開始タグを取得
///
/// タグは空でもよく、英数字とアンダースコアのみで構成されます。
/// `$1` のような位置パラメータはタグとして扱いません。
fn dollar_tag_at(rest: &str) -> Option<&str> {
    let end = rest[1..].find('$')?;
    let tag = &rest[..end + 2];
    let inner = &tag[1..tag.len() - 1];
    if inner.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    if inner.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(tag)
    } else {
        None
    }
}

/// トークンの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// キーワードまたは引用符なし識別子
    Word,
    /// 引用符付き識別子
    QuotedIdent,
    /// 文字列リテラルまたはドル引用符ブロック
    Literal,
    /// 記号（1文字）
    Symbol,
}

/// 字句トークン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Token<'_> {
    /// キーワード比較（大文字小文字を区別しない。引用符付き識別子は一致しない）
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }

    /// 識別子として扱えるトークンか
    pub fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Word | TokenKind::QuotedIdent)
    }

    /// 指定した記号か
    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol && self.text.starts_with(symbol)
    }
}

/// SQLをトークン列に分解（コメントと空白は除去）
pub(crate) fn tokenize(sql: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut current: Option<(TokenKind, usize, usize)> = None;

    for step in SqlScanner::new(sql) {
        let kind = match step.class {
            CharClass::Comment => {
                flush_token(sql, &mut current, &mut tokens);
                continue;
            }
            CharClass::Code if step.ch.is_whitespace() => {
                flush_token(sql, &mut current, &mut tokens);
                continue;
            }
            CharClass::Code if step.ch.is_alphanumeric() || step.ch == '_' || step.ch == '$' => {
                TokenKind::Word
            }
            CharClass::Code => {
                flush_token(sql, &mut current, &mut tokens);
                tokens.push(Token {
                    kind: TokenKind::Symbol,
                    text: &sql[step.start..step.end],
                    start: step.start,
                    end: step.end,
                });
                continue;
            }
            CharClass::QuotedIdent => TokenKind::QuotedIdent,
            CharClass::StringLiteral | CharClass::DollarQuoted => TokenKind::Literal,
        };

        match current.as_mut() {
            Some((current_kind, _, end)) if *current_kind == kind && *end == step.start => {
                *end = step.end;
            }
            _ => {
                flush_token(sql, &mut current, &mut tokens);
                current = Some((kind, step.start, step.end));
            }
        }
    }
    flush_token(sql, &mut current, &mut tokens);

    tokens
}

fn flush_token<'a>(
    sql: &'a str,
    current: &mut Option<(TokenKind, usize, usize)>,
    tokens: &mut Vec<Token<'a>>,
) {
    if let Some((kind, start, end)) = current.take() {
        tokens.push(Token {
            kind,
            text: &sql[start..end],
            start,
            end,
        });
    }
}

/// トップレベルのカンマで分割（括弧内・クォート内のカンマでは分割しない）
///
/// 各要素は前後の空白をトリムした部分文字列。空の要素は除外します。
pub(crate) fn split_top_level_commas(sql: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut part_start = 0;

    for step in SqlScanner::new(sql) {
        if step.is_top_level(',') {
            parts.push(&sql[part_start..step.start]);
            part_start = step.end;
        }
    }
    parts.push(&sql[part_start..]);

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// 末尾のコメントと空白を取り除く
///
/// 判定はスキャナーの分類に従うため、文字列リテラルやドル引用符ブロック内の
/// `--` はコメントとして扱いません。
pub(crate) fn trim_trailing_comments(sql: &str) -> &str {
    let end = SqlScanner::new(sql)
        .filter(|step| match step.class {
            CharClass::Comment => false,
            CharClass::Code => !step.ch.is_whitespace(),
            _ => true,
        })
        .last()
        .map_or(0, |step| step.end);
    &sql[..end]
}
