// エラー型定義
//
// 境界層で使用されるカスタムエラー型を提供します。
// 変換エンジン自体はエラーを返さず、異常はすべて結果データとして記録されます。
// thiserrorを使用して、ConfigError, IoError, TransformError を定義します。

use thiserror::Error;

/// 設定エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// バージョン未指定
    #[error("Config file version is not specified")]
    MissingVersion,

    /// 出力ファイル名が空
    #[error("Output file name must not be empty")]
    EmptyOutputFile,

    /// 出力ファイル名にパス区切りが含まれる
    #[error("Output file name must be a plain file name, got '{name}'")]
    InvalidOutputFile {
        /// 指定されたファイル名
        name: String,
    },
}

/// I/Oエラー
///
/// ファイル操作時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// ファイルパス
        path: String,
    },

    /// File read error
    #[error("Failed to read file: {path} (cause: {cause})")]
    FileRead {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },

    /// File write error
    #[error("Failed to write file: {path} (cause: {cause})")]
    FileWrite {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },
}

/// 変換エラー
///
/// 変換結果に対する境界層のポリシー判定で発生するエラーを表現します。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// 未サポートのステートメントが含まれている（--force なし）
    #[error("{count} unsupported statement(s) found. Re-run with --force to drop them and continue")]
    UnsupportedStatements {
        /// 未サポートのステートメント数
        count: usize,
        /// 未サポートのステートメント一覧
        statements: Vec<String>,
    },
}

impl TransformError {
    /// 未サポートのステートメント一覧を取得
    pub fn statements(&self) -> &[String] {
        match self {
            TransformError::UnsupportedStatements { statements, .. } => statements,
        }
    }
}
