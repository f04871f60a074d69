// 命名ポリシー
//
// アプリケーション名と関連パス、出力に埋め込む固定文言の単一ソースを提供します。

/// 現行アプリケーション名
pub const APP_NAME: &str = "dsql-migrate";

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = ".dsql-migrate.yaml";

/// 既定の出力ファイル名
pub const OUTPUT_FILE: &str = "migration.sql";

/// 変換後SQLのヘッダー見出し
pub const HEADER_TITLE: &str = "Transformed for Aurora DSQL";
