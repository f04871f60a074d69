// dsql-migrateライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメインモデル（ステートメント、変換結果、設定、エラー）
// - services: 変換エンジンとスキーマチェック、設定ファイルの読み書き

pub mod cli;
pub mod core;
pub mod services;

pub use crate::core::transform::{TransformOptions, TransformResult, TransformStats};
pub use crate::services::migration_transformer::transform;
pub use crate::services::schema_checker::check_schema;
pub use crate::services::stats_reporter::format_stats;
