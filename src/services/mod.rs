// サービス層
//
// 変換エンジン（分割・分類・規則適用・出力組み立て）と、
// 境界層から利用される補助サービスを提供します。

pub(crate) mod sql_lexer;

pub mod config_loader;
pub mod config_serializer;
pub mod migration_transformer;
pub mod output_composer;
pub mod schema_checker;
pub mod statement_classifier;
pub mod statement_splitter;
pub mod stats_reporter;
