// Core Domain
// ステートメント表現、変換オプションと結果、設定、エラー型などの純粋なドメイン定義

pub mod config;
pub mod error;
pub mod naming;
pub mod schema_check;
pub mod statement;
pub mod transform;
