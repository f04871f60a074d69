// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 出力フォーマット
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

/// dsql-migrate - Aurora DSQL migration transformer
///
/// Rewrites PostgreSQL migration SQL produced by schema-diff tools
/// so that it can run on Aurora DSQL.
#[derive(Parser, Debug)]
#[command(name = "dsql-migrate")]
#[command(author = "dsql-migrate Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Transform PostgreSQL migrations for Aurora DSQL")]
#[command(long_about = "dsql-migrate - Aurora DSQL migration transformer

Rewrites PostgreSQL migration SQL produced by schema-diff tools
so that it can run on Aurora DSQL.

dsql-migrate helps you:
  • Run every statement in its own transaction
  • Build indexes asynchronously (CREATE INDEX ASYNC)
  • Remove foreign key constraints
  • Detect DROP CONSTRAINT statements that Aurora DSQL rejects
  • Check Prisma schemas for unsupported features")]
#[command(propagate_version = true)]
#[command(after_help = "GETTING STARTED:
  1. Create a config file:          dsql-migrate init
  2. Check your Prisma schema:      dsql-migrate check prisma/schema.prisma
  3. Transform a migration:         dsql-migrate transform migration.sql

For detailed help on each command, use: dsql-migrate <command> --help")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format (text or json)
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a migration SQL file for Aurora DSQL
    ///
    /// Wraps each statement in its own transaction, converts indexes to
    /// CREATE INDEX ASYNC and removes foreign key constraints.
    ///
    /// EXAMPLES:
    ///   # Transform a file and print the result
    ///   dsql-migrate transform prisma/migrations/0001_init/migration.sql
    ///
    ///   # Read from stdin and write to a file
    ///   cat migration.sql | dsql-migrate transform --output dsql.sql
    ///
    ///   # Drop unsupported statements instead of failing
    ///   dsql-migrate transform migration.sql --force
    Transform {
        /// Input SQL file (reads stdin when omitted or "-")
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Write the transformed SQL to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Continue even if unsupported statements are found
        #[arg(short, long)]
        force: bool,

        /// Omit the generated header comment
        #[arg(long)]
        no_header: bool,
    },

    /// Check a Prisma schema for features Aurora DSQL does not support
    ///
    /// EXAMPLES:
    ///   dsql-migrate check prisma/schema.prisma
    Check {
        /// Schema file to check
        #[arg(value_name = "SCHEMA_FILE")]
        schema: PathBuf,
    },

    /// Create a default configuration file
    ///
    /// EXAMPLES:
    ///   dsql-migrate init
    ///
    ///   # Overwrite an existing configuration file
    ///   dsql-migrate init --force
    Init {
        /// Overwrite the config file if it already exists
        #[arg(short, long)]
        force: bool,
    },
}
