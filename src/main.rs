use anyhow::Result;
use clap::Parser;
use colored::control as color_control;
use dsql_migrate::cli::commands::check::{CheckCommand, CheckCommandHandler};
use dsql_migrate::cli::commands::init::{InitCommand, InitCommandHandler};
use dsql_migrate::cli::commands::transform::{TransformCommand, TransformCommandHandler};
use dsql_migrate::cli::{Cli, Commands};
use std::env;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run_command(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// トレーシングを初期化する
///
/// ログは標準エラーへ出力する（標準出力は変換後のSQL用）。
/// RUST_LOG が設定されていればそれを優先する。
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dsql_migrate={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// コマンドを実行する
fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    match cli.command {
        Commands::Transform {
            input,
            output,
            force,
            no_header,
        } => {
            let handler = TransformCommandHandler::new();
            let command = TransformCommand {
                project_path,
                config_path: cli.config,
                input,
                output,
                force,
                no_header,
                format: cli.format,
            };
            handler.execute(&command)
        }

        Commands::Check { schema } => {
            let handler = CheckCommandHandler::new();
            let command = CheckCommand {
                project_path,
                schema_path: schema,
                format: cli.format,
            };
            handler.execute(&command)
        }

        Commands::Init { force } => {
            let handler = InitCommandHandler::new();
            let command = InitCommand {
                project_path,
                config_path: cli.config,
                force,
            };
            let path = handler.execute(&command)?;
            Ok(format!("Created config file: {}", path.display()))
        }
    }
}
