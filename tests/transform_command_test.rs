// transformコマンドハンドラーのテスト

mod common;

use anyhow::Result;
use common::{setup_test_project, write_file, PRISMA_INIT_MIGRATION};
use dsql_migrate::cli::commands::transform::{TransformCommand, TransformCommandHandler};
use dsql_migrate::cli::OutputFormat;
use dsql_migrate::core::error::TransformError;
use std::fs;
use std::path::{Path, PathBuf};

const COMPOUND_ALTER: &str = r#"-- AlterTable
ALTER TABLE "vet" DROP CONSTRAINT "vet_pkey",
ADD COLUMN "phone" VARCHAR(20),
ADD CONSTRAINT "vet_pkey" PRIMARY KEY ("id");
"#;

fn transform_command(project_path: &Path, input: &str) -> TransformCommand {
    TransformCommand {
        project_path: project_path.to_path_buf(),
        config_path: None,
        input: Some(PathBuf::from(input)),
        output: None,
        force: false,
        no_header: false,
        format: OutputFormat::Text,
    }
}

#[test]
fn test_new_handler() {
    let handler = TransformCommandHandler::new();
    assert!(format!("{:?}", handler).contains("TransformCommandHandler"));
}

#[test]
fn test_transform_to_stdout() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    write_file(&project_path, "migration.sql", PRISMA_INIT_MIGRATION)?;

    let output = TransformCommandHandler::new()
        .execute(&transform_command(&project_path, "migration.sql"))?;

    assert!(output.starts_with("-- Transformed for Aurora DSQL\n-- Generated at: "));
    assert!(output.contains("CREATE INDEX ASYNC"));
    assert!(!output.contains("FOREIGN KEY"));
    Ok(())
}

#[test]
fn test_transform_to_output_file() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    write_file(&project_path, "migration.sql", PRISMA_INIT_MIGRATION)?;

    let mut command = transform_command(&project_path, "migration.sql");
    command.output = Some(PathBuf::from("out/dsql.sql"));
    command.no_header = true;

    let output = TransformCommandHandler::new().execute(&command)?;

    assert!(output.contains("4 statement(s) wrapped in transactions"));
    assert!(output.contains("2 index(es) converted"));
    assert!(output.contains("1 foreign key constraint(s) removed"));
    assert!(output.contains("relationMode"));

    let written = fs::read_to_string(project_path.join("out/dsql.sql"))?;
    assert!(written.starts_with("-- CreateTable\nBEGIN;"));
    assert!(written.ends_with("COMMIT;\n"));
    Ok(())
}

#[test]
fn test_transform_uses_config_output_dir() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    write_file(&project_path, "migration.sql", PRISMA_INIT_MIGRATION)?;
    write_file(
        &project_path,
        ".dsql-migrate.yaml",
        "version: \"1.0\"\ninclude_header: false\noutput_dir: dsql\noutput_file: init.sql\n",
    )?;

    TransformCommandHandler::new().execute(&transform_command(&project_path, "migration.sql"))?;

    let written = fs::read_to_string(project_path.join("dsql/init.sql"))?;
    assert!(!written.contains("Transformed for Aurora DSQL"));
    assert!(written.contains("CREATE UNIQUE INDEX ASYNC"));
    Ok(())
}

#[test]
fn test_unsupported_statements_abort_without_force() -> Result<()> {
    colored::control::set_override(false);
    let (_temp_dir, project_path) = setup_test_project()?;
    write_file(&project_path, "migration.sql", COMPOUND_ALTER)?;

    let mut command = transform_command(&project_path, "migration.sql");
    command.output = Some(PathBuf::from("out.sql"));

    let err = TransformCommandHandler::new()
        .execute(&command)
        .expect_err("unsupported statements must abort");

    let transform_error = err
        .downcast_ref::<TransformError>()
        .expect("TransformError expected");
    assert_eq!(
        transform_error.statements(),
        &["ALTER TABLE \"vet\" DROP CONSTRAINT \"vet_pkey\"".to_string()]
    );
    assert!(format!("{:#}", err).contains("--force"));
    assert!(!project_path.join("out.sql").exists());
    Ok(())
}

#[test]
fn test_unsupported_statements_dropped_with_force() -> Result<()> {
    colored::control::set_override(false);
    let (_temp_dir, project_path) = setup_test_project()?;
    write_file(&project_path, "migration.sql", COMPOUND_ALTER)?;

    let mut command = transform_command(&project_path, "migration.sql");
    command.output = Some(PathBuf::from("out.sql"));
    command.force = true;
    command.no_header = true;

    let output = TransformCommandHandler::new().execute(&command)?;
    assert!(output.contains("Unsupported statements were dropped"));
    assert!(output.contains("DROP CONSTRAINT \"vet_pkey\""));

    let written = fs::read_to_string(project_path.join("out.sql"))?;
    assert_eq!(
        written,
        "-- AlterTable\nBEGIN;\nALTER TABLE \"vet\" ADD COLUMN \"phone\" VARCHAR(20);\nCOMMIT;\n"
    );
    Ok(())
}

#[test]
fn test_force_from_config() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    write_file(&project_path, "migration.sql", COMPOUND_ALTER)?;
    write_file(&project_path, ".dsql-migrate.yaml", "version: \"1.0\"\nforce: true\n")?;

    let output = TransformCommandHandler::new()
        .execute(&transform_command(&project_path, "migration.sql"))?;
    assert!(output.contains("ADD COLUMN \"phone\""));
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    write_file(&project_path, "migration.sql", PRISMA_INIT_MIGRATION)?;

    let mut command = transform_command(&project_path, "migration.sql");
    command.format = OutputFormat::Json;

    let output = TransformCommandHandler::new().execute(&command)?;
    let value: serde_json::Value = serde_json::from_str(&output)?;

    assert_eq!(value["stats"]["statements_processed"], 4);
    assert_eq!(value["stats"]["indexes_converted"], 2);
    assert_eq!(value["stats"]["foreign_keys_removed"], 1);
    assert_eq!(value["warnings"].as_array().map(Vec::len), Some(1));
    assert!(value["sql"].as_str().is_some_and(|sql| sql.contains("ASYNC")));
    assert!(value.get("output_path").is_none());
    Ok(())
}

#[test]
fn test_missing_input_file() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;

    let err = TransformCommandHandler::new()
        .execute(&transform_command(&project_path, "missing.sql"))
        .unwrap_err();
    assert!(err.to_string().contains("File not found"));
    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let (_temp_dir, project_path) = setup_test_project()?;
    write_file(&project_path, "migration.sql", PRISMA_INIT_MIGRATION)?;
    write_file(&project_path, ".dsql-migrate.yaml", "version: \"\"\n")?;

    let err = TransformCommandHandler::new()
        .execute(&transform_command(&project_path, "migration.sql"))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("version is not specified"));
    Ok(())
}
