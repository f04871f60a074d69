// 変換エンジンの統合テスト

mod common;

use common::PRISMA_INIT_MIGRATION;
use dsql_migrate::{format_stats, transform, TransformOptions};

fn no_header() -> TransformOptions {
    TransformOptions::without_header()
}

#[test]
fn test_prisma_init_migration() {
    let result = transform(PRISMA_INIT_MIGRATION, &no_header());

    assert_eq!(result.stats.statements_processed, 4);
    assert_eq!(result.stats.indexes_converted, 2);
    assert_eq!(result.stats.foreign_keys_removed, 1);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.unsupported_statements.is_empty());

    assert!(result.sql.contains("CREATE UNIQUE INDEX ASYNC \"owner_name_key\""));
    assert!(result.sql.contains("CREATE INDEX ASYNC \"pet_ownerId_idx\""));
    assert!(!result.sql.contains("FOREIGN KEY"));
    assert!(!result.sql.contains("REFERENCES"));
    assert!(!result.sql.contains("-- AddForeignKey"));
    assert_eq!(result.sql.matches("BEGIN;").count(), 4);
    assert_eq!(result.sql.matches("COMMIT;").count(), 4);
    assert!(result.sql.starts_with("-- CreateTable\nBEGIN;\nCREATE TABLE \"owner\" ("));
    assert!(result.sql.ends_with("COMMIT;\n"));
    assert!(!result.sql.ends_with("\n\n"));
}

#[test]
fn test_foreign_key_warning_mentions_relation_mode() {
    let result = transform(PRISMA_INIT_MIGRATION, &no_header());
    assert!(result.warnings[0].contains("relationMode"));
    assert!(result.warnings[0].contains("application-layer"));
}

#[test]
fn test_multiple_foreign_keys_single_warning() {
    let sql = r#"
ALTER TABLE "a" ADD CONSTRAINT "a_b_fkey" FOREIGN KEY ("b") REFERENCES "b"("id");
ALTER TABLE "c" ADD CONSTRAINT "c_d_fkey" FOREIGN KEY ("d") REFERENCES "d"("id");
"#;
    let result = transform(sql, &no_header());
    assert_eq!(result.stats.foreign_keys_removed, 2);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.sql, "");
}

#[test]
fn test_no_foreign_keys_no_warnings() {
    let result = transform("CREATE TABLE \"t\" (\"id\" INT);", &no_header());
    assert!(result.warnings.is_empty());
    assert_eq!(result.stats.foreign_keys_removed, 0);
}

#[test]
fn test_create_index_converted() {
    let result = transform("CREATE INDEX \"n\" ON \"t\"(\"c\")", &no_header());
    assert!(result.sql.contains("CREATE INDEX ASYNC"));
    assert_eq!(result.stats.indexes_converted, 1);

    let result = transform("CREATE UNIQUE INDEX \"n\" ON \"t\"(\"c\")", &no_header());
    assert!(result.sql.contains("CREATE UNIQUE INDEX ASYNC"));
    assert_eq!(result.stats.indexes_converted, 1);
}

#[test]
fn test_mixed_async_indexes() {
    let sql = r#"
CREATE INDEX ASYNC "a_idx" ON "t"("a");
CREATE INDEX "b_idx" ON "t"("b");
CREATE UNIQUE INDEX ASYNC "c_key" ON "t"("c");
CREATE UNIQUE INDEX "d_key" ON "t"("d");
"#;
    let result = transform(sql, &no_header());
    assert_eq!(result.stats.indexes_converted, 2);
    assert_eq!(result.stats.statements_processed, 4);
    assert!(!result.sql.contains("ASYNC ASYNC"));
}

#[test]
fn test_references_named_identifiers_preserved() {
    let sql = r#"
CREATE TABLE "references" ("id" TEXT NOT NULL, "foreign_key" TEXT);
ALTER TABLE "references" ADD COLUMN "references" TEXT;
CREATE INDEX "references_foreign_key_idx" ON "references"("foreign_key");
"#;
    let result = transform(sql, &no_header());
    assert_eq!(result.stats.statements_processed, 3);
    assert_eq!(result.stats.foreign_keys_removed, 0);
    assert!(result.warnings.is_empty());
    assert!(result.sql.contains("CREATE TABLE \"references\""));
    assert!(result.sql.contains("ADD COLUMN \"references\" TEXT"));
}

#[test]
fn test_compound_alter_with_paired_constraint() {
    let sql = r#"ALTER TABLE "vet" DROP CONSTRAINT "vet_pkey", ADD COLUMN "phone" VARCHAR(20), ADD CONSTRAINT "vet_pkey" PRIMARY KEY ("id");"#;

    let result = transform(sql, &no_header());
    assert_eq!(result.unsupported_statements.len(), 1);
    assert!(result.unsupported_statements[0].contains("DROP CONSTRAINT"));
    assert!(result.sql.contains("ADD COLUMN"));
    assert!(result.sql.contains("phone"));
    assert!(!result.sql.contains("ADD CONSTRAINT"));
    assert!(!result.sql.contains("PRIMARY KEY"));

    let forced = transform(sql, &no_header().with_force(true));
    assert_eq!(forced.sql, result.sql);
    assert_eq!(forced.stats.statements_processed, 1);
    assert_eq!(forced.unsupported_statements.len(), 1);
}

#[test]
fn test_compound_alter_only_paired_clauses() {
    let sql = r#"ALTER TABLE "vet" DROP CONSTRAINT "vet_pkey", ADD CONSTRAINT "vet_pkey" PRIMARY KEY ("id", "clinicId");"#;
    let result = transform(sql, &no_header());
    assert_eq!(result.sql, "");
    assert_eq!(result.stats.statements_processed, 0);
    assert_eq!(result.unsupported_statements.len(), 1);
}

#[test]
fn test_multiline_compound_alter() {
    let sql = "-- AlterTable\nALTER TABLE \"vet\" DROP CONSTRAINT \"vet_pkey\",\nADD COLUMN \"phone\" VARCHAR(20),\nADD COLUMN \"email\" TEXT,\nADD CONSTRAINT \"vet_pkey\" PRIMARY KEY (\"id\");\n";
    let result = transform(sql, &no_header());
    assert_eq!(
        result.sql,
        "-- AlterTable\nBEGIN;\nALTER TABLE \"vet\" ADD COLUMN \"phone\" VARCHAR(20),\nADD COLUMN \"email\" TEXT;\nCOMMIT;\n"
    );
}

#[test]
fn test_idempotent_retransform() {
    let first = transform(PRISMA_INIT_MIGRATION, &no_header());
    let second = transform(&first.sql, &no_header());

    assert_eq!(second.stats.indexes_converted, 0);
    assert_eq!(second.sql, first.sql);
    assert!(!second.sql.contains("BEGIN;\nBEGIN;"));
}

#[test]
fn test_idempotent_retransform_with_header() {
    let options = TransformOptions::default();
    let first = transform(PRISMA_INIT_MIGRATION, &options);
    let second = transform(&first.sql, &options);

    assert_eq!(second.sql, first.sql);
    assert_eq!(second.sql.matches("Transformed for Aurora DSQL").count(), 1);
}

#[test]
fn test_already_wrapped_statement() {
    let sql = "BEGIN;\nCREATE TABLE \"t\" (\"id\" INT);\nCOMMIT;\n";
    let result = transform(sql, &no_header());
    assert_eq!(result.sql.matches("BEGIN;").count(), 1);
    assert_eq!(result.sql.matches("COMMIT;").count(), 1);
    assert_eq!(result.stats.statements_processed, 1);
}

#[test]
fn test_header_included_by_default() {
    let result = transform("CREATE TABLE \"t\" (\"id\" INT);", &TransformOptions::default());
    assert!(result.sql.contains("Transformed for Aurora DSQL"));
}

#[test]
fn test_empty_and_comment_only_input() {
    for sql in ["", "   \n\n", "-- nothing here\n-- at all\n"] {
        let result = transform(sql, &TransformOptions::default());
        assert_eq!(result.sql, "");
        assert_eq!(result.stats.statements_processed, 0);
        assert_eq!(result.stats.indexes_converted, 0);
        assert_eq!(result.stats.foreign_keys_removed, 0);
        assert!(result.warnings.is_empty());
        assert!(result.unsupported_statements.is_empty());
    }
}

#[test]
fn test_semicolons_inside_literals_and_functions() {
    let sql = r#"
CREATE TABLE "note" ("body" TEXT DEFAULT 'a;b');
CREATE FUNCTION f() RETURNS INT AS $$ SELECT 1; $$ LANGUAGE sql;
"#;
    let result = transform(sql, &no_header());
    assert_eq!(result.stats.statements_processed, 2);
    assert!(result.sql.contains("DEFAULT 'a;b'"));
    assert!(result.sql.contains("$$ SELECT 1; $$"));
}

#[test]
fn test_unterminated_quote_becomes_final_statement() {
    let result = transform("CREATE TABLE \"t\" (\"id\" INT); SELECT 'open", &no_header());
    assert_eq!(result.stats.statements_processed, 2);
    assert!(result.sql.contains("SELECT 'open"));
}

#[test]
fn test_format_stats_summary() {
    let result = transform(PRISMA_INIT_MIGRATION, &no_header());
    let text = format_stats(&result);

    assert!(text.contains("4 statement(s)"));
    assert!(text.contains("2 index(es)"));
    assert!(text.contains("1 foreign key"));
    assert!(text.lines().any(|line| line.starts_with('⚠')));
}

#[test]
fn test_multiline_literal_with_dash_line_survives() {
    let sql = "INSERT INTO \"t\" (\"v\") VALUES ('first line\n-- second line');\nSELECT 1;";
    let result = transform(sql, &no_header());

    assert_eq!(result.stats.statements_processed, 2);
    assert!(result
        .sql
        .contains("VALUES ('first line\n-- second line');\nCOMMIT;"));
    assert_eq!(transform(&result.sql, &no_header()).sql, result.sql);
}

#[test]
fn test_commented_clause_in_rewritten_alter() {
    let sql = "ALTER TABLE \"vet\" DROP CONSTRAINT \"vet_pkey\",\nADD COLUMN \"a\" INT -- first\n, ADD COLUMN \"b\" INT,\nADD CONSTRAINT \"vet_pkey\" PRIMARY KEY (\"id\");";
    let result = transform(sql, &no_header());

    assert!(!result.sql.contains("-- first,"));
    assert!(result
        .sql
        .contains("ALTER TABLE \"vet\" ADD COLUMN \"a\" INT,\nADD COLUMN \"b\" INT;"));
    assert_eq!(result.unsupported_statements.len(), 1);
    assert_eq!(transform(&result.sql, &no_header()).sql, result.sql);
}

#[test]
fn test_comment_before_transaction_marker() {
    let sql = "/* migration */ BEGIN;\nCREATE TABLE \"t\" (\"id\" INT);\nCOMMIT;";
    let result = transform(sql, &no_header());

    assert_eq!(result.stats.statements_processed, 1);
    assert_eq!(result.sql.matches("BEGIN;").count(), 1);
    assert_eq!(result.sql.matches("COMMIT;").count(), 1);
    assert_eq!(result.sql, "BEGIN;\nCREATE TABLE \"t\" (\"id\" INT);\nCOMMIT;\n");
}
