use colored::Colorize;

pub struct UnsupportedStatementFormatter;

impl Default for UnsupportedStatementFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl UnsupportedStatementFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_error(&self, statements: &[String], command: &str) -> String {
        let mut output = String::new();

        output.push_str(
            format!("{}\n\n", "Unsupported statements detected".red().bold()).as_str(),
        );

        for line in format_statement_lines(statements) {
            output.push_str(line.red().to_string().as_str());
            output.push('\n');
        }

        output.push('\n');
        output.push_str("Aurora DSQL cannot execute these statements. To proceed, choose one of the following:\n");
        output.push_str(&format!(
            "  1. Drop them from the output: {} --force\n",
            command
        ));
        output.push_str("  2. Rewrite the migration so the constraint is not dropped\n");

        output
    }

    pub fn format_warning(&self, statements: &[String]) -> String {
        let mut output = String::new();

        output.push_str(
            format!(
                "{}\n",
                "Warning: Unsupported statements were dropped".yellow().bold()
            )
            .as_str(),
        );

        let lines = format_statement_lines(statements);
        if lines.is_empty() {
            output.push_str("  No unsupported statements were listed.\n");
            return output;
        }

        for line in lines {
            output.push_str(&format!("  {}\n", line.yellow()));
        }

        output
    }
}

fn format_statement_lines(statements: &[String]) -> Vec<String> {
    statements
        .iter()
        .map(|statement| format!("  - {}", statement))
        .collect()
}
