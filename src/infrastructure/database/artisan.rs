//! Artisan Database Adapter
//!
//! Drives the local snapshot tool (`php artisan snapshot:*`) and runs table
//! maintenance through `tinker`, all inside the project root.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::domain::ports::{CommandOutput, LocalDatabase};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::process::{run_with_timeout, StdoutMode};

/// Local database reached through the snapshot tool
#[derive(Debug, Clone)]
pub struct ArtisanDatabase {
    /// Tool invocation split into program and leading arguments
    tool: Vec<String>,
    project_root: PathBuf,
    driver: String,
    timeout: Duration,
}

impl ArtisanDatabase {
    pub fn new(
        tool: &str,
        project_root: impl Into<PathBuf>,
        driver: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            tool: tool.split_whitespace().map(str::to_string).collect(),
            project_root: project_root.into(),
            driver: driver.into(),
            timeout,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (program, leading) = match self.tool.split_first() {
            Some((program, leading)) => (program.as_str(), leading),
            None => ("php", &[][..]),
        };
        let mut cmd = Command::new(program);
        cmd.args(leading)
            .args(args.into_iter().map(Into::into))
            .current_dir(&self.project_root);
        cmd
    }

    fn run(&self, cmd: Command) -> CommandOutput {
        tracing::debug!(command = ?cmd, "running local snapshot tool");
        run_with_timeout(cmd, self.timeout, StdoutMode::Capture)
    }

    fn tinker(&self, code: String) -> Command {
        self.command(["tinker".to_string(), format!("--execute={code}")])
    }
}

impl LocalDatabase for ArtisanDatabase {
    fn driver(&self) -> String {
        self.driver.clone()
    }

    fn create_snapshot(
        &self,
        name: &str,
        excluded_tables: &[String],
        compress: bool,
    ) -> CommandOutput {
        let mut args = vec!["snapshot:create".to_string(), name.to_string()];
        args.extend(excluded_tables.iter().map(|t| format!("--exclude={t}")));
        if compress {
            args.push("--compress".to_string());
        }
        self.run(self.command(args))
    }

    fn load_snapshot(&self, name: &str, drop_tables_first: bool) -> CommandOutput {
        self.run(self.command(load_args(name, drop_tables_first)))
    }

    fn table_names(&self) -> SyncResult<Vec<String>> {
        let output = self.run(
            self.tinker("echo implode(PHP_EOL, Schema::getTableListing());".to_string()),
        );
        if !output.success {
            return Err(SyncError::transport("list local tables", output.diagnostic()));
        }
        Ok(parse_table_listing(&output.stdout))
    }

    fn truncate_tables(&self, tables: &[String]) -> CommandOutput {
        self.run(self.tinker(format!(
            "Schema::disableForeignKeyConstraints(); foreach ({} as $t) {{ DB::table($t)->truncate(); }} Schema::enableForeignKeyConstraints();",
            php_array(tables)
        )))
    }

    fn drop_tables(&self, tables: &[String]) -> CommandOutput {
        self.run(self.tinker(format!(
            "Schema::disableForeignKeyConstraints(); foreach ({} as $t) {{ Schema::dropIfExists($t); }} Schema::enableForeignKeyConstraints();",
            php_array(tables)
        )))
    }
}

fn load_args(name: &str, drop_tables_first: bool) -> [String; 4] {
    [
        "snapshot:load".to_string(),
        name.to_string(),
        "--force".to_string(),
        format!("--drop-tables={}", u8::from(drop_tables_first)),
    ]
}

/// One table per line; tinker noise such as blank lines is ignored
fn parse_table_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(' '))
        .map(str::to_string)
        .collect()
}

/// PHP array literal of single-quoted strings
fn php_array(values: &[String]) -> String {
    let quoted: Vec<String> = values
        .iter()
        .map(|v| format!("'{}'", v.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}
