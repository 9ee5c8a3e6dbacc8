use std::fs;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::ParseSummaryManifest;
use crate::util::walk_markdown_files;

pub fn run(args: StatusArgs) -> Result<()> {
    let summary_path = args.cache_root.join("manifests").join("parse_summary.json");
    let db_path = args
        .db_path
        .unwrap_or_else(|| args.output_root.join("db.sqlite3"));

    if summary_path.exists() {
        let raw = fs::read(&summary_path)
            .with_context(|| format!("failed to read {}", summary_path.display()))?;
        let summary: ParseSummaryManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", summary_path.display()))?;

        info!(
            generated_at = %summary.generated_at,
            extracts_total = summary.counts.extracts_total,
            written = summary.counts.written,
            skipped_existing = summary.counts.skipped_existing,
            skipped_no_content = summary.counts.skipped_no_content,
            failed = summary.counts.failed,
            "loaded parse summary"
        );
    } else {
        warn!(path = %summary_path.display(), "parse summary missing");
    }

    if args.output_root.exists() {
        let files = walk_markdown_files(&args.output_root)?;
        info!(
            path = %args.output_root.display(),
            markdown_files = files.len(),
            "output tree status"
        );
    } else {
        warn!(path = %args.output_root.display(), "output tree missing");
    }

    if db_path.exists() {
        let connection = Connection::open(&db_path)
            .with_context(|| format!("failed to open {}", db_path.display()))?;
        let laws = query_count(&connection, "SELECT COUNT(*) FROM laws").unwrap_or(0);
        let categories = query_count(&connection, "SELECT COUNT(*) FROM categories").unwrap_or(0);
        let expired =
            query_count(&connection, "SELECT COUNT(*) FROM laws WHERE expired = 1").unwrap_or(0);

        info!(
            path = %db_path.display(),
            laws,
            categories,
            expired,
            "catalog status"
        );
    } else {
        warn!(path = %db_path.display(), "catalog database missing");
    }

    Ok(())
}

fn query_count(connection: &Connection, sql: &str) -> Result<i64> {
    connection
        .query_row(sql, [], |row| row.get(0))
        .with_context(|| format!("failed to run count query: {sql}"))
}
