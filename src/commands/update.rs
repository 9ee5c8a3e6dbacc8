use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

use crate::cli::UpdateArgs;
use crate::util::{now_utc_string, sha256_file, walk_markdown_files};

const DB_SCHEMA_VERSION: &str = "0.1.0";

/// Top-level folders that name a law level directly; anything else is 法律.
const LEVEL_FOLDER_PATTERN: &str = "^(司法解释|地方性法规|宪法|案例|行政法规|部门规章)$";

const DEFAULT_LEVEL: &str = "法律";

#[derive(Debug, PartialEq, Eq)]
struct LawRecord {
    name: String,
    publish: String,
    level: String,
    folder: String,
    filename: String,
    sha256: String,
}

#[derive(Debug, Default)]
struct UpdateCounts {
    handled: usize,
    created: usize,
    updated: usize,
}

pub fn run(args: UpdateArgs) -> Result<()> {
    let db_path = args
        .db_path
        .unwrap_or_else(|| args.output_root.join("db.sqlite3"));

    let mut connection = Connection::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    configure_connection(&connection)?;
    ensure_schema(&connection)?;

    let stem_pattern =
        Regex::new(r"\((\d{4}-\d{2}-\d{2})\)").context("failed to compile stem pattern")?;
    let level_pattern =
        Regex::new(LEVEL_FOLDER_PATTERN).context("failed to compile level pattern")?;

    let ignored = load_ignored_folders(&args.output_root)?;
    let files = walk_markdown_files(&args.output_root)?;

    info!(
        files = files.len(),
        db = %db_path.display(),
        "catalog update starting"
    );

    let mut counts = UpdateCounts::default();
    let tx = connection.transaction()?;

    for file in &files {
        let relative = file
            .strip_prefix(&args.output_root)
            .with_context(|| format!("file outside output root: {}", file.display()))?;

        if is_ignored(&ignored, relative) {
            continue;
        }

        let Some(record) = law_record_for(file, relative, &stem_pattern, &level_pattern)? else {
            continue;
        };

        counts.handled += 1;
        upsert_law(&tx, &record, &mut counts)?;
    }

    tx.commit()?;
    update_versions(&connection)?;

    let laws_total = query_count(&connection, "SELECT COUNT(*) FROM laws")?;
    let expired_total = query_count(&connection, "SELECT COUNT(*) FROM laws WHERE expired = 1")?;
    info!(
        handled = counts.handled,
        created = counts.created,
        updated = counts.updated,
        laws_total,
        expired_total,
        "catalog update completed"
    );

    Ok(())
}

fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

fn ensure_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS categories (
          id INTEGER PRIMARY KEY,
          name TEXT NOT NULL,
          folder TEXT NOT NULL UNIQUE,
          is_subfolder INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS laws (
          id INTEGER PRIMARY KEY,
          name TEXT NOT NULL,
          level TEXT NOT NULL,
          publish TEXT NOT NULL,
          filename TEXT,
          expired INTEGER NOT NULL DEFAULT 0,
          ver INTEGER NOT NULL DEFAULT 0,
          sha256 TEXT NOT NULL,
          category_id INTEGER NOT NULL,
          FOREIGN KEY(category_id) REFERENCES categories(id)
        );

        CREATE INDEX IF NOT EXISTS idx_laws_name ON laws(name);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_laws_name_publish ON laws(name, publish);
        ",
    )?;

    let now = now_utc_string();
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [DB_SCHEMA_VERSION],
    )?;
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_updated_at', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [now],
    )?;

    Ok(())
}

/// Only stems carrying a `(YYYY-MM-DD)` publish suffix participate in the
/// catalog; everything else in the tree (indexes, templates) is passed over.
fn law_record_for(
    file: &Path,
    relative: &Path,
    stem_pattern: &Regex,
    level_pattern: &Regex,
) -> Result<Option<LawRecord>> {
    let Some(stem) = file.file_stem().and_then(|stem| stem.to_str()) else {
        return Ok(None);
    };

    let Some(captures) = stem_pattern.captures(stem) else {
        return Ok(None);
    };
    let (Some(whole), Some(publish)) = (captures.get(0), captures.get(1)) else {
        return Ok(None);
    };

    let name = stem[..whole.start()].to_string();
    let folder = relative
        .parent()
        .map(|parent| parent.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();

    let level = relative
        .components()
        .next()
        .map(|component| component.as_os_str().to_string_lossy().to_string())
        .filter(|top| level_pattern.is_match(top))
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

    Ok(Some(LawRecord {
        name,
        publish: publish.as_str().to_string(),
        level,
        folder,
        filename: stem.to_string(),
        sha256: sha256_file(file)?,
    }))
}

fn upsert_law(connection: &Connection, record: &LawRecord, counts: &mut UpdateCounts) -> Result<()> {
    let existing: Option<(i64, String, String)> = connection
        .query_row(
            "SELECT id, level, sha256 FROM laws WHERE name = ?1 AND publish = ?2",
            params![record.name, record.publish],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .with_context(|| format!("failed to look up law {}", record.name))?;

    if let Some((id, level, sha256)) = existing {
        if level != record.level || sha256 != record.sha256 {
            connection.execute(
                "UPDATE laws SET level = ?1, sha256 = ?2, filename = ?3 WHERE id = ?4",
                params![record.level, record.sha256, record.filename, id],
            )?;
            counts.updated += 1;
        }
        return Ok(());
    }

    let category_id = get_or_create_category(connection, &record.folder)?;
    connection.execute(
        "INSERT INTO laws(name, level, publish, filename, sha256, category_id)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.name,
            record.level,
            record.publish,
            record.filename,
            record.sha256,
            category_id
        ],
    )?;
    counts.created += 1;

    Ok(())
}

fn get_or_create_category(connection: &Connection, folder: &str) -> Result<i64> {
    let existing: Option<i64> = connection
        .query_row(
            "SELECT id FROM categories WHERE folder = ?1",
            [folder],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("failed to look up category {folder}"))?;

    if let Some(id) = existing {
        return Ok(id);
    }

    let name = folder.rsplit('/').next().filter(|part| !part.is_empty());
    let is_subfolder = folder.contains('/');

    connection.execute(
        "INSERT INTO categories(name, folder, is_subfolder) VALUES(?1, ?2, ?3)",
        params![name.unwrap_or("未分类"), folder, is_subfolder],
    )?;

    Ok(connection.last_insert_rowid())
}

/// `ver` becomes the number of same-name versions; every law with a newer
/// same-name publish date is marked expired.
fn update_versions(connection: &Connection) -> Result<()> {
    connection
        .execute(
            "UPDATE laws SET ver = (SELECT COUNT(1) FROM laws t WHERE t.name = laws.name)",
            [],
        )
        .context("failed to refresh law version counts")?;
    connection
        .execute(
            "UPDATE laws SET expired = EXISTS(
               SELECT 1 FROM laws t WHERE t.name = laws.name AND t.publish > laws.publish
             )",
            [],
        )
        .context("failed to refresh law expiry flags")?;
    Ok(())
}

fn load_ignored_folders(output_root: &Path) -> Result<Vec<PathBuf>> {
    let ignore_path = output_root.join(".lawignore");
    if !ignore_path.exists() {
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(&ignore_path)
        .with_context(|| format!("failed to read {}", ignore_path.display()))?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

fn is_ignored(ignored: &[PathBuf], relative: &Path) -> bool {
    ignored.iter().any(|prefix| relative.starts_with(prefix))
}

fn query_count(connection: &Connection, sql: &str) -> Result<i64> {
    connection
        .query_row(sql, [], |row| row.get(0))
        .with_context(|| format!("failed to run count query: {sql}"))
}
