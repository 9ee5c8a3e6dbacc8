use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::{info, warn};

use crate::cli::ParseArgs;
use crate::model::{
    CategoryEntry, DocumentExtract, ParseCounts, ParseSummaryManifest,
};
use crate::parser::{NoContentExtracted, PatternCatalog, assemble_document};
use crate::util::{ensure_directory, now_utc_string, write_json_pretty};

use super::output::{
    category_folder, law_filename, render_markdown, resolve_publish_date, simple_title,
};

enum DocumentOutcome {
    Written(PathBuf),
    SkippedExisting(PathBuf),
    SkippedNoContent,
}

pub fn run(args: ParseArgs) -> Result<()> {
    let catalog = PatternCatalog::new()?;
    let chinese_date = Regex::new(r"(\d{4})年(\d{1,2})月(\d{1,2})日")
        .context("failed to compile publish date pattern")?;

    let categories = load_category_index(&args.cache_root)?;
    let extracts_dir = args.cache_root.join("extracts");
    let extract_paths = discover_extracts(&extracts_dir)?;

    if extract_paths.is_empty() {
        bail!("no document extracts found in {}", extracts_dir.display());
    }

    info!(
        extracts = extract_paths.len(),
        categories = categories.len(),
        output_root = %args.output_root.display(),
        "parse batch starting"
    );

    let mut counts = ParseCounts {
        extracts_total: extract_paths.len(),
        ..ParseCounts::default()
    };
    let mut failures = Vec::new();

    for extract_path in &extract_paths {
        let outcome = parse_one(
            &catalog,
            &chinese_date,
            &categories,
            extract_path,
            &args.output_root,
            args.force,
        );

        match outcome {
            Ok(DocumentOutcome::Written(path)) => {
                counts.written += 1;
                info!(path = %path.display(), "wrote document");
            }
            Ok(DocumentOutcome::SkippedExisting(path)) => {
                counts.skipped_existing += 1;
                info!(path = %path.display(), "target exists, skipping");
            }
            Ok(DocumentOutcome::SkippedNoContent) => {
                counts.skipped_no_content += 1;
            }
            Err(error) => {
                counts.failed += 1;
                failures.push(format!("{}: {error:#}", extract_path.display()));
                warn!(
                    extract = %extract_path.display(),
                    error = %error,
                    "document parse failed"
                );
            }
        }
    }

    let summary_path = args
        .summary_path
        .unwrap_or_else(|| args.cache_root.join("manifests").join("parse_summary.json"));

    let manifest = ParseSummaryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        cache_root: args.cache_root.display().to_string(),
        output_root: args.output_root.display().to_string(),
        counts: counts.clone(),
        failures,
    };
    write_json_pretty(&summary_path, &manifest)?;

    info!(
        written = counts.written,
        skipped_existing = counts.skipped_existing,
        skipped_no_content = counts.skipped_no_content,
        failed = counts.failed,
        summary = %summary_path.display(),
        "parse batch completed"
    );

    Ok(())
}

fn parse_one(
    catalog: &PatternCatalog,
    chinese_date: &Regex,
    categories: &[CategoryEntry],
    extract_path: &Path,
    output_root: &Path,
    force: bool,
) -> Result<DocumentOutcome> {
    let raw = fs::read(extract_path)
        .with_context(|| format!("failed to read {}", extract_path.display()))?;
    let extract: DocumentExtract = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", extract_path.display()))?;

    let title = extract.title.trim();
    if title.is_empty() {
        bail!("extract has an empty title: {}", extract_path.display());
    }

    let document = match assemble_document(catalog, title, &extract.description, &extract.content)
    {
        Ok(document) => document,
        Err(error) if error.downcast_ref::<NoContentExtracted>().is_some() => {
            warn!(title, "nothing left after suppression, skipping document");
            return Ok(DocumentOutcome::SkippedNoContent);
        }
        Err(error) => return Err(error),
    };

    let publish = resolve_publish_date(
        chinese_date,
        extract.publish.as_deref(),
        &extract.description,
    );

    let mut target_dir = output_root.to_path_buf();
    if let Some(folder) = category_folder(categories, simple_title(title)) {
        target_dir = target_dir.join(folder);
    }
    let target = target_dir.join(law_filename(title, publish));

    if target.exists() && !force {
        return Ok(DocumentOutcome::SkippedExisting(target));
    }

    ensure_directory(&target_dir)?;
    fs::write(&target, render_markdown(&document))
        .with_context(|| format!("failed to write {}", target.display()))?;

    Ok(DocumentOutcome::Written(target))
}

fn load_category_index(cache_root: &Path) -> Result<Vec<CategoryEntry>> {
    let index_path = cache_root.join("categories.json");
    if !index_path.exists() {
        return Ok(Vec::new());
    }

    let raw = fs::read(&index_path)
        .with_context(|| format!("failed to read {}", index_path.display()))?;
    serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", index_path.display()))
}

fn discover_extracts(extracts_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(extracts_dir)
        .with_context(|| format!("failed to read {}", extracts_dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", extracts_dir.display()))?;
        let path = entry.path();

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}
