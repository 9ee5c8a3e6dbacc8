use std::collections::HashSet;
use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::parser::INFO_END;
use crate::util::walk_markdown_files;

/// Checks written documents for repeated `## ` section titles — the footprint
/// of a table of contents that escaped suppression in an earlier run — and,
/// with `--fix`, drops everything between the front-matter sentinel and the
/// last occurrence of the first repeated title.
pub fn run(args: ValidateArgs) -> Result<()> {
    let files = walk_markdown_files(&args.output_root)?;

    let mut affected = 0_usize;
    let mut fixed = 0_usize;

    for file in &files {
        let content = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        let lines = content.lines().collect::<Vec<&str>>();

        let Some(repaired) = repair_duplicate_sections(&lines) else {
            continue;
        };

        affected += 1;
        if args.fix {
            fs::write(file, repaired.join("\n"))
                .with_context(|| format!("failed to rewrite {}", file.display()))?;
            fixed += 1;
            info!(path = %file.display(), "removed duplicated section block");
        } else {
            warn!(path = %file.display(), "duplicated section titles");
        }
    }

    info!(
        scanned = files.len(),
        affected,
        fixed,
        "validation completed"
    );

    Ok(())
}

/// Returns the repaired line sequence, or `None` when the document is clean
/// (or has no front-matter sentinel to anchor the repair).
fn repair_duplicate_sections(lines: &[&str]) -> Option<Vec<String>> {
    let titles = lines
        .iter()
        .filter(|line| line.starts_with("## "))
        .collect::<Vec<_>>();

    if titles.is_empty() {
        return None;
    }

    let unique = titles.iter().collect::<HashSet<_>>();
    if unique.len() == titles.len() {
        return None;
    }

    let info_end_index = lines
        .iter()
        .position(|line| line.trim().starts_with(INFO_END))?;

    // Whitespace-insensitive comparison: the duplicated TOC copy often differs
    // from the real heading only in spacing.
    let wanted = squash_spaces(titles[0]);
    let body_start = lines
        .iter()
        .rposition(|line| squash_spaces(line) == wanted)?;

    if body_start <= info_end_index {
        return None;
    }

    let mut repaired = Vec::with_capacity(lines.len());
    repaired.extend(lines[..=info_end_index].iter().map(|line| line.to_string()));
    repaired.extend(lines[body_start..].iter().map(|line| line.to_string()));
    Some(repaired)
}

fn squash_spaces(line: &str) -> String {
    line.chars().filter(|character| *character != ' ').collect()
}
