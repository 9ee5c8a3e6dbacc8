use std::fmt;

use anyhow::Result;
use tracing::warn;

use crate::model::ContentBlock;

use super::description::extract_description;
use super::outline::assign_headings;
use super::patterns::PatternCatalog;
use super::table::render_table;
use super::toc::filter_content;

pub const INFO_END: &str = "<!-- INFO END -->";

/// Title duplicates are only removed when they appear this close to the top of
/// the body; a later occurrence of the same text is legitimate content.
const TITLE_DEDUPE_WINDOW: usize = 10;

/// Suppression consumed the entire document, typically one that is nothing but
/// a table of contents. The document should be skipped, not written.
#[derive(Debug)]
pub struct NoContentExtracted {
    pub title: String,
}

impl fmt::Display for NoContentExtracted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no content extracted from {}", self.title)
    }
}

impl std::error::Error for NoContentExtracted {}

/// Builds the complete ordered Markdown line sequence for one document:
/// `# title`, the cleaned description lines, the [`INFO_END`] sentinel, then
/// the outlined body with tables as pipe-table blocks.
pub fn assemble_document(
    catalog: &PatternCatalog,
    title: &str,
    description: &str,
    content: &[ContentBlock],
) -> Result<Vec<String>> {
    let description_lines = extract_description(catalog, description);

    let mut stream = Vec::new();
    for block in content {
        match block {
            ContentBlock::Text(text) => stream.push(text.clone()),
            ContentBlock::Table { table } => match render_table(table) {
                Some(lines) => stream.extend(lines),
                None => warn!(title, "skipping table with empty header row"),
            },
        }
    }

    let mut filtered = filter_content(catalog, &stream)?;
    if filtered.is_empty() {
        return Err(NoContentExtracted {
            title: title.to_string(),
        }
        .into());
    }

    // Source documents often repeat the title as the first body paragraph.
    let trimmed_title = title.trim();
    if let Some(position) = filtered
        .iter()
        .take(TITLE_DEDUPE_WINDOW)
        .position(|line| line == trimmed_title)
    {
        filtered.remove(position);
    }

    let outlined = assign_headings(catalog, filtered);

    let mut document = Vec::with_capacity(outlined.len() + description_lines.len() + 2);
    document.push(format!("# {title}"));
    document.extend(description_lines);
    document.push(INFO_END.to_string());

    for line in outlined {
        match line.depth {
            Some(depth) => document.push(format!("{} {}", "#".repeat(depth), line.text)),
            None => document.push(line.text),
        }
    }

    Ok(document)
}
