use serde::{Deserialize, Serialize};

/// One extracted source document, as produced by the upstream fetch/extraction
/// step. `content` preserves document order; a table arrives already segmented
/// into rows of cell texts.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentExtract {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub publish: Option<String>,

    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Table { table: Vec<Vec<String>> },
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseCounts {
    pub extracts_total: usize,
    pub written: usize,
    pub skipped_existing: usize,
    pub skipped_no_content: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseSummaryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub cache_root: String,
    pub output_root: String,
    pub counts: ParseCounts,
    pub failures: Vec<String>,
}
