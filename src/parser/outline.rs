use super::patterns::{PatternCatalog, PatternKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlinedLine {
    pub text: String,
    /// Markdown heading depth, `None` for plain body text.
    pub depth: Option<usize>,
}

/// Assigns a heading depth to every structural line.
///
/// Documents nest their headings inconsistently: one statute opens with 章,
/// another with 节 and only later introduces 章. Depths therefore follow the
/// order in which pattern kinds first appear in this document — the Nth
/// distinct kind maps to depth N+2 — while each individual line is classified
/// against the catalog's priority order.
pub fn assign_headings(catalog: &PatternCatalog, lines: Vec<String>) -> Vec<OutlinedLine> {
    let discovery_order = discover_indent_order(catalog, &lines);

    lines
        .into_iter()
        .map(|line| {
            let depth = catalog
                .match_indent(&line)
                .and_then(|kind| discovery_order.iter().position(|seen| *seen == kind))
                .map(|position| position + 2);

            OutlinedLine { text: line, depth }
        })
        .collect()
}

/// First-seen order of the outline pattern kinds used by this document. At
/// most one kind is recorded per line: the scan stops at the first pattern the
/// line matches that has not been recorded yet.
fn discover_indent_order(catalog: &PatternCatalog, lines: &[String]) -> Vec<PatternKind> {
    let mut order: Vec<PatternKind> = Vec::new();

    for line in lines {
        for pattern in catalog.indent_patterns() {
            if !order.contains(&pattern.kind) && pattern.is_match(line) {
                order.push(pattern.kind);
                break;
            }
        }
    }

    order
}
