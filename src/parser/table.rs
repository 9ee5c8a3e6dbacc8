pub const TABLE_START: &str = "<!-- TABLE -->";
pub const TABLE_END: &str = "<!-- TABLE END -->";

/// Renders one table row as `| cell1  |cell2  |…|`. Newlines inside a cell are
/// carried through as-is; later whitespace normalization flattens them.
pub fn render_row(cells: &[String]) -> String {
    let mut row = String::from("| ");
    for cell in cells {
        row.push_str(cell);
        row.push_str("  |");
    }
    row
}

pub fn render_separator(column_count: usize) -> String {
    let mut separator = String::from("|");
    for _ in 0..column_count {
        separator.push_str("-----|");
    }
    separator
}

/// Renders a full table block between the table sentinels. The separator's
/// column count always equals the header row's cell count. A table with no
/// rows, or whose header row has no cells, is not representable and yields
/// `None`.
pub fn render_table(rows: &[Vec<String>]) -> Option<Vec<String>> {
    let header = rows.first()?;
    if header.is_empty() {
        return None;
    }

    let mut block = Vec::with_capacity(rows.len() + 3);
    block.push(TABLE_START.to_string());
    block.push(render_row(header));
    block.push(render_separator(header.len()));
    for row in &rows[1..] {
        block.push(render_row(row));
    }
    block.push(TABLE_END.to_string());

    Some(block)
}
