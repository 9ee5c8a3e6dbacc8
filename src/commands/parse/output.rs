use chrono::NaiveDate;
use regex::Regex;

use crate::model::CategoryEntry;
use crate::parser::{TABLE_END, TABLE_START};

/// Joins the assembled line sequence into the final file body: one blank line
/// between paragraphs, no blank line inside a table block, blank-line runs
/// collapsed to a single blank line.
pub fn render_markdown(lines: &[String]) -> String {
    let mut rendered = lines.join("\n\n");
    rendered = rendered.replace(&format!("{TABLE_START}\n"), TABLE_START);
    rendered = rendered.replace(&format!("\n{TABLE_END}"), TABLE_END);
    rendered = rendered.replace("|\n\n|", "|\n|");
    collapse_blank_runs(&rendered)
}

fn collapse_blank_runs(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut newline_run = 0_usize;

    for character in text.chars() {
        if character == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                collapsed.push(character);
            }
        } else {
            newline_run = 0;
            collapsed.push(character);
        }
    }

    collapsed
}

/// Filenames drop the 中华人民共和国 prefix; the document heading keeps it.
pub fn simple_title(title: &str) -> &str {
    let trimmed = title.trim();
    trimmed.strip_prefix("中华人民共和国").unwrap_or(trimmed)
}

/// `<title>(<YYYY-MM-DD>).md` when a publish date is known, else `<title>.md`.
pub fn law_filename(title: &str, publish: Option<NaiveDate>) -> String {
    match publish {
        Some(date) => format!("{}({}).md", simple_title(title), date.format("%Y-%m-%d")),
        None => format!("{}.md", simple_title(title)),
    }
}

/// The explicit `publish` field wins; otherwise the first full Chinese date in
/// the description is taken as the promulgation date.
pub fn resolve_publish_date(
    chinese_date: &Regex,
    publish: Option<&str>,
    description: &str,
) -> Option<NaiveDate> {
    if let Some(raw) = publish
        && let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
    {
        return Some(date);
    }

    let captures = chinese_date.captures(description)?;
    let year = captures.get(1)?.as_str().parse().ok()?;
    let month = captures.get(2)?.as_str().parse().ok()?;
    let day = captures.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Category index entries carry full official titles; a document belongs to
/// the first entry whose title contains the document's simple title.
pub fn category_folder<'a>(categories: &'a [CategoryEntry], simple_title: &str) -> Option<&'a str> {
    categories
        .iter()
        .find(|entry| entry.title.contains(simple_title))
        .map(|entry| entry.category.as_str())
}
