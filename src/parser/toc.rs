use anyhow::Result;
use regex::Regex;

use super::normalize::normalize_line;
use super::patterns::PatternCatalog;

/// Announcement banners are only honored near the top of a document; a `公告`
/// deeper in the body is content, not a banner.
const ANNOUNCEMENT_WINDOW: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TocState {
    Normal,
    /// The line after a TOC marker; it teaches us what the entries look like.
    AwaitingPattern,
    InMenu,
}

/// Removes a table-of-contents block (and any leading promulgation
/// announcement) from the content stream, left to right in a single pass.
///
/// A `目录` marker switches to [`TocState::AwaitingPattern`]; the next line is
/// recorded verbatim as the boundary and, when it matches an outline pattern,
/// also as a placeholder-numeral boundary regex. Entries are then skipped until
/// the boundary repeats verbatim (the TOC looped back to its own heading), the
/// boundary regex matches a real heading, or — with no learned regex — any
/// structural-header-shaped line appears. Lines are emitted only while outside
/// the menu and outside an announcement block, trimmed and with one space
/// enforced after a leading header token.
pub fn filter_content(catalog: &PatternCatalog, lines: &[String]) -> Result<Vec<String>> {
    let mut state = TocState::Normal;
    let mut skipping_announcement = false;
    let mut boundary_pattern = String::new();
    let mut boundary_regex: Option<Regex> = None;
    let mut filtered = Vec::new();

    for (index, raw) in lines.iter().enumerate() {
        let line = normalize_line(raw);

        if state == TocState::AwaitingPattern {
            boundary_regex = catalog.boundary_regex_for(&line)?;
            boundary_pattern = line;
            state = TocState::InMenu;
            continue;
        }

        if catalog.is_toc_marker(&line) {
            state = TocState::AwaitingPattern;
            continue;
        }

        if state == TocState::InMenu {
            let body_resumes = line == boundary_pattern
                || match &boundary_regex {
                    Some(regex) => regex.is_match(&line),
                    None => catalog.is_header_shaped(&line),
                };
            if body_resumes {
                state = TocState::Normal;
            }
        }

        if index < ANNOUNCEMENT_WINDOW && catalog.is_announcement(&line) {
            skipping_announcement = true;
        }

        if state != TocState::InMenu && !skipping_announcement {
            filtered.push(catalog.ensure_header_spacing(&line));
        }

        // A 法释 docket number marks the end of the announcement and the start
        // of the instrument proper.
        if skipping_announcement && catalog.is_docket_release(&line) {
            skipping_announcement = false;
        }
    }

    Ok(filtered)
}
