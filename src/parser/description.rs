use super::patterns::PatternCatalog;

/// Isolates the promulgation clauses from an accumulated description string.
///
/// Each clause starts with a full Chinese date and runs to the nearest closing
/// cue (根据 / 通过 / 公布 / 施行 / a closing full-width parenthesis / a
/// full-width space). A description holding several amendment-history clauses
/// yields one line per clause, in order of appearance. A description with no
/// date-anchored segment yields an empty list; that is not an error.
pub fn extract_description(catalog: &PatternCatalog, description: &str) -> Vec<String> {
    catalog
        .date_segments(description)
        .into_iter()
        .map(|segment| clean_segment(catalog, segment))
        .collect()
}

fn clean_segment(catalog: &PatternCatalog, segment: &str) -> String {
    let spaced = match catalog.split_leading_date(segment) {
        Some((date, rest)) if !rest.starts_with(' ') => format!("{date} {rest}"),
        _ => segment.to_string(),
    };

    // "起施行" ("shall take effect from …") reads better as plain "施行".
    spaced.replace("起施行", "施行")
}
