use anyhow::{Context, Result};
use regex::Regex;

/// Character class accepted wherever a statute numbers its divisions. Source
/// documents mix Chinese numerals and ASCII digits freely, so every structural
/// pattern accepts both.
pub const NUMERAL_CLASS: &str = "[一二三四五六七八九十零百千万0-9]";

/// Enumerated-list headers only ever use Chinese numerals.
const CHINESE_NUMERAL_CLASS: &str = "[一二三四五六七八九十零百千万]";

/// Placeholder numeral substituted for [`NUMERAL_CLASS`] when a pattern is used
/// as a cheap "looks like a header" probe rather than a full match.
const PLACEHOLDER_NUMERAL: &str = "一";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Preamble,
    Part,
    Chapter,
    Section,
    EnumItem,
    Article,
}

impl PatternKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preamble => "preamble",
            Self::Part => "part",
            Self::Chapter => "chapter",
            Self::Section => "section",
            Self::EnumItem => "enum_item",
            Self::Article => "article",
        }
    }
}

#[derive(Debug)]
pub struct StructuralPattern {
    pub kind: PatternKind,
    source: String,
    regex: Regex,
}

impl StructuralPattern {
    fn new(kind: PatternKind, source: String) -> Result<Self> {
        let regex = Regex::new(&source)
            .with_context(|| format!("failed to compile {} pattern: {source}", kind.as_str()))?;
        Ok(Self {
            kind,
            source,
            regex,
        })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// The recognized structural patterns of a statute, in nesting priority order
/// (part > chapter > section > enumerated item), with article-level numbering
/// always checked last. Built once per command invocation and passed by
/// reference into every parsing pass; never mutated.
#[derive(Debug)]
pub struct PatternCatalog {
    line_patterns: Vec<StructuralPattern>,
    indent_count: usize,
    line_start: Regex,
    toc_marker: Regex,
    announcement: Regex,
    docket_release: Regex,
    header_token: Regex,
    date_segment: Regex,
    date_prefix: Regex,
}

impl PatternCatalog {
    pub fn new() -> Result<Self> {
        let indent_sources = vec![
            (PatternKind::Preamble, "^序言".to_string()),
            (PatternKind::Part, format!("^第{NUMERAL_CLASS}+编")),
            (PatternKind::Chapter, format!("^第{NUMERAL_CLASS}+章")),
            (PatternKind::Section, format!("^第{NUMERAL_CLASS}+节")),
            (
                PatternKind::EnumItem,
                format!("^{CHINESE_NUMERAL_CLASS}+、.{{0,14}}[^。；：]$"),
            ),
        ];
        let indent_count = indent_sources.len();

        let mut line_patterns = Vec::with_capacity(indent_count + 1);
        for (kind, source) in indent_sources {
            line_patterns.push(StructuralPattern::new(kind, source)?);
        }
        line_patterns.push(StructuralPattern::new(
            PatternKind::Article,
            format!("^第{NUMERAL_CLASS}+条"),
        )?);

        // Single alternation probe over every pattern except the section one,
        // with the numeral class narrowed to a literal placeholder. Used to spot
        // the end of a table of contents when no boundary regex was learned.
        let line_start_source = format!(
            "^({})",
            line_patterns
                .iter()
                .filter(|pattern| !pattern.source.contains('节'))
                .map(|pattern| {
                    format!(
                        "({})",
                        pattern
                            .source
                            .trim_start_matches('^')
                            .replace(NUMERAL_CLASS, PLACEHOLDER_NUMERAL)
                    )
                })
                .collect::<Vec<String>>()
                .join("|")
        );
        let line_start = Regex::new(&line_start_source)
            .with_context(|| format!("failed to compile line-start probe: {line_start_source}"))?;

        let header_token_source =
            format!("^(第{NUMERAL_CLASS}{{1,6}}[条章节篇](?:之{NUMERAL_CLASS}{{1,2}})*)\\s*");

        Ok(Self {
            line_patterns,
            indent_count,
            line_start,
            toc_marker: Regex::new("^目.*录").context("failed to compile TOC marker pattern")?,
            announcement: Regex::new(r"^公\s*告")
                .context("failed to compile announcement pattern")?,
            docket_release: Regex::new("^法释")
                .context("failed to compile docket marker pattern")?,
            header_token: Regex::new(&header_token_source)
                .context("failed to compile header token pattern")?,
            date_segment: Regex::new(r"\d{4}年\d{1,2}月\d{1,2}日.*?(?:根据|通过|公布|施行|）|　)")
                .context("failed to compile description date pattern")?,
            date_prefix: Regex::new(r"^\d{4}年\d{1,2}月\d{1,2}日")
                .context("failed to compile date prefix pattern")?,
        })
    }

    /// Outline-level patterns, in priority order. Article numbering is body
    /// content, never an outline node, so it is excluded here.
    pub fn indent_patterns(&self) -> &[StructuralPattern] {
        &self.line_patterns[..self.indent_count]
    }

    /// Tests a line against the outline patterns in priority order and returns
    /// the first matching kind. Article lines deliberately fall through to
    /// `None`: they are body content, not outline nodes.
    pub fn match_indent(&self, line: &str) -> Option<PatternKind> {
        self.indent_patterns()
            .iter()
            .find(|pattern| pattern.is_match(line))
            .map(|pattern| pattern.kind)
    }

    /// Derives a boundary regex from the first outline pattern matching `line`,
    /// with the numeral class narrowed to the literal placeholder, so a table
    /// of contents can be skipped until a same-shaped real heading appears.
    pub fn boundary_regex_for(&self, line: &str) -> Result<Option<Regex>> {
        let Some(pattern) = self
            .indent_patterns()
            .iter()
            .find(|pattern| pattern.is_match(line))
        else {
            return Ok(None);
        };

        let source = pattern.source.replace(NUMERAL_CLASS, PLACEHOLDER_NUMERAL);
        let regex = Regex::new(&source)
            .with_context(|| format!("failed to compile boundary pattern: {source}"))?;
        Ok(Some(regex))
    }

    pub fn is_header_shaped(&self, line: &str) -> bool {
        self.line_start.is_match(line)
    }

    pub fn is_toc_marker(&self, line: &str) -> bool {
        self.toc_marker.is_match(line)
    }

    pub fn is_announcement(&self, line: &str) -> bool {
        self.announcement.is_match(line)
    }

    pub fn is_docket_release(&self, line: &str) -> bool {
        self.docket_release.is_match(line)
    }

    /// Trims the line and ensures exactly one space separates a leading
    /// article/chapter/section/part token from the text that follows it.
    pub fn ensure_header_spacing(&self, line: &str) -> String {
        let trimmed = line.trim();
        let Some(captures) = self.header_token.captures(trimmed) else {
            return trimmed.to_string();
        };

        let (Some(whole), Some(token)) = (captures.get(0), captures.get(1)) else {
            return trimmed.to_string();
        };

        let rest = &trimmed[whole.end()..];
        if rest.is_empty() {
            token.as_str().to_string()
        } else {
            format!("{} {rest}", token.as_str())
        }
    }

    /// Substrings of `text` that start with a full Chinese date and run to the
    /// nearest promulgation cue, in order of appearance.
    pub fn date_segments<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.date_segment
            .find_iter(text)
            .map(|found| found.as_str())
            .collect()
    }

    /// Splits a leading `YYYY年M月D日` prefix off a description segment.
    pub fn split_leading_date<'t>(&self, segment: &'t str) -> Option<(&'t str, &'t str)> {
        let found = self.date_prefix.find(segment)?;
        Some(segment.split_at(found.end()))
    }
}
