use super::*;

use crate::model::ContentBlock;

fn catalog() -> PatternCatalog {
    PatternCatalog::new().expect("pattern catalog must compile")
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|line| line.to_string()).collect()
}

#[test]
fn normalize_line_collapses_fullwidth_and_runs() {
    assert_eq!(normalize_line("第一章\u{3000}\u{3000}总则"), "第一章 总则");
    assert_eq!(normalize_line("a\t \tb"), "a b");
    assert_eq!(normalize_line(" 前后 "), " 前后 ");
}

#[test]
fn normalize_line_is_idempotent() {
    let inputs = [
        "第一章\u{3000}总　则",
        "  多   个   空格  ",
        "plain",
        "",
        "\u{3000}\u{3000}",
    ];
    for input in inputs {
        let once = normalize_line(input);
        assert_eq!(normalize_line(&once), once);
    }
}

#[test]
fn catalog_classifies_outline_lines_in_priority_order() {
    let catalog = catalog();
    assert_eq!(catalog.match_indent("序言"), Some(PatternKind::Preamble));
    assert_eq!(catalog.match_indent("第一编 总则"), Some(PatternKind::Part));
    assert_eq!(catalog.match_indent("第三章 法人"), Some(PatternKind::Chapter));
    assert_eq!(catalog.match_indent("第2节 一般规定"), Some(PatternKind::Section));
    assert_eq!(catalog.match_indent("一、基本案情"), Some(PatternKind::EnumItem));
    // Articles are body content, never outline nodes.
    assert_eq!(catalog.match_indent("第十二条 自然人"), None);
    assert_eq!(catalog.match_indent("普通正文段落。"), None);
}

#[test]
fn article_lines_still_read_as_structural_headers() {
    let catalog = catalog();
    assert!(catalog.is_header_shaped("第一条 正文"));
    assert!(catalog.is_header_shaped("第一编 总则"));
    // The section pattern is excluded from the composite probe.
    assert!(!catalog.is_header_shaped("第一节 一般规定"));
}

#[test]
fn enum_item_pattern_honors_length_and_punctuation_bounds() {
    let catalog = catalog();
    assert_eq!(catalog.match_indent("一、总则"), Some(PatternKind::EnumItem));
    // 15 characters after the separator is still a header.
    assert_eq!(
        catalog.match_indent("二、一二三四五六七八九十一二三四五"),
        Some(PatternKind::EnumItem)
    );
    // 16 characters is body text.
    assert_eq!(catalog.match_indent("二、一二三四五六七八九十一二三四五六"), None);
    // Sentence-final punctuation means body text, not a header.
    assert_eq!(catalog.match_indent("一、本解释自公布之日施行。"), None);
    assert_eq!(catalog.match_indent("1、阿拉伯数字序号"), None);
}

#[test]
fn header_spacing_is_enforced_after_leading_tokens() {
    let catalog = catalog();
    assert_eq!(catalog.ensure_header_spacing("第一条测试"), "第一条 测试");
    assert_eq!(catalog.ensure_header_spacing("第一条 测试"), "第一条 测试");
    assert_eq!(
        catalog.ensure_header_spacing("第一二三四五条测试"),
        "第一二三四五条 测试"
    );
    assert_eq!(catalog.ensure_header_spacing("第一条之一测试"), "第一条之一 测试");
    assert_eq!(catalog.ensure_header_spacing("  第一章\u{3000}总则  "), "第一章 总则");
    assert_eq!(catalog.ensure_header_spacing("第一条"), "第一条");
    assert_eq!(catalog.ensure_header_spacing("无header的行"), "无header的行");
}

#[test]
fn boundary_regex_derives_from_outline_patterns_only() {
    let catalog = catalog();
    let regex = catalog
        .boundary_regex_for("第三章 法人")
        .expect("boundary derivation")
        .expect("chapter line should learn a boundary regex");
    assert!(regex.is_match("第一章 总则"));
    assert!(!regex.is_match("第一条 条文"));

    assert!(
        catalog
            .boundary_regex_for("普通正文")
            .expect("boundary derivation")
            .is_none()
    );
}

#[test]
fn toc_suppression_removes_marker_and_duplicate_entries() {
    let catalog = catalog();
    let input = lines(&[
        "目录",
        "第一章 总则",
        "第二章 附则",
        "第一章 总则",
        "第一条 条文内容",
    ]);

    let filtered = filter_content(&catalog, &input).expect("filter");
    assert_eq!(filtered, lines(&["第一章 总则", "第一条 条文内容"]));
}

#[test]
fn toc_suppression_exits_on_verbatim_boundary_repeat() {
    let catalog = catalog();
    let input = lines(&["目录", "总则", "分则", "附则", "总则", "第一条 条文"]);

    let filtered = filter_content(&catalog, &input).expect("filter");
    assert_eq!(filtered, lines(&["总则", "第一条 条文"]));
}

#[test]
fn toc_suppression_falls_back_to_header_probe() {
    let catalog = catalog();
    // Boundary line teaches no outline pattern; the generic structural-header
    // probe ends the menu at the first article.
    let input = lines(&["目 录", "释义条目", "另一条目", "第一条 正文开始"]);

    let filtered = filter_content(&catalog, &input).expect("filter");
    assert_eq!(filtered, lines(&["第一条 正文开始"]));
}

#[test]
fn toc_marker_tolerates_intervening_noise() {
    let catalog = catalog();
    assert!(catalog.is_toc_marker("目　录"));
    assert!(catalog.is_toc_marker("目 录"));
    assert!(catalog.is_toc_marker("目录"));
}

#[test]
fn announcement_block_is_skipped_until_docket_line() {
    let catalog = catalog();
    let input = lines(&[
        "公 告",
        "现将若干问题的解释予以公布",
        "法释〔2020〕12号",
        "第一条 正文",
        "第二条 其余正文",
    ]);

    let filtered = filter_content(&catalog, &input).expect("filter");
    assert_eq!(filtered, lines(&["第一条 正文", "第二条 其余正文"]));
}

#[test]
fn emitted_lines_get_header_token_spacing() {
    let catalog = catalog();
    let input = lines(&["第一条测试内容", "第二章附则"]);

    let filtered = filter_content(&catalog, &input).expect("filter");
    assert_eq!(filtered, lines(&["第一条 测试内容", "第二章 附则"]));
}

#[test]
fn heading_depths_follow_first_seen_order() {
    let catalog = catalog();
    let input = lines(&["第一节 小节在前", "第一章 章在后", "第二节 另一节", "正文"]);

    let outlined = assign_headings(&catalog, input);
    assert_eq!(outlined[0].depth, Some(2));
    assert_eq!(outlined[1].depth, Some(3));
    assert_eq!(outlined[2].depth, Some(2));
    assert_eq!(outlined[3].depth, None);
}

#[test]
fn missing_pattern_kinds_leave_no_depth_gap() {
    let catalog = catalog();
    // No chapters at all: part and section still get two consecutive depths.
    let input = lines(&["第一编 总则", "第一节 一般规定", "第一条 条文"]);

    let outlined = assign_headings(&catalog, input);
    assert_eq!(outlined[0].depth, Some(2));
    assert_eq!(outlined[1].depth, Some(3));
    assert_eq!(outlined[2].depth, None);
}

#[test]
fn description_extraction_inserts_space_after_date() {
    let catalog = catalog();
    let extracted = extract_description(
        &catalog,
        "（2020年10月17日第十三届全国人民代表大会常务委员会通过）",
    );
    assert_eq!(
        extracted,
        lines(&["2020年10月17日 第十三届全国人民代表大会常务委员会通过"])
    );
}

#[test]
fn description_extraction_keeps_amendment_clauses_separate() {
    let catalog = catalog();
    let extracted = extract_description(
        &catalog,
        "（1979年7月1日第五届全国人民代表大会第二次会议通过　2000年10月1日起施行）",
    );
    assert_eq!(
        extracted,
        lines(&[
            "1979年7月1日 第五届全国人民代表大会第二次会议通过",
            "2000年10月1日 施行",
        ])
    );
}

#[test]
fn description_without_date_yields_empty_list() {
    let catalog = catalog();
    assert!(extract_description(&catalog, "没有日期的说明文字").is_empty());
    assert!(extract_description(&catalog, "").is_empty());
}

#[test]
fn table_row_and_separator_render_in_pipe_form() {
    assert_eq!(
        render_row(&["项目".to_string(), "价格".to_string()]),
        "| 项目  |价格  |"
    );
    assert_eq!(render_separator(3), "|-----|-----|-----|");
}

#[test]
fn table_renders_with_sentinels_and_matching_separator() {
    let rows = vec![
        vec!["项目".to_string(), "价格".to_string()],
        vec!["苹果".to_string(), "1.99".to_string()],
    ];

    let block = render_table(&rows).expect("renderable table");
    assert_eq!(
        block,
        lines(&[
            "<!-- TABLE -->",
            "| 项目  |价格  |",
            "|-----|-----|",
            "| 苹果  |1.99  |",
            "<!-- TABLE END -->",
        ])
    );
}

#[test]
fn unrepresentable_tables_are_not_rendered() {
    assert!(render_table(&[]).is_none());
    assert!(render_table(&[Vec::new()]).is_none());
}

#[test]
fn assemble_produces_title_description_sentinel_and_outline() {
    let catalog = catalog();
    let content = vec![
        ContentBlock::Text("测试法".to_string()),
        ContentBlock::Text("目录".to_string()),
        ContentBlock::Text("第一章 总则".to_string()),
        ContentBlock::Text("第二章 附则".to_string()),
        ContentBlock::Text("第一章 总则".to_string()),
        ContentBlock::Text("第一条 条文内容".to_string()),
        ContentBlock::Text("第二章 附则".to_string()),
    ];

    let document = assemble_document(
        &catalog,
        "测试法",
        "（2020年10月17日第十三届全国人民代表大会常务委员会通过）",
        &content,
    )
    .expect("assemble");

    assert_eq!(
        document,
        lines(&[
            "# 测试法",
            "2020年10月17日 第十三届全国人民代表大会常务委员会通过",
            "<!-- INFO END -->",
            "## 第一章 总则",
            "第一条 条文内容",
            "## 第二章 附则",
        ])
    );
}

#[test]
fn assemble_keeps_sentinel_when_description_is_empty() {
    let catalog = catalog();
    let content = vec![ContentBlock::Text("第一条 条文".to_string())];

    let document = assemble_document(&catalog, "测试法", "", &content).expect("assemble");
    assert_eq!(document, lines(&["# 测试法", "<!-- INFO END -->", "第一条 条文"]));
}

#[test]
fn assemble_fails_when_suppression_consumes_everything() {
    let catalog = catalog();
    let content = vec![
        ContentBlock::Text("目录".to_string()),
        ContentBlock::Text("第一章 总则".to_string()),
        ContentBlock::Text("第二章 附则".to_string()),
    ];

    let error = assemble_document(&catalog, "空文档", "", &content)
        .expect_err("all content consumed by TOC suppression");
    assert!(error.downcast_ref::<NoContentExtracted>().is_some());
}

#[test]
fn assemble_removes_duplicate_title_exactly_once() {
    let catalog = catalog();
    let mut content = vec![
        ContentBlock::Text("第一条 甲".to_string()),
        ContentBlock::Text("第二条 乙".to_string()),
        ContentBlock::Text("第三条 丙".to_string()),
        ContentBlock::Text("测试法".to_string()),
    ];
    for index in 0..8 {
        content.push(ContentBlock::Text(format!("第{}条 正文", index + 4)));
    }
    // A legitimate later repetition of the title text stays put.
    content.push(ContentBlock::Text("测试法".to_string()));

    let document = assemble_document(&catalog, "测试法", "", &content).expect("assemble");
    let occurrences = document.iter().filter(|line| *line == "测试法").count();
    assert_eq!(occurrences, 1);
}

#[test]
fn assemble_flattens_tables_into_the_content_stream() {
    let catalog = catalog();
    let content = vec![
        ContentBlock::Text("第一条 见下表".to_string()),
        ContentBlock::Table {
            table: vec![
                vec!["项目".to_string(), "价格".to_string()],
                vec!["苹果".to_string(), "1.99".to_string()],
            ],
        },
    ];

    let document = assemble_document(&catalog, "测试法", "", &content).expect("assemble");
    assert_eq!(
        document,
        lines(&[
            "# 测试法",
            "<!-- INFO END -->",
            "第一条 见下表",
            "<!-- TABLE -->",
            "| 项目 |价格 |",
            "|-----|-----|",
            "| 苹果 |1.99 |",
            "<!-- TABLE END -->",
        ])
    );
}

#[test]
fn assemble_skips_malformed_table_but_keeps_document() {
    let catalog = catalog();
    let content = vec![
        ContentBlock::Text("第一条 正文".to_string()),
        ContentBlock::Table { table: vec![] },
    ];

    let document = assemble_document(&catalog, "测试法", "", &content).expect("assemble");
    assert_eq!(document, lines(&["# 测试法", "<!-- INFO END -->", "第一条 正文"]));
}
