use chrono::NaiveDate;
use regex::Regex;

use crate::model::CategoryEntry;

use super::output::*;

fn chinese_date() -> Regex {
    Regex::new(r"(\d{4})年(\d{1,2})月(\d{1,2})日").expect("date pattern must compile")
}

#[test]
fn render_markdown_tightens_table_blocks() {
    let lines = vec![
        "# 测试法".to_string(),
        "<!-- INFO END -->".to_string(),
        "第一条 见下表".to_string(),
        "<!-- TABLE -->".to_string(),
        "| 项目 |价格 |".to_string(),
        "|-----|-----|".to_string(),
        "| 苹果 |1.99 |".to_string(),
        "<!-- TABLE END -->".to_string(),
    ];

    let rendered = render_markdown(&lines);
    assert_eq!(
        rendered,
        "# 测试法\n\n<!-- INFO END -->\n\n第一条 见下表\n\n\
         <!-- TABLE -->\n| 项目 |价格 |\n|-----|-----|\n| 苹果 |1.99 |\n<!-- TABLE END -->"
    );
}

#[test]
fn render_markdown_collapses_blank_runs() {
    let lines = vec!["甲".to_string(), String::new(), "乙".to_string()];
    assert_eq!(render_markdown(&lines), "甲\n\n乙");
}

#[test]
fn simple_title_strips_national_prefix_for_filenames_only() {
    assert_eq!(simple_title("中华人民共和国民法典"), "民法典");
    assert_eq!(simple_title("  中华人民共和国刑法  "), "刑法");
    assert_eq!(simple_title("最高人民法院关于适用若干问题的解释"), "最高人民法院关于适用若干问题的解释");
}

#[test]
fn law_filename_carries_publish_date_when_known() {
    let date = NaiveDate::from_ymd_opt(2020, 5, 28).expect("valid date");
    assert_eq!(
        law_filename("中华人民共和国民法典", Some(date)),
        "民法典(2020-05-28).md"
    );
    assert_eq!(law_filename("民法典", None), "民法典.md");
}

#[test]
fn publish_date_prefers_explicit_field() {
    let pattern = chinese_date();
    let resolved = resolve_publish_date(
        &pattern,
        Some("2021-01-01"),
        "（2020年5月28日第十三届全国人民代表大会第三次会议通过）",
    );
    assert_eq!(resolved, NaiveDate::from_ymd_opt(2021, 1, 1));
}

#[test]
fn publish_date_falls_back_to_description() {
    let pattern = chinese_date();
    let resolved = resolve_publish_date(
        &pattern,
        None,
        "（2020年5月28日第十三届全国人民代表大会第三次会议通过）",
    );
    assert_eq!(resolved, NaiveDate::from_ymd_opt(2020, 5, 28));

    assert_eq!(resolve_publish_date(&pattern, None, "无日期"), None);
}

#[test]
fn category_placement_matches_by_contained_title() {
    let categories = vec![
        CategoryEntry {
            title: "中华人民共和国反不正当竞争法".to_string(),
            category: "经济法".to_string(),
        },
        CategoryEntry {
            title: "中华人民共和国刑法".to_string(),
            category: "刑法".to_string(),
        },
    ];

    assert_eq!(category_folder(&categories, "反不正当竞争法"), Some("经济法"));
    assert_eq!(category_folder(&categories, "民法典"), None);
}
