// tests/clist_parse.rs
use nc_tracker::config::consts::CLIST_SHEET_KEYWORDS;
use nc_tracker::scrape::generate_sheet;
use nc_tracker::specs::clist::{
    dedup_items, filter_by_contest, markdown_table, page_url, parse_problems, sheet_csv, ClistItem, ClistOutput,
};

const PAGE: &str = r#"
<table class="table">
  <thead><tr><th>Date</th><th>Rating</th><th>Problem</th></tr></thead>
  <tbody>
    <tr>
      <td>2024-05-12</td>
      <td>1800</td>
      <td><a href="https://ac.nowcoder.com/acm/contest/81600/C">小红的&amp;数组</a></td>
      <td><a href="https://clist.by/standings/nowcoder-weekly-44/">牛客周赛 Round 44</a></td>
    </tr>
    <tr>
      <td>today</td>
      <td></td>
      <td><a href="https://ac.nowcoder.com/acm/contest/81600/A">签到</a> <span>~ 800 pts</span></td>
    </tr>
    <tr>
      <td>2024-05-11</td>
      <td>1200</td>
      <td><a href="https://codeforces.com/problemset/problem/1/A">Theatre Square</a></td>
    </tr>
  </tbody>
</table>
"#;

#[test]
fn parses_nowcoder_rows_only() {
    let items = parse_problems(PAGE);
    assert_eq!(items.len(), 2, "codeforces row should be skipped");

    let c = &items[0];
    assert_eq!(c.date, "2024-05-12");
    assert_eq!(c.rating, Some(1800));
    assert_eq!(c.problem_name, "小红的&数组");
    assert_eq!(c.problem_url, "https://ac.nowcoder.com/acm/contest/81600/C");
    assert_eq!(c.letter.as_deref(), Some("C"));
    assert_eq!(c.contest_url.as_deref(), Some("https://ac.nowcoder.com/acm/contest/81600"));
    assert_eq!(c.contest_name.as_deref(), Some("牛客周赛 Round 44"));
    assert_eq!(
        c.contest_standings_url.as_deref(),
        Some("https://clist.by/standings/nowcoder-weekly-44/")
    );
}

#[test]
fn rating_falls_back_to_a_number_in_the_row() {
    let items = parse_problems(PAGE);
    let a = &items[1];
    assert_eq!(a.letter.as_deref(), Some("A"));
    assert_eq!(a.date, "today");
    assert_eq!(a.rating, Some(800));
    assert_eq!(a.contest_name, None);
    assert_eq!(a.contest_standings_url, None);
}

#[test]
fn rows_outside_tbody_are_ignored() {
    let doc = r#"<table><tr><td>x</td><td>1</td><td><a href="https://ac.nowcoder.com/acm/contest/1/A">A</a></td></tr></table>"#;
    assert!(parse_problems(doc).is_empty());
}

fn item(url: &str, name: &str) -> ClistItem {
    ClistItem { problem_url: url.into(), problem_name: name.into(), ..Default::default() }
}

#[test]
fn dedup_keeps_first_occurrence() {
    let items = vec![
        item("https://ac.nowcoder.com/acm/contest/1/A", "first"),
        item("https://ac.nowcoder.com/acm/contest/1/B", "other"),
        item("https://ac.nowcoder.com/acm/contest/1/A", "second"),
    ];
    let out = dedup_items(items);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].problem_name, "first");
    assert_eq!(out[1].problem_name, "other");
}

#[test]
fn dedup_without_url_uses_contest_letter_and_name() {
    let a = ClistItem {
        problem_name: "Sum".into(),
        contest_url: Some("https://ac.nowcoder.com/acm/contest/9".into()),
        letter: Some("A".into()),
        ..Default::default()
    };
    let b = ClistItem { letter: Some("B".into()), ..a.clone() };
    let out = dedup_items(vec![a.clone(), a.clone(), b]);
    assert_eq!(out.len(), 2);
}

#[test]
fn markdown_table_has_header_and_placeholders() {
    let md = markdown_table(&[item("https://x/1", "One"), item("", "")]);
    assert!(md.starts_with("# 题目链接汇总\n\n| 题目名称 | 题目链接 |"));
    assert!(md.contains("| One | [https://x/1](https://x/1) |"));
    assert!(md.contains("| N/A | [#](#) |"));
    assert_eq!(md.lines().count(), 6);
}

#[test]
fn page_urls() {
    assert!(!page_url(1).contains("problems_paging"));
    assert!(!page_url(0).contains("problems_paging"));
    assert!(page_url(3).ends_with("&problems_paging=3"));
}

#[test]
fn output_meta_describes_the_crawl() {
    let out = ClistOutput::new(vec![item("u", "n")], 4);
    assert_eq!(out.meta.resource, 166);
    assert_eq!(out.meta.pages, 4);
    assert!(out.meta.generated_at.ends_with('Z'));
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["items"][0]["problem_url"], "u");
}

fn in_contest(name: &str, contest: &str) -> ClistItem {
    ClistItem {
        problem_name: name.into(),
        problem_url: format!("https://ac.nowcoder.com/acm/problem/{name}"),
        contest_name: Some(contest.into()),
        ..Default::default()
    }
}

#[test]
fn sheet_keeps_only_listed_contest_series() {
    let items = vec![
        in_contest("a", "牛客周赛 Round 80"),
        in_contest("b", "2024牛客暑期多校训练营1"),
        in_contest("c", "牛客小白月赛110"),
        ClistItem { problem_name: "d".into(), ..Default::default() },
        in_contest("e", "牛客挑战赛77"),
    ];
    let picked = filter_by_contest(&items, &CLIST_SHEET_KEYWORDS);
    let names: Vec<&str> = picked.iter().map(|it| it.problem_name.as_str()).collect();
    assert_eq!(names, vec!["a", "c", "e"]);
}

#[test]
fn sheet_csv_quotes_awkward_fields() {
    let odd = in_contest("x, \"y\"", "牛客练习赛1");
    let csv = String::from_utf8(sheet_csv(&[&odd]).unwrap()).unwrap();
    let mut lines = csv.split("\r\n");
    assert_eq!(lines.next(), Some("\u{FEFF}题目名称,题目链接,所属比赛"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("\"x, \"\"y\"\"\","), "{row}");
    assert!(row.ends_with(",牛客练习赛1"), "{row}");
    assert_eq!(lines.next(), Some(""));
}

#[test]
fn sheet_is_written_from_the_saved_crawl() {
    let dir = std::env::temp_dir().join(format!("nc_tracker_sheet_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("clist.json");
    let output = dir.join("sheet.csv");

    let out = ClistOutput::new(vec![in_contest("a", "牛客周赛 Round 1"), in_contest("b", "其他比赛")], 1);
    std::fs::write(&input, serde_json::to_string(&out).unwrap()).unwrap();
    assert_eq!(generate_sheet(&input, &output, &CLIST_SHEET_KEYWORDS).unwrap(), 1);
    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(text.lines().count(), 2);

    std::fs::remove_file(&output).unwrap();
    assert_eq!(generate_sheet(&input, &output, &["不存在"]).unwrap(), 0);
    assert!(!output.exists(), "no rows, no file");

    std::fs::remove_dir_all(&dir).unwrap();
}
