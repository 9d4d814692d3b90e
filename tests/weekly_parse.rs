// tests/weekly_parse.rs
use serde_json::json;

use nc_tracker::specs::weekly::{
    contest_id_from_url, estimate_difficulty, is_weekly_title, list_page_url, parse_api_problems,
    parse_contest_list, parse_contest_problems,
};

const LIST: &str = r#"
<div class="platform-item">
  <h4>牛客周赛 Round 80</h4>
  <a href="/acm/contest/100001">进入比赛</a>
</div>
<div class="platform-item">
  <h4><a href="/acm/contest/100002">牛客周赛 Round 81</a></h4>
</div>
<div class="platform-item">
  <h4>牛客小白月赛 99</h4>
  <a href="/acm/contest/555">进入比赛</a>
</div>
<div class="platform-item">
  <h4>牛客周赛 Round 82</h4>
  <span>已结束</span>
</div>
<a class="btn" href="/acm/contest/100003">回顾比赛</a>
<a class="btn" href="https://ac.nowcoder.com/acm/contest/100001">回顾比赛</a>
"#;

#[test]
fn list_keeps_weekly_rounds_only() {
    let rounds = parse_contest_list(LIST);
    let ids: Vec<u32> = rounds.iter().map(|c| c.round).collect();
    assert_eq!(ids, vec![80, 81, 82]);
    assert!(rounds.iter().all(|c| is_weekly_title(&c.title)));
}

#[test]
fn list_links_are_absolute_and_unique() {
    let rounds = parse_contest_list(LIST);
    assert_eq!(rounds[0].link, "/acm/contest/100001");
    assert_eq!(rounds[0].full_link, "https://ac.nowcoder.com/acm/contest/100001");
    assert_eq!(rounds[1].full_link, "https://ac.nowcoder.com/acm/contest/100002");
    // Round 82 is reachable only via the review button below it
    assert_eq!(rounds[2].full_link, "https://ac.nowcoder.com/acm/contest/100003");
    assert_eq!(rounds.len(), 3, "second review link for 100001 must collapse");
}

#[test]
fn problems_from_green_links() {
    let doc = r#"
    <table>
      <tr><td style="text-align: left"><a class="txt link-green" href="/acm/contest/100001/B">数学构造</a></td></tr>
      <tr><td style="text-align: left"><a class="link-green" href="/acm/contest/100001/A">简单签到</a></td></tr>
      <tr><td><a href="/acm/contest/100001/C">普通题</a></td></tr>
    </table>"#;
    let ps = parse_contest_problems(doc, "100001");
    let letters: Vec<&str> = ps.iter().map(|p| p.letter.as_str()).collect();
    assert_eq!(letters, vec!["A", "B", "C"]);
    assert_eq!(ps[0].difficulty, 600);
    assert_eq!(ps[1].difficulty, 1800);
    assert_eq!(ps[2].difficulty, 1200);
    assert_eq!(ps[2].url, "https://ac.nowcoder.com/acm/contest/100001/C");
}

#[test]
fn problems_from_letter_rows() {
    let doc = r#"
    <table>
      <tr><th>题号</th><th>标题</th></tr>
      <tr><td>A</td><td>小红的签到</td></tr>
      <tr><td>B</td><td><span>图论练习</span></td></tr>
      <tr><td>总计</td><td>2</td></tr>
    </table>"#;
    let ps = parse_contest_problems(doc, "4242");
    assert_eq!(ps.len(), 2);
    assert_eq!(ps[0].title, "小红的签到");
    assert_eq!(ps[0].url, "https://ac.nowcoder.com/acm/contest/4242/A");
    assert_eq!(ps[1].title, "图论练习");
    assert_eq!(ps[1].difficulty, 1800);
}

#[test]
fn problems_from_item_cards() {
    let doc = r#"
    <ul>
      <li class="problem-item"><span class="problem-index">B</span><span class="problem-title">困难的树</span></li>
      <li class="problem-item"><span class="problem-index">A</span><span class="problem-title">简单求和</span></li>
    </ul>
    <div class="contest-problem-item">
      <div class="index">C</div>
      <div class="title"><a href="/acm/problem/777">中等题</a></div>
    </div>
    <table><tr><td>Z</td><td>不在卡片里</td></tr></table>"#;
    let ps = parse_contest_problems(doc, "555");
    let letters: Vec<&str> = ps.iter().map(|p| p.letter.as_str()).collect();
    assert_eq!(letters, vec!["A", "B", "C"], "row fallback stays off once cards match");
    assert_eq!(ps[0].title, "简单求和");
    assert_eq!(ps[0].difficulty, 600);
    assert_eq!(ps[0].url, "https://ac.nowcoder.com/acm/contest/555/A");
    assert_eq!(ps[1].difficulty, 1800);
    assert_eq!(ps[2].title, "中等题");
    assert_eq!(ps[2].url, "https://ac.nowcoder.com/acm/problem/777");
}

#[test]
fn nested_elements_close_on_their_own_tag() {
    use nc_tracker::core::html::by_class;

    let doc = r#"<div class="card"><div>inner</div><p>tail</p></div><div class="card">two</div>"#;
    let cards = by_class(doc, &["card"]);
    assert_eq!(cards.len(), 2);
    assert!(cards[0].ends_with("<p>tail</p></div>"));
    assert_eq!(cards[1], r#"<div class="card">two</div>"#);
}

#[test]
fn problems_from_plain_text() {
    let doc = r#"<p><span>B. Hard Queries</span><span>A. Easy Start</span><span>not a problem</span></p>"#;
    let ps = parse_contest_problems(doc, "");
    assert_eq!(ps.len(), 2);
    assert_eq!(ps[0].letter, "A");
    assert_eq!(ps[0].title, "Easy Start");
    assert_eq!(ps[0].difficulty, 600);
    assert_eq!(ps[1].difficulty, 1800);
    assert!(ps[0].url.is_empty(), "no contest id, no url");
}

#[test]
fn api_problems_need_code_zero() {
    let ok = json!({"code": 0, "data": {"data": [
        {"index": "B", "title": "DP on trees"},
        {"index": "A", "title": "Hello"},
        {"title": "missing index"}
    ]}});
    let ps = parse_api_problems(&ok);
    assert_eq!(ps.len(), 2);
    assert_eq!(ps[0].letter, "A");
    assert_eq!(ps[1].difficulty, 1800);

    let denied = json!({"code": 999, "msg": "not logged in"});
    assert!(parse_api_problems(&denied).is_empty());
}

#[test]
fn difficulty_keywords() {
    assert_eq!(estimate_difficulty("入门题"), 600);
    assert_eq!(estimate_difficulty("Basic Math"), 600);
    assert_eq!(estimate_difficulty("Advanced DP"), 1800);
    assert_eq!(estimate_difficulty("小红的数组"), 1200);
}

#[test]
fn helpers() {
    assert!(is_weekly_title("牛客周赛 Round 12"));
    assert!(is_weekly_title("牛客周赛Round 7"));
    assert!(!is_weekly_title("牛客练习赛 12"));
    assert_eq!(contest_id_from_url("https://ac.nowcoder.com/acm/contest/81600/C").as_deref(), Some("81600"));
    assert_eq!(contest_id_from_url("https://example.com"), None);
    assert!(list_page_url(2).ends_with("&page=2"));
}
