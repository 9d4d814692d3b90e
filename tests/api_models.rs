// tests/api_models.rs
use serde_json::{json, Value};

use nc_tracker::api::{
    contest_type_code, diff_body, difficulty_score, endpoint_url, format_badge_time, parse_badge_user_info,
    tag_info_from_body, Envelope, PracticeCategory, Problem, RankEntry, RankPage, OK,
};

#[test]
fn envelope_accepts_string_codes() {
    let env: Envelope<u32> = serde_json::from_str(r#"{"code":"0","msg":"","data":5}"#).unwrap();
    assert!(env.is_ok(OK));
    assert_eq!(env.into_data(OK, "x").unwrap(), 5);
}

#[test]
fn envelope_error_carries_server_message() {
    let env: Envelope<Value> = serde_json::from_str(r#"{"code":401,"msg":"未登录"}"#).unwrap();
    let err = env.into_data(OK, "today").unwrap_err().to_string();
    assert!(err.contains("401") && err.contains("未登录"), "{err}");

    let env: Envelope<Value> = serde_json::from_str(r#"{"code":500}"#).unwrap();
    assert!(env.into_data(OK, "today").unwrap_err().to_string().contains("today failed"));

    let env: Envelope<Value> = serde_json::from_str(r#"{"code":0}"#).unwrap();
    assert!(env.into_data(OK, "today").unwrap_err().to_string().contains("empty data"));
}

// Payload type without `Default`, decoded through a generic caller.
#[derive(Debug, serde::Deserialize, PartialEq)]
struct Payload {
    uid: String,
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Envelope<T> {
    serde_json::from_str(body).unwrap()
}

#[test]
fn envelope_decodes_payloads_without_default() {
    let env: Envelope<Payload> = decode(r#"{"code":0,"data":{"uid":"7"}}"#);
    assert_eq!(env.data, Some(Payload { uid: "7".into() }));

    let env: Envelope<Payload> = decode(r#"{"code":0}"#);
    assert!(env.data.is_none());

    let env: Envelope<Payload> = decode(r#"{"code":0,"data":null}"#);
    assert!(env.data.is_none());
}

#[test]
fn rank_entries_decode_leniently() {
    let page: RankPage = serde_json::from_value(json!({
        "ranks": [
            {"uid": 123, "name": "a", "headUrl": "/images/a.png", "count": "15", "place": "3w+"},
            {"uid": "456", "name": "b", "headUrl": "https://cdn/x.png", "count": 9, "place": 12}
        ],
        "totalCount": "2"
    }))
    .unwrap();
    assert_eq!(page.total_count, 2);

    let a = page.find("123").unwrap();
    assert_eq!(a.count, 15);
    assert_eq!(a.rank_label(), "1w+");
    assert_eq!(a.rank_value(), 10_001);
    assert_eq!(a.avatar_url("https://www.nowcoder.com"), "https://www.nowcoder.com/images/a.png");

    let b = page.find("456").unwrap();
    assert_eq!(b.rank_label(), "12");
    assert_eq!(b.rank_value(), 12);
    assert_eq!(b.avatar_url("https://www.nowcoder.com"), "https://cdn/x.png");

    assert!(page.find("789").is_none());
}

#[test]
fn empty_or_zero_place_is_unranked() {
    let e = RankEntry { place: "0".into(), ..Default::default() };
    assert_eq!(e.rank_label(), "1w+");
    let e = RankEntry::default();
    assert_eq!(e.rank_value(), 10_001);
    assert_eq!(e.avatar_url("https://www.nowcoder.com"), "");
}

#[test]
fn difficulty_levels_and_scores() {
    assert_eq!(difficulty_score(0), None);
    assert_eq!(difficulty_score(1), Some(800));
    assert_eq!(difficulty_score(3), Some(1600));
    assert_eq!(difficulty_score(10), Some(3500));
    assert_eq!(difficulty_score(1500), Some(1500));

    let p: Problem = serde_json::from_value(json!({"problemId": 7, "title": "t", "questionUrl": "/q/7", "difficulty": "2"})).unwrap();
    assert_eq!(p.problem_id, "7");
    assert_eq!(p.link(), "/q/7");
    assert_eq!(p.difficulty_score(), Some(1200));
}

#[test]
fn practice_flat_list_becomes_one_group() {
    let cat: PracticeCategory = serde_json::from_value(json!({
        "problems": [{"problemId": "1", "title": "a"}, {"title": "no id"}]
    }))
    .unwrap();
    let groups = cat.grouped();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].category, "题目列表");
    assert_eq!(groups[0].problems.len(), 1);

    let cat: PracticeCategory = serde_json::from_value(json!({
        "knowledge_points": [
            {"category": "DP", "problems": [{"problemId": "2"}]},
            {"category": "empty", "problems": []}
        ]
    }))
    .unwrap();
    let groups = cat.grouped();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].category, "DP");
}

#[test]
fn tag_info_new_shape() {
    let body = json!({"code": 200, "data": {
        "tag": {"tagId": 5, "tagName": "DP"},
        "questions": [{"questionId": 11, "problemId": "22", "title": "Knapsack", "score": 3, "dependencies": [10]}]
    }})
    .to_string();
    let info = tag_info_from_body(&body).unwrap();
    assert_eq!(info.tag_id, "5");
    assert_eq!(info.tag_name, "DP");
    assert_eq!(info.problems.len(), 1);
    let p = &info.problems[0];
    assert_eq!((p.qid.as_str(), p.problem_id.as_str(), p.name.as_str()), ("11", "22", "Knapsack"));
    assert_eq!(p.dependencies, vec!["10"]);
    assert_eq!(info.tag_tutorials, Some(Value::String("[]".into())));
}

#[test]
fn tag_info_old_shape() {
    let body = r#"{"code":0,"data":{"tagId":"7","tagName":"Graph","problems":[{"qid":1,"name":"x","yilai":"1, 2"}]}}"#;
    let info = tag_info_from_body(body).unwrap();
    assert_eq!(info.tag_id, "7");
    assert_eq!(info.problems[0].dependencies, vec!["1", "2"]);

    assert!(tag_info_from_body(r#"{"code":500,"msg":"down"}"#).is_err());
    assert!(tag_info_from_body("not json").is_err());
}

#[test]
fn badge_info_from_keyed_map() {
    let info = parse_badge_user_info(&json!({
        "userTotalScore": {"totalScore": "42"},
        "userRecentBadge": {
            "3": {"id": 3, "name": "old", "createTime": 1_000},
            "4": {"id": 4, "name": "new", "createTime": 1_700_000_000_000u64}
        }
    }));
    assert_eq!(info.total_points, 42);
    let names: Vec<&str> = info.recent.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["new", "old"]);
    assert!(!info.recent[0].time.is_empty());
}

#[test]
fn badge_info_from_list() {
    let info = parse_badge_user_info(&json!({"totalPoints": 7, "recent": [{"id": "1", "name": "x"}]}));
    assert_eq!(info.total_points, 7);
    assert_eq!(info.recent.len(), 1);
    assert!(info.recent[0].time.is_empty());

    let none = parse_badge_user_info(&json!({}));
    assert_eq!(none.total_points, 0);
    assert!(none.recent.is_empty());
}

#[test]
fn badge_time_format() {
    assert_eq!(format_badge_time(0), "");
    let t = format_badge_time(1_700_000_000_000);
    assert_eq!(t.len(), "MM-DD hh:mm".len());
}

#[test]
fn endpoint_urls() {
    let u = endpoint_url("https://www.nowcoder.com/", "rank/list", &[("page", "2".to_string())]).unwrap();
    assert_eq!(u.as_str(), "https://www.nowcoder.com/problem/tracker/rank/list?page=2");

    let u = endpoint_url("https://www.nowcoder.com", "/dify/admin/check", &[]).unwrap();
    assert_eq!(u.as_str(), "https://www.nowcoder.com/dify/admin/check");
}

#[test]
fn contest_type_codes() {
    assert_eq!(contest_type_code("all"), "0");
    assert_eq!(contest_type_code("19"), "19");
    assert_eq!(contest_type_code(" 42 "), "42");
    assert_eq!(contest_type_code("beisai"), "beisai");
}

#[test]
fn diff_body_keeps_commas() {
    let ids = vec!["1".to_string(), "2".to_string()];
    assert_eq!(diff_body("9", &ids, Some("8")), "userId1=9&qids=1,2&userId2=8");
    assert_eq!(diff_body("9", &ids, None), "userId1=9&qids=1,2");
    assert_eq!(diff_body("9", &ids, Some("")), "userId1=9&qids=1,2");
}
