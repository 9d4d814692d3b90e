// tests/highlight.rs
use nc_tracker::api::DiffResult;
use nc_tracker::router::ProblemsView;
use nc_tracker::shell::{
    build_url_with_channel_put, compute_highlighting, contest_link, difficulty_info, problem_link, CellStatus,
    GridRow,
};

fn row(label: &str, ids: &[&str], kp: Option<&str>) -> GridRow {
    GridRow {
        label: label.into(),
        problem_ids: ids.iter().map(|s| s.to_string()).collect(),
        kp: kp.map(String::from),
    }
}

fn diff(ac1: &[&str], ac2: &[&str]) -> DiffResult {
    DiffResult {
        ac1_qids: ac1.iter().map(|s| s.to_string()).collect(),
        ac2_qids: ac2.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn own_ac_wins_over_rival() {
    let rows = [row("R1", &["1", "2", "3"], None)];
    let h = compute_highlighting(ProblemsView::Contests, &rows, &diff(&["1"], &["1", "2"]), true);
    assert_eq!(h.status("1"), Some(CellStatus::Ac));
    assert_eq!(h.status("2"), Some(CellStatus::RivalAc));
    assert_eq!(h.status("3"), Some(CellStatus::None));
    assert_eq!(h.status("999"), None);
}

#[test]
fn rival_ignored_without_rival() {
    let rows = [row("R1", &["2"], None)];
    let h = compute_highlighting(ProblemsView::Contests, &rows, &diff(&[], &["2"]), false);
    assert_eq!(h.status("2"), Some(CellStatus::None));
}

#[test]
fn contest_rows_are_judged_alone() {
    let rows = [
        row("R1", &["1", "2"], None),
        row("R2", &["2", "3"], None),
        row("empty", &[], None),
    ];
    let h = compute_highlighting(ProblemsView::Interview, &rows, &diff(&["1", "2"], &[]), false);
    assert_eq!(h.all_ac, vec![true, false, false]);
}

#[test]
fn practice_marks_first_row_of_a_finished_point() {
    let rows = [
        row("DP", &["1", "2"], Some("DP")),
        row("", &["3"], Some("DP")),
        row("Graph", &["4"], Some("Graph")),
        row("", &["5"], Some("Graph")),
    ];
    let h = compute_highlighting(ProblemsView::Practice, &rows, &diff(&["1", "2", "3", "4"], &[]), false);
    assert_eq!(h.all_ac, vec![true, false, false, false]);
}

#[test]
fn practice_point_without_problems_is_not_marked() {
    let rows = [row("Empty", &[], Some("Empty")), row("DP", &["1"], Some("DP"))];
    let h = compute_highlighting(ProblemsView::Practice, &rows, &diff(&[], &[]), false);
    assert_eq!(h.all_ac, vec![false, false]);

    let h = compute_highlighting(ProblemsView::Practice, &rows, &diff(&["1"], &[]), false);
    assert_eq!(h.all_ac, vec![false, true]);
}

#[test]
fn channel_put_is_added_or_replaced() {
    assert_eq!(
        build_url_with_channel_put("/acm/contest/1", ""),
        "https://www.nowcoder.com/acm/contest/1?channelPut=tracker1"
    );
    assert_eq!(
        build_url_with_channel_put("https://ac.nowcoder.com/acm/problem/2?x=1&channelPut=old", "new"),
        "https://ac.nowcoder.com/acm/problem/2?x=1&channelPut=new"
    );
    assert_eq!(build_url_with_channel_put("   ", "x"), "");
}

#[test]
fn link_suffixes() {
    assert!(contest_link("/acm/contest/1", "w").ends_with("channelPut=wa"));
    assert!(problem_link("/acm/problem/1", "w").ends_with("channelPut=w1"));
    assert!(problem_link("/acm/problem/1", "").ends_with("channelPut=tracker1"));
}

#[test]
fn difficulty_bands() {
    let easy = difficulty_info(0);
    assert_eq!(easy.key, "easy");
    assert_eq!(easy.percentage, 0.0);

    let hard = difficulty_info(1300);
    assert_eq!(hard.key, "hard");
    assert!(hard.percentage > 0.4 && hard.percentage < 0.6);

    assert_eq!(difficulty_info(3500).key, "legend");
    let over = difficulty_info(9000);
    assert_eq!(over.key, "legend");
    assert_eq!(over.percentage, 1.0);
}

#[test]
fn knowledge_points_chunk_into_grid_rows() {
    use nc_tracker::api::Problem;
    use nc_tracker::gui::components::problem_grid::{chunk_kp, grid_rows};

    let problems: Vec<Problem> = (1..=5)
        .map(|i| Problem { problem_id: i.to_string(), title: format!("p{i}"), ..Default::default() })
        .collect();
    let rows = chunk_kp("DP", &problems, 2);
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["DP", "", ""]);
    assert!(rows.iter().all(|r| r.kp.as_deref() == Some("DP")));

    let grid = grid_rows(&rows);
    assert_eq!(grid[2].problem_ids, vec!["5"]);

    let h = compute_highlighting(ProblemsView::Practice, &grid, &diff(&["1", "2", "3", "4", "5"], &[]), false);
    assert_eq!(h.all_ac, vec![true, false, false]);
}
