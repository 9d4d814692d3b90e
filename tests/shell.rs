// tests/shell.rs
//
// Shell behaviour against a canned backend.
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::error::Error;
use std::time::{Duration, Instant};

use nc_tracker::api::{Badge, DiffResult, Envelope, RankEntry, TeamSummary, TodayInfo, TrackerApi};
use nc_tracker::config::options::AppOptions;
use nc_tracker::config::state::AppState;
use nc_tracker::router::{ProblemsView, Tab};
use nc_tracker::events::Event;
use nc_tracker::shell::{CellStatus, GridRow, ShellNotice, Tracker};

#[derive(Default)]
struct FakeApi {
    uid: String,
    /// `todayinfo` fails at the transport level.
    today_error: bool,
    today_code: i64,
    admin: bool,
    admin_error: bool,
    assistant: bool,
    admin_calls: Cell<u32>,
    users: HashMap<String, RankEntry>,
    diff: DiffResult,
    diff_calls: RefCell<Vec<Vec<String>>>,
    team_name: String,
    applied: RefCell<Vec<String>>,
    badges: RefCell<Vec<Badge>>,
    badge_calls: RefCell<Vec<Vec<u32>>>,
}

impl TrackerApi for FakeApi {
    fn today_info(&self) -> Result<Envelope<TodayInfo>, Box<dyn Error>> {
        if self.today_error {
            return Err("connection reset".into());
        }
        Ok(Envelope {
            code: self.today_code,
            msg: None,
            data: Some(TodayInfo { uid: self.uid.clone(), question_id: "11".into(), ..Default::default() }),
        })
    }

    fn check_admin(&self) -> Result<bool, Box<dyn Error>> {
        self.admin_calls.set(self.admin_calls.get() + 1);
        if self.admin_error {
            return Err("admin check timed out".into());
        }
        Ok(self.admin)
    }

    fn check_assistant_admin(&self) -> Result<bool, Box<dyn Error>> {
        Ok(self.assistant)
    }

    fn user_rank(&self, uid: &str) -> Option<RankEntry> {
        self.users.get(uid).cloned()
    }

    fn problem_diff(&self, _uid1: &str, qids: &[String], _uid2: Option<&str>) -> Result<DiffResult, Box<dyn Error>> {
        self.diff_calls.borrow_mut().push(qids.to_vec());
        Ok(self.diff.clone())
    }

    fn team_summary(&self, team_id: &str) -> Result<TeamSummary, Box<dyn Error>> {
        if self.team_name.is_empty() {
            return Err("no such team".into());
        }
        Ok(TeamSummary { team_id: team_id.into(), name: self.team_name.clone(), ..Default::default() })
    }

    fn team_apply(&self, team_id: &str, _message: &str) -> Result<(), Box<dyn Error>> {
        self.applied.borrow_mut().push(team_id.into());
        Ok(())
    }

    fn badge_list(&self, types: &[u32]) -> Vec<Badge> {
        self.badge_calls.borrow_mut().push(types.to_vec());
        self.badges.borrow().clone()
    }
}

fn tracker(api: FakeApi) -> Tracker<FakeApi> {
    Tracker::new(api, AppState::new(AppOptions::default()))
}

fn entry(uid: &str) -> RankEntry {
    RankEntry { uid: uid.into(), name: format!("user{uid}"), count: 10, place: "5".into(), ..Default::default() }
}

fn alerts(t: &mut Tracker<FakeApi>) -> Vec<String> {
    t.take_notices()
        .into_iter()
        .filter_map(|n| match n {
            ShellNotice::Alert(m) => Some(m),
            _ => None,
        })
        .collect()
}

#[test]
fn anonymous_start_lands_on_requested_tab() {
    let mut t = tracker(FakeApi { uid: "0".into(), ..Default::default() });
    t.init("#/rankings");
    assert!(!t.state.is_logged_in());
    assert_eq!(t.state.active_main_tab, Tab::Rankings);
    assert_eq!(t.hash, "/rankings");
}

#[test]
fn login_fills_search_box() {
    let mut t = tracker(FakeApi { uid: "919247".into(), ..Default::default() });
    t.init("");
    assert_eq!(t.state.logged_in_user_id.as_deref(), Some("919247"));
    assert_eq!(t.state.gui.search_uid, "919247");
    assert_eq!(t.state.active_main_tab, Tab::Daily);
    assert_eq!(t.hash, "/daily");
}

#[test]
fn admin_tab_denied_reroutes_to_daily() {
    let mut t = tracker(FakeApi { uid: "5".into(), ..Default::default() });
    t.init("#/admin");
    assert_eq!(t.state.active_main_tab, Tab::Daily);
    assert_eq!(t.hash, "/daily");
    assert_eq!(alerts(&mut t), vec!["需要管理员权限"]);
}

#[test]
fn assistant_tab_needs_either_capability() {
    let mut t = tracker(FakeApi { uid: "5".into(), ..Default::default() });
    t.init("");
    t.switch_main_tab("dify", None);
    assert_eq!(t.state.active_main_tab, Tab::Daily);
    assert_eq!(alerts(&mut t), vec!["无权限访问 AI 助手"]);

    let mut t = tracker(FakeApi { uid: "5".into(), assistant: true, ..Default::default() });
    t.init("");
    t.switch_main_tab("assistant", None);
    assert_eq!(t.state.active_main_tab, Tab::Ai);
    assert_eq!(t.hash, "/ai");
}

#[test]
fn admin_check_is_cached_per_user() {
    let mut t = tracker(FakeApi { uid: "5".into(), admin: true, ..Default::default() });
    t.init("");
    t.switch_main_tab("admin", None);
    t.switch_main_tab("daily", None);
    t.switch_main_tab("admin", None);
    assert_eq!(t.state.active_main_tab, Tab::Admin);
    assert_eq!(t.api.admin_calls.get(), 1);

    t.state.set_logged_in_user(Some("6".into()), None);
    assert!(!t.state.is_admin);
    t.switch_main_tab("admin", None);
    assert_eq!(t.api.admin_calls.get(), 2);
}

#[test]
fn login_transport_error_keeps_current_state() {
    let mut t = tracker(FakeApi { uid: "5".into(), ..Default::default() });
    t.init("");
    assert_eq!(t.state.logged_in_user_id.as_deref(), Some("5"));

    t.api.today_error = true;
    t.detect_logged_in_user();
    assert_eq!(t.state.logged_in_user_id.as_deref(), Some("5"));
    assert!(alerts(&mut t).is_empty());

    let mut t = tracker(FakeApi { today_error: true, ..Default::default() });
    t.init("#/rankings");
    assert!(!t.state.is_logged_in());
    assert_eq!(t.state.active_main_tab, Tab::Rankings);
}

#[test]
fn nonzero_code_logs_the_user_out() {
    let mut t = tracker(FakeApi { uid: "5".into(), ..Default::default() });
    t.init("");
    assert!(t.state.is_logged_in());

    t.api.today_code = 401;
    t.detect_logged_in_user();
    assert!(!t.state.is_logged_in());
    assert!(t.state.logged_in_user_id.is_none());
}

#[test]
fn failed_admin_check_is_cached_as_denied() {
    let mut t = tracker(FakeApi { uid: "5".into(), admin: true, admin_error: true, ..Default::default() });
    t.init("");
    t.switch_main_tab("admin", None);
    assert_eq!(t.state.active_main_tab, Tab::Daily);
    assert_eq!(alerts(&mut t), vec!["需要管理员权限"]);

    t.switch_main_tab("admin", None);
    assert_eq!(t.state.active_main_tab, Tab::Daily);
    assert!(!t.state.is_admin);
    assert_eq!(t.api.admin_calls.get(), 1, "failed check must not be retried for the same user");
}

#[test]
fn contest_alias_opens_contests_view() {
    let mut t = tracker(FakeApi { uid: "0".into(), ..Default::default() });
    t.init("#/contest");
    assert_eq!(t.state.active_main_tab, Tab::Problems);
    assert_eq!(t.state.active_view, ProblemsView::Contests);
    assert_eq!(t.hash, "/contest");
}

#[test]
fn unknown_uid_alerts() {
    let mut t = tracker(FakeApi { uid: "0".into(), ..Default::default() });
    t.search_users("404", "");
    assert_eq!(alerts(&mut t), vec!["用户未找到"]);
    assert!(t.state.last_searched_user_data.is_none());
}

#[test]
fn search_diffs_the_active_view_and_highlights() {
    let mut users = HashMap::new();
    users.insert(s("1"), entry("1"));
    users.insert(s("2"), entry("2"));
    let api = FakeApi {
        uid: "0".into(),
        users,
        diff: DiffResult { ac1_qids: vec![s("a"), s("b")], ac2_qids: vec![s("c")] },
        ..Default::default()
    };
    let mut t = tracker(api);
    t.state.set_active_view(ProblemsView::Contests);
    t.set_grid(ProblemsView::Contests, vec![
        GridRow { label: s("R1"), problem_ids: vec![s("a"), s("b")], kp: None },
        GridRow { label: s("R2"), problem_ids: vec![s("b"), s("c"), s("d")], kp: None },
    ]);

    t.search_users("1", "2");

    let calls = t.api.diff_calls.borrow().clone();
    assert_eq!(calls, vec![vec![s("a"), s("b"), s("c"), s("d")]], "ids deduplicated in render order");

    let h = &t.highlights[&ProblemsView::Contests];
    assert_eq!(h.status("a"), Some(CellStatus::Ac));
    assert_eq!(h.status("c"), Some(CellStatus::RivalAc));
    assert_eq!(h.status("d"), Some(CellStatus::None));
    assert_eq!(h.all_ac, vec![true, false]);

    let found = t.state.last_searched_user_data.as_ref().unwrap();
    assert_eq!(found.user1.uid, "1");
    assert_eq!(found.user2.as_ref().map(|u| u.uid.as_str()), Some("2"));
}

#[test]
fn new_grid_drops_stale_highlight() {
    let mut users = HashMap::new();
    users.insert(s("1"), entry("1"));
    let mut t = tracker(FakeApi { uid: "0".into(), users, ..Default::default() });
    t.set_grid(ProblemsView::Practice, vec![GridRow { label: s("kp"), problem_ids: vec![s("x")], kp: Some(s("kp")) }]);
    t.search_users("1", "");
    assert!(t.highlights.contains_key(&ProblemsView::Practice));

    t.set_grid(ProblemsView::Practice, Vec::new());
    assert!(!t.highlights.contains_key(&ProblemsView::Practice));
}

#[test]
fn scheduled_refresh_fires_once_rows_exist() {
    let mut users = HashMap::new();
    users.insert(s("7"), entry("7"));
    let mut t = tracker(FakeApi { uid: "7".into(), users, ..Default::default() });
    t.init("#/practice");
    assert_eq!(t.scheduler.pending_view(), Some(ProblemsView::Practice));

    let now = Instant::now();
    t.tick(now);
    assert!(t.api.diff_calls.borrow().is_empty(), "no rows yet");

    t.set_grid(ProblemsView::Practice, vec![GridRow { label: s("kp"), problem_ids: vec![s("q1")], kp: Some(s("kp")) }]);
    t.tick(now + Duration::from_millis(200));
    assert_eq!(t.api.diff_calls.borrow().len(), 1);
    assert_eq!(t.scheduler.pending_view(), None);
}

#[test]
fn invite_link_opens_team_and_prompts() {
    let mut t = tracker(FakeApi { uid: "3".into(), team_name: "Alpha".into(), ..Default::default() });
    t.init("#/team/88/join");
    assert_eq!(t.state.active_main_tab, Tab::Team);
    assert_eq!(t.hash, "/team/88/join", "invite hash must survive the tab switch");

    let notices = t.take_notices();
    assert!(notices.contains(&ShellNotice::InviteLanding { team_id: s("88"), text: s("是否加入 Alpha") }));

    t.answer_invite_landing("88", true);
    assert_eq!(*t.api.applied.borrow(), vec![s("88")]);
    assert_eq!(t.hash, "/team");
    assert_eq!(alerts(&mut t), vec!["已提交加入申请"]);
}

#[test]
fn invite_landing_without_summary_uses_generic_text() {
    let mut t = tracker(FakeApi { uid: "3".into(), ..Default::default() });
    t.show_team_invite_landing("9");
    let notices = t.take_notices();
    assert_eq!(notices, vec![ShellNotice::InviteLanding { team_id: s("9"), text: s("是否加入该团队？") }]);

    t.answer_invite_landing("9", false);
    assert!(t.api.applied.borrow().is_empty());
}

#[test]
fn links_carry_the_channel() {
    let mut t = tracker(FakeApi::default());
    t.state.channel_put = s("abc");
    assert_eq!(t.link("/acm/problem/1"), "https://www.nowcoder.com/acm/problem/1?channelPut=abc");
}

fn badge(id: &str, status: u64) -> Badge {
    Badge { id: id.into(), name: format!("徽章{id}"), detail: s("详情"), score: 5, status, ..Default::default() }
}

#[test]
fn earned_badges_are_announced_after_check_in() {
    let api = FakeApi { uid: "5".into(), ..Default::default() };
    *api.badges.borrow_mut() = vec![badge("1", 1), badge("2", 0)];
    let mut t = tracker(api);
    t.init("");

    let now = Instant::now();
    t.tick(now);
    assert_eq!(*t.api.badge_calls.borrow(), vec![vec![1, 2, 3, 4, 6]]);
    assert!(t.take_notices().is_empty(), "badges earned before login stay quiet");

    *t.api.badges.borrow_mut() = vec![badge("1", 1), badge("2", 1)];
    t.bus.emit(&Event::CheckInSuccess { question_id: s("11") });
    t.tick(now);
    t.tick(now + Duration::from_millis(1000));
    assert_eq!(t.api.badge_calls.borrow().len(), 1, "waits for the check-in to settle");

    t.tick(now + Duration::from_millis(1600));
    assert_eq!(t.api.badge_calls.borrow()[1], vec![1, 2, 3]);
    assert_eq!(
        t.take_notices(),
        vec![ShellNotice::Achievement { name: s("徽章2"), detail: s("详情"), score: 5 }]
    );

    t.switch_main_tab("achievements", None);
    t.tick(now + Duration::from_millis(1700));
    t.tick(now + Duration::from_millis(2300));
    assert_eq!(t.api.badge_calls.borrow().len(), 3);
    assert!(t.take_notices().is_empty(), "nothing new on the achievements tab");
}

#[test]
fn badge_checks_skip_anonymous_sessions() {
    let mut t = tracker(FakeApi { uid: "0".into(), ..Default::default() });
    t.init("#/achievements");
    let now = Instant::now();
    t.tick(now);
    t.tick(now + Duration::from_millis(600));
    assert!(t.api.badge_calls.borrow().is_empty());
}

fn s(v: &str) -> String {
    v.to_string()
}
