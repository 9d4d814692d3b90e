// src/shell.rs
//
// UI-independent application shell: routing, gating, login detection, the
// post-switch diff refresh and problem highlighting. The egui host drives it
// and renders whatever it leaves in `state`/`highlights`/`notices`.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use url::Url;

use crate::achievements::{AchievementCheck, AchievementNotifier, ALL_BADGE_TYPES};
use crate::api::{DiffResult, SearchedUsers, TrackerApi};
use crate::config::consts::{
    DIFFICULTY_RANGES, NOWCODER_UI_BASE, REFRESH_MAX_TRIES, REFRESH_POLL_MS, SEARCH_DEBOUNCE_MS,
};
use crate::config::state::AppState;
use crate::events::{Event, EventBus};
use crate::router::{self, Capability, ProblemsView, Tab, DEFAULT_TAB};

pub const DEFAULT_CHANNEL_PUT: &str = "tracker1";

/// Messages the host must surface (modal / status line).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellNotice {
    Alert(String),
    /// "Join this team?" prompt opened from an invite link.
    InviteLanding { team_id: String, text: String },
    /// Newly earned badge.
    Achievement { name: String, detail: String, score: u64 },
}

/* ---------- problem grid & highlighting ---------- */

/// One rendered row of a problems view: a contest, or a slice of a knowledge point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridRow {
    pub label: String,
    pub problem_ids: Vec<String>,
    /// Knowledge point the row belongs to (practice view only).
    pub kp: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellStatus {
    Ac,
    RivalAc,
    None,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
    pub cells: HashMap<String, CellStatus>,
    /// Parallel to the grid rows: whether the row's first cell gets the all-AC mark.
    pub all_ac: Vec<bool>,
}

impl Highlight {
    pub fn status(&self, problem_id: &str) -> Option<CellStatus> {
        self.cells.get(problem_id).copied()
    }
}

/// Statuses for every cell of `rows`, plus the per-row all-AC markers.
/// Contest/interview rows are judged on their own; practice rows are judged per
/// knowledge point and only the first row of a point carries the marker.
pub fn compute_highlighting(
    view: ProblemsView,
    rows: &[GridRow],
    diff: &DiffResult,
    has_rival: bool,
) -> Highlight {
    let ac1: HashSet<&str> = diff.ac1_qids.iter().map(String::as_str).collect();
    let ac2: HashSet<&str> = diff.ac2_qids.iter().map(String::as_str).collect();

    let mut cells = HashMap::new();
    for pid in rows.iter().flat_map(|r| r.problem_ids.iter()) {
        let status = if ac1.contains(pid.as_str()) {
            CellStatus::Ac
        } else if has_rival && ac2.contains(pid.as_str()) {
            CellStatus::RivalAc
        } else {
            CellStatus::None
        };
        cells.insert(pid.clone(), status);
    }

    let row_all_ac = |r: &GridRow| !r.problem_ids.is_empty() && r.problem_ids.iter().all(|p| ac1.contains(p.as_str()));

    let all_ac = match view {
        ProblemsView::Contests | ProblemsView::Interview => rows.iter().map(row_all_ac).collect(),
        ProblemsView::Practice => {
            // (all solved, problem count) per knowledge point
            let mut kp_done: HashMap<&str, (bool, usize)> = HashMap::new();
            for r in rows {
                let key = r.kp.as_deref().unwrap_or("");
                let done = r.problem_ids.iter().all(|p| ac1.contains(p.as_str()));
                let e = kp_done.entry(key).or_insert((true, 0));
                e.0 = e.0 && done;
                e.1 += r.problem_ids.len();
            }
            let mut seen: HashSet<&str> = HashSet::new();
            rows.iter()
                .map(|r| {
                    let key = r.kp.as_deref().unwrap_or("");
                    let first = seen.insert(key);
                    first && matches!(kp_done.get(key), Some(&(true, n)) if n > 0)
                })
                .collect()
        }
    };

    Highlight { cells, all_ac }
}

/* ---------- refresh scheduler ---------- */

#[derive(Clone, Copy, Debug)]
struct PendingRefresh {
    view: ProblemsView,
    tries: u32,
    next_check: Instant,
}

/// Waits for a problems view to have rows, then fires one search.
/// Polls every 100 ms up to 25 times and fires anyway on timeout; fires closer
/// than 150 ms to the previous one are dropped.
#[derive(Clone, Debug, Default)]
pub struct RefreshScheduler {
    pending: Option<PendingRefresh>,
    last_fire: Option<Instant>,
}

impl RefreshScheduler {
    pub fn new() -> Self { Self::default() }

    /// Replaces any pending refresh. The first check happens at `now`.
    pub fn schedule(&mut self, view: ProblemsView, now: Instant) {
        self.pending = Some(PendingRefresh { view, tries: 0, next_check: now });
    }

    pub fn pending_view(&self) -> Option<ProblemsView> {
        self.pending.map(|p| p.view)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Advance the wait. `rows_ready` is whether the pending view has rows now.
    /// True when a search should run.
    pub fn poll(&mut self, now: Instant, rows_ready: bool) -> bool {
        let Some(mut p) = self.pending else { return false };
        if now < p.next_check {
            return false;
        }
        p.tries += 1;
        if rows_ready || p.tries >= REFRESH_MAX_TRIES {
            self.pending = None;
            return self.try_fire(now);
        }
        p.next_check = now + Duration::from_millis(REFRESH_POLL_MS);
        self.pending = Some(p);
        false
    }

    /// Debounce gate shared with direct search requests.
    pub fn try_fire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_fire {
            if now.saturating_duration_since(last) < Duration::from_millis(SEARCH_DEBOUNCE_MS) {
                logd!("Shell: search debounced");
                return false;
            }
        }
        self.last_fire = Some(now);
        true
    }
}

/* ---------- link helpers ---------- */

/// Resolve `url` against the site and set `channelPut`. Empty on garbage input.
pub fn build_url_with_channel_put(url: &str, channel_put: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return s!();
    }
    let cp = if channel_put.is_empty() { DEFAULT_CHANNEL_PUT } else { channel_put };
    let parsed = Url::parse(NOWCODER_UI_BASE).and_then(|base| base.join(url));
    match parsed {
        Ok(mut full) => {
            let kept: Vec<(String, String)> = full
                .query_pairs()
                .filter(|(k, _)| k != "channelPut")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            full.query_pairs_mut().clear().extend_pairs(kept).append_pair("channelPut", cp);
            full.to_string()
        }
        Err(e) => {
            loge!("Shell: bad link {:?}: {}", url, e);
            s!()
        }
    }
}

/// Contest headers carry `<cp>a`, problem cells `<cp>1`; no channel → default tag.
pub fn contest_link(url: &str, channel_put: &str) -> String {
    if channel_put.is_empty() {
        build_url_with_channel_put(url, "")
    } else {
        build_url_with_channel_put(url, &join!(channel_put, "a"))
    }
}

pub fn problem_link(url: &str, channel_put: &str) -> String {
    if channel_put.is_empty() {
        build_url_with_channel_put(url, "")
    } else {
        build_url_with_channel_put(url, &join!(channel_put, "1"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub min: u32,
    pub max: u32,
    /// Position inside the band, 0..=1.
    pub percentage: f32,
}

/// Band of a difficulty score; anything outside every band reads as legend.
pub fn difficulty_info(score: u32) -> DifficultyInfo {
    let band = DIFFICULTY_RANGES
        .iter()
        .find(|(_, min, max, _, _)| score >= *min && score <= *max);
    match band {
        Some(&(key, min, max, label, color)) => {
            let span = (max - min).max(1) as f32;
            let pct = ((score - min) as f32 / span).clamp(0.0, 1.0);
            DifficultyInfo { key, label, color, min, max, percentage: pct }
        }
        None => {
            let (key, min, max, label, color) = DIFFICULTY_RANGES[DIFFICULTY_RANGES.len() - 1];
            DifficultyInfo { key, label, color, min, max, percentage: 1.0 }
        }
    }
}

/* ---------- the shell ---------- */

pub struct Tracker<A: TrackerApi> {
    pub api: A,
    pub state: AppState,
    pub bus: EventBus,
    /// Location hash without the leading `#`.
    pub hash: String,
    pub scheduler: RefreshScheduler,
    /// Rows currently rendered by each problems view.
    grids: HashMap<ProblemsView, Vec<GridRow>>,
    pub highlights: HashMap<ProblemsView, Highlight>,
    pub achievements: AchievementNotifier,
    notices: Vec<ShellNotice>,
}

impl<A: TrackerApi> Tracker<A> {
    pub fn new(api: A, state: AppState) -> Self {
        let mut bus = EventBus::new();
        let achievements = AchievementNotifier::new();
        achievements.attach(&mut bus);
        Self {
            api,
            state,
            bus,
            hash: s!(),
            scheduler: RefreshScheduler::new(),
            grids: HashMap::new(),
            highlights: HashMap::new(),
            achievements,
            notices: Vec::new(),
        }
    }

    /// Startup: login check, first route, invite landing.
    pub fn init(&mut self, initial_hash: &str) {
        self.hash = s!(initial_hash.trim().trim_start_matches('#'));
        let raw_route = router::route_from_hash(&self.hash);
        let raw_route = if raw_route.is_empty() { s!(DEFAULT_TAB.name()) } else { raw_route };
        let invite = router::parse_team_invite_route(&self.hash);

        self.detect_logged_in_user();

        match &invite {
            Some(_) => self.switch_main_tab(Tab::Team.name(), None),
            None => {
                let sub = router::extract_problems_subview(&raw_route);
                self.switch_main_tab(&raw_route, sub);
            }
        }
        logf!("Shell: initialized on {:?} (hash {:?})", self.state.active_main_tab, self.hash);

        self.bus.emit(&Event::PageLoaded);
        if let Some(team_id) = invite {
            self.show_team_invite_landing(&team_id);
        }
    }

    /// One `todayinfo` call: a real uid logs the user in, anything else logs out.
    pub fn detect_logged_in_user(&mut self) {
        match self.api.today_info() {
            Ok(env) if env.code == 0 => {
                let data = env.data.unwrap_or_default();
                match data.logged_in_uid() {
                    Some(uid) => {
                        self.state.set_logged_in_user(Some(uid.clone()), data.user.clone());
                        self.state.set_current_daily_problem(Some(data));
                        self.on_user_login(&uid);
                    }
                    None => self.state.set_logged_in_user(None, None),
                }
            }
            Ok(env) => {
                logd!("Shell: todayinfo code {} → not logged in", env.code);
                self.state.set_logged_in_user(None, None);
            }
            Err(e) => loge!("Shell: login check failed: {}", e),
        }
    }

    fn on_user_login(&mut self, uid: &str) {
        logf!("Shell: user {} logged in", uid);
        if self.state.gui.search_uid.is_empty() {
            self.state.gui.search_uid = s!(uid);
        }
        self.state.check_admin_status(&self.api);
        self.bus.emit(&Event::UserLogin { uid: s!(uid) });
        if self.state.active_main_tab == Tab::Problems {
            self.search_current_user();
        }
    }

    /// Route to a tab. Gated tabs the user may not open raise an alert and
    /// land on the default tab instead.
    pub fn switch_main_tab(&mut self, name: &str, subview: Option<ProblemsView>) {
        let tab = router::normalize_tab_name(name);

        if let Some(cap) = tab.gate() {
            if !self.has_capability(cap) {
                let msg = match cap {
                    Capability::Admin => "需要管理员权限",
                    Capability::Assistant => "无权限访问 AI 助手",
                };
                logf!("Shell: {} denied ({:?})", tab, cap);
                self.notices.push(ShellNotice::Alert(s!(msg)));
                if tab != DEFAULT_TAB {
                    self.switch_main_tab(DEFAULT_TAB.name(), None);
                }
                return;
            }
        }

        let preserve = tab == Tab::Team && router::is_invite_hash(&self.hash);
        if !preserve {
            let expected = router::expected_hash(tab, subview);
            if self.hash != expected {
                self.hash = expected;
            }
        }

        let previous = self.state.active_main_tab;
        self.state.set_active_main_tab(tab);
        if previous != tab {
            logd!("Shell: tab {} → {}", previous, tab);
        }

        match tab {
            Tab::Problems => {
                let view = subview.unwrap_or(ProblemsView::Practice);
                self.state.set_active_view(view);
                self.bus.emit(&Event::ViewChanged(view));
                if self.state.is_logged_in() {
                    self.scheduler.schedule(view, Instant::now());
                }
            }
            Tab::Rankings => {
                if let Some(uid) = self.state.logged_in_user_id.clone() {
                    if self.state.gui.search_uid.is_empty() {
                        self.state.gui.search_uid = uid;
                    }
                    let uid = self.state.gui.search_uid.clone();
                    self.bus.emit(&Event::UserSearch { uid });
                }
            }
            _ => {}
        }

        self.bus.emit(&Event::MainTabChanged(tab));
    }

    fn has_capability(&mut self, cap: Capability) -> bool {
        match cap {
            Capability::Admin => self.state.check_admin_status(&self.api),
            Capability::Assistant => {
                let assistant = match self.api.check_assistant_admin() {
                    Ok(v) => v,
                    Err(e) => {
                        loge!("Shell: assistant check failed: {}", e);
                        false
                    }
                };
                assistant || self.state.check_admin_status(&self.api)
            }
        }
    }

    /// Back/forward navigation.
    pub fn on_hash_change(&mut self, hash: &str) {
        self.hash = s!(hash.trim().trim_start_matches('#'));
        let route = router::route_from_hash(&self.hash);
        let route = if route.is_empty() { s!(DEFAULT_TAB.name()) } else { route };
        let sub = router::extract_problems_subview(&route);
        self.switch_main_tab(&route, sub);
        if let Some(team_id) = router::parse_team_invite_route(&self.hash) {
            self.show_team_invite_landing(&team_id);
        }
    }

    /// Problems sub-view buttons (contests / practice / interview).
    pub fn switch_problems_view(&mut self, view: ProblemsView) {
        self.state.set_active_view(view);
        self.bus.emit(&Event::ViewChanged(view));
        self.hash = router::expected_hash(Tab::Problems, Some(view));
        self.schedule_refresh(view);
    }

    pub fn switch_contest_tab(&mut self, tab: &str) {
        self.state.set_active_contest_tab(tab);
        self.bus.emit(&Event::ContestTabChanged(s!(tab)));
        self.schedule_refresh(ProblemsView::Contests);
    }

    pub fn switch_practice_tab(&mut self, tab: &str) {
        self.state.set_active_practice_sub_tab(tab);
        self.bus.emit(&Event::PracticeTabChanged(s!(tab)));
        self.schedule_refresh(ProblemsView::Practice);
    }

    pub fn switch_interview_tab(&mut self, tab: &str) {
        self.state.set_active_interview_sub_tab(tab);
        self.bus.emit(&Event::InterviewTabChanged(s!(tab)));
        self.schedule_refresh(ProblemsView::Interview);
    }

    /// Campus sub-tabs live under the `campus` interview tab.
    pub fn switch_campus_sub_tab(&mut self, tab: &str) {
        self.state.set_active_campus_sub_tab(tab);
        self.bus.emit(&Event::InterviewTabChanged(s!("campus")));
        self.schedule_refresh(ProblemsView::Interview);
    }

    pub fn switch_team_tab(&mut self, tab: &str) {
        self.bus.emit(&Event::TeamTabChanged(s!(tab)));
    }

    fn schedule_refresh(&mut self, view: ProblemsView) {
        if self.state.is_logged_in() {
            self.scheduler.schedule(view, Instant::now());
        }
    }

    /* ---------- grids, search, highlighting ---------- */

    /// Views report what they rendered; drops stale highlight rows.
    pub fn set_grid(&mut self, view: ProblemsView, rows: Vec<GridRow>) {
        self.highlights.remove(&view);
        self.grids.insert(view, rows);
    }

    pub fn grid(&self, view: ProblemsView) -> &[GridRow] {
        self.grids.get(&view).map(Vec::as_slice).unwrap_or(&[])
    }

    fn rows_ready(&self, view: ProblemsView) -> bool {
        self.grid(view).iter().any(|r| !r.problem_ids.is_empty())
    }

    /// Drive the refresh scheduler; call once per frame.
    pub fn tick(&mut self, now: Instant) {
        self.check_achievements(now);
        let Some(view) = self.scheduler.pending_view() else { return };
        let ready = self.rows_ready(view);
        if self.scheduler.poll(now, ready) {
            self.search_current_user();
        }
    }

    /// Badge checks queued by login, check-in and the achievements tab.
    fn check_achievements(&mut self, now: Instant) {
        let Some(check) = self.achievements.poll(now) else { return };
        if !self.state.is_logged_in() {
            logd!("Shell: badge check {:?} skipped, not logged in", check);
            return;
        }
        match check {
            AchievementCheck::ColdStart => {
                let badges = self.api.badge_list(&ALL_BADGE_TYPES);
                let n = self.achievements.mark_seen(&badges);
                logf!("Shell: {} earned badge(s) marked seen", n);
            }
            AchievementCheck::Diff(types) => {
                let badges = self.api.badge_list(types);
                for b in self.achievements.take_new(&badges) {
                    logf!("Shell: new badge {} ({})", b.name, b.id);
                    let name = if b.name.is_empty() { s!("获得成就") } else { b.name };
                    self.notices.push(ShellNotice::Achievement { name, detail: b.detail, score: b.score });
                }
            }
        }
    }

    /// Explicit search button; shares the debounce with scheduled refreshes.
    pub fn request_search(&mut self, now: Instant) {
        if self.scheduler.try_fire(now) {
            self.search_current_user();
        }
    }

    /// Search with the uid/rival boxes (falling back to the logged-in user).
    pub fn search_current_user(&mut self) {
        let uid1 = match self.state.gui.search_uid.trim() {
            "" => self.state.logged_in_user_id.clone().unwrap_or_default(),
            s => s!(s),
        };
        let uid2 = s!(self.state.gui.rival_uid.trim());
        self.search_users(&uid1, &uid2);
    }

    /// Look both users up, then diff the active view's problems and recolour.
    pub fn search_users(&mut self, uid1: &str, uid2: &str) {
        let uid1 = uid1.trim();
        let uid2 = uid2.trim();
        if uid1.is_empty() {
            return;
        }

        let Some(user1) = self.api.user_rank(uid1) else {
            self.notices.push(ShellNotice::Alert(s!("用户未找到")));
            return;
        };
        let user2 = if uid2.is_empty() { None } else { self.api.user_rank(uid2) };

        self.state.last_searched_uid = Some(s!(uid1));
        self.state.last_searched_user_data = Some(SearchedUsers { user1, user2 });
        self.bus.emit(&Event::UserSearch { uid: s!(uid1) });

        let qids = self.scoped_problem_ids();
        if qids.is_empty() {
            return;
        }
        let rival = if uid2.is_empty() { None } else { Some(uid2) };
        match self.api.problem_diff(uid1, &qids, rival) {
            Ok(diff) => self.apply_highlighting(&diff, rival.is_some()),
            Err(e) => {
                loge!("Shell: user search {} failed: {}", uid1, e);
                self.notices.push(ShellNotice::Alert(s!("查询用户失败")));
            }
        }
    }

    /// Problem ids of the active problems view, in render order.
    pub fn scoped_problem_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.grid(self.state.active_view)
            .iter()
            .flat_map(|r| r.problem_ids.iter())
            .filter(|p| !p.is_empty() && seen.insert(p.as_str()))
            .cloned()
            .collect()
    }

    /// Recolour every problems view that has rows.
    pub fn apply_highlighting(&mut self, diff: &DiffResult, has_rival: bool) {
        for (view, rows) in &self.grids {
            let h = compute_highlighting(*view, rows, diff, has_rival);
            self.highlights.insert(*view, h);
        }
    }

    /* ---------- invite landing ---------- */

    pub fn show_team_invite_landing(&mut self, team_id: &str) {
        let name = match self.api.team_summary(team_id) {
            Ok(summary) => summary.name,
            Err(e) => {
                logd!("Shell: team {} summary unavailable: {}", team_id, e);
                s!()
            }
        };
        let text = if name.is_empty() { s!("是否加入该团队？") } else { format!("是否加入 {name}") };
        self.notices.push(ShellNotice::InviteLanding { team_id: s!(team_id), text });
    }

    /// Answer to the invite prompt. Either way the route goes back to the team home.
    pub fn answer_invite_landing(&mut self, team_id: &str, join: bool) {
        if join {
            match self.api.team_apply(team_id, "") {
                Ok(()) => self.notices.push(ShellNotice::Alert(s!("已提交加入申请"))),
                Err(e) => {
                    let msg = e.to_string();
                    let msg = if msg.is_empty() { s!("申请失败") } else { msg };
                    self.notices.push(ShellNotice::Alert(msg));
                }
            }
        }
        self.on_hash_change("/team");
    }

    /* ---------- notices ---------- */

    pub fn push_alert(&mut self, msg: impl Into<String>) {
        self.notices.push(ShellNotice::Alert(msg.into()));
    }

    pub fn take_notices(&mut self) -> Vec<ShellNotice> {
        std::mem::take(&mut self.notices)
    }

    pub fn link(&self, url: &str) -> String {
        build_url_with_channel_put(url, &self.state.channel_put)
    }
}
