// src/gui/app.rs
use std::{
    cell::RefCell,
    collections::{BTreeSet, HashMap, VecDeque},
    error::Error,
    fs,
    rc::Rc,
    sync::{atomic::AtomicBool, Arc, Mutex},
    time::{Duration, Instant},
};

use eframe::egui;

use crate::{
    api::{
        ApiService, Badge, BadgeUserInfo, BattleMatch, BattleProblem, BattleProblemQuery, CheckInStats,
        ClockQuestion, DayLink, Listed, MemberRankRow, MonthProblem, PromptChallenge, PromptEvaluation,
        RankEntry, RankPage, TagInfo, Team, TeamApplication, TeamBoard, TeamMember, TeamRankRow,
        TeamSummary, DEFAULT_BATTLE_MODE,
    },
    config::{
        options::AppOptions,
        state::{AppState, LoadModule},
    },
    events::{Event, EventKind},
    router::{ProblemsView, Tab},
    shell::{ShellNotice, Tracker},
    store::{DifyConfig, Prefs},
};

use super::{components, components::problem_grid::ProblemRow, router};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let opts = AppOptions::from_env();
    let api = ApiService::new(&opts.api)?;
    let state = AppState::new(opts);
    eframe::run_native(
        "Nowcoder Tracker",
        options,
        Box::new(move |cc| {
            install_cjk_fallback(&cc.egui_ctx);
            Ok(Box::new(App::new(api, state, "")))
        }),
    )?;
    Ok(())
}

/// Data the pages load, kept between frames. Problem grids are per sub-view.
#[derive(Default)]
pub struct ViewData {
    pub problem_rows: HashMap<ProblemsView, Vec<ProblemRow>>,
    pub interview_total: u64,

    // rankings
    pub rank_page: Option<RankPage>,
    pub rank_search: Option<RankEntry>,

    // daily
    pub month_problems: Vec<MonthProblem>,
    pub checked_days: BTreeSet<String>,
    pub check_in_stats: Option<CheckInStats>,
    pub day_link: Option<DayLink>,

    // skill tree
    pub tag_info: Option<TagInfo>,
    pub tag_progress: f64,

    // team
    pub team_tab: String,
    pub my_teams: Vec<Team>,
    pub selected_team: Option<String>,
    pub team_summary: Option<TeamSummary>,
    pub team_members: Listed<TeamMember>,
    pub team_board: TeamBoard,
    pub team_leaderboard: Listed<MemberRankRow>,
    pub my_applications: Vec<TeamApplication>,
    pub my_invites: Vec<TeamApplication>,
    pub team_applications: Vec<TeamApplication>,
    pub team_invites: Vec<TeamApplication>,
    pub apply_team_id: String,

    // battle
    pub battle_mode: String,
    pub battle: Option<BattleMatch>,

    // admin
    pub admin_clock: Listed<ClockQuestion>,
    pub admin_clock_page: u32,
    pub admin_clock_edit: ClockQuestion,
    pub admin_battle: Listed<BattleProblem>,
    pub admin_battle_query: BattleProblemQuery,
    pub admin_problem_id: String,
    pub admin_level_score: String,
    pub admin_year: String,
    pub admin_report: String,

    // activity
    pub activity: Listed<TeamRankRow>,
    pub activity_page: u32,

    // profile
    pub profile_rank: Option<RankEntry>,
    pub profile_checkin: Option<RankEntry>,
    pub card_data_url: String,
    pub card_texture: Option<egui::TextureHandle>,

    // achievements
    pub badges: Vec<Badge>,
    pub badge_info: BadgeUserInfo,

    // prompt
    pub challenges: Vec<PromptChallenge>,
    pub selected_challenge: Option<String>,
    pub evaluation: Option<PromptEvaluation>,

    // assistant
    pub dify: DifyConfig,
    pub dify_input: String,
}

pub struct App {
    pub tracker: Tracker<ApiService>,

    // status line (crawler threads write here too)
    pub status: Arc<Mutex<String>>,
    pub crawling: Arc<AtomicBool>,

    // events from the shell, drained every frame
    inbox: Rc<RefCell<Vec<Event>>>,
    notices: VecDeque<ShellNotice>,
    /// Window focus last frame; regaining it triggers a badge check.
    focused: bool,

    pub hash_input: String,
    pub views: ViewData,
}

const INBOX_KINDS: [EventKind; 10] = [
    EventKind::MainTabChanged,
    EventKind::ViewChanged,
    EventKind::ContestTabChanged,
    EventKind::PracticeTabChanged,
    EventKind::InterviewTabChanged,
    EventKind::TeamTabChanged,
    EventKind::UserLogin,
    EventKind::UserSearch,
    EventKind::CheckInSuccess,
    EventKind::DataError,
];

impl App {
    pub fn new(api: ApiService, mut state: AppState, initial_hash: &str) -> Self {
        let prefs = Prefs::load();
        if !prefs.search_uid.is_empty() {
            state.gui.search_uid = prefs.search_uid;
        }
        state.gui.rival_uid = prefs.rival_uid;

        let mut tracker = Tracker::new(api, state);
        tracker.achievements.load_seen();

        let inbox: Rc<RefCell<Vec<Event>>> = Rc::default();
        for kind in INBOX_KINDS {
            let q = Rc::clone(&inbox);
            tracker.bus.on(kind, move |e| {
                q.try_borrow_mut()?.push(e.clone());
                Ok(())
            });
        }

        let dify = DifyConfig::load();
        let views = ViewData {
            team_tab: s!("mine"),
            battle_mode: s!(DEFAULT_BATTLE_MODE),
            admin_clock_page: 1,
            activity_page: 1,
            dify_input: dify.url.clone(),
            dify,
            ..ViewData::default()
        };

        let mut app = Self {
            tracker,
            status: Arc::new(Mutex::new(s!("Idle"))),
            crawling: Arc::new(AtomicBool::new(false)),
            inbox,
            notices: VecDeque::new(),
            focused: true,
            hash_input: s!(),
            views,
        };

        app.tracker.init(initial_hash);
        app.hash_input = app.tracker.hash.clone();
        logf!("Init: tab={}, logged_in={}", app.tracker.state.active_main_tab, app.tracker.state.is_logged_in());
        app.pump();
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn api(&self) -> &ApiService { &self.tracker.api }

    #[inline]
    pub fn state(&self) -> &AppState { &self.tracker.state }

    #[inline]
    pub fn state_mut(&mut self) -> &mut AppState { &mut self.tracker.state }

    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Uid the user-centric pages act on: search box, else the session user.
    pub fn target_uid(&self) -> String {
        let st = self.state();
        match st.gui.search_uid.trim() {
            "" => st.logged_in_user_id.clone().unwrap_or_default(),
            uid => s!(uid),
        }
    }

    pub fn save_prefs(&self) {
        let prefs = Prefs {
            search_uid: self.state().gui.search_uid.clone(),
            rival_uid: self.state().gui.rival_uid.clone(),
        };
        if let Err(e) = prefs.save() {
            loge!("Prefs: save failed: {}", e);
        }
    }

    /// Run one blocking fetch with the module's spinner flag and load events around it.
    pub fn load<T>(
        &mut self,
        module: LoadModule,
        f: impl FnOnce(&ApiService) -> Result<T, Box<dyn Error>>,
    ) -> Option<T> {
        let name = s!(module.name());
        self.tracker.state.set_loading(module, true);
        self.tracker.bus.emit(&Event::DataLoading { module: name.clone() });

        let result = f(&self.tracker.api);
        self.tracker.state.set_loading(module, false);

        match result {
            Ok(v) => {
                self.tracker.bus.emit(&Event::DataLoaded { module: name });
                Some(v)
            }
            Err(e) => {
                loge!("Load: {} failed: {}", name, e);
                self.tracker.bus.emit(&Event::DataError { module: name, error: e.to_string() });
                None
            }
        }
    }

    /// Result of a button action → status line (and the log on failure).
    pub fn report<T>(&self, what: &str, r: Result<T, Box<dyn Error>>) -> Option<T> {
        match r {
            Ok(v) => {
                self.status(format!("{what}: done"));
                Some(v)
            }
            Err(e) => {
                loge!("Action: {} failed: {}", what, e);
                self.status(format!("{what}: {e}"));
                None
            }
        }
    }

    /// Best-effort read for pages without a spinner of their own.
    pub fn fetched<T>(&self, what: &str, r: Result<T, Box<dyn Error>>) -> Option<T> {
        match r {
            Ok(v) => Some(v),
            Err(e) => {
                loge!("Load: {} failed: {}", what, e);
                self.status(format!("{what}: {e}"));
                None
            }
        }
    }

    /// Store a problems view's rows and tell the shell what is on screen.
    pub fn set_problem_rows(&mut self, view: ProblemsView, rows: Vec<ProblemRow>) {
        let grid = components::problem_grid::grid_rows(&rows);
        self.tracker.set_grid(view, grid);
        self.views.problem_rows.insert(view, rows);
    }

    pub fn current_page(&self) -> &'static dyn super::pages::Page {
        router::page_for(self.state().active_main_tab, self.state().active_view)
    }

    pub fn enter_current_page(&mut self) {
        let page = self.current_page();
        logd!("UI: enter {}", page.title());
        page.on_enter(self);
    }

    /* ---------- shell events ---------- */

    /// Drain shell events and notices. Handlers may emit more events, so loop a few rounds.
    fn pump(&mut self) {
        for _ in 0..8 {
            let events: Vec<Event> = match self.inbox.try_borrow_mut() {
                Ok(mut q) => q.drain(..).collect(),
                Err(_) => break,
            };
            if events.is_empty() {
                break;
            }
            for e in events {
                self.handle(e);
            }
        }
        self.notices.extend(self.tracker.take_notices());
    }

    fn handle(&mut self, e: Event) {
        match e {
            // the problems tab is entered through ViewChanged
            Event::MainTabChanged(Tab::Problems) => {}
            Event::MainTabChanged(tab) => {
                self.hash_input = self.tracker.hash.clone();
                router::page_for(tab, self.state().active_view).on_enter(self);
            }
            Event::ViewChanged(view) => {
                self.hash_input = self.tracker.hash.clone();
                router::page_for(Tab::Problems, view).on_enter(self);
            }
            Event::ContestTabChanged(_) => router::page_for(Tab::Problems, ProblemsView::Contests).on_enter(self),
            Event::PracticeTabChanged(_) => router::page_for(Tab::Problems, ProblemsView::Practice).on_enter(self),
            Event::InterviewTabChanged(_) => router::page_for(Tab::Problems, ProblemsView::Interview).on_enter(self),
            Event::TeamTabChanged(tab) => {
                self.views.team_tab = tab;
                router::page_for(Tab::Team, ProblemsView::default()).on_enter(self);
            }
            Event::UserLogin { uid } => self.status(format!("Logged in as {uid}")),
            Event::UserSearch { uid } => {
                if self.state().active_main_tab == Tab::Rankings {
                    super::pages::rankings::search(self, &uid);
                }
            }
            Event::CheckInSuccess { question_id } => self.status(format!("Checked in ({question_id})")),
            Event::DataError { module, error } => self.status(format!("{module}: {error}")),
            other => logd!("UI: unhandled event {:?}", other),
        }
    }

    fn draw_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notices.front().cloned() else { return };
        let mut close = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| match &notice {
                ShellNotice::Alert(msg) => {
                    ui.label(msg);
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                }
                ShellNotice::Achievement { name, detail, score } => {
                    ui.heading(format!("获得新成就：{name}"));
                    if !detail.is_empty() {
                        ui.label(detail);
                    }
                    ui.label(format!("+{score}"));
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                }
                ShellNotice::InviteLanding { team_id, text } => {
                    ui.label(text);
                    ui.horizontal(|ui| {
                        if ui.button("加入").clicked() {
                            self.tracker.answer_invite_landing(team_id, true);
                            close = true;
                        }
                        if ui.button("取消").clicked() {
                            self.tracker.answer_invite_landing(team_id, false);
                            close = true;
                        }
                    });
                }
            });
        if close {
            self.notices.pop_front();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let focused = ctx.input(|i| i.viewport().focused).unwrap_or(true);
        if focused && !self.focused && self.state().is_logged_in() {
            self.tracker.achievements.refocused(now);
        }
        self.focused = focused;

        self.tracker.tick(now);
        self.pump();
        if self.tracker.scheduler.pending_view().is_some() || self.tracker.achievements.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            components::tabs::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status_text());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match &self.tracker.state.logged_in_user_id {
                        Some(uid) => ui.label(format!("uid {uid}")),
                        None => ui.label("not logged in"),
                    };
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let page = self.current_page();
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                page.draw(ui, self);
            });
        });

        self.pump();
        self.draw_notice(ctx);
    }
}

/// egui ships no CJK glyphs; borrow a system font when one is around.
fn install_cjk_fallback(ctx: &egui::Context) {
    const CANDIDATES: [&str; 5] = [
        "C:\\Windows\\Fonts\\msyh.ttc",
        "/System/Library/Fonts/PingFang.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    ];
    let Some(bytes) = CANDIDATES.iter().find_map(|p| fs::read(p).ok()) else {
        logd!("Fonts: no CJK fallback found");
        return;
    };
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(s!("cjk"), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push(s!("cjk"));
    }
    ctx.set_fonts(fonts);
}
