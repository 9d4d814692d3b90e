// src/config/state.rs
use std::collections::BTreeSet;

use chrono::{Datelike, Local, NaiveDate};
use serde_json::Value;

use super::options::AppOptions;
use crate::api::{Contest, PracticeData, RankType, SearchedUsers, TodayInfo, TrackerApi};
use crate::router::{ProblemsView, Tab, DEFAULT_TAB};

/// Modules with their own loading spinner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadModule {
    Contests,
    Practice,
    Rankings,
    Daily,
    Interview,
    Course,
}

impl LoadModule {
    pub const ALL: [LoadModule; 6] = [
        LoadModule::Contests,
        LoadModule::Practice,
        LoadModule::Rankings,
        LoadModule::Daily,
        LoadModule::Interview,
        LoadModule::Course,
    ];

    fn index(self) -> usize {
        match self {
            LoadModule::Contests  => 0,
            LoadModule::Practice  => 1,
            LoadModule::Rankings  => 2,
            LoadModule::Daily     => 3,
            LoadModule::Interview => 4,
            LoadModule::Course    => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LoadModule::Contests  => "contests",
            LoadModule::Practice  => "practice",
            LoadModule::Rankings  => "rankings",
            LoadModule::Daily     => "daily",
            LoadModule::Interview => "interview",
            LoadModule::Course    => "course",
        }
    }
}

/// Window geometry and the text inputs the pages bind to.
#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Rankings / problems search boxes
    pub search_uid: String,
    pub rival_uid: String,

    pub skill_tag_id: String,
    pub team_name_input: String,
    pub team_desc_input: String,
    pub team_apply_message: String,
    pub invite_uid_input: String,
    pub admin_user_input: String,
    pub admin_date_input: String,
    pub admin_share_link_input: String,
    pub prompt_input: String,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 1200,
            window_h: 780,
            search_uid: s!(),
            rival_uid: s!(),
            skill_tag_id: s!(),
            team_name_input: s!(),
            team_desc_input: s!(),
            team_apply_message: s!(),
            invite_uid_input: s!(),
            admin_user_input: s!(),
            admin_date_input: s!(),
            admin_share_link_input: s!(),
            prompt_input: s!(),
        }
    }
}

/// Everything the shell and the views share. Owned by the UI thread.
#[derive(Clone, Debug)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,

    // main tab
    pub active_main_tab: Tab,
    pub active_view: ProblemsView,

    // contests
    pub active_contest_tab: String,
    /// Cup series filter; `None` shows every cup.
    pub active_beisai_category: Option<String>,
    pub contests: Vec<Contest>,
    pub total_contests: u64,
    pub contests_current_page: u32,

    // practice
    pub active_practice_sub_tab: String,
    pub practice_data_cache: Option<PracticeData>,
    pub practice_current_page: u32,

    // interview
    pub active_interview_sub_tab: String,
    pub active_campus_sub_tab: String,
    pub interview_data_cache: Option<PracticeData>,
    pub interview_items: Vec<Contest>,
    pub interview_current_page: u32,

    // courses ("" = every course)
    pub active_course_category: String,
    pub course_contests: Vec<Contest>,
    pub total_course_contests: u64,
    pub course_current_page: u32,

    // rankings
    pub active_rankings_tab: RankType,
    pub rankings_total_users: u64,
    pub rankings_current_page: u32,
    pub last_searched_uid: Option<String>,
    pub last_searched_user_data: Option<SearchedUsers>,

    // session
    pub logged_in_user_id: Option<String>,
    pub logged_in_user_data: Option<Value>,
    pub is_admin: bool,
    admin_checked_user_id: Option<String>,

    // daily
    pub current_daily_problem: Option<TodayInfo>,
    /// First day of the month shown in the calendar.
    pub calendar_date: NaiveDate,
    pub simulated_check_ins: BTreeSet<String>,

    loading: [bool; 6],

    pub channel_put: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppOptions::default())
    }
}

impl AppState {
    pub fn new(options: AppOptions) -> Self {
        let channel_put = options.api.channel_put.clone();
        Self {
            options,
            gui: GuiState::default(),
            active_main_tab: DEFAULT_TAB,
            active_view: ProblemsView::Practice,
            active_contest_tab: s!("all"),
            active_beisai_category: None,
            contests: Vec::new(),
            total_contests: 0,
            contests_current_page: 1,
            active_practice_sub_tab: s!("newbie130"),
            practice_data_cache: None,
            practice_current_page: 1,
            active_interview_sub_tab: s!("campus"),
            active_campus_sub_tab: s!("100"),
            interview_data_cache: None,
            interview_items: Vec::new(),
            interview_current_page: 1,
            active_course_category: s!(),
            course_contests: Vec::new(),
            total_course_contests: 0,
            course_current_page: 1,
            active_rankings_tab: RankType::Problem,
            rankings_total_users: 0,
            rankings_current_page: 1,
            last_searched_uid: None,
            last_searched_user_data: None,
            logged_in_user_id: None,
            logged_in_user_data: None,
            is_admin: false,
            admin_checked_user_id: None,
            current_daily_problem: None,
            calendar_date: first_of_month(Local::now().date_naive()),
            simulated_check_ins: BTreeSet::new(),
            loading: [false; 6],
            channel_put,
        }
    }

    /* ---------- setters ---------- */

    pub fn set_active_main_tab(&mut self, tab: Tab) {
        self.active_main_tab = tab;
    }

    pub fn set_active_view(&mut self, view: ProblemsView) {
        self.active_view = view;
    }

    pub fn set_active_contest_tab(&mut self, tab: &str) {
        if self.active_contest_tab != tab {
            self.contests_current_page = 1;
        }
        self.active_contest_tab = s!(tab);
    }

    pub fn set_active_beisai_category(&mut self, category: Option<&str>) {
        let next = category.filter(|c| !c.is_empty()).map(|c| s!(c));
        if self.active_beisai_category != next {
            self.contests_current_page = 1;
        }
        self.active_beisai_category = next;
    }

    pub fn set_active_practice_sub_tab(&mut self, tab: &str) {
        if self.active_practice_sub_tab != tab {
            self.practice_current_page = 1;
        }
        self.active_practice_sub_tab = s!(tab);
    }

    pub fn set_active_interview_sub_tab(&mut self, tab: &str) {
        if self.active_interview_sub_tab != tab {
            self.interview_current_page = 1;
        }
        self.active_interview_sub_tab = s!(tab);
    }

    pub fn set_active_campus_sub_tab(&mut self, tab: &str) {
        if self.active_campus_sub_tab != tab {
            self.interview_current_page = 1;
        }
        self.active_campus_sub_tab = s!(tab);
    }

    pub fn set_active_course_category(&mut self, category: &str) {
        if self.active_course_category != category {
            self.course_current_page = 1;
        }
        self.active_course_category = s!(category);
    }

    pub fn set_active_rankings_tab(&mut self, tab: RankType) {
        if self.active_rankings_tab != tab {
            self.rankings_current_page = 1;
        }
        self.active_rankings_tab = tab;
    }

    pub fn set_loading(&mut self, module: LoadModule, loading: bool) {
        self.loading[module.index()] = loading;
    }

    pub fn is_loading(&self, module: LoadModule) -> bool {
        self.loading[module.index()]
    }

    pub fn set_current_daily_problem(&mut self, problem: Option<TodayInfo>) {
        self.current_daily_problem = problem;
    }

    /// Any day of the target month; stored as the 1st.
    pub fn set_calendar_date(&mut self, date: NaiveDate) {
        self.calendar_date = first_of_month(date);
    }

    /// Step the calendar by whole months (negative = back).
    pub fn shift_calendar_month(&mut self, delta: i32) {
        let months = self.calendar_date.year() * 12 + self.calendar_date.month0() as i32 + delta;
        let (y, m0) = (months.div_euclid(12), months.rem_euclid(12) as u32);
        if let Some(d) = NaiveDate::from_ymd_opt(y, m0 + 1, 1) {
            self.calendar_date = d;
        }
    }

    /* ---------- session ---------- */

    /// Switching to another user (or logging out) drops the admin cache.
    pub fn set_logged_in_user(&mut self, user_id: Option<String>, user_data: Option<Value>) {
        let user_id = user_id.filter(|u| !u.is_empty() && u != "0");
        logd!("State: logged-in user → {:?}", user_id);
        if self.logged_in_user_id != user_id {
            self.is_admin = false;
            self.admin_checked_user_id = None;
        }
        self.logged_in_user_id = user_id;
        self.logged_in_user_data = user_data;
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in_user_id.is_some()
    }

    /// Tracker admin check, asked at most once per user. A failed check counts
    /// as "not admin" and is cached too.
    pub fn check_admin_status(&mut self, api: &dyn TrackerApi) -> bool {
        let Some(uid) = self.logged_in_user_id.clone() else {
            self.is_admin = false;
            return false;
        };
        if self.admin_checked_user_id.as_deref() == Some(uid.as_str()) {
            return self.is_admin;
        }
        self.is_admin = match api.check_admin() {
            Ok(flag) => {
                logf!("State: admin check for {} → {}", uid, flag);
                flag
            }
            Err(e) => {
                loge!("State: admin check for {} failed: {}", uid, e);
                false
            }
        };
        self.admin_checked_user_id = Some(uid);
        self.is_admin
    }

    /* ---------- resets ---------- */

    pub fn reset_contest_state(&mut self) {
        self.contests.clear();
        self.total_contests = 0;
        self.contests_current_page = 1;
    }

    pub fn reset_practice_state(&mut self) {
        self.practice_data_cache = None;
        self.practice_current_page = 1;
    }

    pub fn reset_interview_state(&mut self) {
        self.interview_data_cache = None;
        self.interview_items.clear();
        self.interview_current_page = 1;
    }

    pub fn reset_course_state(&mut self) {
        self.course_contests.clear();
        self.total_course_contests = 0;
        self.course_current_page = 1;
    }

    pub fn reset_rankings_state(&mut self) {
        self.rankings_total_users = 0;
        self.rankings_current_page = 1;
        self.last_searched_uid = None;
        self.last_searched_user_data = None;
    }
}

fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}
