// src/router.rs
//
// Hash routes ↔ main tabs. Every function here is total: unknown input lands
// on the default tab instead of failing.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Daily,
    Problems,
    Rankings,
    SkillTree,
    Achievements,
    Team,
    Profile,
    Faq,
    Changelog,
    Battle,
    Activity,
    Prompt,
    Admin,
    Ai,
}

pub const DEFAULT_TAB: Tab = Tab::Daily;

/// Canonical order; also the order of the tab strip.
pub const ALL_TABS: [Tab; 14] = [
    Tab::Daily,
    Tab::Problems,
    Tab::Rankings,
    Tab::SkillTree,
    Tab::Achievements,
    Tab::Team,
    Tab::Battle,
    Tab::Activity,
    Tab::Prompt,
    Tab::Profile,
    Tab::Faq,
    Tab::Changelog,
    Tab::Admin,
    Tab::Ai,
];

/// What a gated tab requires of the current user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Admin,
    Assistant,
}

impl Tab {
    pub fn name(self) -> &'static str {
        match self {
            Tab::Daily        => "daily",
            Tab::Problems     => "problems",
            Tab::Rankings     => "rankings",
            Tab::SkillTree    => "skill-tree",
            Tab::Achievements => "achievements",
            Tab::Team         => "team",
            Tab::Profile      => "profile",
            Tab::Faq          => "faq",
            Tab::Changelog    => "changelog",
            Tab::Battle       => "battle",
            Tab::Activity     => "activity",
            Tab::Prompt       => "prompt",
            Tab::Admin        => "admin",
            Tab::Ai           => "ai",
        }
    }

    /// Exact, case-sensitive lookup of a canonical name.
    pub fn from_name(name: &str) -> Option<Tab> {
        ALL_TABS.iter().copied().find(|t| t.name() == name)
    }

    pub fn gate(self) -> Option<Capability> {
        match self {
            Tab::Admin => Some(Capability::Admin),
            Tab::Ai    => Some(Capability::Assistant),
            _ => None,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sub-views of the problems tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProblemsView {
    Contests,
    Practice,
    Interview,
}

impl ProblemsView {
    pub fn name(self) -> &'static str {
        match self {
            ProblemsView::Contests  => "contests",
            ProblemsView::Practice  => "practice",
            ProblemsView::Interview => "interview",
        }
    }
}

impl Default for ProblemsView {
    fn default() -> Self { ProblemsView::Practice }
}

/// `#/tab?x=1`, `#tab`, `/tab` → `tab`. Empty hash → empty string.
pub fn route_from_hash(hash: &str) -> String {
    let h = hash.trim().trim_start_matches('#').trim();
    let cleaned = h.strip_prefix('/').unwrap_or(h);
    cleaned.split('?').next().unwrap_or("").to_string()
}

/// Map any route name onto the fixed tab allow-list.
pub fn normalize_tab_name(name: &str) -> Tab {
    let key = name.trim().to_lowercase();

    if key.starts_with("team/") || key.starts_with("invitet") {
        return Tab::Team;
    }
    if let Some(tab) = Tab::from_name(&key) {
        return tab;
    }
    match key.as_str() {
        "skills" | "skill" | "skilltree"        => Tab::SkillTree,
        "contest" | "practice" | "interview"    => Tab::Problems,
        "dify" | "assistant"                    => Tab::Ai,
        _ => DEFAULT_TAB,
    }
}

/// String form of [`normalize_tab_name`]; idempotent.
pub fn normalize(name: &str) -> &'static str {
    normalize_tab_name(name).name()
}

pub fn extract_problems_subview(route: &str) -> Option<ProblemsView> {
    match route.trim().to_lowercase().as_str() {
        "contest"   => Some(ProblemsView::Contests),
        "practice"  => Some(ProblemsView::Practice),
        "interview" => Some(ProblemsView::Interview),
        _ => None,
    }
}

/// Team id from an invite link: `team/{id}`, `team/join?teamId=`,
/// `inviteTeam/{id}`, `inviteTeam?teamId=`.
pub fn parse_team_invite_route(hash: &str) -> Option<String> {
    let full = hash.trim().trim_start_matches('#');
    let s = full.trim_start_matches('/');
    let lc = s.to_lowercase();

    for prefix in ["team/", "inviteteam/"] {
        if let Some(rest) = lc.strip_prefix(prefix) {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            if !digits.is_empty() {
                return Some(digits);
            }
        }
    }

    if lc.starts_with("team/join") || lc.starts_with("inviteteam") {
        let query = s.split_once('?').map(|(_, q)| q).unwrap_or("");
        return query_param(query, "teamId").filter(|v| !v.is_empty());
    }
    None
}

/// True when the hash is an invite link that must not be rewritten.
pub fn is_invite_hash(hash: &str) -> bool {
    let h = hash.trim().trim_start_matches('#').to_lowercase();
    h.starts_with("/team/") || h.starts_with("/inviteteam")
}

/// Hash the shell writes back after a tab switch (without the leading `#`).
pub fn expected_hash(tab: Tab, subview: Option<ProblemsView>) -> String {
    if tab == Tab::Problems && subview == Some(ProblemsView::Contests) {
        return s!("/contest");
    }
    join!("/", tab.name())
}

fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|kv| kv.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
}
