// tests/routing.rs
//
// Hash routes → tabs, invite links, and the page table behind them.
use nc_tracker::gui::pages::Page;
use nc_tracker::gui::router::{all_pages, page_for};
use nc_tracker::router::{
    expected_hash, extract_problems_subview, is_invite_hash, normalize, normalize_tab_name,
    parse_team_invite_route, route_from_hash, ProblemsView, Tab, ALL_TABS,
};

#[test]
fn normalize_is_idempotent() {
    for name in ["daily", "SKILLS", "contest", "dify", "team/12/join", "nope", "", "skill-tree", "ai"] {
        let once = normalize(name);
        assert_eq!(normalize(once), once, "normalize not idempotent for {name:?}");
    }
}

#[test]
fn unknown_routes_land_on_daily() {
    assert_eq!(normalize(&route_from_hash("#/unknown-tab")), "daily");
    assert_eq!(normalize(""), "daily");
    assert_eq!(normalize_tab_name("   "), Tab::Daily);
}

#[test]
fn aliases_map_onto_canonical_tabs() {
    assert_eq!(normalize_tab_name("skills"), Tab::SkillTree);
    assert_eq!(normalize_tab_name("SkillTree"), Tab::SkillTree);
    assert_eq!(normalize_tab_name("practice"), Tab::Problems);
    assert_eq!(normalize_tab_name("assistant"), Tab::Ai);
    assert_eq!(normalize_tab_name("team/42"), Tab::Team);
    assert_eq!(normalize_tab_name("inviteTeam?teamId=3"), Tab::Team);
    assert_eq!(normalize_tab_name("invitet"), Tab::Team);
    assert_eq!(normalize_tab_name("invite"), Tab::Daily);
}

#[test]
fn every_canonical_name_round_trips() {
    for tab in ALL_TABS {
        assert_eq!(normalize_tab_name(tab.name()), tab);
    }
}

#[test]
fn route_from_hash_strips_prefix_and_query() {
    assert_eq!(route_from_hash("#/rankings?page=2"), "rankings");
    assert_eq!(route_from_hash("#daily"), "daily");
    assert_eq!(route_from_hash("/faq"), "faq");
    assert_eq!(route_from_hash(""), "");
}

#[test]
fn problems_subview_from_route() {
    assert_eq!(extract_problems_subview("contest"), Some(ProblemsView::Contests));
    assert_eq!(extract_problems_subview("Interview"), Some(ProblemsView::Interview));
    assert_eq!(extract_problems_subview("problems"), None);
}

#[test]
fn invite_links_carry_the_team_id() {
    assert_eq!(parse_team_invite_route("#/team/123/join").as_deref(), Some("123"));
    assert_eq!(parse_team_invite_route("/inviteTeam/77").as_deref(), Some("77"));
    assert_eq!(parse_team_invite_route("#/team/join?teamId=9").as_deref(), Some("9"));
    assert_eq!(parse_team_invite_route("#/inviteTeam?teamId=5&x=1").as_deref(), Some("5"));
    assert_eq!(parse_team_invite_route("#/team"), None);
    assert!(is_invite_hash("#/team/123/join"));
    assert!(!is_invite_hash("#/team"));
}

#[test]
fn expected_hash_per_tab() {
    assert_eq!(expected_hash(Tab::Problems, Some(ProblemsView::Contests)), "/contest");
    assert_eq!(expected_hash(Tab::Problems, Some(ProblemsView::Practice)), "/problems");
    assert_eq!(expected_hash(Tab::SkillTree, None), "/skill-tree");
}

#[test]
fn every_tab_has_a_page() {
    for tab in ALL_TABS {
        let page = page_for(tab, ProblemsView::Practice);
        assert_eq!(page.tab(), tab, "no page for {tab}");
    }
    assert_eq!(page_for(Tab::Problems, ProblemsView::Contests).view(), Some(ProblemsView::Contests));
    assert_eq!(page_for(Tab::Problems, ProblemsView::Interview).view(), Some(ProblemsView::Interview));
    assert_eq!(all_pages().len(), 16);
}
