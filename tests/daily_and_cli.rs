// tests/daily_and_cli.rs
use std::path::PathBuf;

use chrono::NaiveDate;

use nc_tracker::cli::{parse_args, Command};
use nc_tracker::core::sanitize::{extract_embed_src, truncate_chars};
use nc_tracker::gui::pages::daily::{date_key, month_grid, today_coins};
use nc_tracker::gui::pages::skill_tree::progress_fraction;
use nc_tracker::store::normalize_assistant_url;

fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn coins_for_streaks() {
    assert_eq!(today_coins(false, 7), 0);
    assert_eq!(today_coins(true, 1), 2);
    assert_eq!(today_coins(true, 7), 22);
    assert_eq!(today_coins(true, 14), 22);
    assert_eq!(today_coins(true, 8), 2);
    assert_eq!(today_coins(true, 0), 2);
}

#[test]
fn month_grid_starts_on_sunday() {
    // 2024-09-01 is a Sunday, September has 30 days
    let weeks = month_grid(NaiveDate::from_ymd_opt(2024, 9, 15).unwrap());
    assert_eq!(weeks.len(), 5);
    assert_eq!(weeks[0][0], Some(1));
    assert_eq!(weeks[4][1], Some(30));
    assert_eq!(weeks[4][2], None);

    // 2024-02-01 is a Thursday, leap year
    let weeks = month_grid(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(weeks[0][..4], [None, None, None, None]);
    assert_eq!(weeks[0][4], Some(1));
    let last = weeks.iter().flatten().flatten().max().copied();
    assert_eq!(last, Some(29));
}

#[test]
fn date_keys() {
    assert_eq!(date_key(NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()), "2025-03-07");
}

#[test]
fn skill_progress_accepts_fraction_or_percent() {
    assert_eq!(progress_fraction(0.5), 0.5);
    assert_eq!(progress_fraction(75.0), 0.75);
    assert_eq!(progress_fraction(250.0), 1.0);
    assert_eq!(progress_fraction(-1.0), 0.0);
}

#[test]
fn assistant_url_is_upgraded() {
    assert_eq!(normalize_assistant_url(" http://udify.app/chat/x ").as_deref(), Some("https://udify.app/chat/x"));
    assert_eq!(normalize_assistant_url("https://a/b").as_deref(), Some("https://a/b"));
    assert_eq!(normalize_assistant_url("javascript:alert(1)"), None);
    assert_eq!(normalize_assistant_url(""), None);
}

#[test]
fn embed_src_and_truncation() {
    assert_eq!(extract_embed_src(r#"<iframe src="https://udify.app/x" frameborder="0"></iframe>"#), "https://udify.app/x");
    assert_eq!(extract_embed_src("https://udify.app/y"), "https://udify.app/y");
    assert_eq!(extract_embed_src("<div>nothing</div>"), "");
    assert_eq!(truncate_chars("牛客周赛第一题", 4), "牛客周赛...");
    assert_eq!(truncate_chars("short", 10), "short");
}

#[test]
fn cli_parses_commands() {
    assert_eq!(parse_args(args(&[])).unwrap(), Command::Help);
    assert_eq!(parse_args(args(&["weekly"])).unwrap(), Command::Weekly);
    assert_eq!(
        parse_args(args(&["clist"])).unwrap(),
        Command::Clist { generate_table: false, generate_sheet: false }
    );
    assert_eq!(
        parse_args(args(&["clist", "-t"])).unwrap(),
        Command::Clist { generate_table: true, generate_sheet: false }
    );
    assert_eq!(
        parse_args(args(&["clist", "--generate-sheet", "-t"])).unwrap(),
        Command::Clist { generate_table: true, generate_sheet: true }
    );
    assert_eq!(
        parse_args(args(&["card", "1", "2", "--out", "vs.png"])).unwrap(),
        Command::Card { uid: "1".into(), rival: Some("2".into()), out: PathBuf::from("vs.png") }
    );
    assert_eq!(
        parse_args(args(&["card", "1"])).unwrap(),
        Command::Card { uid: "1".into(), rival: None, out: PathBuf::from("card.png") }
    );
    assert_eq!(parse_args(args(&["route", "#/skills"])).unwrap(), Command::Route { hash: "#/skills".into() });
}

#[test]
fn cli_rejects_bad_input() {
    assert!(parse_args(args(&["frobnicate"])).is_err());
    assert!(parse_args(args(&["weekly", "--fast"])).is_err());
    assert!(parse_args(args(&["clist", "--bogus"])).is_err());
    assert!(parse_args(args(&["card"])).is_err());
    assert!(parse_args(args(&["card", "1", "-o"])).is_err());
    assert!(parse_args(args(&["card", "1", "2", "3"])).is_err());
    assert!(parse_args(args(&["route"])).is_err());
}

#[test]
fn log_levels_parse() {
    use nc_tracker::log::Level;
    assert_eq!(Level::parse(" INFO "), Some(Level::Info));
    assert_eq!(Level::parse("warn"), Some(Level::Error));
    assert_eq!(Level::parse("off"), Some(Level::Off));
    assert_eq!(Level::parse("loud"), None);
    assert!(Level::Error > Level::Debug);
}
