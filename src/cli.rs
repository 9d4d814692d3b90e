// src/cli.rs
use std::{env, error::Error, fs, path::PathBuf};

use crate::api::ApiService;
use crate::card;
use crate::config::consts::{
    CLIST_OUT_FILE, CLIST_SHEET_FILE, CLIST_SHEET_KEYWORDS, CLIST_TABLE_FILE, WEEKLY_OUT_FILE,
};
use crate::config::options::{ApiOptions, ScrapeOptions};
use crate::progress::StderrProgress;
use crate::router;
use crate::scrape;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Weekly,
    /// Crawl, unless one of the flags asks to rebuild an export from the saved JSON.
    Clist { generate_table: bool, generate_sheet: bool },
    Card { uid: String, rival: Option<String>, out: PathBuf },
    Route { hash: String },
    Help,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cmd = parse_args(env::args().skip(1))?;
    execute(cmd)
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, Box<dyn Error>> {
    let mut args = args.into_iter();
    let Some(sub) = args.next() else { return Ok(Command::Help) };

    match sub.as_str() {
        "weekly" => {
            if let Some(extra) = args.next() {
                return Err(format!("Unknown arg: {}", extra).into());
            }
            Ok(Command::Weekly)
        }
        "clist" => {
            let mut generate_table = false;
            let mut generate_sheet = false;
            for a in args {
                match a.as_str() {
                    "--generate-table" | "-t" => generate_table = true,
                    "--generate-sheet" | "-s" => generate_sheet = true,
                    _ => return Err(format!("Unknown arg: {}", a).into()),
                }
            }
            Ok(Command::Clist { generate_table, generate_sheet })
        }
        "card" => {
            let mut positional = Vec::new();
            let mut out = PathBuf::from("card.png");
            while let Some(a) = args.next() {
                match a.as_str() {
                    "-o" | "--out" => out = PathBuf::from(args.next().ok_or("Missing output path")?),
                    _ if a.starts_with('-') => return Err(format!("Unknown arg: {}", a).into()),
                    _ => positional.push(a),
                }
            }
            let mut positional = positional.into_iter();
            let uid = positional.next().ok_or("Missing uid")?;
            let rival = positional.next();
            if let Some(extra) = positional.next() {
                return Err(format!("Unexpected argument: {}", extra).into());
            }
            Ok(Command::Card { uid, rival, out })
        }
        "route" => {
            let hash = args.next().ok_or("Missing hash")?;
            Ok(Command::Route { hash })
        }
        "-h" | "--help" | "help" => Ok(Command::Help),
        other => Err(format!("Unknown command: {}", other).into()),
    }
}

pub fn execute(cmd: Command) -> Result<(), Box<dyn Error>> {
    match cmd {
        Command::Help => eprintln!(include_str!("cli_help.txt")),

        Command::Weekly => {
            let opts = ScrapeOptions::from_env();
            let mut prog = StderrProgress::new();
            let out = scrape::collect_weekly(&opts, Some(&mut prog))?;
            scrape::save_weekly(&out, WEEKLY_OUT_FILE.as_ref())?;
            println!("{} contest(s) → {}", out.contests.len(), WEEKLY_OUT_FILE);
        }

        Command::Clist { generate_table, generate_sheet } => {
            if !generate_table && !generate_sheet {
                let opts = ScrapeOptions::from_env();
                let mut prog = StderrProgress::new();
                let out = scrape::collect_clist(&opts, Some(&mut prog))?;
                scrape::save_clist(&out, CLIST_OUT_FILE.as_ref())?;
                println!("{} problem(s) → {}", out.items.len(), CLIST_OUT_FILE);
            }
            if generate_table {
                let rows = scrape::generate_table(CLIST_OUT_FILE.as_ref(), CLIST_TABLE_FILE.as_ref())?;
                println!("{} row(s) → {}", rows, CLIST_TABLE_FILE);
            }
            if generate_sheet {
                let rows = scrape::generate_sheet(
                    CLIST_OUT_FILE.as_ref(),
                    CLIST_SHEET_FILE.as_ref(),
                    &CLIST_SHEET_KEYWORDS,
                )?;
                match rows {
                    0 => println!("no matching contest, {} not written", CLIST_SHEET_FILE),
                    n => println!("{} row(s) → {}", n, CLIST_SHEET_FILE),
                }
            }
        }

        Command::Card { uid, rival, out } => {
            let api = ApiService::new(&ApiOptions::from_env())?;
            let user = api.fetch_user_data(&uid).ok_or_else(|| format!("user {uid} not found"))?;
            let rival = match rival {
                Some(r) => Some(api.fetch_user_data(&r).ok_or_else(|| format!("user {r} not found"))?),
                None => None,
            };
            let data_url = card::user_card(api.http(), &user, rival.as_ref())?;
            fs::write(&out, card::decode_data_url(&data_url)?)?;
            println!("{}", out.display());
        }

        Command::Route { hash } => {
            let route = router::route_from_hash(&hash);
            println!("{}", router::normalize(&route));
        }
    }
    Ok(())
}
