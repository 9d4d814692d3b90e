// src/scrape/mod.rs
mod clist;
mod weekly;

pub use clist::{collect_clist, generate_sheet, generate_table, save_clist};
pub use weekly::{collect_weekly, save_weekly};
