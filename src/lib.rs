// src/lib.rs
#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod achievements;
pub mod api;
pub mod card;
pub mod cli;
pub mod config;
pub mod core;
pub mod events;
pub mod gui;
pub mod progress;
pub mod router;
pub mod scrape;
pub mod shell;
pub mod specs;
pub mod store;
