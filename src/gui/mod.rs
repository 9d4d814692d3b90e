// src/gui/mod.rs
pub mod app;
pub mod components;
pub mod crawl;
pub mod pages;
pub mod progress;
pub mod router;

pub use app::run;
