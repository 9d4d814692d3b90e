// src/specs/mod.rs
//! # Page specs
//!
//! Pure HTML/JSON readers for the pages the crawlers visit. Each spec knows
//! *where the ground truth lives* on one page and how to pull it out with the
//! tolerant scanners in `core::html`; fetching, pacing and file output live in
//! `scrape`.
//!
//! ## Conventions
//! - No network and no file I/O here, so every spec can be tested offline
//!   against saved fixtures.
//! - Selectors are tried in a fixed precedence; later ones only run when the
//!   earlier ones produced nothing (documented per spec).
//! - Output shapes are the serialized shapes of the JSON files the CLI writes.
//!
//! ## Current specs
//! - `weekly` – contest list + problem pages on ac.nowcoder.com (weekly rounds).
//! - `clist` – clist.by problem listing filtered to the Nowcoder resource.
pub mod clist;
pub mod weekly;
