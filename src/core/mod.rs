// src/core/mod.rs

pub mod csv;
pub mod html;
pub mod net;
pub mod sanitize;

pub use net::Http;
