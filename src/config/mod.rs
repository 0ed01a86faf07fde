// src/config/mod.rs
//! Configuration system for pass-export
//!
//! Optional TOML file with built-in defaults; CLI flags override it.

pub use app::{expand_home, load, Config, Gpg, Output, Store};

mod app;
mod defaults;
