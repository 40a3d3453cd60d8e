//! Terminal mood journal: a reducer-driven store of short diary entries with
//! derived mood statistics, seeded once from a public sample feed.

pub mod config;
pub mod diary_entry;
pub mod diary_state;
pub mod dispatch;
pub mod id_allocator;
pub mod logging;
pub mod seed;
pub mod stats;
pub mod store;
pub mod ui;
