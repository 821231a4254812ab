//! Content service for a community organization website: public pages backed
//! by SQLite and an admin area behind a per-tab session gate.

pub mod api;
pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod listing;
pub mod manager;
pub mod session;
