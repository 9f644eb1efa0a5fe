//! Shopping list HTTP API.
//!
//! A JSON-over-HTTP service for collaborative shopping lists: owners create
//! lists, invite members and everyone on a list edits its items.
//!
//! # Architecture
//!
//! - Axum router with a header-based authorization gate and per-route role
//!   filter ([`middleware`])
//! - Handlers validate a loosely typed [`dto::DtoIn`] field by field and
//!   answer with fixed response projections ([`dto::output`])
//! - Lists are whole documents behind the [`db::ListStore`] trait, backed by
//!   `PostgreSQL` in production and an in-memory map in tests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::app;
pub use state::AppState;
