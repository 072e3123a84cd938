//! # Note Architecture
//!
//! Note is a small **personal note store**: free-text notes grouped into named
//! spaces, kept in an embedded SQLite database. The library does the work; the
//! `note` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, prompts, exit codes    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, applies configuration         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns `CmdResult`                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, query.rs, iterate.rs)               │
//! │  - DataStore trait, SqliteStore, query composer, paging     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Spaces
//!
//! Every note lives in exactly one space. Spaces whose name starts with `.`
//! are hidden from default listings; `.trash` is where soft-removed notes go.
//! Pinned notes always list as one group ahead of (ascending) or behind
//! (descending) the rest.
//!
//! ## No I/O in the core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never prompts and
//! never exits the process. Diagnostics go through `tracing`; the binary
//! decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage trait and the SQLite backend
//! - [`query`]: Filter/sort/page options and the SQL composer
//! - [`iterate`]: Page-at-a-time iteration over a selection
//! - [`codec`]: JSON/YAML records for import and export
//! - [`model`]: `Note`, ids and space rules
//! - [`config`]: Configuration and file locations
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod iterate;
pub mod model;
pub mod query;
pub mod store;
