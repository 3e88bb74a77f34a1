//! ARPK Portal library.
//!
//! The marketing site and the client/admin request workflow, exposed as a
//! library so the binary, the CLI and the tests share one set of modules.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
