//! Gerencial - Session-gated financial management dashboard
//!
//! This is the library interface for Gerencial. The session gate, the guard
//! policies and the ledger aggregation can be used without the HTTP server.

pub mod api;
pub mod auth;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod session;
pub mod ui;

pub use config::Config;
pub use error::Error;
pub use session::{Decision, SessionGate};
