//! Client for the external REST backend

mod client;

pub use client::{BackendClient, LedgerSnapshot};
