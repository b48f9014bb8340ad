//! HTTP server: router, shared state and edge enforcement

pub mod edge;
pub mod routes;
pub mod server;

pub use server::*;
