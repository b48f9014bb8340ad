//! Web UI: server-rendered pages

mod handlers;
mod templates;

pub use handlers::*;
pub use templates::Templates;
