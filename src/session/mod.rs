//! Session gate: the session marker, its stores, and route protection

mod form;
mod gate;
pub mod guard;
mod models;
pub mod store;

pub use form::{LoginForm, SubmitOutcome};
pub use gate::{Navigation, SessionGate};
pub use guard::{Decision, EdgeGuardPolicy, GuardPolicy, RenderGuardPolicy, Routes};
pub use models::{Session, SessionState};
pub use store::{CookieSessionStore, CookieSettings, MemorySessionStore, SessionStore};
