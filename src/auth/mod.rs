//! Authentication: credentials and how they are checked

pub mod models;
pub mod validator;

pub use models::{Credentials, ForgotPasswordRequest, FORGOT_PASSWORD_ACK};
pub use validator::{AuthError, Authenticator, RemoteValidator};
