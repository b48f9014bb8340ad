//! Authentication models

use serde::{Deserialize, Serialize};
use std::fmt;

/// Acknowledgement shown after a password recovery request, whether or not
/// the address is known
pub const FORGOT_PASSWORD_ACK: &str =
    "Se este e-mail estiver cadastrado, você receberá instruções para redefinir sua senha.";

/// Login credentials as submitted by the login form
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// Username or e-mail
    #[serde(rename = "username")]
    pub identifier: String,
    #[serde(rename = "password")]
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"***")
            .finish()
    }
}

/// Body of the backend's login call
#[derive(Debug, Serialize)]
pub(crate) struct RemoteLoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for RemoteLoginBody<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: &credentials.identifier,
            password: &credentials.secret,
        }
    }
}

/// Password recovery form
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}
