//! Auth REST client.
//!
//! Wraps `POST /auth/login`, `POST /auth/register` and `GET /auth/profile`
//! under the configured base URL, and owns the session's storage lifecycle.
//!
//! ERROR HANDLING
//! ==============
//! Every network operation returns `Result<_, AuthError>`. A rejected login
//! is an ordinary `Err` carrying the server's `message`, if it sent one.
//! Failures with no response use the operation's French fallback. A failed
//! exchange never leaves a partial session behind.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::middleware::{BearerAuth, JsonContentType, apply_all};
use super::transport::{ApiRequest, Transport};
use super::types::{AuthResponse, Credentials, ErrorBody, ProfileResponse, RegisterRequest, User};
use crate::error::AuthError;
use crate::session::{self, SessionStore};

pub const LOGIN_FALLBACK: &str = "Erreur de connexion";
pub const REGISTER_FALLBACK: &str = "Erreur d'inscription";
pub const PROFILE_FALLBACK: &str = "Erreur lors de la récupération du profil";

fn login_endpoint(base: &str) -> String {
    format!("{base}/auth/login")
}

fn register_endpoint(base: &str) -> String {
    format!("{base}/auth/register")
}

fn profile_endpoint(base: &str) -> String {
    format!("{base}/auth/profile")
}

/// Client for the auth resource, generic over storage and transport.
pub struct AuthClient<S, T> {
    base_url: String,
    store: S,
    transport: T,
}

#[cfg(feature = "csr")]
impl AuthClient<crate::session::store::LocalStorage, super::transport::GlooTransport> {
    /// Client backed by `localStorage` and `fetch`.
    pub fn browser(config: &crate::config::ClientConfig) -> Self {
        Self::new(
            config.api_base_url.clone(),
            crate::session::store::LocalStorage,
            super::transport::GlooTransport,
        )
    }
}

impl<S: SessionStore, T: Transport> AuthClient<S, T> {
    pub fn new(base_url: impl Into<String>, store: S, transport: T) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned(), store, transport }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exchange credentials for a session.
    ///
    /// When the response carries a token, token and user are persisted before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] for wrong credentials, or a transport,
    /// decode or storage error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        let credentials = Credentials { email: email.to_owned(), password: password.to_owned() };
        let body = serde_json::to_value(&credentials).map_err(|e| transport_error(&e, LOGIN_FALLBACK))?;
        log::debug!("login request for {email}");
        let resp: AuthResponse =
            self.send_json(ApiRequest::post(login_endpoint(&self.base_url), body), LOGIN_FALLBACK).await?;
        self.store_session(&resp, LOGIN_FALLBACK)?;
        Ok(resp)
    }

    /// Create an account; same persistence contract as [`Self::login`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`], with the registration fallback message.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        let body = serde_json::to_value(request).map_err(|e| transport_error(&e, REGISTER_FALLBACK))?;
        let resp: AuthResponse = self
            .send_json(ApiRequest::post(register_endpoint(&self.base_url), body), REGISTER_FALLBACK)
            .await?;
        self.store_session(&resp, REGISTER_FALLBACK)?;
        Ok(resp)
    }

    /// Fetch the signed-in user's profile. Relies on bearer-token injection.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] when the token is missing or refused.
    pub async fn get_profile(&self) -> Result<User, AuthError> {
        let resp: ProfileResponse =
            self.send_json(ApiRequest::get(profile_endpoint(&self.base_url)), PROFILE_FALLBACK).await?;
        Ok(resp.user)
    }

    /// Drop the stored session. Never fails.
    pub fn logout(&self) {
        session::clear(&self.store);
        log::info!("session cleared");
    }

    pub fn is_authenticated(&self) -> bool {
        session::token(&self.store).is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        session::user(&self.store)
    }

    fn store_session(&self, resp: &AuthResponse, fallback: &str) -> Result<(), AuthError> {
        let Some(token) = resp.token() else {
            log::warn!("auth response carried no token; session not persisted");
            return Ok(());
        };
        session::persist(&self.store, token, &resp.user)
            .map_err(|source| AuthError::Storage { source, fallback: fallback.to_owned() })
    }

    async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest, fallback: &str) -> Result<R, AuthError> {
        let bearer = BearerAuth::new(&self.store);
        let request = apply_all(request, &[&JsonContentType, &bearer]);
        let url = request.url.clone();

        let resp = self
            .transport
            .send(request)
            .await
            .map_err(|detail| AuthError::Transport { detail, fallback: fallback.to_owned() })?;

        if !resp.is_success() {
            log::warn!("{url} answered {}", resp.status);
            return Err(AuthError::Rejected { status: resp.status, message: rejection_message(&resp.body) });
        }

        serde_json::from_str(&resp.body)
            .map_err(|e| AuthError::Decode { detail: e.to_string(), fallback: fallback.to_owned() })
    }
}

fn rejection_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

fn transport_error(err: &serde_json::Error, fallback: &str) -> AuthError {
    AuthError::Transport { detail: err.to_string(), fallback: fallback.to_owned() }
}
