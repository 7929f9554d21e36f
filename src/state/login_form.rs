//! Login form controller.
//!
//! Owns field values, per-field validation errors, the submission lifecycle
//! and the error banner. The page component forwards DOM events here and
//! renders whatever this state says; nothing in this module touches the DOM.
//!
//! LIFECYCLE
//! =========
//! `Idle` -> `Submitting` only through [`LoginForm::begin_submit`] with valid
//! input. [`LoginForm::finish_submit`] always returns to `Idle`, success or
//! failure. Invalid input never leaves `Idle` and never reaches the network.

#[cfg(test)]
#[path = "login_form_test.rs"]
mod login_form_test;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::auth::AuthState;
use crate::error::AuthError;
use crate::net::api::AuthClient;
use crate::net::transport::Transport;
use crate::net::types::{AuthResponse, Credentials};
use crate::session::SessionStore;
use crate::util::redirect::redirect_url;

pub const EMAIL_REQUIRED: &str = "Email requis";
pub const EMAIL_INVALID: &str = "Email invalide";
pub const PASSWORD_REQUIRED: &str = "Mot de passe requis";
pub const PASSWORD_TOO_SHORT: &str = "Le mot de passe doit contenir au moins 6 caractères";
pub const DEFAULT_BANNER: &str = "Identifiants incorrects. Veuillez réessayer.";
pub const FORGOT_PASSWORD_NOTICE: &str = "La récupération du mot de passe n'est pas encore disponible.";

pub const MIN_PASSWORD_CHARS: usize = 6;

// Coarse shape check, not RFC 5322.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("static regex"));

/// Form inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "email" => Some(Self::Email),
            "password" => Some(Self::Password),
            _ => None,
        }
    }
}

/// Field values, empty at mount.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub email: String,
    pub password: String,
}

impl FormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }
}

/// Field -> human-readable message. Empty means valid.
pub type FieldErrors = BTreeMap<Field, String>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
}

/// Which top-level view the page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Form,
    Authenticated,
}

/// Result of a submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are on the form.
    Invalid,
    /// A submission is already in flight.
    Busy,
    /// Signed in with a token; the browser should go here.
    Redirect(String),
    /// Signed in without a token; stay and show the user.
    Authenticated,
    /// The server or network refused; banner is set.
    Failed,
}

/// Validate both fields independently.
pub fn validate(form: &FormState) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.email.is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED.to_owned());
    } else if !EMAIL_SHAPE.is_match(&form.email) {
        errors.insert(Field::Email, EMAIL_INVALID.to_owned());
    }

    if form.password.is_empty() {
        errors.insert(Field::Password, PASSWORD_REQUIRED.to_owned());
    } else if form.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.insert(Field::Password, PASSWORD_TOO_SHORT.to_owned());
    }

    errors
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub fields: FormState,
    pub errors: FieldErrors,
    pub submission: SubmissionState,
    pub show_error: bool,
    pub error_message: Option<String>,
    pub notice: Option<String>,
    pub auth: AuthState,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a keystroke, clear that field's error and hide the banner.
    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.slot(field) = value.into();
        self.errors.remove(&field);
        self.show_error = false;
    }

    pub fn validate(&self) -> FieldErrors {
        validate(&self.fields)
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    /// Validate and, if clean, enter `Submitting`.
    ///
    /// # Errors
    ///
    /// [`SubmitOutcome::Invalid`] with errors stored on the form, or
    /// [`SubmitOutcome::Busy`] if a submission is already in flight. Neither
    /// changes the submission state.
    pub fn begin_submit(&mut self) -> Result<Credentials, SubmitOutcome> {
        if self.is_submitting() {
            return Err(SubmitOutcome::Busy);
        }
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return Err(SubmitOutcome::Invalid);
        }

        self.errors.clear();
        self.submission = SubmissionState::Submitting;
        self.show_error = false;
        self.error_message = None;
        Ok(Credentials { email: self.fields.email.clone(), password: self.fields.password.clone() })
    }

    /// Apply the login result and return to `Idle`.
    pub fn finish_submit(&mut self, result: Result<AuthResponse, AuthError>, redirect_base: &str) -> SubmitOutcome {
        let outcome = match result {
            Ok(resp) => {
                let redirect = resp.token().map(|token| redirect_url(redirect_base, token, &resp.user));
                self.auth.sign_in(resp.user);
                match redirect {
                    Some(url) => SubmitOutcome::Redirect(url),
                    None => SubmitOutcome::Authenticated,
                }
            }
            Err(err) => {
                log::warn!("login failed: {err}");
                let message = err.user_message().map(str::trim).filter(|m| !m.is_empty());
                self.show_error = true;
                self.error_message = Some(message.unwrap_or(DEFAULT_BANNER).to_owned());
                SubmitOutcome::Failed
            }
        };
        self.submission = SubmissionState::Idle;
        outcome
    }

    /// Banner text, when the banner is visible.
    pub fn banner(&self) -> Option<&str> {
        self.show_error
            .then(|| self.error_message.as_deref().unwrap_or(DEFAULT_BANNER))
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Password recovery is not implemented; tell the user so.
    pub fn on_forgot_password(&mut self) {
        log::debug!("password recovery requested for {}", self.fields.email);
        self.notice = Some(FORGOT_PASSWORD_NOTICE.to_owned());
    }

    /// Drop the session and return to an empty form.
    pub fn on_logout<S: SessionStore, T: Transport>(&mut self, client: &AuthClient<S, T>) {
        client.logout();
        self.auth.sign_out();
        self.fields = FormState::default();
    }

    pub fn screen(&self) -> Screen {
        if self.auth.authenticated { Screen::Authenticated } else { Screen::Form }
    }
}

/// The network half of a submission: exchange validated credentials.
///
/// Shared by [`submit`] and the login page, which cannot hold `&mut LoginForm`
/// across the await and so runs `begin_submit` / `exchange` / `finish_submit`
/// as separate signal updates.
pub async fn exchange<S: SessionStore, T: Transport>(
    client: &AuthClient<S, T>,
    credentials: &Credentials,
) -> Result<AuthResponse, AuthError> {
    client.login(&credentials.email, &credentials.password).await
}

/// Run a full submission against `client`.
pub async fn submit<S: SessionStore, T: Transport>(
    form: &mut LoginForm,
    client: &AuthClient<S, T>,
    redirect_base: &str,
) -> SubmitOutcome {
    let credentials = match form.begin_submit() {
        Ok(credentials) => credentials,
        Err(outcome) => return outcome,
    };
    let result = exchange(client, &credentials).await;
    form.finish_submit(result, redirect_base)
}
