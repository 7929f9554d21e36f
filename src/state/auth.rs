//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives the view selector: a signed-in user sees their record and a logout
//! control instead of the form.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<User>,
}

impl AuthState {
    pub fn sign_in(&mut self, user: User) {
        self.authenticated = true;
        self.user = (!user.is_null()).then_some(user);
    }

    pub fn sign_out(&mut self) {
        *self = Self::default();
    }
}
