// ============================================================================
// AUTH STATE - Current session (token + user)
// ============================================================================

use super::store::{Reducer, Store};
use crate::models::User;

/// Token stored for cookie-based sessions; the real credential lives in the cookie.
pub const SESSION_TOKEN_SENTINEL: &str = "cookies";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
    /// Session bootstrap has completed (success or failure)
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    SetAuth { token: Option<String>, user: Option<User> },
    ClearAuth,
    SetChecked(bool),
}

impl Reducer for AuthState {
    type Action = AuthAction;

    fn reduce(self, action: AuthAction) -> Self {
        match action {
            AuthAction::SetAuth { token, user } => Self { token, user, ..self },
            AuthAction::ClearAuth => Self {
                token: None,
                user: None,
                ..self
            },
            AuthAction::SetChecked(checked) => Self { checked, ..self },
        }
    }
}

pub type AuthStore = Store<AuthState>;

impl Store<AuthState> {
    pub fn set_auth(&self, token: &str, user: Option<User>) {
        self.dispatch(AuthAction::SetAuth {
            token: Some(token.to_string()),
            user,
        });
    }

    pub fn clear_auth(&self) {
        self.dispatch(AuthAction::ClearAuth);
    }

    pub fn set_checked(&self, checked: bool) {
        self.dispatch(AuthAction::SetChecked(checked));
    }

    pub fn is_logged_in(&self) -> bool {
        self.select(|state| state.token.is_some())
    }

    pub fn current_user(&self) -> Option<User> {
        self.select(|state| state.user.clone())
    }

    pub fn is_admin(&self) -> bool {
        self.select(|state| state.user.as_ref().map(User::is_admin).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::student;

    #[test]
    fn set_auth_replaces_token_and_user() {
        let state = AuthState::default().reduce(AuthAction::SetAuth {
            token: Some(SESSION_TOKEN_SENTINEL.to_string()),
            user: Some(student()),
        });
        assert_eq!(state.token.as_deref(), Some("cookies"));
        assert_eq!(state.user.as_ref().map(|u| u.email.as_str()), Some("ana@uni.ca"));
        assert!(!state.checked);
    }

    #[test]
    fn clear_auth_keeps_checked_flag() {
        let state = AuthState::default()
            .reduce(AuthAction::SetChecked(true))
            .reduce(AuthAction::SetAuth {
                token: Some("t".to_string()),
                user: Some(student()),
            })
            .reduce(AuthAction::ClearAuth);
        assert_eq!(state, AuthState { token: None, user: None, checked: true });
    }

    #[test]
    fn store_helpers() {
        let store = AuthStore::default();
        assert!(!store.is_logged_in());
        store.set_auth(SESSION_TOKEN_SENTINEL, Some(crate::test_support::admin()));
        assert!(store.is_logged_in());
        assert!(store.is_admin());
        store.clear_auth();
        assert!(store.current_user().is_none());
    }
}
