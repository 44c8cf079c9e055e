// ============================================================================
// ROUTER STATE - Current route, one-shot navigation state, guards
// ============================================================================

use super::auth_state::AuthState;
use super::store::{Reducer, Store};
use crate::models::{Navigation, NavigationState, Route};

#[derive(Debug, Clone, PartialEq)]
pub struct RouterState {
    pub route: Route,
    /// Consumed once by the destination page
    pub pending: Option<NavigationState>,
}

impl Default for RouterState {
    fn default() -> Self {
        Self {
            route: Route::Search,
            pending: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouterAction {
    Navigate(Navigation),
    ConsumeState,
}

impl Reducer for RouterState {
    type Action = RouterAction;

    fn reduce(mut self, action: RouterAction) -> Self {
        match action {
            RouterAction::Navigate(navigation) => {
                self.route = navigation.route;
                self.pending = navigation.state;
            }
            RouterAction::ConsumeState => self.pending = None,
        }
        self
    }
}

/// Where a navigation to `route` actually lands for the given session
pub fn guard(route: Route, auth: &AuthState) -> Route {
    let logged_in = auth.token.is_some();
    match route {
        Route::Login | Route::Signup if logged_in => Route::Search,
        Route::Notifications if !logged_in => Route::Login,
        Route::Manage if !logged_in => Route::Login,
        Route::Manage if !auth.user.as_ref().map(|u| u.is_admin()).unwrap_or(false) => Route::Search,
        other => other,
    }
}

pub type RouterStore = Store<RouterState>;

impl Store<RouterState> {
    /// Applies the guards, then navigates. A redirected navigation drops its state.
    pub fn navigate(&self, navigation: Navigation, auth: &AuthState) -> Route {
        let target = guard(navigation.route, auth);
        if target != navigation.route {
            log::info!("🔀 [ROUTER] {} redirected to {}", navigation.route.path(), target.path());
            self.dispatch(RouterAction::Navigate(Navigation::to(target)));
        } else {
            self.dispatch(RouterAction::Navigate(navigation));
        }
        target
    }

    pub fn take_state(&self) -> Option<NavigationState> {
        let pending = self.select(|state| state.pending.clone());
        if pending.is_some() {
            self.dispatch(RouterAction::ConsumeState);
        }
        pending
    }

    pub fn current(&self) -> Route {
        self.select(|state| state.route)
    }
}
