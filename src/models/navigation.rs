use serde::{Deserialize, Serialize};

use super::FilterSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Search,
    Results,
    Manage,
    Notifications,
    Login,
    Signup,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Search => "/",
            Route::Results => "/courses",
            Route::Manage => "/manage-courses",
            Route::Notifications => "/notifications",
            Route::Login => "/login",
            Route::Signup => "/signup",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        Some(match path {
            "" => Route::Search,
            "/courses" => Route::Results,
            "/manage-courses" => Route::Manage,
            "/notifications" => Route::Notifications,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            _ => return None,
        })
    }
}

/// Data handed to the destination page along with a navigation, read once
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub filters: FilterSet,
    #[serde(default)]
    pub subscribe: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub route: Route,
    pub state: Option<NavigationState>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self { route, state: None }
    }

    pub fn with_state(route: Route, state: NavigationState) -> Self {
        Self {
            route,
            state: Some(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Search,
            Route::Results,
            Route::Manage,
            Route::Notifications,
            Route::Login,
            Route::Signup,
        ] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/courses/?page=2"), Some(Route::Results));
        assert_eq!(Route::from_path("/admin"), None);
    }
}
