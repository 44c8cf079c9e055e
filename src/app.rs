// ============================================================================
// APP - Wires the stores, the session bootstrap and the page viewmodels
// ============================================================================

use std::rc::Rc;

use serde_json::{json, Map, Value};

use crate::config::AppConfig;
use crate::hooks::{use_auth_check, SessionBootstrap};
use crate::models::{FilterPatch, Navigation, Notification, Route, User};
use crate::services::{HttpTransport, LocalFuture};
use crate::state::AppContext;
use crate::utils::FieldErrors;
use crate::viewmodels::{
    AuthViewModel, LookupsViewModel, ManageViewModel, NotificationsViewModel, ResultsViewModel,
    SearchViewModel,
};

#[derive(Clone)]
pub struct App {
    pub ctx: AppContext,
    pub bootstrap: SessionBootstrap,
    pub search: SearchViewModel,
    pub results: ResultsViewModel,
    pub manage: ManageViewModel,
    pub notifications: NotificationsViewModel,
    pub auth: AuthViewModel,
}

impl App {
    pub fn new(transport: Rc<dyn HttpTransport>, config: AppConfig) -> Self {
        let ctx = AppContext::new(transport, config);
        let lookups = LookupsViewModel::new(&ctx);

        let app = Self {
            bootstrap: use_auth_check(&ctx),
            search: SearchViewModel::new(&ctx, lookups.clone()),
            results: ResultsViewModel::new(&ctx, lookups.clone()),
            manage: ManageViewModel::new(&ctx, lookups),
            notifications: NotificationsViewModel::new(&ctx),
            auth: AuthViewModel::new(&ctx),
            ctx,
        };

        #[cfg(target_arch = "wasm32")]
        app.persist_filters();

        app
    }

    /// Session check first, so the guards of `initial` see the real session
    pub async fn start(&self, initial: Navigation) -> Result<Route, String> {
        self.bootstrap.run().await;
        self.open(initial).await
    }

    /// Navigates through the route guards, then mounts the page it landed on
    pub async fn open(&self, navigation: Navigation) -> Result<Route, String> {
        let route = self.navigate(navigation);
        self.mount(route).await?;
        Ok(route)
    }

    pub fn navigate(&self, navigation: Navigation) -> Route {
        self.ctx.router.navigate(navigation, &self.ctx.auth.get())
    }

    pub async fn mount(&self, route: Route) -> Result<(), String> {
        log::info!("📄 [APP] Mounting {}", route.path());
        match route {
            Route::Search => self.search.mount().await,
            Route::Results => self.results.mount().await,
            Route::Manage => self.manage.mount().await,
            Route::Notifications => self.notifications.load().await.map(|_| ()),
            Route::Login | Route::Signup => Ok(()),
        }
    }

    pub fn logout(&self) -> Route {
        self.auth.logout()
    }

    /// Header badge
    pub fn unread_count(&self) -> usize {
        self.notifications.unread_count()
    }

    /// Dropdown change, keyed by filter name. The Results page refetches from
    /// page 1; the Search page only stores it (and loads specializations).
    pub fn set_filter(&self, name: &str, raw: &str) -> LocalFuture<Result<(), String>> {
        let Some(patch) = FilterPatch::from_input(name, raw) else {
            log::warn!("⚠️ [APP] Unknown filter {}", name);
            return Box::pin(std::future::ready(Err(format!("Unknown filter {}", name))));
        };
        if self.ctx.router.current() == Route::Results {
            return self.results.apply(patch);
        }
        match patch.field_id.clone() {
            Some(field_id) => self.search.select_field(field_id),
            None => {
                self.search.update_filters(patch);
                Box::pin(std::future::ready(Ok(())))
            }
        }
    }

    /// Read model handed to the view layer on every re-render
    pub fn snapshot(&self) -> Value {
        json!({
            "route": self.ctx.router.current().path(),
            "session": self.session_json(),
            "filters": self.ctx.filters.get(),
            "lookups": self.lookups_json(),
            "results": self.results_json(),
            "manage": self.manage_json(),
            "notifications": self.notifications_json(),
            "notices": self.notices_json(),
            "authSubmitting": self.auth.submitting(),
        })
    }

    fn session_json(&self) -> Value {
        let auth = self.ctx.auth.get();
        let display_name = auth.user.as_ref().map(User::display_name);
        json!({
            "checked": auth.checked,
            "loggedIn": auth.token.is_some(),
            "isAdmin": self.ctx.auth.is_admin(),
            "displayName": display_name,
            "user": auth.user,
        })
    }

    fn lookups_json(&self) -> Value {
        let lookups = self.search.lookups();
        json!({
            "universities": lookups.universities(),
            "fields": lookups.fields(),
            "specializations": self.search.visible_specializations(),
            "loading": lookups.is_loading(),
        })
    }

    fn results_json(&self) -> Value {
        let state = self.results.state.get();
        json!({
            "hasMore": state.has_more(),
            "filters": state.filters,
            "courses": state.courses,
            "page": state.page,
            "pages": state.pages,
            "specializations": self.results.visible_specializations(),
            "loading": self.results.loading(),
            "error": self.results.error(),
        })
    }

    fn manage_json(&self) -> Value {
        let state = self.manage.state.get();
        let form = state.form;
        json!({
            "tab": state.tab.name(),
            "form": {
                "name": form.name,
                "universityId": form.university_id,
                "fieldId": form.field_id,
                "specializationId": form.specialization_id,
                "level": form.level,
                "duration": form.duration,
                "link": form.link,
            },
            "errors": errors_json(&state.errors),
            "fileName": state.selected_file.map(|file| file.file_name),
            "fileError": state.file_error,
            "specializations": self.manage.visible_specializations(),
            "canSubmit": self.manage.can_submit(),
            "submitting": self.manage.submitting(),
        })
    }

    fn notifications_json(&self) -> Value {
        let items: Vec<Value> = self.notifications.notifications().iter().map(notification_json).collect();
        json!({
            "items": items,
            "unread": self.notifications.unread_count(),
            "selected": self.notifications.selected.get().as_ref().map(notification_json),
            "loading": self.notifications.loading(),
        })
    }

    fn notices_json(&self) -> Value {
        self.ctx.notices.select(|state| {
            state
                .items
                .iter()
                .map(|notice| {
                    json!({
                        "id": notice.id,
                        "kind": notice.kind.as_str(),
                        "message": notice.message,
                    })
                })
                .collect()
        })
    }

    #[cfg(target_arch = "wasm32")]
    fn persist_filters(&self) {
        use crate::models::FilterPatch;
        use crate::utils::storage::{load_filters, save_filters};

        if !self.ctx.config.persist_filters {
            return;
        }
        if let Some(saved) = load_filters() {
            self.ctx.filters.set_filters(FilterPatch::replace_with(&saved));
        }
        let filters = self.ctx.filters.clone();
        self.ctx.filters.subscribe(move || save_filters(&filters.get()));
    }
}

pub(crate) fn errors_json(errors: &FieldErrors) -> Value {
    let map: Map<String, Value> = errors
        .iter()
        .map(|(field, message)| (field.to_string(), Value::from(message)))
        .collect();
    Value::Object(map)
}

fn notification_json(notification: &Notification) -> Value {
    json!({
        "id": notification.id,
        "message": notification.message,
        "preview": notification.preview(),
        "isNew": notification.is_new(),
        "createdAt": notification.created_at,
    })
}
