// ============================================================================
// COURSE TRACKER WEB - Data layer of the course catalog front-end
// ============================================================================
// - Models: shapes shared with the REST backend
// - Services: HTTP transport + client, no state
// - State: reducer stores over Rc<RefCell>, bundled in AppContext
// - Hooks: fetch resource (data / loading / error) and session bootstrap
// - ViewModels: page controllers (search, results, manage, notifications, auth)
// The view layer lives outside this crate and re-renders on
// `courseTracker:stateChanged`.
// ============================================================================

pub mod app;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
mod test_support;

pub use app::App;
pub use config::{AppConfig, CONFIG};
pub use error::ApiError;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::future::Future;
    use std::rc::Rc;

    use js_sys::Promise;
    use serde::Serialize;
    use serde_wasm_bindgen::Serializer;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::{future_to_promise, spawn_local};
    use wasm_logger::Config;

    use crate::app::{errors_json, App};
    use crate::config::CONFIG;
    use crate::models::{LookupId, Navigation, Route, UploadFile};
    use crate::services::GlooTransport;
    use crate::utils::STATE_CHANGED_EVENT;
    use crate::viewmodels::{CourseField, LoginForm, ManageTab, SignupForm, SubmitError};

    // Single App instance for the JS-callable exports
    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(Config::new(CONFIG.log_level()));
        log::info!("🚀 Course Tracker ({}) -> {}", CONFIG.environment, CONFIG.backend_url());

        let app = App::new(Rc::new(GlooTransport::new(CONFIG.backend_url())), (*CONFIG).clone());
        app.ctx.subscribe_to_changes(emit_state_changed);

        let initial = current_path()
            .and_then(|path| Route::from_path(&path))
            .unwrap_or(Route::Search);

        APP.with(|cell| *cell.borrow_mut() = Some(app.clone()));

        spawn_local(async move {
            if let Err(e) = app.start(Navigation::to(initial)).await {
                log::error!("❌ [APP] Start failed: {}", e);
            }
        });
        Ok(())
    }

    fn current_path() -> Option<String> {
        web_sys::window()?.location().pathname().ok()
    }

    fn emit_state_changed() {
        let Some(window) = web_sys::window() else {
            return;
        };
        match web_sys::CustomEvent::new(STATE_CHANGED_EVENT) {
            Ok(event) => {
                let _ = window.dispatch_event(&event);
            }
            Err(e) => log::error!("❌ [APP] Could not build {}: {:?}", STATE_CHANGED_EVENT, e),
        }
    }

    fn with_app<R>(f: impl FnOnce(&App) -> R) -> Option<R> {
        APP.with(|cell| cell.borrow().as_ref().map(f))
    }

    fn app() -> Option<App> {
        with_app(App::clone)
    }

    /// Runs a page operation on the event loop; failures already raised a notice
    fn run<F>(label: &'static str, pending: F)
    where
        F: Future<Output = Result<(), String>> + 'static,
    {
        spawn_local(async move {
            if let Err(e) = pending.await {
                log::warn!("⚠️ [APP] {} failed: {}", label, e);
            }
        });
    }

    /// Mounts the page the router landed on and returns its path
    fn show(app: App, route: Route) -> String {
        let path = route.path().to_string();
        run("mount", async move { app.mount(route).await });
        path
    }

    /// Form submit as a Promise: resolves on success, rejects with the inline
    /// errors object or the failure message
    fn submit<F>(pending: F) -> Promise
    where
        F: Future<Output = Result<(), SubmitError>> + 'static,
    {
        future_to_promise(async move {
            match pending.await {
                Ok(()) => Ok(JsValue::UNDEFINED),
                Err(SubmitError::Invalid(errors)) => Err(to_js(&errors_json(&errors))),
                Err(SubmitError::Failed(message)) => Err(JsValue::from_str(&message)),
            }
        })
    }

    fn to_js<T: Serialize>(value: &T) -> JsValue {
        value
            .serialize(&Serializer::json_compatible())
            .unwrap_or(JsValue::NULL)
    }

    fn rejected(message: &str) -> Promise {
        Promise::reject(&JsValue::from_str(message))
    }

    /// Navigates to `path` (guards applied) and mounts the resulting page.
    /// Returns the path actually shown.
    #[wasm_bindgen]
    pub fn navigate(path: &str) -> Option<String> {
        let route = Route::from_path(path)?;
        let app = app()?;
        let landed = app.navigate(Navigation::to(route));
        Some(show(app, landed))
    }

    /// Everything the view renders, as a plain JS object
    #[wasm_bindgen]
    pub fn app_state() -> JsValue {
        with_app(|app| to_js(&app.snapshot())).unwrap_or(JsValue::NULL)
    }

    // ========================================================================
    // SEARCH / RESULTS
    // ========================================================================

    #[wasm_bindgen]
    pub fn set_filter(name: String, value: String) {
        if let Some(app) = app() {
            run("set_filter", app.set_filter(&name, &value));
        }
    }

    #[wasm_bindgen]
    pub fn search_courses() -> Option<String> {
        let app = app()?;
        let route = app.search.search();
        Some(show(app, route))
    }

    /// Search, then subscribe to the same filters once the results are in
    #[wasm_bindgen]
    pub fn search_and_subscribe() -> Option<String> {
        let app = app()?;
        let route = app.search.subscribe();
        Some(show(app, route))
    }

    #[wasm_bindgen]
    pub fn load_more() -> bool {
        match app().and_then(|app| app.results.load_more()) {
            Some(pending) => {
                run("load_more", pending);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn subscribe_to_results() {
        if let Some(app) = app() {
            run("subscribe", async move { app.results.subscribe().await });
        }
    }

    // ========================================================================
    // MANAGE
    // ========================================================================

    #[wasm_bindgen]
    pub fn select_manage_tab(tab: &str) -> bool {
        match (app(), ManageTab::from_name(tab)) {
            (Some(app), Some(tab)) => {
                app.manage.select_tab(tab);
                true
            }
            _ => false,
        }
    }

    #[wasm_bindgen]
    pub fn set_course_field(name: &str, value: &str) -> bool {
        let (Some(app), Some(field)) = (app(), CourseField::from_name(name)) else {
            return false;
        };
        if let Some(pending) = app.manage.set_field(field, value) {
            run("specializations", pending);
        }
        true
    }

    #[wasm_bindgen]
    pub fn add_course() -> Promise {
        match app() {
            Some(app) => submit(async move { app.manage.add_course().await }),
            None => rejected("App not started"),
        }
    }

    /// Returns the rejection message for unsupported files
    #[wasm_bindgen]
    pub fn select_upload_file(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Option<String> {
        let app = app()?;
        app.manage
            .select_file(UploadFile::new(file_name, mime_type, bytes))
            .err()
    }

    #[wasm_bindgen]
    pub fn submit_upload() -> Promise {
        match app() {
            Some(app) => submit(async move { app.manage.submit_upload().await }),
            None => rejected("App not started"),
        }
    }

    // ========================================================================
    // NOTIFICATIONS
    // ========================================================================

    #[wasm_bindgen]
    pub fn mark_notification_read(id: &str) {
        let (Some(app), Some(id)) = (app(), LookupId::parse(id)) else {
            return;
        };
        run("mark_read", async move { app.notifications.mark_read(&id).await });
    }

    #[wasm_bindgen]
    pub fn view_notification(id: &str) -> bool {
        let (Some(app), Some(id)) = (app(), LookupId::parse(id)) else {
            return false;
        };
        match app.notifications.find(&id) {
            Some(notification) => {
                app.notifications.view(notification);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn close_notification() {
        with_app(|app| app.notifications.close());
    }

    #[wasm_bindgen]
    pub fn dismiss_notice(id: &str) {
        with_app(|app| app.ctx.notices.dismiss(id));
    }

    // ========================================================================
    // AUTH
    // ========================================================================

    #[wasm_bindgen]
    pub fn login(email: String, password: String) -> Promise {
        let Some(app) = app() else {
            return rejected("App not started");
        };
        let form = LoginForm { email, password };
        submit(async move {
            app.auth.login(&form).await?;
            show(app.clone(), app.ctx.router.current());
            Ok::<(), SubmitError>(())
        })
    }

    #[wasm_bindgen]
    pub fn signup(
        firstname: String,
        lastname: String,
        email: String,
        password: String,
        confirm_password: String,
    ) -> Promise {
        let Some(app) = app() else {
            return rejected("App not started");
        };
        let form = SignupForm {
            firstname,
            lastname,
            email,
            password,
            confirm_password,
        };
        submit(async move {
            app.auth.signup(&form).await?;
            show(app.clone(), app.ctx.router.current());
            Ok::<(), SubmitError>(())
        })
    }

    #[wasm_bindgen]
    pub fn current_route() -> Option<String> {
        with_app(|app| app.ctx.router.current().path().to_string())
    }

    #[wasm_bindgen]
    pub fn is_logged_in() -> bool {
        with_app(|app| app.ctx.auth.is_logged_in()).unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn logout() -> Option<String> {
        let app = app()?;
        let route = app.logout();
        Some(show(app, route))
    }

    #[wasm_bindgen]
    pub fn unread_notifications() -> usize {
        with_app(App::unread_count).unwrap_or(0)
    }
}
