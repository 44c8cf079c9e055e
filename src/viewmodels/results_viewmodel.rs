// ============================================================================
// RESULTS VIEWMODEL - Paginated course search + subscription
// ============================================================================
// Page 1 replaces the list, later pages append. Any filter change goes back
// to page 1. Filters come from the navigation state when present, otherwise
// from the shared filter store.
// ============================================================================

use super::LookupsViewModel;
use crate::hooks::{use_fetch, FetchOutcome, UseFetchHandle};
use crate::models::{Ack, Course, FilterPatch, FilterSet, LookupId, LookupItem, PagedEnvelope, SubscriptionRequest};
use crate::services::{endpoints, LocalFuture};
use crate::state::{AppContext, ReactiveState};

pub const LOGIN_TO_SUBSCRIBE: &str = "Please log in to subscribe to updates";
pub const SUBSCRIPTION_SAVED: &str = "Subscription updated for these filters.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsState {
    pub filters: FilterSet,
    pub courses: Vec<Course>,
    /// Last page merged into `courses` (0 before the first load)
    pub page: u32,
    pub pages: u32,
    /// Subscribe once the first page is in
    pub subscribe_pending: bool,
}

impl ResultsState {
    pub fn has_more(&self) -> bool {
        self.page < self.pages
    }
}

#[derive(Clone)]
pub struct ResultsViewModel {
    ctx: AppContext,
    lookups: LookupsViewModel,
    search: UseFetchHandle<PagedEnvelope<Course>>,
    subscription: UseFetchHandle<Ack>,
    pub state: ReactiveState<ResultsState>,
}

impl ResultsViewModel {
    pub fn new(ctx: &AppContext, lookups: LookupsViewModel) -> Self {
        let state = ReactiveState::<ResultsState>::default();
        ctx.watch(&state);
        Self {
            ctx: ctx.clone(),
            lookups,
            search: use_fetch(ctx, endpoints::COURSE_SEARCH, false),
            subscription: use_fetch(ctx, endpoints::SUBSCRIPTION, false),
            state,
        }
    }

    /// Seeds the filters, loads page 1, then runs a requested subscription
    pub async fn mount(&self) -> Result<(), String> {
        let seeded = self.ctx.router.take_state();
        let (filters, subscribe) = match seeded {
            Some(navigation) => (navigation.filters, navigation.subscribe),
            None => (self.ctx.filters.get(), false),
        };
        self.state.set(ResultsState {
            filters: filters.clone(),
            subscribe_pending: subscribe,
            ..ResultsState::default()
        });

        let catalog = self.lookups.ensure_catalog();
        let specializations = filters
            .field_id
            .as_ref()
            .map(|field_id| self.lookups.ensure_specializations(field_id));
        let first_page = self.fetch_page(1);

        // Lookup failures only affect the filter dropdowns
        let _ = catalog.await;
        if let Some(pending) = specializations {
            let _ = pending.await;
        }
        first_page.await?;

        let pending = self.state.with(|state| state.subscribe_pending);
        if pending {
            self.state.update(|state| state.subscribe_pending = false);
            self.subscribe().await?;
        }
        Ok(())
    }

    /// Requests `page` of the active filters. Starts the request immediately.
    pub fn fetch_page(&self, page: u32) -> LocalFuture<Result<(), String>> {
        let filters = self.state.with(|state| state.filters.clone());
        let mut query = filters.to_query();
        query.push(("page".to_string(), page.to_string()));
        query.push(("limit".to_string(), self.ctx.config.results_page_size.to_string()));

        let pending = self.search.fetch_data(None, Some(query));
        let state = self.state.clone();
        let notices = self.ctx.notices.clone();

        Box::pin(async move {
            match pending.await {
                FetchOutcome::Data(body) => {
                    log::info!("📄 [RESULTS] Page {}/{}: {} courses", page, body.pages, body.data.len());
                    state.update(|state| {
                        if page <= 1 {
                            state.courses = body.data;
                        } else {
                            state.courses.extend(body.data);
                        }
                        state.page = page;
                        state.pages = body.pages;
                    });
                    Ok(())
                }
                FetchOutcome::Error(message) => {
                    notices.error(&message);
                    Err(message)
                }
                FetchOutcome::Superseded => Ok(()),
            }
        })
    }

    /// Next page, if there is one
    pub fn load_more(&self) -> Option<LocalFuture<Result<(), String>>> {
        let (has_more, page) = self.state.with(|state| (state.has_more(), state.page));
        has_more.then(|| self.fetch_page(page + 1))
    }

    /// Merges `patch` into the working filters, writes it through to the filter
    /// store and reloads from page 1
    pub fn apply(&self, patch: FilterPatch) -> LocalFuture<Result<(), String>> {
        let field = patch.field_id.clone().flatten();
        self.state.update(|state| {
            patch.apply_to(&mut state.filters);
            state.page = 0;
            state.pages = 0;
        });
        self.ctx.filters.set_filters(patch);

        let specializations = field.map(|field_id| self.lookups.ensure_specializations(&field_id));
        let first_page = self.fetch_page(1);
        Box::pin(async move {
            if let Some(pending) = specializations {
                let _ = pending.await;
            }
            first_page.await
        })
    }

    pub fn select_field(&self, field_id: Option<LookupId>) -> LocalFuture<Result<(), String>> {
        self.apply(FilterPatch::default().select_field(field_id))
    }

    /// Posts the null-normalized filters with the user's email. Needs a session.
    pub async fn subscribe(&self) -> Result<(), String> {
        let Some(user) = self.ctx.auth.current_user() else {
            log::warn!("🔒 [RESULTS] Subscribe without a session");
            self.ctx.notices.error(LOGIN_TO_SUBSCRIBE);
            return Err(LOGIN_TO_SUBSCRIBE.to_string());
        };

        let filters = self.state.with(|state| state.filters.clone());
        let body = SubscriptionRequest::new(&filters, &user.email);
        match self.subscription.fetch_json(&body, None).await {
            FetchOutcome::Data(_) => {
                log::info!("🔔 [RESULTS] Subscribed {}", user.email);
                self.ctx.notices.success(SUBSCRIPTION_SAVED);
                Ok(())
            }
            FetchOutcome::Error(message) => {
                self.ctx.notices.error(&message);
                Err(message)
            }
            FetchOutcome::Superseded => Ok(()),
        }
    }

    pub fn courses(&self) -> Vec<Course> {
        self.state.with(|state| state.courses.clone())
    }

    pub fn filters(&self) -> FilterSet {
        self.state.with(|state| state.filters.clone())
    }

    pub fn visible_specializations(&self) -> Vec<LookupItem> {
        let field_id = self.state.with(|state| state.filters.field_id.clone());
        self.lookups.visible_specializations(field_id.as_ref())
    }

    pub fn loading(&self) -> bool {
        self.search.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.search.error()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::models::{Navigation, NavigationState, Route};
    use crate::state::SESSION_TOKEN_SENTINEL;
    use crate::test_support::{context, ok_json, student, MockTransport};

    fn page(ids: &[i64], pages: u32) -> String {
        let courses: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"id":{},"name":"Course {}","level":"Masters"}}"#, id, id))
            .collect();
        format!(r#"{{"data":[{}],"pages":{}}}"#, courses.join(","), pages)
    }

    fn setup() -> (MockTransport, AppContext, ResultsViewModel) {
        let transport = MockTransport::new();
        transport.always_json("/universities", 200, r#"{"data":[{"id":1,"name":"Algoma University"}]}"#);
        transport.always_json("/fields", 200, r#"{"data":[{"id":2,"name":"Business & Management"}]}"#);
        transport.always_json("/specializations", 200, r#"{"data":[]}"#);
        let ctx = context(&transport);
        let vm = ResultsViewModel::new(&ctx, LookupsViewModel::new(&ctx));
        (transport, ctx, vm)
    }

    fn navigate_with(ctx: &AppContext, filters: FilterSet, subscribe: bool) {
        ctx.router.navigate(
            Navigation::with_state(Route::Results, NavigationState { filters, subscribe }),
            &ctx.auth.get(),
        );
    }

    #[tokio::test]
    async fn load_more_appends_pages() {
        let (transport, ctx, vm) = setup();
        transport.reply_json("/universities/search", 200, &page(&[1, 2, 3], 2));
        transport.reply_json("/universities/search", 200, &page(&[4, 5], 2));
        let masters = FilterSet {
            level: Some("Masters".to_string()),
            ..FilterSet::default()
        };
        navigate_with(&ctx, masters, false);

        vm.mount().await.unwrap();
        assert_eq!(vm.courses().len(), 3);
        vm.load_more().unwrap().await.unwrap();

        assert_eq!(vm.courses().len(), 5);
        assert!(vm.load_more().is_none());
        let sent = transport.requests_to("/universities/search");
        assert_eq!(sent[1].query_value("level"), Some("Masters"));
        assert_eq!(sent[1].query_value("page"), Some("2"));
        assert_eq!(sent[1].query_value("limit"), Some("10"));
    }

    #[tokio::test]
    async fn load_more_notifies_the_view() {
        let (transport, ctx, vm) = setup();
        transport.reply_json("/universities/search", 200, &page(&[1], 2));
        transport.reply_json("/universities/search", 200, &page(&[2], 2));
        vm.mount().await.unwrap();

        let changes = Rc::new(Cell::new(0));
        let sink = changes.clone();
        ctx.subscribe_to_changes(move || sink.set(sink.get() + 1));
        vm.load_more().unwrap().await.unwrap();

        assert_eq!(vm.courses().len(), 2);
        // loading on, loading off, pages merged
        assert!(changes.get() >= 3);
    }

    #[tokio::test]
    async fn null_page_is_an_empty_result() {
        let (transport, ctx, vm) = setup();
        transport.reply_json("/universities/search", 200, r#"{"data":null,"pages":0}"#);

        vm.mount().await.unwrap();

        assert!(vm.courses().is_empty());
        assert_eq!(vm.error(), None);
        assert!(!vm.state.get().has_more());
        assert_eq!(ctx.notices.last(), None);
    }

    #[tokio::test]
    async fn seeds_from_store_without_navigation_state() {
        let (transport, ctx, vm) = setup();
        transport.reply_json("/universities/search", 200, &page(&[1], 1));
        ctx.filters
            .set_filters(FilterPatch::default().university(Some(LookupId::Numeric(1))));

        vm.mount().await.unwrap();

        assert_eq!(vm.filters().university_id, Some(LookupId::Numeric(1)));
        let sent = transport.requests_to("/universities/search");
        assert_eq!(sent[0].query_value("universityId"), Some("1"));
    }

    #[tokio::test]
    async fn filter_change_resets_to_page_one() {
        let (transport, ctx, vm) = setup();
        transport.reply_json("/universities/search", 200, &page(&[1, 2], 3));
        transport.reply_json("/universities/search", 200, &page(&[3, 4], 3));
        transport.reply_json("/universities/search", 200, &page(&[9], 1));
        vm.mount().await.unwrap();
        vm.load_more().unwrap().await.unwrap();
        assert_eq!(vm.state.get().page, 2);

        vm.apply(FilterPatch::default().university(Some(LookupId::Numeric(7))))
            .await
            .unwrap();

        let state = vm.state.get();
        assert_eq!(state.page, 1);
        assert_eq!(state.courses.len(), 1);
        assert_eq!(ctx.filters.get().university_id, Some(LookupId::Numeric(7)));
        let sent = transport.requests_to("/universities/search");
        assert_eq!(sent[2].query_value("page"), Some("1"));
    }

    #[tokio::test]
    async fn older_page_reply_is_ignored_after_filter_change() {
        let (transport, _ctx, vm) = setup();
        let slow = transport.defer("/universities/search");
        transport.reply_json("/universities/search", 200, &page(&[42], 1));

        let stale = vm.fetch_page(1);
        vm.apply(FilterPatch::default().level(Some("Bachelors")))
            .await
            .unwrap();
        slow.send(ok_json(&page(&[1, 2, 3], 1))).unwrap();
        stale.await.unwrap();

        let ids: Vec<LookupId> = vm.courses().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![LookupId::Numeric(42)]);
    }

    #[tokio::test]
    async fn subscribe_requires_a_session() {
        let (transport, ctx, vm) = setup();

        assert_eq!(vm.subscribe().await, Err(LOGIN_TO_SUBSCRIBE.to_string()));

        assert!(transport.requests_to("/subscription").is_empty());
        assert_eq!(ctx.notices.last().map(|n| n.message), Some(LOGIN_TO_SUBSCRIBE.to_string()));
    }

    #[tokio::test]
    async fn subscribe_intent_runs_once_after_first_page() {
        let (transport, ctx, vm) = setup();
        transport.always_json("/universities/search", 200, &page(&[1], 1));
        transport.reply_json("/subscription", 200, r#"{"data":"ok"}"#);
        ctx.auth.set_auth(SESSION_TOKEN_SENTINEL, Some(student()));
        let filters = FilterSet {
            field_id: Some(LookupId::Numeric(2)),
            duration: Some(String::new()),
            ..FilterSet::default()
        };
        navigate_with(&ctx, filters, true);

        vm.mount().await.unwrap();
        vm.apply(FilterPatch::default().level(Some("Masters"))).await.unwrap();

        let sent = transport.requests_to("/subscription");
        assert_eq!(sent.len(), 1);
        let body = match &sent[0].body {
            Some(crate::services::RequestBody::Json(value)) => value.clone(),
            other => panic!("unexpected body {:?}", other),
        };
        assert_eq!(body["fieldId"], 2);
        assert!(body["duration"].is_null());
        assert_eq!(body["email"], "ana@uni.ca");
        assert_eq!(ctx.notices.last().map(|n| n.message), Some(SUBSCRIPTION_SAVED.to_string()));
    }
}
