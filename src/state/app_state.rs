// ============================================================================
// APP STATE - Explicit dependency bundle handed to hooks and viewmodels
// ============================================================================
// No ambient singletons: every consumer receives the stores through this value.
// ============================================================================

use std::rc::Rc;

use super::{AuthStore, FilterStore, LookupStore, NoticeStore, ReactiveState, RouterStore};
use crate::config::AppConfig;
use crate::services::{ApiClient, HttpTransport};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub client: ApiClient,
    pub auth: AuthStore,
    pub lookups: LookupStore,
    pub filters: FilterStore,
    pub notices: NoticeStore,
    pub router: RouterStore,
    /// Bumped whenever a page-local state registered through [`AppContext::watch`] changes
    revision: ReactiveState<u64>,
}

impl AppContext {
    pub fn new(transport: Rc<dyn HttpTransport>, config: AppConfig) -> Self {
        let notices = NoticeStore::with_ttl(config.toast_duration_ms);
        Self {
            client: ApiClient::new(transport),
            auth: AuthStore::default(),
            lookups: LookupStore::default(),
            filters: FilterStore::default(),
            notices,
            router: RouterStore::default(),
            revision: ReactiveState::new(0),
            config,
        }
    }

    /// Forwards changes of a hook or viewmodel state to [`AppContext::subscribe_to_changes`]
    pub fn watch<T: 'static>(&self, state: &ReactiveState<T>) {
        let revision = self.revision.clone();
        state.subscribe(move || revision.update(|n| *n += 1));
    }

    /// Runs `callback` after any store or watched state changes
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        let cb = callback.clone();
        self.revision.subscribe(move || cb());
        let cb = callback.clone();
        self.auth.subscribe(move || cb());
        let cb = callback.clone();
        self.lookups.subscribe(move || cb());
        let cb = callback.clone();
        self.filters.subscribe(move || cb());
        let cb = callback.clone();
        self.notices.subscribe(move || cb());
        self.router.subscribe(move || callback());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::models::FilterPatch;
    use crate::test_support::{context, MockTransport};

    fn counter(ctx: &AppContext) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        ctx.subscribe_to_changes(move || sink.set(sink.get() + 1));
        count
    }

    #[test]
    fn stores_and_watched_states_notify() {
        let transport = MockTransport::new();
        let ctx = context(&transport);
        let count = counter(&ctx);

        ctx.filters.set_filters(FilterPatch::default().level(Some("Masters")));
        assert_eq!(count.get(), 1);

        let page_state = ReactiveState::new(Vec::<u32>::new());
        ctx.watch(&page_state);
        page_state.update(|items| items.push(1));
        assert_eq!(count.get(), 2);

        let unwatched = ReactiveState::new(0);
        unwatched.set(3);
        assert_eq!(count.get(), 2);
    }
}
