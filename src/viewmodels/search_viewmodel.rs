// ============================================================================
// SEARCH VIEWMODEL - Cascading filters on the landing page
// ============================================================================

use super::LookupsViewModel;
use crate::models::{FilterPatch, FilterSet, LookupId, LookupItem, Navigation, NavigationState, Route};
use crate::services::LocalFuture;
use crate::state::AppContext;

#[derive(Clone)]
pub struct SearchViewModel {
    ctx: AppContext,
    lookups: LookupsViewModel,
}

impl SearchViewModel {
    pub fn new(ctx: &AppContext, lookups: LookupsViewModel) -> Self {
        Self {
            ctx: ctx.clone(),
            lookups,
        }
    }

    /// Catalog first, then the specializations of an already selected field
    pub async fn mount(&self) -> Result<(), String> {
        self.lookups.ensure_catalog().await?;
        match self.filters().field_id {
            Some(field_id) => self.lookups.ensure_specializations(&field_id).await,
            None => Ok(()),
        }
    }

    pub fn filters(&self) -> FilterSet {
        self.ctx.filters.get()
    }

    /// Merges `patch` into the shared filters. Field changes go through [`Self::select_field`].
    pub fn update_filters(&self, patch: FilterPatch) {
        self.ctx.filters.set_filters(patch);
    }

    /// Stores the field (clearing the specialization) and loads its specializations
    pub fn select_field(&self, field_id: Option<LookupId>) -> LocalFuture<Result<(), String>> {
        self.ctx
            .filters
            .set_filters(FilterPatch::default().select_field(field_id.clone()));
        match field_id {
            Some(field_id) => self.lookups.ensure_specializations(&field_id),
            None => Box::pin(std::future::ready(Ok(()))),
        }
    }

    pub fn visible_specializations(&self) -> Vec<LookupItem> {
        self.lookups
            .visible_specializations(self.filters().field_id.as_ref())
    }

    pub fn lookups(&self) -> &LookupsViewModel {
        &self.lookups
    }

    pub fn search(&self) -> Route {
        self.go_to_results(false)
    }

    /// Same as search, and the results page subscribes once its first page is in
    pub fn subscribe(&self) -> Route {
        self.go_to_results(true)
    }

    fn go_to_results(&self, subscribe: bool) -> Route {
        let state = NavigationState {
            filters: self.filters(),
            subscribe,
        };
        log::info!("🔎 [SEARCH] Searching (subscribe: {})", subscribe);
        self.ctx
            .router
            .navigate(Navigation::with_state(Route::Results, state), &self.ctx.auth.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, MockTransport};

    fn mounted() -> (MockTransport, AppContext, SearchViewModel) {
        let transport = MockTransport::new();
        transport.reply_json("/universities", 200, r#"{"data":[{"id":1,"name":"Algoma University"}]}"#);
        transport.reply_json("/fields", 200, r#"{"data":[{"id":2,"name":"Business & Management"}]}"#);
        transport.always_json("/specializations", 200, r#"{"data":[{"id":30,"name":"MBA"}]}"#);
        let ctx = context(&transport);
        let vm = SearchViewModel::new(&ctx, LookupsViewModel::new(&ctx));
        (transport, ctx, vm)
    }

    #[tokio::test]
    async fn mount_loads_specializations_of_selected_field() {
        let (transport, ctx, vm) = mounted();
        ctx.filters
            .set_filters(FilterPatch::default().field(Some(LookupId::Numeric(2))));

        vm.mount().await.unwrap();

        assert_eq!(transport.requests().len(), 3);
        assert_eq!(vm.visible_specializations()[0].name, "MBA");
    }

    #[tokio::test]
    async fn selecting_a_field_clears_specialization_and_uses_cache() {
        let (transport, _ctx, vm) = mounted();
        vm.update_filters(FilterPatch::default().specialization(Some(LookupId::Numeric(99))));

        vm.select_field(Some(LookupId::Numeric(2))).await.unwrap();
        assert_eq!(vm.filters().specialization_id, None);

        vm.update_filters(FilterPatch::default().specialization(Some(LookupId::Numeric(30))));
        vm.select_field(Some(LookupId::Numeric(2))).await.unwrap();

        assert_eq!(transport.requests_to("/specializations").len(), 1);
        assert!(vm.select_field(None).await.is_ok());
        assert!(vm.visible_specializations().is_empty());
    }

    #[tokio::test]
    async fn search_and_subscribe_carry_filters() {
        let (_transport, ctx, vm) = mounted();
        vm.update_filters(FilterPatch::default().level(Some("Masters")));

        assert_eq!(vm.search(), Route::Results);
        let state = ctx.router.take_state().unwrap();
        assert_eq!(state.filters.level.as_deref(), Some("Masters"));
        assert!(!state.subscribe);

        vm.subscribe();
        assert!(ctx.router.take_state().unwrap().subscribe);
        assert_eq!(ctx.router.current(), Route::Results);
    }
}
