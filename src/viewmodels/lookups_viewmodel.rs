// ============================================================================
// LOOKUPS VIEWMODEL - Derive-and-fetch for the reference data cache
// ============================================================================
// Shared by the Search, Results and Manage pages. Each collection is fetched
// only when the cache lacks it, and at most one request per key is in flight.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::hooks::{use_fetch, FetchOutcome, UseFetchHandle};
use crate::models::{ListBody, LookupId, LookupItem};
use crate::services::{endpoints, LocalFuture};
use crate::state::{AppContext, LookupStore, NoticeStore};

type LookupList = ListBody<LookupItem>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LookupKey {
    Universities,
    Fields,
    Specializations(LookupId),
}

/// Releases its key from the in-flight set when the load settles or is dropped
struct InFlight {
    keys: Rc<RefCell<HashSet<LookupKey>>>,
    key: LookupKey,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.keys.borrow_mut().remove(&self.key);
    }
}

#[derive(Clone)]
pub struct LookupsViewModel {
    lookups: LookupStore,
    notices: NoticeStore,
    universities: UseFetchHandle<LookupList>,
    fields: UseFetchHandle<LookupList>,
    specializations: UseFetchHandle<LookupList>,
    in_flight: Rc<RefCell<HashSet<LookupKey>>>,
}

impl LookupsViewModel {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            lookups: ctx.lookups.clone(),
            notices: ctx.notices.clone(),
            universities: use_fetch(ctx, endpoints::UNIVERSITIES, false),
            fields: use_fetch(ctx, endpoints::FIELDS, false),
            specializations: use_fetch(ctx, endpoints::SPECIALIZATIONS, false),
            in_flight: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    /// Loads universities and fields unless already cached. Requests start immediately.
    pub fn ensure_catalog(&self) -> LocalFuture<Result<(), String>> {
        let universities = self
            .lookups
            .select(|state| state.universities.is_empty())
            .then(|| self.load(LookupKey::Universities, &self.universities, None))
            .flatten();
        let fields = self
            .lookups
            .select(|state| state.fields.is_empty())
            .then(|| self.load(LookupKey::Fields, &self.fields, None))
            .flatten();

        let lookups = self.lookups.clone();
        Box::pin(async move {
            let mut result = Ok(());
            for pending in [universities, fields].into_iter().flatten() {
                if let Err(e) = pending.await {
                    result = result.and(Err(e));
                }
            }
            let complete = lookups.select(|s| !s.universities.is_empty() && !s.fields.is_empty());
            if complete && !lookups.select(|s| s.loaded) {
                lookups.set_lookups_loaded(true);
            }
            result
        })
    }

    /// Loads the specializations of `field_id` unless cached or already loading
    pub fn ensure_specializations(&self, field_id: &LookupId) -> LocalFuture<Result<(), String>> {
        if field_id.is_blank() {
            return Box::pin(std::future::ready(Ok(())));
        }
        if self.lookups.select(|state| state.has_specializations_for(field_id)) {
            log::debug!("📚 [LOOKUPS] Specializations for field {} cached", field_id);
            return Box::pin(std::future::ready(Ok(())));
        }

        let query = vec![("fieldId".to_string(), field_id.to_string())];
        let key = LookupKey::Specializations(field_id.clone());
        match self.load(key, &self.specializations, Some(query)) {
            Some(pending) => pending,
            None => Box::pin(std::future::ready(Ok(()))),
        }
    }

    /// Specializations to offer for the selected field; empty without a selection
    pub fn visible_specializations(&self, field_id: Option<&LookupId>) -> Vec<LookupItem> {
        field_id
            .and_then(|id| self.lookups.select(|state| state.specializations_for(id).cloned()))
            .unwrap_or_default()
    }

    pub fn universities(&self) -> Vec<LookupItem> {
        self.lookups.select(|state| state.universities.clone())
    }

    pub fn fields(&self) -> Vec<LookupItem> {
        self.lookups.select(|state| state.fields.clone())
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.borrow().is_empty()
    }

    /// `None` when a request for `key` is already in flight
    fn load(
        &self,
        key: LookupKey,
        handle: &UseFetchHandle<LookupList>,
        query: Option<Vec<(String, String)>>,
    ) -> Option<LocalFuture<Result<(), String>>> {
        if !self.in_flight.borrow_mut().insert(key.clone()) {
            log::debug!("⏳ [LOOKUPS] {:?} already loading", key);
            return None;
        }
        let guard = InFlight {
            keys: self.in_flight.clone(),
            key,
        };

        let pending = handle.fetch_data(None, query);
        let lookups = self.lookups.clone();
        let notices = self.notices.clone();

        Some(Box::pin(async move {
            let outcome = pending.await;
            let key = guard.key.clone();
            drop(guard);

            match outcome {
                FetchOutcome::Data(body) => {
                    let list = body.into_vec();
                    log::info!("📚 [LOOKUPS] {:?}: {} items", key, list.len());
                    match key {
                        LookupKey::Universities => lookups.set_universities(list),
                        LookupKey::Fields => lookups.set_fields(list),
                        LookupKey::Specializations(field_id) => {
                            lookups.set_specializations(field_id, list)
                        }
                    }
                    Ok(())
                }
                FetchOutcome::Error(message) => {
                    log::error!("❌ [LOOKUPS] {:?} failed: {}", key, message);
                    notices.error(&message);
                    Err(message)
                }
                FetchOutcome::Superseded => Ok(()),
            }
        }))
    }
}
