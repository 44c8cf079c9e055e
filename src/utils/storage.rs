// ============================================================================
// STORAGE - localStorage persistence of the search filters (browser only)
// ============================================================================

use gloo_storage::{LocalStorage, Storage};

use super::constants::STORAGE_KEY_FILTERS;
use crate::models::FilterSet;

pub fn load_filters() -> Option<FilterSet> {
    match LocalStorage::get::<FilterSet>(STORAGE_KEY_FILTERS) {
        Ok(filters) => {
            log::info!("💾 [STORAGE] Restored saved filters");
            Some(filters)
        }
        Err(_) => None,
    }
}

pub fn save_filters(filters: &FilterSet) {
    if let Err(e) = LocalStorage::set(STORAGE_KEY_FILTERS, filters) {
        log::warn!("⚠️ [STORAGE] Could not save filters: {}", e);
    }
}
