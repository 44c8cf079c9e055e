// ============================================================================
// FILTER STATE - Last applied search criteria
// ============================================================================
// Blind shallow merge. Clearing the specialization when the field changes is
// the caller's job (see `FilterPatch::select_field`).
// ============================================================================

use super::store::{Reducer, Store};
use crate::models::{FilterPatch, FilterSet};

#[derive(Debug, Clone, PartialEq)]
pub enum FilterAction {
    SetFilters(FilterPatch),
    ResetFilters,
}

impl Reducer for FilterSet {
    type Action = FilterAction;

    fn reduce(mut self, action: FilterAction) -> Self {
        match action {
            FilterAction::SetFilters(patch) => {
                patch.apply_to(&mut self);
                self
            }
            FilterAction::ResetFilters => FilterSet::default(),
        }
    }
}

pub type FilterStore = Store<FilterSet>;

impl Store<FilterSet> {
    pub fn set_filters(&self, patch: FilterPatch) {
        self.dispatch(FilterAction::SetFilters(patch));
    }

    pub fn reset_filters(&self) {
        self.dispatch(FilterAction::ResetFilters);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LookupId;

    #[test]
    fn merge_keeps_unmentioned_fields() {
        let store = FilterStore::default();
        store.set_filters(
            FilterPatch::default()
                .university(Some(LookupId::Numeric(1)))
                .specialization(Some(LookupId::Numeric(30))),
        );
        store.set_filters(FilterPatch::default().field(Some(LookupId::Numeric(4))));

        let filters = store.get();
        assert_eq!(filters.university_id, Some(LookupId::Numeric(1)));
        assert_eq!(filters.field_id, Some(LookupId::Numeric(4)));
        // store never auto-clears
        assert_eq!(filters.specialization_id, Some(LookupId::Numeric(30)));
    }

    #[test]
    fn explicit_specialization_in_same_merge_applies() {
        let store = FilterStore::default();
        store.set_filters(FilterPatch::default().specialization(Some(LookupId::Numeric(30))));
        store.set_filters(FilterPatch::default().select_field(Some(LookupId::Numeric(4))));
        assert_eq!(store.get().specialization_id, None);
    }

    #[test]
    fn reset_restores_default() {
        let store = FilterStore::default();
        store.set_filters(FilterPatch::default().level(Some("Masters")));
        store.reset_filters();
        assert_eq!(store.get(), FilterSet::default());
    }
}
