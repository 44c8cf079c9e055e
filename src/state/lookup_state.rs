// ============================================================================
// LOOKUP STATE - Reference data cache (universities, fields, specializations)
// ============================================================================
// Lives for the whole process, never invalidated. Callers check before fetching.
// ============================================================================

use std::collections::BTreeMap;

use super::store::{Reducer, Store};
use crate::models::{LookupId, LookupItem};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupState {
    pub universities: Vec<LookupItem>,
    pub fields: Vec<LookupItem>,
    /// Keyed by numeric field id only
    pub specializations: BTreeMap<i64, Vec<LookupItem>>,
    pub loaded: bool,
}

impl LookupState {
    pub fn specializations_for(&self, field_id: &LookupId) -> Option<&Vec<LookupItem>> {
        field_id
            .as_numeric()
            .and_then(|key| self.specializations.get(&key))
    }

    pub fn has_specializations_for(&self, field_id: &LookupId) -> bool {
        self.specializations_for(field_id).is_some()
    }

    pub fn university_name(&self, id: &LookupId) -> Option<&str> {
        find_name(&self.universities, id)
    }

    pub fn field_name(&self, id: &LookupId) -> Option<&str> {
        find_name(&self.fields, id)
    }
}

fn find_name<'a>(items: &'a [LookupItem], id: &LookupId) -> Option<&'a str> {
    items
        .iter()
        .find(|item| &item.id == id)
        .map(|item| item.name.as_str())
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupAction {
    SetUniversities(Vec<LookupItem>),
    SetFields(Vec<LookupItem>),
    SetSpecializations { field_id: LookupId, list: Vec<LookupItem> },
    SetLookupsLoaded(bool),
}

impl Reducer for LookupState {
    type Action = LookupAction;

    fn reduce(mut self, action: LookupAction) -> Self {
        match action {
            LookupAction::SetUniversities(list) => self.universities = list,
            LookupAction::SetFields(list) => self.fields = list,
            LookupAction::SetSpecializations { field_id, list } => match field_id.as_numeric() {
                Some(key) => {
                    self.specializations.insert(key, list);
                }
                // String-keyed field ids are dropped (legacy producers)
                None => {}
            },
            LookupAction::SetLookupsLoaded(loaded) => self.loaded = loaded,
        }
        self
    }
}

pub type LookupStore = Store<LookupState>;

impl Store<LookupState> {
    pub fn set_universities(&self, list: Vec<LookupItem>) {
        self.dispatch(LookupAction::SetUniversities(list));
    }

    pub fn set_fields(&self, list: Vec<LookupItem>) {
        self.dispatch(LookupAction::SetFields(list));
    }

    pub fn set_specializations(&self, field_id: LookupId, list: Vec<LookupItem>) {
        if field_id.as_numeric().is_none() {
            log::warn!("⚠️ [LOOKUPS] Ignoring specializations for non-numeric field id {}", field_id);
        }
        self.dispatch(LookupAction::SetSpecializations { field_id, list });
    }

    pub fn set_lookups_loaded(&self, loaded: bool) {
        self.dispatch(LookupAction::SetLookupsLoaded(loaded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_field_ids_are_dropped() {
        let state = LookupState::default()
            .reduce(LookupAction::SetSpecializations {
                field_id: LookupId::from("f1"),
                list: vec![LookupItem::new("s1", "Software Engineering")],
            })
            .reduce(LookupAction::SetSpecializations {
                field_id: LookupId::Numeric(1),
                list: vec![LookupItem::new(10, "Data Science")],
            });

        assert!(!state.has_specializations_for(&LookupId::from("f1")));
        assert_eq!(state.specializations_for(&LookupId::Numeric(1)).unwrap().len(), 1);
        assert_eq!(state.specializations.len(), 1);
    }

    #[test]
    fn names_resolve_by_id() {
        let state = LookupState::default()
            .reduce(LookupAction::SetUniversities(vec![LookupItem::new(2, "University of Toronto")]))
            .reduce(LookupAction::SetLookupsLoaded(true));
        assert_eq!(state.university_name(&LookupId::Numeric(2)), Some("University of Toronto"));
        assert_eq!(state.field_name(&LookupId::Numeric(2)), None);
        assert!(state.loaded);
    }
}
