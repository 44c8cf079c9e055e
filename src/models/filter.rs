use serde::{Deserialize, Serialize};

use super::LookupId;

/// Search criteria shared by the Search and Results pages. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    pub university_id: Option<LookupId>,
    pub field_id: Option<LookupId>,
    pub specialization_id: Option<LookupId>,
    pub level: Option<String>,
    pub duration: Option<String>,
}

impl FilterSet {
    /// Copy with blank strings and blank ids turned into `None`
    pub fn normalized(&self) -> Self {
        Self {
            university_id: normalize_id(&self.university_id),
            field_id: normalize_id(&self.field_id),
            specialization_id: normalize_id(&self.specialization_id),
            level: normalize_text(&self.level),
            duration: normalize_text(&self.duration),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized() == FilterSet::default()
    }

    /// Query parameters for `/universities/search`, unset criteria omitted
    pub fn to_query(&self) -> Vec<(String, String)> {
        let normalized = self.normalized();
        let mut query = Vec::new();
        let ids = [
            ("universityId", &normalized.university_id),
            ("fieldId", &normalized.field_id),
            ("specializationId", &normalized.specialization_id),
        ];
        for (key, value) in ids {
            if let Some(id) = value {
                query.push((key.to_string(), id.to_string()));
            }
        }
        if let Some(level) = &normalized.level {
            query.push(("level".to_string(), level.clone()));
        }
        if let Some(duration) = &normalized.duration {
            query.push(("duration".to_string(), duration.clone()));
        }
        query
    }
}

fn normalize_id(id: &Option<LookupId>) -> Option<LookupId> {
    id.clone().filter(|id| !id.is_blank())
}

fn normalize_text(text: &Option<String>) -> Option<String> {
    text.as_ref()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Partial update of a [`FilterSet`].
///
/// Outer `None` leaves the field untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub university_id: Option<Option<LookupId>>,
    pub field_id: Option<Option<LookupId>>,
    pub specialization_id: Option<Option<LookupId>>,
    pub level: Option<Option<String>>,
    pub duration: Option<Option<String>>,
}

impl FilterPatch {
    /// Patch that overwrites every field with `filters`
    pub fn replace_with(filters: &FilterSet) -> Self {
        Self {
            university_id: Some(filters.university_id.clone()),
            field_id: Some(filters.field_id.clone()),
            specialization_id: Some(filters.specialization_id.clone()),
            level: Some(filters.level.clone()),
            duration: Some(filters.duration.clone()),
        }
    }

    pub fn university(mut self, id: Option<LookupId>) -> Self {
        self.university_id = Some(id);
        self
    }

    /// Sets only the field id. Use [`FilterPatch::select_field`] from UI handlers.
    pub fn field(mut self, id: Option<LookupId>) -> Self {
        self.field_id = Some(id);
        self
    }

    /// Field selection as done by page controllers: the specialization is cleared too.
    pub fn select_field(mut self, id: Option<LookupId>) -> Self {
        self.field_id = Some(id);
        self.specialization_id = Some(None);
        self
    }

    pub fn specialization(mut self, id: Option<LookupId>) -> Self {
        self.specialization_id = Some(id);
        self
    }

    pub fn level(mut self, level: Option<&str>) -> Self {
        self.level = Some(level.map(str::to_string));
        self
    }

    pub fn duration(mut self, duration: Option<&str>) -> Self {
        self.duration = Some(duration.map(str::to_string));
        self
    }

    /// Patch for one dropdown change, keyed by the filter's wire name. An empty
    /// `raw` clears the filter; choosing a field also clears the specialization.
    pub fn from_input(name: &str, raw: &str) -> Option<Self> {
        let text = Some(raw.trim()).filter(|value| !value.is_empty());
        let patch = Self::default();
        Some(match name {
            "universityId" => patch.university(LookupId::parse(raw)),
            "fieldId" => patch.select_field(LookupId::parse(raw)),
            "specializationId" => patch.specialization(LookupId::parse(raw)),
            "level" => patch.level(text),
            "duration" => patch.duration(text),
            _ => return None,
        })
    }

    /// Shallow merge: only mentioned fields change
    pub fn apply_to(&self, filters: &mut FilterSet) {
        if let Some(value) = &self.university_id {
            filters.university_id = value.clone();
        }
        if let Some(value) = &self.field_id {
            filters.field_id = value.clone();
        }
        if let Some(value) = &self.specialization_id {
            filters.specialization_id = value.clone();
        }
        if let Some(value) = &self.level {
            filters.level = value.clone();
        }
        if let Some(value) = &self.duration {
            filters.duration = value.clone();
        }
    }
}
