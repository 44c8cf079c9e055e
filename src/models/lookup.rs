use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a university, field, specialization or course.
///
/// The backend mostly sends numbers, but legacy producers still send string keys
/// such as `"f1"`; both are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupId {
    Numeric(i64),
    Text(String),
}

impl LookupId {
    /// Parses a raw form value: empty means "no selection", digits become numeric ids.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<i64>() {
            Ok(number) => LookupId::Numeric(number),
            Err(_) => LookupId::Text(raw.to_string()),
        })
    }

    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            LookupId::Numeric(number) => Some(*number),
            LookupId::Text(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, LookupId::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for LookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupId::Numeric(number) => write!(f, "{}", number),
            LookupId::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for LookupId {
    fn from(number: i64) -> Self {
        LookupId::Numeric(number)
    }
}

impl From<&str> for LookupId {
    fn from(text: &str) -> Self {
        LookupId::Text(text.to_string())
    }
}

/// Entry of a reference list (university, field of study, specialization)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupItem {
    pub id: LookupId,
    pub name: String,
}

impl LookupItem {
    pub fn new(id: impl Into<LookupId>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_keep_their_wire_type() {
        let items: Vec<LookupItem> =
            serde_json::from_str(r#"[{"id":3,"name":"Algoma"},{"id":"f1","name":"CS"}]"#).unwrap();
        assert_eq!(items[0].id, LookupId::Numeric(3));
        assert_eq!(items[1].id, LookupId::Text("f1".to_string()));
        assert_eq!(serde_json::to_string(&items[0].id).unwrap(), "3");
    }

    #[test]
    fn parse_form_values() {
        assert_eq!(LookupId::parse(""), None);
        assert_eq!(LookupId::parse(" 12 "), Some(LookupId::Numeric(12)));
        assert_eq!(LookupId::parse("u2"), Some(LookupId::Text("u2".to_string())));
    }
}
