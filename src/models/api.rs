use serde::{Deserialize, Deserializer, Serialize};

use super::FilterSet;

/// Standard response body: `data` on success, `error` on failure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Paginated list body (`/universities/search`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PagedEnvelope<T> {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pages: u32,
}

/// List body that is either wrapped in `data` or a bare array
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged, bound(deserialize = "T: Deserialize<'de>"))]
pub enum ListBody<T> {
    Envelope {
        #[serde(default, deserialize_with = "null_as_empty")]
        data: Vec<T>,
    },
    Bare(Vec<T>),
}

/// Empty lists come back as `"data": null`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> ListBody<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Envelope { data } => data,
            ListBody::Bare(items) => items,
        }
    }
}

/// Body for endpoints whose success payload is not inspected
pub type Ack = serde_json::Value;

/// `POST /subscription` body: null-normalized filters plus the subscriber email
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionRequest {
    #[serde(flatten)]
    pub filters: FilterSet,
    pub email: String,
}

impl SubscriptionRequest {
    pub fn new(filters: &FilterSet, email: &str) -> Self {
        Self {
            filters: filters.normalized(),
            email: email.to_string(),
        }
    }
}
