use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LookupId;

const PREVIEW_CHARS: usize = 80;

/// Course update notification. The backend serializes Go-style capitalized names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(alias = "ID")]
    pub id: LookupId,
    #[serde(alias = "Message", default)]
    pub message: String,
    #[serde(alias = "Status", default)]
    pub status: String,
    #[serde(rename = "createdAt", alias = "CreatedAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn is_new(&self) -> bool {
        self.status.eq_ignore_ascii_case("new")
    }

    /// First 80 characters of the message, with an ellipsis when cut
    pub fn preview(&self) -> String {
        if self.message.chars().count() > PREVIEW_CHARS {
            let cut: String = self.message.chars().take(PREVIEW_CHARS).collect();
            format!("{}...", cut)
        } else {
            self.message.clone()
        }
    }
}

/// Newest first; undated notifications go last
pub fn sort_newest_first(notifications: &mut [Notification]) {
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
