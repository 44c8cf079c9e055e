// ============================================================================
// NOTICE STATE - Transient toasts (success / error / info)
// ============================================================================

use super::store::{Reducer, Store};

pub const DEFAULT_NOTICE_TTL_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: String,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeState {
    /// Oldest first
    pub items: Vec<Notice>,
    pub ttl_ms: u32,
}

impl Default for NoticeState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            ttl_ms: DEFAULT_NOTICE_TTL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NoticeAction {
    Push(Notice),
    Dismiss(String),
    Clear,
}

impl Reducer for NoticeState {
    type Action = NoticeAction;

    fn reduce(mut self, action: NoticeAction) -> Self {
        match action {
            NoticeAction::Push(notice) => self.items.push(notice),
            NoticeAction::Dismiss(id) => self.items.retain(|notice| notice.id != id),
            NoticeAction::Clear => self.items.clear(),
        }
        self
    }
}

pub type NoticeStore = Store<NoticeState>;

impl Store<NoticeState> {
    pub fn with_ttl(ttl_ms: u32) -> Self {
        Self::new(NoticeState {
            items: Vec::new(),
            ttl_ms,
        })
    }

    /// Shows a notice and returns its id. In the browser it goes away after `ttl_ms`.
    pub fn push(&self, kind: NoticeKind, message: &str) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.dispatch(NoticeAction::Push(Notice {
            id: id.clone(),
            kind,
            message: message.to_string(),
        }));

        #[cfg(target_arch = "wasm32")]
        {
            let ttl_ms = self.select(|state| state.ttl_ms);
            let store = self.clone();
            let expired = id.clone();
            gloo_timers::callback::Timeout::new(ttl_ms, move || store.dismiss(&expired)).forget();
        }

        id
    }

    pub fn success(&self, message: &str) -> String {
        self.push(NoticeKind::Success, message)
    }

    pub fn error(&self, message: &str) -> String {
        self.push(NoticeKind::Error, message)
    }

    pub fn info(&self, message: &str) -> String {
        self.push(NoticeKind::Info, message)
    }

    pub fn dismiss(&self, id: &str) {
        self.dispatch(NoticeAction::Dismiss(id.to_string()));
    }

    pub fn clear(&self) {
        self.dispatch(NoticeAction::Clear);
    }

    pub fn last(&self) -> Option<Notice> {
        self.select(|state| state.items.last().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_dismiss() {
        let store = NoticeStore::with_ttl(1000);
        let first = store.error("Network Error");
        store.success("Subscription updated for these filters.");

        assert_eq!(store.select(|s| s.items.len()), 2);
        store.dismiss(&first);
        let remaining = store.get().items;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, NoticeKind::Success);

        store.clear();
        assert!(store.last().is_none());
    }
}
