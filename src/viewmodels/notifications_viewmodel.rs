// ============================================================================
// NOTIFICATIONS VIEWMODEL - Inbox of course updates for the current user
// ============================================================================

use crate::hooks::{use_fetch, FetchOutcome, UseFetchHandle};
use crate::models::notification::sort_newest_first;
use crate::models::{Ack, ListBody, LookupId, Notification};
use crate::services::endpoints;
use crate::state::{AppContext, ReactiveState};

pub const LOGIN_FOR_NOTIFICATIONS: &str = "Please log in to see your notifications";

#[derive(Clone)]
pub struct NotificationsViewModel {
    ctx: AppContext,
    list: UseFetchHandle<ListBody<Notification>>,
    mark_read: UseFetchHandle<Ack>,
    /// Notification opened in the detail view
    pub selected: ReactiveState<Option<Notification>>,
}

impl NotificationsViewModel {
    pub fn new(ctx: &AppContext) -> Self {
        let selected = ReactiveState::<Option<Notification>>::new(None);
        ctx.watch(&selected);
        Self {
            ctx: ctx.clone(),
            list: use_fetch(ctx, endpoints::NOTIFICATIONS, false),
            mark_read: use_fetch(ctx, endpoints::NOTIFICATION_READ, false),
            selected,
        }
    }

    /// Fetches the inbox of the logged-in user, newest first
    pub async fn load(&self) -> Result<Vec<Notification>, String> {
        let Some(user) = self.ctx.auth.current_user() else {
            return Err(LOGIN_FOR_NOTIFICATIONS.to_string());
        };

        let query = vec![("email".to_string(), user.email.clone())];
        match self.list.fetch_data(None, Some(query)).await {
            FetchOutcome::Data(_) => {
                let notifications = self.notifications();
                log::info!("🔔 [NOTIFICATIONS] {} loaded ({} new)", notifications.len(), self.unread_count());
                Ok(notifications)
            }
            FetchOutcome::Error(message) => {
                self.ctx.notices.error(&message);
                Err(message)
            }
            FetchOutcome::Superseded => Ok(self.notifications()),
        }
    }

    /// Acknowledges one notification, then reloads the inbox
    pub async fn mark_read(&self, id: &LookupId) -> Result<(), String> {
        let query = vec![("id".to_string(), id.to_string())];
        match self.mark_read.fetch_data(None, Some(query)).await {
            FetchOutcome::Data(_) => {
                self.ctx.notices.success("Notification acknowledged");
                self.load().await.map(|_| ())
            }
            FetchOutcome::Error(message) => {
                self.ctx.notices.error(&message);
                Err(message)
            }
            FetchOutcome::Superseded => Ok(()),
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        let mut notifications = self
            .list
            .data()
            .map(ListBody::into_vec)
            .unwrap_or_default();
        sort_newest_first(&mut notifications);
        notifications
    }

    /// Header badge count
    pub fn unread_count(&self) -> usize {
        self.list.state.with(|state| match &state.data {
            Some(ListBody::Envelope { data }) | Some(ListBody::Bare(data)) => {
                data.iter().filter(|n| n.is_new()).count()
            }
            None => 0,
        })
    }

    pub fn find(&self, id: &LookupId) -> Option<Notification> {
        self.notifications().into_iter().find(|n| &n.id == id)
    }

    pub fn view(&self, notification: Notification) {
        self.selected.set(Some(notification));
    }

    pub fn close(&self) {
        self.selected.set(None);
    }

    pub fn loading(&self) -> bool {
        self.list.loading()
    }
}
