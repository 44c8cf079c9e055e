// ============================================================================
// USE AUTH CHECK - Session bootstrap ("who am I" on startup)
// ============================================================================
// The only place where session state is written from a network result.
// Failures are silent: the session is simply cleared.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use super::use_fetch::{use_fetch, FetchOutcome, UseFetchHandle};
use crate::models::{MeResponse, User};
use crate::services::endpoints;
use crate::state::{AppContext, AuthStore, SESSION_TOKEN_SENTINEL};

#[derive(Clone)]
pub struct SessionBootstrap {
    me: UseFetchHandle<MeResponse>,
    auth: AuthStore,
    started: Rc<Cell<bool>>,
}

pub fn use_auth_check(ctx: &AppContext) -> SessionBootstrap {
    SessionBootstrap {
        me: use_fetch(ctx, endpoints::USER_ME, false),
        auth: ctx.auth.clone(),
        started: Rc::new(Cell::new(false)),
    }
}

impl SessionBootstrap {
    /// Checks the cookie session once. Later calls only read the store.
    pub async fn run(&self) -> Option<User> {
        if self.started.replace(true) {
            log::debug!("🔁 [AUTH] Session check already done");
            return self.auth.current_user();
        }

        log::info!("🔐 [AUTH] Checking session...");
        let user = match self.me.fetch_data(None, None).await {
            FetchOutcome::Data(body) => body.into_user(),
            FetchOutcome::Error(message) => {
                log::info!("👤 [AUTH] No session ({})", message);
                None
            }
            FetchOutcome::Superseded => None,
        };

        match &user {
            Some(user) => {
                log::info!("✅ [AUTH] Session restored for {}", user.email);
                self.auth.set_auth(SESSION_TOKEN_SENTINEL, Some(user.clone()));
            }
            None => self.auth.clear_auth(),
        }
        self.auth.set_checked(true);
        user
    }

    pub fn has_run(&self) -> bool {
        self.started.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{context, student, MockTransport};

    #[tokio::test]
    async fn restores_session_from_data_or_user_key() {
        let transport = MockTransport::new();
        transport.reply_json(
            "/user/me",
            200,
            r#"{"data":{"id":7,"firstname":"Ana","lastname":"Silva","email":"ana@uni.ca","role":"Student"}}"#,
        );
        let ctx = context(&transport);

        let user = use_auth_check(&ctx).run().await;

        assert_eq!(user, Some(student()));
        let auth = ctx.auth.get();
        assert_eq!(auth.token.as_deref(), Some(SESSION_TOKEN_SENTINEL));
        assert_eq!(auth.user, Some(student()));
        assert!(auth.checked);

        let legacy = MockTransport::new();
        legacy.reply_json("/user/me", 200, r#"{"user":{"id":7,"email":"ana@uni.ca"}}"#);
        let ctx = context(&legacy);
        use_auth_check(&ctx).run().await;
        assert_eq!(ctx.auth.current_user().map(|u| u.email), Some("ana@uni.ca".to_string()));
    }

    #[tokio::test]
    async fn failure_clears_session_without_notice() {
        let transport = MockTransport::new();
        transport.reply_json("/user/me", 401, r#"{"error":"Unauthorized"}"#);
        let ctx = context(&transport);
        ctx.auth.set_auth("stale", Some(student()));

        assert_eq!(use_auth_check(&ctx).run().await, None);

        let auth = ctx.auth.get();
        assert_eq!(auth.token, None);
        assert_eq!(auth.user, None);
        assert!(auth.checked);
        assert!(ctx.notices.last().is_none());
    }

    #[tokio::test]
    async fn success_without_user_counts_as_logged_out() {
        let transport = MockTransport::new();
        transport.reply_json("/user/me", 200, r#"{"data":null}"#);
        let ctx = context(&transport);

        use_auth_check(&ctx).run().await;

        assert!(!ctx.auth.is_logged_in());
        assert!(ctx.auth.get().checked);
    }

    #[tokio::test]
    async fn runs_only_once() {
        let transport = MockTransport::new();
        transport.always_json("/user/me", 200, r#"{"data":{"id":7,"email":"ana@uni.ca"}}"#);
        let ctx = context(&transport);
        let bootstrap = use_auth_check(&ctx);

        bootstrap.run().await;
        bootstrap.clone().run().await;

        assert!(bootstrap.has_run());
        assert_eq!(transport.requests_to("/user/me").len(), 1);
    }
}
