// ============================================================================
// USE FETCH - One REST endpoint bound to a data / loading / error tri-state
// ============================================================================
// `fetch_data` resets the state synchronously, then returns the pending
// request. Every trigger bumps a generation counter; a reply whose generation
// is no longer current is dropped, so a slow old request cannot overwrite a
// newer one.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::services::{ApiClient, Endpoint, HttpRequest, LocalFuture, QueryParams, RequestBody};
use crate::state::{AppContext, ReactiveState, ResourceState};

/// Result of one trigger, as seen by the caller that awaited it
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Data(T),
    Error(String),
    /// A newer trigger started before this one finished; state was left alone
    Superseded,
}

impl<T> FetchOutcome<T> {
    pub fn data(self) -> Option<T> {
        match self {
            FetchOutcome::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchOutcome::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, FetchOutcome::Superseded)
    }
}

pub struct UseFetchHandle<T> {
    pub state: ReactiveState<ResourceState<T>>,
    client: ApiClient,
    endpoint: Endpoint,
    auto_fetch: bool,
    generation: Rc<Cell<u64>>,
}

impl<T> Clone for UseFetchHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            client: self.client.clone(),
            endpoint: self.endpoint,
            auto_fetch: self.auto_fetch,
            generation: self.generation.clone(),
        }
    }
}

/// Binds `endpoint` to a fresh resource state. With `auto_fetch`, [`UseFetchHandle::on_mount`]
/// issues one request.
pub fn use_fetch<T>(ctx: &AppContext, endpoint: Endpoint, auto_fetch: bool) -> UseFetchHandle<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    let state = ReactiveState::new(ResourceState::default());
    ctx.watch(&state);
    UseFetchHandle {
        state,
        client: ctx.client.clone(),
        endpoint,
        auto_fetch,
        generation: Rc::new(Cell::new(0)),
    }
}

impl<T> UseFetchHandle<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    pub fn fetch_data(
        &self,
        body: Option<RequestBody>,
        query: Option<QueryParams>,
    ) -> LocalFuture<FetchOutcome<T>> {
        let generation = self.next_generation();
        self.state.update(|state| state.begin());

        let request = HttpRequest::new(self.endpoint.method, self.endpoint.path)
            .with_query(query.unwrap_or_default())
            .with_body(body);
        let pending = self.client.request::<T>(request);

        let guard = SettleGuard {
            state: self.state.clone(),
            current: self.generation.clone(),
            generation,
        };

        Box::pin(async move {
            let result = pending.await;
            if !guard.is_current() {
                log::debug!("⏭️ [FETCH] Dropping stale reply (generation {})", generation);
                return FetchOutcome::Superseded;
            }
            match result {
                Ok(data) => {
                    guard.state.update(|state| state.succeed(data.clone()));
                    FetchOutcome::Data(data)
                }
                Err(err) => {
                    let message = err.user_message();
                    guard.state.update(|state| state.fail(message.clone()));
                    FetchOutcome::Error(message)
                }
            }
        })
    }

    /// `fetch_data` with a JSON body
    pub fn fetch_json<B: Serialize>(
        &self,
        body: &B,
        query: Option<QueryParams>,
    ) -> LocalFuture<FetchOutcome<T>> {
        match RequestBody::json(body) {
            Ok(body) => self.fetch_data(Some(body), query),
            Err(err) => {
                self.next_generation();
                let message = err.user_message();
                self.state.update(|state| state.fail(message.clone()));
                Box::pin(std::future::ready(FetchOutcome::Error(message)))
            }
        }
    }

    /// Request issued when the owning page mounts, if auto-fetch is on
    pub fn on_mount(&self) -> Option<LocalFuture<FetchOutcome<T>>> {
        self.auto_fetch.then(|| self.fetch_data(None, None))
    }

    /// Fire and forget on the browser event loop
    #[cfg(target_arch = "wasm32")]
    pub fn trigger(&self, body: Option<RequestBody>, query: Option<QueryParams>) {
        let pending = self.fetch_data(body, query);
        wasm_bindgen_futures::spawn_local(async move {
            pending.await;
        });
    }

    pub fn data(&self) -> Option<T> {
        self.state.with(|state| state.data.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|state| state.error.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|state| state.loading)
    }

    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.get()
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    fn next_generation(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }
}

/// Settles the state if the request future is dropped before completing,
/// so `loading` never stays stuck.
struct SettleGuard<T> {
    state: ReactiveState<ResourceState<T>>,
    current: Rc<Cell<u64>>,
    generation: u64,
}

impl<T> SettleGuard<T> {
    fn is_current(&self) -> bool {
        self.current.get() == self.generation
    }
}

impl<T> Drop for SettleGuard<T> {
    fn drop(&mut self) {
        if self.is_current() && self.state.with(|state| state.loading) {
            self.state
                .update(|state| state.fail("Request cancelled".to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{ApiEnvelope, LookupItem};
    use crate::services::{endpoints, Method};
    use crate::test_support::{context, ok_json, MockTransport};

    type Fields = ApiEnvelope<Vec<LookupItem>>;

    fn names(handle: &UseFetchHandle<Fields>) -> Vec<String> {
        handle
            .data()
            .and_then(|body| body.data)
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.name)
            .collect()
    }

    #[tokio::test]
    async fn success_stores_payload() {
        let transport = MockTransport::new();
        transport.reply_json("/specializations", 200, r#"{"data":[{"id":5,"name":"MBA"}]}"#);
        let ctx = context(&transport);
        let handle = use_fetch::<Fields>(&ctx, endpoints::SPECIALIZATIONS, false);

        let outcome = handle
            .fetch_data(None, Some(vec![("fieldId".to_string(), "2".to_string())]))
            .await;

        assert!(matches!(outcome, FetchOutcome::Data(_)));
        assert!(handle.snapshot().is_settled());
        assert_eq!(names(&handle), vec!["MBA"]);
        let sent = transport.requests_to("/specializations");
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].query_value("fieldId"), Some("2"));
    }

    #[tokio::test]
    async fn every_failure_kind_becomes_a_message() {
        let transport = MockTransport::new();
        transport.reply_json("/fields", 403, r#"{"error":"Forbidden for students"}"#);
        transport.fail("/fields", ApiError::Network("connection refused".to_string()));
        transport.reply_json("/fields", 200, "<html>");
        let ctx = context(&transport);
        let handle = use_fetch::<Fields>(&ctx, endpoints::FIELDS, false);

        let mut messages = Vec::new();
        for _ in 0..3 {
            let outcome = handle.fetch_data(None, None).await;
            let state = handle.snapshot();
            assert!(state.is_settled());
            assert_eq!(state.data, None);
            messages.push(outcome.error().unwrap_or_default().to_string());
        }

        assert_eq!(messages[0], "Forbidden for students");
        assert_eq!(messages[1], "Network Error");
        assert!(messages[2].starts_with("Malformed server response"));
    }

    #[tokio::test]
    async fn trigger_resets_state_synchronously() {
        let transport = MockTransport::new();
        transport.reply_json("/fields", 200, r#"{"data":[{"id":1,"name":"Biology"}]}"#);
        let gate = transport.defer("/fields");
        let ctx = context(&transport);
        let handle = use_fetch::<Fields>(&ctx, endpoints::FIELDS, false);
        handle.fetch_data(None, None).await;
        assert_eq!(names(&handle), vec!["Biology"]);

        let pending = handle.fetch_data(None, None);
        let state = handle.snapshot();
        assert!(state.loading);
        assert_eq!(state.data, None);
        assert_eq!(state.error, None);

        gate.send(ok_json(r#"{"data":[]}"#)).unwrap();
        pending.await;
        assert!(!handle.loading());
    }

    #[tokio::test]
    async fn stale_reply_cannot_overwrite_newer_one() {
        let transport = MockTransport::new();
        let slow = transport.defer("/fields");
        let fast = transport.defer("/fields");
        let ctx = context(&transport);
        let handle = use_fetch::<Fields>(&ctx, endpoints::FIELDS, false);

        let first = handle.fetch_data(None, None);
        let second = handle.fetch_data(None, None);

        fast.send(ok_json(r#"{"data":[{"id":2,"name":"Fresh"}]}"#)).unwrap();
        assert!(matches!(second.await, FetchOutcome::Data(_)));

        slow.send(ok_json(r#"{"data":[{"id":1,"name":"Stale"}]}"#)).unwrap();
        assert!(first.await.is_superseded());

        assert_eq!(names(&handle), vec!["Fresh"]);
        assert!(handle.snapshot().is_settled());
    }

    #[tokio::test]
    async fn dropped_request_does_not_leave_loading_stuck() {
        let transport = MockTransport::new();
        let _gate = transport.defer("/fields");
        let ctx = context(&transport);
        let handle = use_fetch::<Fields>(&ctx, endpoints::FIELDS, false);

        drop(handle.fetch_data(None, None));

        let state = handle.snapshot();
        assert!(state.is_settled());
        assert_eq!(state.error.as_deref(), Some("Request cancelled"));
    }

    #[tokio::test]
    async fn json_body_and_auto_fetch() {
        let transport = MockTransport::new();
        transport.always_json("/user/me", 401, r#"{"error":"not logged in"}"#);
        transport.reply_json("/subscription", 201, "");
        let ctx = context(&transport);

        let me = use_fetch::<serde_json::Value>(&ctx, endpoints::USER_ME, true);
        let outcome = me.on_mount().expect("auto fetch").await;
        assert_eq!(outcome.error(), Some("not logged in"));

        let manual = use_fetch::<serde_json::Value>(&ctx, endpoints::SUBSCRIPTION, false);
        assert!(manual.on_mount().is_none());
        let outcome = manual
            .fetch_json(&serde_json::json!({"email": "ana@uni.ca"}), None)
            .await;
        assert_eq!(outcome, FetchOutcome::Data(serde_json::Value::Null));

        let sent = transport.requests_to("/subscription");
        assert_eq!(
            sent[0].body,
            Some(RequestBody::Json(serde_json::json!({"email": "ana@uni.ca"})))
        );
        assert_eq!(transport.requests().len(), 2);
    }
}
