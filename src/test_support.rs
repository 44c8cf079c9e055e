//! Scripted in-memory transport shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use tokio::sync::oneshot;

use crate::error::ApiError;
use crate::models::{LookupId, User};
use crate::services::http::{HttpRequest, HttpResponse, HttpTransport, LocalFuture};

type Outcome = Result<HttpResponse, ApiError>;

enum Reply {
    Ready(Outcome),
    Deferred(oneshot::Receiver<Outcome>),
}

#[derive(Default)]
struct Inner {
    requests: RefCell<Vec<HttpRequest>>,
    queued: RefCell<HashMap<String, VecDeque<Reply>>>,
    sticky: RefCell<HashMap<String, Outcome>>,
}

/// Records every request; replies come from per-path queues, then sticky replies,
/// then a 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Rc<Inner>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> Rc<dyn HttpTransport> {
        Rc::new(self.clone())
    }

    /// Next request to `path` gets this reply
    pub fn reply_json(&self, path: &str, status: u16, body: &str) {
        self.push(path, Reply::Ready(Ok(HttpResponse::new(status, body))));
    }

    /// Every request to `path` without a queued reply gets this one
    pub fn always_json(&self, path: &str, status: u16, body: &str) {
        self.inner
            .sticky
            .borrow_mut()
            .insert(path.to_string(), Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, path: &str, error: ApiError) {
        self.push(path, Reply::Ready(Err(error)));
    }

    /// Next request to `path` stays pending until the returned sender fires
    pub fn defer(&self, path: &str) -> oneshot::Sender<Outcome> {
        let (tx, rx) = oneshot::channel();
        self.push(path, Reply::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.borrow().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    fn push(&self, path: &str, reply: Reply) {
        self.inner
            .queued
            .borrow_mut()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }
}

impl HttpTransport for MockTransport {
    fn send(&self, request: HttpRequest) -> LocalFuture<Result<HttpResponse, ApiError>> {
        let path = request.path.clone();
        self.inner.requests.borrow_mut().push(request);

        let queued = self
            .inner
            .queued
            .borrow_mut()
            .get_mut(&path)
            .and_then(|queue| queue.pop_front());
        let reply = match queued {
            Some(reply) => reply,
            None => Reply::Ready(match self.inner.sticky.borrow().get(&path) {
                Some(outcome) => outcome.clone(),
                None => Ok(HttpResponse::new(404, r#"{"error":"no mock for path"}"#)),
            }),
        };

        Box::pin(async move {
            match reply {
                Reply::Ready(outcome) => outcome,
                Reply::Deferred(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ApiError::Network("mock sender dropped".to_string()))),
            }
        })
    }
}

pub fn ok_json(body: &str) -> Outcome {
    Ok(HttpResponse::new(200, body))
}

pub fn student() -> User {
    User {
        id: LookupId::Numeric(7),
        firstname: "Ana".to_string(),
        lastname: "Silva".to_string(),
        email: "ana@uni.ca".to_string(),
        role: Some("Student".to_string()),
    }
}

pub fn admin() -> User {
    User {
        id: LookupId::Numeric(1),
        firstname: "Root".to_string(),
        lastname: "Admin".to_string(),
        email: "admin@uni.ca".to_string(),
        role: Some("Admin".to_string()),
    }
}

pub fn context(transport: &MockTransport) -> crate::state::AppContext {
    crate::state::AppContext::new(transport.handle(), crate::config::AppConfig::default())
}
