//! Fakes shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::net::api::AuthClient;
use crate::net::transport::{ApiRequest, ApiResponse, Transport};
use crate::session::SessionStore;
use crate::session::store::MemoryStore;

/// Transport that replays scripted responses and records every request.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<VecDeque<Result<ApiResponse, String>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(ApiResponse { status, body: body.to_owned() }));
        self
    }

    pub fn fail(self, detail: &str) -> Self {
        self.responses.borrow_mut().push_back(Err(detail.to_owned()));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_owned()))
    }
}

pub const TEST_BASE_URL: &str = "http://localhost:5000/api";

pub fn client(transport: FakeTransport) -> AuthClient<MemoryStore, FakeTransport> {
    AuthClient::new(TEST_BASE_URL, MemoryStore::new(), transport)
}

/// Memory-backed store that refuses writes to one key.
pub struct FailingStore {
    inner: MemoryStore,
    rejected_key: &'static str,
}

impl FailingStore {
    pub fn rejecting(key: &'static str) -> Self {
        Self { inner: MemoryStore::new(), rejected_key: key }
    }
}

impl SessionStore for FailingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.rejected_key {
            return Err(StorageError::Write { key: key.to_owned(), reason: "QuotaExceededError".to_owned() });
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}
