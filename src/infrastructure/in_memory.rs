use crate::domain::ports::{HttpRequest, HttpResponse, HttpTransport};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A scripted, in-memory HTTP transport.
///
/// Responses are handed out in the order they were pushed, and every request
/// is recorded for later inspection. Clones share the same script and log, so
/// a test can keep a handle while the service owns another.
#[derive(Default, Clone)]
pub struct InMemoryTransport {
    responses: Arc<RwLock<VecDeque<HttpResponse>>>,
    requests: Arc<RwLock<Vec<HttpRequest>>>,
}

impl InMemoryTransport {
    /// Creates a transport with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the response returned by the next unanswered request.
    pub async fn push_response(&self, response: HttpResponse) {
        self.responses.write().await.push_back(response);
    }

    /// Every request received so far, oldest first.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl HttpTransport for InMemoryTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.write().await.push(request);

        let response = self.responses.write().await.pop_front();
        response.ok_or_else(|| std::io::Error::other("No scripted response left").into())
    }
}
