//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use itinfra_client::{ClientConfig, ItInfrastructureClient, RestInvoker, RestRequest, Result};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const SERVER: &str = "cocoMDS1";
pub const USER: &str = "garygeeke";

/// Invoker that records every request and answers with a canned envelope.
pub struct RecordingInvoker {
    requests: Mutex<Vec<RestRequest>>,
    response: Value,
}

impl RecordingInvoker {
    pub fn new(response: Value) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response,
        })
    }

    /// Answers every call with an empty successful envelope.
    pub fn ok() -> Arc<Self> {
        Self::new(serde_json::json!({"relatedHTTPCode": 200}))
    }

    pub fn requests(&self) -> Vec<RestRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> RestRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was recorded")
    }
}

#[async_trait]
impl RestInvoker for RecordingInvoker {
    async fn invoke(&self, request: RestRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

/// A base client wired to `invoker`.
pub fn recording_client(invoker: Arc<RecordingInvoker>) -> ItInfrastructureClient {
    recording_client_with_page_size(invoker, 100)
}

pub fn recording_client_with_page_size(
    invoker: Arc<RecordingInvoker>,
    max_page_size: i32,
) -> ItInfrastructureClient {
    let config = ClientConfig::builder(SERVER, "https://localhost:9443")
        .max_page_size(max_page_size)
        .invoker(invoker)
        .build()
        .unwrap();
    ItInfrastructureClient::new(config).unwrap()
}

/// Path of a service URL, after the platform root.
pub fn service_path(suffix: &str) -> String {
    format!(
        "/servers/{}/open-metadata/access-services/it-infrastructure/users/{}/{}",
        SERVER, USER, suffix
    )
}
