//! Scripted collaborators for tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Url;
use serde_json::{json, Value};

use crate::http::{HttpClient, HttpResponse, TransportError};

/// Replays queued responses in order and records every requested URL.
#[derive(Default)]
pub struct MockHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<Url>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ok(self, body: impl Into<String>) -> Self {
        self.with_status(200, body)
    }

    pub fn with_status(self, status: u16, body: impl Into<String>) -> Self {
        self.responses.lock().push_back(Ok(HttpResponse {
            status,
            body: body.into(),
        }));
        self
    }

    pub fn with_error(self, error: TransportError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requested_urls(&self) -> Vec<Url> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(url.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {}", url))
    }
}

pub fn media_item(id: &str) -> Value {
    json!({
        "id": id,
        "link": format!("https://instagram.com/p/{}/", id),
        "type": "image",
        "images": {
            "thumbnail": { "url": format!("https://cdn.instagram.com/{}_s.jpg", id), "width": 150, "height": 150 },
            "low_resolution": { "url": format!("https://cdn.instagram.com/{}_a.jpg", id), "width": 306, "height": 306 }
        }
    })
}

pub fn recent_media_body(items: Vec<Value>) -> String {
    json!({
        "pagination": {},
        "meta": { "code": 200 },
        "data": items
    })
    .to_string()
}
