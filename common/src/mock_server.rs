// Aliyun OSS Rust Library for Object Storage Service
// Copyright 2022 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Recording HTTP server for integration tests, backed by `wiremock`.
//!
//! Every request gets the same canned [`MockResponse`]; the requests themselves are read
//! back from the server's journal.

use bytes::Bytes;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A request as seen on the wire.
#[derive(Clone, Debug, Default)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query, exactly as sent
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Case-insensitive header lookup; returns the first value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }
}

impl From<&wiremock::Request> for RecordedRequest {
    fn from(req: &wiremock::Request) -> Self {
        let target = match req.url.query() {
            Some(query) => format!("{}?{query}", req.url.path()),
            None => req.url.path().to_string(),
        };
        RecordedRequest {
            method: req.method.to_string(),
            target,
            headers: req
                .headers
                .iter()
                .map(|(k, v)| {
                    (
                        k.as_str().to_string(),
                        String::from_utf8_lossy(v.as_bytes()).into_owned(),
                    )
                })
                .collect(),
            body: Bytes::from(req.body.clone()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl MockResponse {
    pub fn new(status: u16) -> Self {
        MockResponse {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    fn template(&self) -> ResponseTemplate {
        let mut template = ResponseTemplate::new(self.status);
        for (name, value) in &self.headers {
            template = template.insert_header(name.as_str(), value.as_str());
        }
        template.set_body_bytes(self.body.to_vec())
    }
}

/// Serves one canned response and records what the client sent.
pub struct RecordingServer {
    server: MockServer,
}

impl RecordingServer {
    pub async fn start(response: MockResponse) -> Self {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(response.template())
            .mount(&server)
            .await;
        RecordingServer { server }
    }

    pub fn endpoint(&self) -> String {
        self.server.uri()
    }

    /// Returns the single request the server received.
    pub async fn request(self) -> RecordedRequest {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording is enabled");
        assert_eq!(requests.len(), 1, "expected exactly one request");
        let req = RecordedRequest::from(&requests[0]);
        log::debug!("mock server received {} {}", req.method, req.target);
        req
    }
}
