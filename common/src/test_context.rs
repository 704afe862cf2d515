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

use crate::mock_server::{MockResponse, RecordedRequest, RecordingServer};
use aliyun_oss::oss::clock::FixedClock;
use aliyun_oss::oss::creds::StaticProvider;
use aliyun_oss::oss::utils::UtcTime;
use aliyun_oss::oss::{OssClient, OssClientBuilder};
use chrono::{TimeZone, Utc};

pub const ACCESS_KEY_ID: &str = "ayahghai0juiSie";
pub const ACCESS_KEY_SECRET: &str = "quitie*ph3Lah{F";
pub const DATE: &str = "Wed, 21 Oct 2015 15:56:35 GMT";
pub const BUCKET: &str = "bucket-name";
pub const OBJECT: &str = "object/name";

pub fn test_time() -> UtcTime {
    Utc.with_ymd_and_hms(2015, 10, 21, 15, 56, 35).unwrap()
}

/// `Authorization` header value expected for `signature`.
pub fn authorization(signature: &str) -> String {
    format!("OSS {ACCESS_KEY_ID}:{signature}")
}

/// A client pointed at a mock server, with fixed credentials and time.
pub struct TestContext {
    pub client: OssClient,
    server: RecordingServer,
}

impl TestContext {
    pub async fn new(response: MockResponse) -> Self {
        let _ = env_logger::try_init();
        let server = RecordingServer::start(response).await;
        let http_client = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = OssClientBuilder::new(server.endpoint().parse().unwrap())
            .http_client(http_client)
            .provider(Some(StaticProvider::new(
                ACCESS_KEY_ID,
                ACCESS_KEY_SECRET,
                None,
            )))
            .clock(FixedClock(test_time()))
            .omit_xml_declaration(true)
            .build()
            .unwrap();
        TestContext { client, server }
    }

    /// The request the server received.
    pub async fn request(self) -> RecordedRequest {
        self.server.request().await
    }

    /// Asserts the fields every signed request carries.
    pub fn assert_signed(req: &RecordedRequest, method: &str, target: &str, signature: &str) {
        assert_eq!(req.method, method);
        assert_eq!(req.target, target);
        assert_eq!(req.header("Date"), Some(DATE));
        assert_eq!(
            req.header("Authorization"),
            Some(authorization(signature).as_str())
        );
    }
}
