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

//! # Aliyun OSS Rust client (`aliyun-oss`)
//!
//! An async client for the Aliyun Object Storage Service (OSS). Every operation is a method
//! on [`oss::OssClient`] that takes the bucket and object names, the operation's own
//! arguments and a trailing list of [`oss::options::RequestOption`]s for headers, query
//! parameters and bodies.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use aliyun_oss::oss::OssClient;
//! use aliyun_oss::oss::creds::StaticProvider;
//! use aliyun_oss::oss::options::prefix;
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = StaticProvider::new("access-key-id", "access-key-secret", None);
//!     let client = OssClient::new("oss-cn-hangzhou.aliyuncs.com".parse().unwrap(), Some(provider))
//!         .unwrap();
//!
//!     let listing = client
//!         .get_bucket("my-bucket", vec![prefix("photos/")])
//!         .await
//!         .expect("request failed");
//!
//!     for object in listing.contents {
//!         println!("{} {}", object.key, object.size);
//!     }
//! }
//! ```
//!
//! ## Design
//! - Requests are signed with the OSS header signature (HMAC-SHA1) after all options apply
//! - Non-2xx responses become [`oss::error_response::ServiceError`] with a typed error code
//! - Successful responses are routed into a [`oss::response::ResultSink`]: decoded XML,
//!   a streamed body, the response headers or a single parsed header

#![allow(clippy::result_large_err)]
pub mod oss;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;
