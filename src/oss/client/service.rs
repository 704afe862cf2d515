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

use super::OssClient;
use crate::oss::error::Error;
use crate::oss::options::RequestOption;
use crate::oss::response::ResultSink;
use crate::oss::types::ListAllMyBucketsResult;
use http::Method;

impl OssClient {
    /// Lists the buckets owned by the requester.
    ///
    /// Accepts the `prefix`, `marker` and `max_keys` options to page through the list.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aliyun_oss::oss::OssClient;
    /// use aliyun_oss::oss::creds::StaticProvider;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let provider = StaticProvider::new("access-key-id", "access-key-secret", None);
    ///     let client = OssClient::new("oss-cn-hangzhou.aliyuncs.com".parse().unwrap(), Some(provider)).unwrap();
    ///     let result = client.get_service(Vec::new()).await.unwrap();
    ///     for bucket in result.buckets.bucket {
    ///         println!("{} {}", bucket.name, bucket.location);
    ///     }
    /// }
    /// ```
    pub async fn get_service(
        &self,
        options: Vec<RequestOption>,
    ) -> Result<ListAllMyBucketsResult, Error> {
        let mut result = ListAllMyBucketsResult::default();
        self.execute(Method::GET, "", "", options, ResultSink::xml(&mut result))
            .await?;
        Ok(result)
    }
}
