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

use super::{OssClient, with_defaults};
use crate::oss::error::Error;
use crate::oss::options::{RequestOption, acl as acl_header, sub_resource};
use crate::oss::response::ResultSink;
use crate::oss::types::{AccessControlPolicy, Acl, ListBucketResult, LocationConstraint};
use http::Method;

impl OssClient {
    /// Creates a bucket with the given canned ACL.
    ///
    /// To create it in a specific region pass
    /// [`bucket_location`](crate::oss::options::bucket_location).
    pub async fn put_bucket(
        &self,
        bucket: &str,
        acl: Acl,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        let options = with_defaults(vec![acl_header(acl)], options);
        self.execute(Method::PUT, bucket, "", options, ResultSink::Discard)
            .await
    }

    /// Lists objects in a bucket.
    ///
    /// Accepts the `prefix`, `marker`, `max_keys`, `delimiter` and `encoding_type` options.
    pub async fn get_bucket(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<ListBucketResult, Error> {
        let mut result = ListBucketResult::default();
        self.execute(Method::GET, bucket, "", options, ResultSink::xml(&mut result))
            .await?;
        Ok(result)
    }

    /// Deletes an empty bucket.
    pub async fn delete_bucket(&self, bucket: &str, options: Vec<RequestOption>) -> Result<(), Error> {
        self.execute(Method::DELETE, bucket, "", options, ResultSink::Discard)
            .await
    }

    pub async fn put_bucket_acl(
        &self,
        bucket: &str,
        acl: Acl,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        let options = with_defaults(vec![sub_resource("acl"), acl_header(acl)], options);
        self.execute(Method::PUT, bucket, "", options, ResultSink::Discard)
            .await
    }

    pub async fn get_bucket_acl(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<AccessControlPolicy, Error> {
        let mut result = AccessControlPolicy::default();
        let options = with_defaults(vec![sub_resource("acl")], options);
        self.execute(Method::GET, bucket, "", options, ResultSink::xml(&mut result))
            .await?;
        Ok(result)
    }

    /// Returns the region the bucket lives in.
    pub async fn get_bucket_location(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<LocationConstraint, Error> {
        let mut result = LocationConstraint::default();
        let options = with_defaults(vec![sub_resource("location")], options);
        self.execute(Method::GET, bucket, "", options, ResultSink::xml(&mut result))
            .await?;
        Ok(result)
    }
}
