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

//! Bucket sub-resource configuration: logging, website, referer, lifecycle and CORS.

use super::{OssClient, with_defaults, with_defaults_then};
use crate::oss::error::Error;
use crate::oss::options::{RequestOption, content_md5, sub_resource, xml_body};
use crate::oss::response::ResultSink;
use crate::oss::types::{
    BucketLoggingStatus, CorsConfiguration, LifecycleConfiguration, RefererConfiguration,
    WebsiteConfiguration,
};
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

impl OssClient {
    async fn put_sub_resource<T: Serialize>(
        &self,
        bucket: &str,
        name: &'static str,
        config: &T,
        with_md5: bool,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        let defaults = vec![sub_resource(name), xml_body(config)];
        let trailing = if with_md5 { vec![content_md5()] } else { Vec::new() };
        let options = with_defaults_then(defaults, options, trailing);
        self.execute(Method::PUT, bucket, "", options, ResultSink::Discard)
            .await
    }

    async fn get_sub_resource<T: DeserializeOwned + Default + Send>(
        &self,
        bucket: &str,
        name: &'static str,
        options: Vec<RequestOption>,
    ) -> Result<T, Error> {
        let mut result = T::default();
        let options = with_defaults(vec![sub_resource(name)], options);
        self.execute(Method::GET, bucket, "", options, ResultSink::xml(&mut result))
            .await?;
        Ok(result)
    }

    async fn delete_sub_resource(
        &self,
        bucket: &str,
        name: &'static str,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        let options = with_defaults(vec![sub_resource(name)], options);
        self.execute(Method::DELETE, bucket, "", options, ResultSink::Discard)
            .await
    }

    /// Enables access logging of `bucket` into the target bucket named in `status`.
    pub async fn put_bucket_logging(
        &self,
        bucket: &str,
        status: &BucketLoggingStatus,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.put_sub_resource(bucket, "logging", status, false, options)
            .await
    }

    pub async fn get_bucket_logging(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<BucketLoggingStatus, Error> {
        self.get_sub_resource(bucket, "logging", options).await
    }

    pub async fn delete_bucket_logging(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.delete_sub_resource(bucket, "logging", options).await
    }

    /// Configures static website hosting.
    pub async fn put_bucket_website(
        &self,
        bucket: &str,
        config: &WebsiteConfiguration,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.put_sub_resource(bucket, "website", config, false, options)
            .await
    }

    pub async fn get_bucket_website(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<WebsiteConfiguration, Error> {
        self.get_sub_resource(bucket, "website", options).await
    }

    pub async fn delete_bucket_website(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.delete_sub_resource(bucket, "website", options).await
    }

    /// Sets the referer whitelist used for hotlink protection.
    pub async fn put_bucket_referer(
        &self,
        bucket: &str,
        config: &RefererConfiguration,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.put_sub_resource(bucket, "referer", config, false, options)
            .await
    }

    pub async fn get_bucket_referer(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<RefererConfiguration, Error> {
        self.get_sub_resource(bucket, "referer", options).await
    }

    pub async fn put_bucket_lifecycle(
        &self,
        bucket: &str,
        config: &LifecycleConfiguration,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.put_sub_resource(bucket, "lifecycle", config, false, options)
            .await
    }

    pub async fn get_bucket_lifecycle(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<LifecycleConfiguration, Error> {
        self.get_sub_resource(bucket, "lifecycle", options).await
    }

    pub async fn delete_bucket_lifecycle(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.delete_sub_resource(bucket, "lifecycle", options).await
    }

    /// Replaces the CORS rules of the bucket. The body is sent with Content-MD5.
    pub async fn put_bucket_cors(
        &self,
        bucket: &str,
        config: &CorsConfiguration,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.put_sub_resource(bucket, "cors", config, true, options)
            .await
    }

    pub async fn get_bucket_cors(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<CorsConfiguration, Error> {
        self.get_sub_resource(bucket, "cors", options).await
    }

    pub async fn delete_bucket_cors(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.delete_sub_resource(bucket, "cors", options).await
    }
}
