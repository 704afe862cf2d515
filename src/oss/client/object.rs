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

use super::{OssClient, with_defaults, with_defaults_then};
use crate::oss::error::{BuildErr, Error};
use crate::oss::header_constants::{DEFAULT_CONTENT_TYPE, X_OSS_NEXT_APPEND_POSITION};
use crate::oss::options::{
    RequestOption, acl as acl_header, body, content_md5, content_type, copy_source, file_body,
    param, sub_resource, xml_body,
};
use crate::oss::response::ResultSink;
use crate::oss::types::{
    AccessControlPolicy, Acl, AppendPosition, CopyObjectResult, DeleteObjects, DeleteResult,
};
use bytes::Bytes;
use http::{HeaderMap, Method};
use std::path::Path;
use tokio::io::AsyncWrite;

impl OssClient {
    /// Uploads `data` as an object.
    ///
    /// Content-Type defaults to `application/octet-stream`; pass
    /// [`content_type`](crate::oss::options::content_type) to override it.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use aliyun_oss::oss::OssClient;
    /// use aliyun_oss::oss::creds::StaticProvider;
    /// use aliyun_oss::oss::options::{content_type, meta};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let provider = StaticProvider::new("access-key-id", "access-key-secret", None);
    ///     let client = OssClient::new("oss-cn-hangzhou.aliyuncs.com".parse().unwrap(), Some(provider)).unwrap();
    ///     client
    ///         .put_object(
    ///             "bucket-name",
    ///             "hello.txt",
    ///             "hello world",
    ///             vec![content_type("text/plain"), meta("author", "me")],
    ///         )
    ///         .await
    ///         .unwrap();
    /// }
    /// ```
    pub async fn put_object(
        &self,
        bucket: &str,
        object: &str,
        data: impl Into<Bytes>,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        let defaults = vec![content_type(DEFAULT_CONTENT_TYPE), body(data)];
        self.execute(
            Method::PUT,
            bucket,
            object,
            with_defaults(defaults, options),
            ResultSink::Discard,
        )
        .await
    }

    /// Uploads a local file. Content-Type is guessed from the file extension.
    pub async fn put_object_from_file(
        &self,
        bucket: &str,
        object: &str,
        path: impl AsRef<Path>,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        let defaults = vec![file_body(path.as_ref())];
        self.execute(
            Method::PUT,
            bucket,
            object,
            with_defaults(defaults, options),
            ResultSink::Discard,
        )
        .await
    }

    /// Downloads an object into `writer`.
    ///
    /// Use [`range`](crate::oss::options::range) and the conditional options to
    /// read part of an object or only when it changed.
    pub async fn get_object(
        &self,
        bucket: &str,
        object: &str,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.execute(Method::GET, bucket, object, options, ResultSink::Stream(writer))
            .await
    }

    /// Downloads an object into a local file, creating or truncating it.
    pub async fn get_object_to_file(
        &self,
        bucket: &str,
        object: &str,
        path: impl AsRef<Path>,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(|source| BuildErr::BodyIo {
                path: path.to_path_buf(),
                source,
            })?;
        self.get_object(bucket, object, &mut file, options).await
    }

    /// Appends `data` to an appendable object at `position`, creating the object when
    /// `position` is 0. Returns the position for the next append.
    pub async fn append_object(
        &self,
        bucket: &str,
        object: &str,
        data: impl Into<Bytes>,
        position: u64,
        options: Vec<RequestOption>,
    ) -> Result<AppendPosition, Error> {
        let defaults = vec![
            sub_resource("append"),
            param("position", position.to_string()),
            content_type(DEFAULT_CONTENT_TYPE),
            body(data),
        ];
        let mut next = AppendPosition::default();
        self.execute(
            Method::POST,
            bucket,
            object,
            with_defaults(defaults, options),
            ResultSink::scalar(X_OSS_NEXT_APPEND_POSITION, &mut next),
        )
        .await?;
        Ok(next)
    }

    /// Copies `src_bucket/src_object` to `bucket/object` on the server side.
    pub async fn copy_object(
        &self,
        src_bucket: &str,
        src_object: &str,
        bucket: &str,
        object: &str,
        options: Vec<RequestOption>,
    ) -> Result<CopyObjectResult, Error> {
        let mut result = CopyObjectResult::default();
        let defaults = vec![copy_source(src_bucket, src_object)];
        self.execute(
            Method::PUT,
            bucket,
            object,
            with_defaults(defaults, options),
            ResultSink::xml(&mut result),
        )
        .await?;
        Ok(result)
    }

    pub async fn delete_object(
        &self,
        bucket: &str,
        object: &str,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.execute(Method::DELETE, bucket, object, options, ResultSink::Discard)
            .await
    }

    /// Deletes up to 1000 objects in one request.
    ///
    /// In quiet mode the result only lists keys that failed, so it is usually empty.
    pub async fn delete_objects<I, S>(
        &self,
        bucket: &str,
        keys: I,
        quiet: bool,
        options: Vec<RequestOption>,
    ) -> Result<DeleteResult, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = DeleteObjects::new(quiet, keys);
        let defaults = vec![sub_resource("delete"), xml_body(&request)];
        let mut result = DeleteResult::default();
        self.execute(
            Method::POST,
            bucket,
            "",
            with_defaults_then(defaults, options, vec![content_md5()]),
            ResultSink::xml(&mut result),
        )
        .await?;
        Ok(result)
    }

    /// Returns the object's metadata headers without its body.
    pub async fn head_object(
        &self,
        bucket: &str,
        object: &str,
        options: Vec<RequestOption>,
    ) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        self.execute(
            Method::HEAD,
            bucket,
            object,
            options,
            ResultSink::Headers(&mut headers),
        )
        .await?;
        Ok(headers)
    }

    pub async fn put_object_acl(
        &self,
        bucket: &str,
        object: &str,
        acl: Acl,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        let defaults = vec![sub_resource("acl"), acl_header(acl)];
        self.execute(
            Method::PUT,
            bucket,
            object,
            with_defaults(defaults, options),
            ResultSink::Discard,
        )
        .await
    }

    pub async fn get_object_acl(
        &self,
        bucket: &str,
        object: &str,
        options: Vec<RequestOption>,
    ) -> Result<AccessControlPolicy, Error> {
        let mut result = AccessControlPolicy::default();
        self.execute(
            Method::GET,
            bucket,
            object,
            with_defaults(vec![sub_resource("acl")], options),
            ResultSink::xml(&mut result),
        )
        .await?;
        Ok(result)
    }

    /// Sends a CORS preflight request and returns the response headers.
    ///
    /// Pass [`origin`](crate::oss::options::origin) and
    /// [`access_control_request_method`](crate::oss::options::access_control_request_method).
    pub async fn option_object(
        &self,
        bucket: &str,
        object: &str,
        options: Vec<RequestOption>,
    ) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        self.execute(
            Method::OPTIONS,
            bucket,
            object,
            options,
            ResultSink::Headers(&mut headers),
        )
        .await?;
        Ok(headers)
    }
}
