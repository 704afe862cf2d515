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
use crate::oss::error::Error;
use crate::oss::header_constants::{DEFAULT_CONTENT_TYPE, ETAG};
use crate::oss::options::{
    RequestOption, body, content_md5, content_type, copy_source, param, sub_resource,
    xml_body,
};
use crate::oss::response::ResultSink;
use crate::oss::types::{
    CompleteMultipartUpload, CompleteMultipartUploadResult, CopyPartResult,
    InitiateMultipartUploadResult, ListMultipartUploadsResult, ListPartsResult, UploadPartResult,
};
use bytes::Bytes;
use http::Method;

fn upload_params(upload_id: &str, part_number: u16) -> Vec<RequestOption> {
    vec![
        param("partNumber", part_number.to_string()),
        param("uploadId", upload_id),
    ]
}

impl OssClient {
    /// Starts a multipart upload and returns its upload id.
    pub async fn init_upload(
        &self,
        bucket: &str,
        object: &str,
        options: Vec<RequestOption>,
    ) -> Result<InitiateMultipartUploadResult, Error> {
        let mut result = InitiateMultipartUploadResult::default();
        let defaults = vec![sub_resource("uploads"), content_type(DEFAULT_CONTENT_TYPE)];
        self.execute(
            Method::POST,
            bucket,
            object,
            with_defaults(defaults, options),
            ResultSink::xml(&mut result),
        )
        .await?;
        Ok(result)
    }

    /// Uploads one part. Part numbers run from 1 to 10000.
    pub async fn upload_part(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &str,
        part_number: u16,
        data: impl Into<Bytes>,
        options: Vec<RequestOption>,
    ) -> Result<UploadPartResult, Error> {
        let mut defaults = upload_params(upload_id, part_number);
        defaults.push(content_type(DEFAULT_CONTENT_TYPE));
        defaults.push(body(data));

        let mut result = UploadPartResult::default();
        self.execute(
            Method::PUT,
            bucket,
            object,
            with_defaults(defaults, options),
            ResultSink::scalar(ETAG, &mut result),
        )
        .await?;
        Ok(result)
    }

    /// Uses an existing object as the data of one part.
    #[allow(clippy::too_many_arguments)]
    pub async fn upload_part_copy(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &str,
        part_number: u16,
        src_bucket: &str,
        src_object: &str,
        options: Vec<RequestOption>,
    ) -> Result<CopyPartResult, Error> {
        let mut defaults = upload_params(upload_id, part_number);
        defaults.push(copy_source(src_bucket, src_object));

        let mut result = CopyPartResult::default();
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

    /// Assembles the uploaded parts into the final object.
    pub async fn complete_upload(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &str,
        parts: &CompleteMultipartUpload,
        options: Vec<RequestOption>,
    ) -> Result<CompleteMultipartUploadResult, Error> {
        let defaults = vec![
            param("uploadId", upload_id),
            content_type(DEFAULT_CONTENT_TYPE),
            xml_body(parts),
        ];
        let mut result = CompleteMultipartUploadResult::default();
        self.execute(
            Method::POST,
            bucket,
            object,
            with_defaults_then(defaults, options, vec![content_md5()]),
            ResultSink::xml(&mut result),
        )
        .await?;
        Ok(result)
    }

    pub async fn abort_upload(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &str,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        self.execute(
            Method::DELETE,
            bucket,
            object,
            with_defaults(vec![param("uploadId", upload_id)], options),
            ResultSink::Discard,
        )
        .await
    }

    /// Lists multipart uploads that were started and not yet completed or aborted.
    pub async fn list_uploads(
        &self,
        bucket: &str,
        options: Vec<RequestOption>,
    ) -> Result<ListMultipartUploadsResult, Error> {
        let mut result = ListMultipartUploadsResult::default();
        self.execute(
            Method::GET,
            bucket,
            "",
            with_defaults(vec![sub_resource("uploads")], options),
            ResultSink::xml(&mut result),
        )
        .await?;
        Ok(result)
    }

    pub async fn list_parts(
        &self,
        bucket: &str,
        object: &str,
        upload_id: &str,
        options: Vec<RequestOption>,
    ) -> Result<ListPartsResult, Error> {
        let mut result = ListPartsResult::default();
        self.execute(
            Method::GET,
            bucket,
            object,
            with_defaults(vec![param("uploadId", upload_id)], options),
            ResultSink::xml(&mut result),
        )
        .await?;
        Ok(result)
    }
}
