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
use crate::oss::error::{BuildErr, Error};
use crate::oss::options::{body, content_type};
use crate::oss::post_object::{PostForm, PostOption, build_form};
use crate::oss::response::ResultSink;
use http::{HeaderMap, Method};
use std::path::Path;

impl OssClient {
    /// Uploads a local file the way a browser form would, authorized by a POST `policy`
    /// document (JSON). The policy is base64-encoded and signed with the client's secret.
    ///
    /// Returns the response headers.
    pub async fn post_object(
        &self,
        bucket: &str,
        object: &str,
        path: impl AsRef<Path>,
        policy: &str,
        options: Vec<PostOption>,
    ) -> Result<HeaderMap, Error> {
        let creds = self
            .shared
            .provider
            .as_ref()
            .map(|p| p.fetch())
            .ok_or(BuildErr::MissingCredentials)?;

        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| BuildErr::BodyIo {
                path: path.to_path_buf(),
                source,
            })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let form = build_form(
            PostForm::new(),
            object,
            &creds.access_key,
            &creds.secret_key,
            policy,
            &options,
            &filename,
            &data,
        );
        let form_content_type = form.content_type();

        let mut headers = HeaderMap::new();
        self.execute(
            Method::POST,
            bucket,
            "",
            vec![content_type(form_content_type), body(form.finish())],
            ResultSink::Headers(&mut headers),
        )
        .await?;
        Ok(headers)
    }
}
