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

//! Browser-style uploads through a signed POST policy form

use crate::oss::signer::hmac_hash;
use crate::oss::types::Acl;
use crate::oss::utils::b64encode;
use bytes::{BufMut, Bytes, BytesMut};

/// A form field sent ahead of the file part of a POST upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostOption {
    name: String,
    value: String,
}

impl PostOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        PostOption {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

pub fn post_cache_control(value: impl Into<String>) -> PostOption {
    PostOption::new("Cache-Control", value)
}

pub fn post_content_type(value: impl Into<String>) -> PostOption {
    PostOption::new("Content-Type", value)
}

pub fn post_content_disposition(value: impl Into<String>) -> PostOption {
    PostOption::new("Content-Disposition", value)
}

pub fn post_content_encoding(value: impl Into<String>) -> PostOption {
    PostOption::new("Content-Encoding", value)
}

pub fn post_expires(value: impl Into<String>) -> PostOption {
    PostOption::new("Expires", value)
}

/// Where the browser is redirected after a successful upload.
pub fn post_success_action_redirect(value: impl Into<String>) -> PostOption {
    PostOption::new("success_action_redirect", value)
}

/// Status code returned on success when no redirect is set (200, 201 or 204).
pub fn post_success_action_status(value: impl Into<String>) -> PostOption {
    PostOption::new("success_action_status", value)
}

pub fn post_meta(key: impl AsRef<str>, value: impl Into<String>) -> PostOption {
    PostOption::new(format!("x-oss-meta-{}", key.as_ref()), value)
}

pub fn post_server_side_encryption(value: impl Into<String>) -> PostOption {
    PostOption::new("x-oss-server-side-encryption", value)
}

pub fn post_object_acl(acl: Acl) -> PostOption {
    PostOption::new("x-oss-object-acl", acl.as_str())
}

/// Signature of a POST policy: base64 of HMAC-SHA1 over the base64-encoded policy.
pub fn post_policy_signature(secret_key: &str, encoded_policy: &str) -> String {
    b64encode(hmac_hash(secret_key.as_bytes(), encoded_policy.as_bytes()))
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// multipart/form-data body writer.
#[derive(Debug)]
pub struct PostForm {
    boundary: String,
    buf: BytesMut,
}

impl Default for PostForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PostForm {
    /// Creates a form with a random boundary.
    pub fn new() -> Self {
        Self::with_boundary(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        PostForm {
            boundary: boundary.into(),
            buf: BytesMut::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the request's Content-Type header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    fn start_part(&mut self, disposition: &str) {
        if !self.buf.is_empty() {
            self.buf.put_slice(b"\r\n");
        }
        self.buf.put_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.buf
            .put_slice(format!("Content-Disposition: {disposition}\r\n\r\n").as_bytes());
    }

    pub fn field(&mut self, name: &str, value: &str) -> &mut Self {
        self.start_part(&format!("form-data; name=\"{}\"", escape_quotes(name)));
        self.buf.put_slice(value.as_bytes());
        self
    }

    pub fn file(&mut self, filename: &str, data: &[u8]) -> &mut Self {
        self.start_part(&format!(
            "form-data; name=\"file\"; filename=\"{}\"",
            escape_quotes(filename)
        ));
        self.buf.put_slice(data);
        self
    }

    /// Writes the closing boundary and returns the body.
    pub fn finish(mut self) -> Bytes {
        if !self.buf.is_empty() {
            self.buf.put_slice(b"\r\n");
        }
        self.buf
            .put_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.buf.freeze()
    }
}

/// Lays out a complete upload form: user fields, then `key`, `OSSAccessKeyId`, `policy`,
/// `Signature` and finally the file.
#[allow(clippy::too_many_arguments)]
pub(crate) fn build_form(
    mut form: PostForm,
    object: &str,
    access_key: &str,
    secret_key: &str,
    policy: &str,
    options: &[PostOption],
    filename: &str,
    data: &[u8],
) -> PostForm {
    let encoded_policy = b64encode(policy);
    for option in options {
        form.field(&option.name, &option.value);
    }
    form.field("key", object)
        .field("OSSAccessKeyId", access_key)
        .field("policy", &encoded_policy)
        .field(
            "Signature",
            &post_policy_signature(secret_key, &encoded_policy),
        )
        .file(filename, data);
    form
}
