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

//! Header names used on OSS requests and responses.
//!
//! Names are lowercase so they can be handed to [`http::HeaderName::from_static`].

use http::HeaderName;

/// `Content-MD5` is not among the standard headers `http` predefines.
pub const CONTENT_MD5: HeaderName = HeaderName::from_static("content-md5");

pub const X_OSS_PREFIX: &str = "x-oss-";
pub const X_OSS_META_PREFIX: &str = "x-oss-meta-";

pub const X_OSS_ACL: &str = "x-oss-acl";
pub const X_OSS_COPY_SOURCE: &str = "x-oss-copy-source";
pub const X_OSS_COPY_SOURCE_IF_MATCH: &str = "x-oss-copy-source-if-match";
pub const X_OSS_COPY_SOURCE_IF_NONE_MATCH: &str = "x-oss-copy-source-if-none-match";
pub const X_OSS_COPY_SOURCE_IF_MODIFIED_SINCE: &str = "x-oss-copy-source-if-modified-since";
pub const X_OSS_COPY_SOURCE_IF_UNMODIFIED_SINCE: &str = "x-oss-copy-source-if-unmodified-since";
pub const X_OSS_OBJECT_ACL: &str = "x-oss-object-acl";
pub const X_OSS_SERVER_SIDE_ENCRYPTION: &str = "x-oss-server-side-encryption";
pub const X_OSS_METADATA_DIRECTIVE: &str = "x-oss-metadata-directive";
pub const X_OSS_SECURITY_TOKEN: &str = "x-oss-security-token";
pub const X_OSS_NEXT_APPEND_POSITION: &str = "x-oss-next-append-position";
pub const X_OSS_REQUEST_ID: &str = "x-oss-request-id";

pub const ETAG: &str = "etag";
pub const ORIGIN: &str = "origin";
pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "access-control-request-method";
pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "access-control-request-headers";

pub const RESPONSE_CONTENT_TYPE: &str = "response-content-type";
pub const RESPONSE_CONTENT_LANGUAGE: &str = "response-content-language";
pub const RESPONSE_CACHE_CONTROL: &str = "response-cache-control";
pub const RESPONSE_CONTENT_DISPOSITION: &str = "response-content-disposition";
pub const RESPONSE_CONTENT_ENCODING: &str = "response-content-encoding";
pub const RESPONSE_EXPIRES: &str = "response-expires";

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
