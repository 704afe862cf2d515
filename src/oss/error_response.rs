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

//! Decoding of the `<Error>` document returned with non-2xx responses.

use crate::oss::error::Error;
use crate::oss::header_constants::X_OSS_REQUEST_ID;
use crate::oss::utils::get_text_default;
use bytes::{Buf, Bytes};
use http::{HeaderMap, StatusCode};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error as ThisError;
use xmltree::Element;

/// Error codes returned by the service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OssErrorCode {
    /// No code could be read from the response
    #[default]
    Empty,
    AccessDenied,
    BucketAlreadyExists,
    BucketNotEmpty,
    EntityTooLarge,
    EntityTooSmall,
    InvalidAccessKeyId,
    InvalidArgument,
    InvalidBucketName,
    InvalidDigest,
    InvalidObjectName,
    InvalidPart,
    InvalidPartOrder,
    InvalidTargetBucketForLogging,
    InternalError,
    MalformedXML,
    MethodNotAllowed,
    MissingContentLength,
    NoSuchBucket,
    NoSuchKey,
    NoSuchUpload,
    NoSuchCORSConfiguration,
    NoSuchLifecycle,
    NoSuchWebsiteConfiguration,
    NotImplemented,
    ObjectNotAppendable,
    PositionNotEqualToLength,
    PreconditionFailed,
    RequestTimeTooSkewed,
    SignatureDoesNotMatch,
    TooManyBuckets,

    /// Any code not listed above, spelled as the server sent it
    Other(String),
}

const ALL_OSS_ERROR_CODE: &[OssErrorCode] = &[
    OssErrorCode::AccessDenied,
    OssErrorCode::BucketAlreadyExists,
    OssErrorCode::BucketNotEmpty,
    OssErrorCode::EntityTooLarge,
    OssErrorCode::EntityTooSmall,
    OssErrorCode::InvalidAccessKeyId,
    OssErrorCode::InvalidArgument,
    OssErrorCode::InvalidBucketName,
    OssErrorCode::InvalidDigest,
    OssErrorCode::InvalidObjectName,
    OssErrorCode::InvalidPart,
    OssErrorCode::InvalidPartOrder,
    OssErrorCode::InvalidTargetBucketForLogging,
    OssErrorCode::InternalError,
    OssErrorCode::MalformedXML,
    OssErrorCode::MethodNotAllowed,
    OssErrorCode::MissingContentLength,
    OssErrorCode::NoSuchBucket,
    OssErrorCode::NoSuchKey,
    OssErrorCode::NoSuchUpload,
    OssErrorCode::NoSuchCORSConfiguration,
    OssErrorCode::NoSuchLifecycle,
    OssErrorCode::NoSuchWebsiteConfiguration,
    OssErrorCode::NotImplemented,
    OssErrorCode::ObjectNotAppendable,
    OssErrorCode::PositionNotEqualToLength,
    OssErrorCode::PreconditionFailed,
    OssErrorCode::RequestTimeTooSkewed,
    OssErrorCode::SignatureDoesNotMatch,
    OssErrorCode::TooManyBuckets,
];

impl OssErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            OssErrorCode::Empty => "",
            OssErrorCode::AccessDenied => "AccessDenied",
            OssErrorCode::BucketAlreadyExists => "BucketAlreadyExists",
            OssErrorCode::BucketNotEmpty => "BucketNotEmpty",
            OssErrorCode::EntityTooLarge => "EntityTooLarge",
            OssErrorCode::EntityTooSmall => "EntityTooSmall",
            OssErrorCode::InvalidAccessKeyId => "InvalidAccessKeyId",
            OssErrorCode::InvalidArgument => "InvalidArgument",
            OssErrorCode::InvalidBucketName => "InvalidBucketName",
            OssErrorCode::InvalidDigest => "InvalidDigest",
            OssErrorCode::InvalidObjectName => "InvalidObjectName",
            OssErrorCode::InvalidPart => "InvalidPart",
            OssErrorCode::InvalidPartOrder => "InvalidPartOrder",
            OssErrorCode::InvalidTargetBucketForLogging => "InvalidTargetBucketForLogging",
            OssErrorCode::InternalError => "InternalError",
            OssErrorCode::MalformedXML => "MalformedXML",
            OssErrorCode::MethodNotAllowed => "MethodNotAllowed",
            OssErrorCode::MissingContentLength => "MissingContentLength",
            OssErrorCode::NoSuchBucket => "NoSuchBucket",
            OssErrorCode::NoSuchKey => "NoSuchKey",
            OssErrorCode::NoSuchUpload => "NoSuchUpload",
            OssErrorCode::NoSuchCORSConfiguration => "NoSuchCORSConfiguration",
            OssErrorCode::NoSuchLifecycle => "NoSuchLifecycle",
            OssErrorCode::NoSuchWebsiteConfiguration => "NoSuchWebsiteConfiguration",
            OssErrorCode::NotImplemented => "NotImplemented",
            OssErrorCode::ObjectNotAppendable => "ObjectNotAppendable",
            OssErrorCode::PositionNotEqualToLength => "PositionNotEqualToLength",
            OssErrorCode::PreconditionFailed => "PreconditionFailed",
            OssErrorCode::RequestTimeTooSkewed => "RequestTimeTooSkewed",
            OssErrorCode::SignatureDoesNotMatch => "SignatureDoesNotMatch",
            OssErrorCode::TooManyBuckets => "TooManyBuckets",
            OssErrorCode::Other(code) => code,
        }
    }
}

impl FromStr for OssErrorCode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        if s.is_empty() {
            return Ok(OssErrorCode::Empty);
        }
        Ok(ALL_OSS_ERROR_CODE
            .iter()
            .find(|code| code.as_str() == s)
            .cloned()
            .unwrap_or_else(|| OssErrorCode::Other(s.to_string())))
    }
}

impl fmt::Display for OssErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason an error body could not be decoded.
#[derive(Clone, Debug, ThisError)]
#[error("{0}")]
pub struct ErrorBodyParseError(String);

/// Error reported by the service for a non-2xx response.
#[derive(Clone, Debug)]
pub struct ServiceError {
    code: OssErrorCode,
    message: String,
    request_id: String,
    host_id: String,
    status_code: StatusCode,
    status: String,
    headers: HeaderMap,
    parse_error: Option<ErrorBodyParseError>,
}

impl ServiceError {
    /// Builds the error from a response status, headers and body.
    ///
    /// A body that is not an XML document is kept as the embedded parse error rather than
    /// being reported in place of the service error.
    pub fn from_response(status_code: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        let status = format!(
            "{} {}",
            status_code.as_str(),
            status_code.canonical_reason().unwrap_or_default()
        )
        .trim()
        .to_string();

        let mut err = ServiceError {
            code: OssErrorCode::Empty,
            message: String::new(),
            request_id: String::new(),
            host_id: String::new(),
            status_code,
            status,
            headers,
            parse_error: None,
        };

        match Element::parse(body.reader()) {
            Ok(root) => {
                err.code = get_text_default(&root, "Code")
                    .parse()
                    .unwrap_or_default();
                err.message = get_text_default(&root, "Message");
                err.request_id = get_text_default(&root, "RequestId");
                err.host_id = get_text_default(&root, "HostId");
            }
            Err(e) => {
                log::warn!("unable to parse error response ({}): {e}", err.status);
                err.parse_error = Some(ErrorBodyParseError(e.to_string()));
            }
        }
        if err.request_id.is_empty() {
            if let Some(id) = err.headers.get(X_OSS_REQUEST_ID).and_then(|v| v.to_str().ok()) {
                err.request_id = id.to_string();
            }
        }
        err
    }

    /// Reads the whole body of a failed response and classifies it.
    pub async fn from_http_response(resp: reqwest::Response) -> Error {
        let status_code = resp.status();
        let headers = resp.headers().clone();
        match resp.bytes().await {
            Ok(body) => ServiceError::from_response(status_code, headers, body).into(),
            Err(e) => Error::Transport(e),
        }
    }

    pub fn code(&self) -> &OssErrorCode {
        &self.code
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
    pub fn host_id(&self) -> &str {
        &self.host_id
    }
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }
    pub fn status(&self) -> &str {
        &self.status
    }
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
    pub fn parse_error(&self) -> Option<&ErrorBodyParseError> {
        self.parse_error.as_ref()
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(e) = &self.parse_error {
            return write!(f, "{}: ({e})", self.status);
        }
        write!(
            f,
            "{} ({}): {} ({}, {})",
            self.code, self.status, self.message, self.request_id, self.host_id
        )
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.parse_error
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCESS_DENIED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error>
  <Code>AccessDenied</Code>
  <Message>Query-string authentication requires the Signature, Expires and OSSAccessKeyId parameters</Message>
  <RequestId>1D842BC5425544BB</RequestId>
  <HostId>oss-cn-hangzhou.aliyuncs.com</HostId>
</Error>"#;

    #[test]
    fn test_error_code_roundtrip() {
        for code in ALL_OSS_ERROR_CODE {
            let s = code.to_string();
            let parsed: OssErrorCode = s.parse().unwrap();
            assert_eq!(parsed, *code, "round-trip failed for {s}");
        }
    }

    #[test]
    fn test_unknown_code_keeps_spelling() {
        let code: OssErrorCode = "SomeNewCode".parse().unwrap();
        assert_eq!(code, OssErrorCode::Other("SomeNewCode".into()));
        assert_eq!(code.to_string(), "SomeNewCode");
    }

    #[test]
    fn test_access_denied() {
        let err = ServiceError::from_response(
            StatusCode::FORBIDDEN,
            HeaderMap::new(),
            Bytes::from_static(ACCESS_DENIED.as_bytes()),
        );
        assert_eq!(err.code(), &OssErrorCode::AccessDenied);
        assert_eq!(
            err.message(),
            "Query-string authentication requires the Signature, Expires and OSSAccessKeyId parameters"
        );
        assert_eq!(err.request_id(), "1D842BC5425544BB");
        assert_eq!(err.host_id(), "oss-cn-hangzhou.aliyuncs.com");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.status(), "403 Forbidden");
        assert!(err.parse_error().is_none());
        assert_eq!(
            err.to_string(),
            "AccessDenied (403 Forbidden): Query-string authentication requires the Signature, \
             Expires and OSSAccessKeyId parameters (1D842BC5425544BB, oss-cn-hangzhou.aliyuncs.com)"
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        let body = "<Error><Code>\n NoSuchKey \n</Code><Message> gone </Message></Error>";
        let err = ServiceError::from_response(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            Bytes::from(body),
        );
        assert_eq!(err.code(), &OssErrorCode::NoSuchKey);
        assert_eq!(err.message(), "gone");
        assert_eq!(err.request_id(), "");
    }

    #[test]
    fn test_unparseable_body() {
        let err = ServiceError::from_response(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            Bytes::new(),
        );
        assert!(err.parse_error().is_some());
        assert_eq!(err.code(), &OssErrorCode::Empty);
        assert!(err.to_string().starts_with("404 Not Found: ("));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(X_OSS_REQUEST_ID, "5C3D9175B6FC201293AD4890".parse().unwrap());
        let err = ServiceError::from_response(StatusCode::NOT_FOUND, headers, Bytes::new());
        assert_eq!(err.request_id(), "5C3D9175B6FC201293AD4890");
    }
}
