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

//! Error types returned by the OSS client.
//!
//! Errors are layered by the stage that produced them: name validation happens before any
//! request exists, build errors come out of the option pipeline, transport errors are
//! passed through from `reqwest`, service errors carry the decoded `<Error>` document and
//! decode errors are raised while filling a result sink from a successful response.

use crate::oss::error_response::ServiceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationErr {
    #[error("invalid bucket name '{name}': {reason}")]
    InvalidBucketName { name: String, reason: String },

    #[error("invalid object name: {0}")]
    InvalidObjectName(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid URI")]
    InvalidUri(#[from] http::uri::InvalidUri),
}

#[derive(Error, Debug)]
pub enum BuildErr {
    #[error("Content-MD5 is already set")]
    ContentMd5AlreadySet,

    #[error("Content-MD5 requested on a request without a body")]
    MissingBody,

    #[error("invalid header name '{0}'")]
    InvalidHeaderName(String),

    #[error("invalid value for header '{name}'")]
    InvalidHeaderValue { name: String },

    #[error("XML serialization failed: {0}")]
    XmlSerialize(String),

    #[error("unable to read body from {}: {source}", path.display())]
    BodyIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read CA certificates from {}: {source}", path.display())]
    CertificateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("post form requires credentials")]
    MissingCredentials,
}

#[derive(Error, Debug)]
pub enum DecodeErr {
    #[error("XML decode failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("response header '{0}' is missing")]
    MissingHeader(String),

    #[error("response header '{name}' has unparseable value '{value}'")]
    InvalidHeader { name: String, value: String },

    #[error("unable to write response body: {0}")]
    Write(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationErr),

    #[error("request build error: {0}")]
    Build(#[from] BuildErr),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Service(Box<ServiceError>),

    #[error("decode error: {0}")]
    Decode(#[from] DecodeErr),
}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        Error::Service(Box::new(err))
    }
}

impl Error {
    /// Returns the service error when the server rejected the request.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(e) => Some(&**e),
            _ => None,
        }
    }
}
