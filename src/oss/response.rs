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

//! Routing of a response into the caller's result sink.

use crate::oss::error::{DecodeErr, Error};
use crate::oss::error_response::ServiceError;
use http::HeaderMap;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::str::FromStr;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// A value filled from an XML response body.
pub trait XmlTarget: Send {
    fn decode_xml(&mut self, body: &[u8]) -> Result<(), DecodeErr>;
}

impl<T: DeserializeOwned + Send> XmlTarget for T {
    fn decode_xml(&mut self, body: &[u8]) -> Result<(), DecodeErr> {
        *self = quick_xml::de::from_reader(body)?;
        Ok(())
    }
}

/// A value parsed from a single response header.
pub trait ScalarTarget: Send {
    fn parse_value(&mut self, value: &str) -> Result<(), String>;
}

impl<T> ScalarTarget for T
where
    T: FromStr + Send,
    T::Err: Display,
{
    fn parse_value(&mut self, value: &str) -> Result<(), String> {
        *self = value.parse().map_err(|e: T::Err| e.to_string())?;
        Ok(())
    }
}

/// Where a successful response goes.
pub enum ResultSink<'a> {
    /// Body is read and dropped
    Discard,
    /// Body is decoded as XML into the target
    Xml(&'a mut dyn XmlTarget),
    /// Body is copied to the writer chunk by chunk
    Stream(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// Response headers are stored
    Headers(&'a mut HeaderMap),
    /// One header is parsed into the target
    Scalar {
        header: &'static str,
        target: &'a mut dyn ScalarTarget,
    },
}

impl<'a> ResultSink<'a> {
    pub fn xml<T: DeserializeOwned + Send>(target: &'a mut T) -> Self {
        ResultSink::Xml(target)
    }

    pub fn scalar<T: ScalarTarget>(header: &'static str, target: &'a mut T) -> Self {
        ResultSink::Scalar { header, target }
    }
}

/// Sends a successful response to `sink`; any other status becomes a [`ServiceError`].
pub async fn dispatch(mut resp: reqwest::Response, sink: ResultSink<'_>) -> Result<(), Error> {
    let status = resp.status();
    log::debug!("response status: {status}");
    if !status.is_success() {
        return Err(ServiceError::from_http_response(resp).await);
    }

    match sink {
        ResultSink::Discard => {
            resp.bytes().await?;
        }
        ResultSink::Xml(target) => {
            let body = resp.bytes().await?;
            target.decode_xml(&body)?;
        }
        ResultSink::Stream(writer) => {
            while let Some(chunk) = resp.chunk().await? {
                writer.write_all(&chunk).await.map_err(DecodeErr::Write)?;
            }
            writer.flush().await.map_err(DecodeErr::Write)?;
        }
        ResultSink::Headers(headers) => {
            *headers = resp.headers().clone();
        }
        ResultSink::Scalar { header, target } => {
            let value = resp
                .headers()
                .get(header)
                .ok_or_else(|| DecodeErr::MissingHeader(header.to_string()))?;
            let value = value.to_str().map_err(|_| DecodeErr::InvalidHeader {
                name: header.to_string(),
                value: String::from_utf8_lossy(value.as_bytes()).to_string(),
            })?;
            target
                .parse_value(value)
                .map_err(|_| DecodeErr::InvalidHeader {
                    name: header.to_string(),
                    value: value.to_string(),
                })?;
        }
    }
    Ok(())
}
