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

//! The request under construction, before it is signed and sent.

use crate::oss::error::BuildErr;
use crate::oss::http::Url;
use crate::oss::multimap_ext::Multimap;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::path::PathBuf;
use typed_builder::TypedBuilder;

/// Payload of a request.
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Bytes(Bytes),
    /// Read from disk when the request is sent
    File(PathBuf),
}

impl RequestBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }

    /// Loads the body into memory, reading the file if there is one.
    pub fn buffer(&mut self) -> Result<Bytes, BuildErr> {
        let data = match self {
            RequestBody::Empty => return Err(BuildErr::MissingBody),
            RequestBody::Bytes(b) => b.clone(),
            RequestBody::File(path) => {
                let data = std::fs::read(&*path).map_err(|source| BuildErr::BodyIo {
                    path: path.clone(),
                    source,
                })?;
                Bytes::from(data)
            }
        };
        *self = RequestBody::Bytes(data.clone());
        Ok(data)
    }
}

#[derive(Clone, Debug, TypedBuilder)]
/// Generic OSS request
pub struct OssRequest {
    #[builder(!default)] // force required
    pub method: Method,

    #[builder(default, setter(into))]
    pub bucket: String,

    #[builder(default, setter(into))]
    pub object: String,

    #[builder(default)]
    pub query: Multimap,

    /// Filled in by the client once every option has run
    #[builder(default)]
    pub url: Url,

    #[builder(default)]
    pub headers: HeaderMap,

    #[builder(default)]
    pub body: RequestBody,

    /// Whether XML bodies start with an `<?xml ...?>` declaration
    #[builder(default = true)]
    pub xml_preamble: bool,
}

impl OssRequest {
    /// Sets a header, replacing any earlier value for the same name.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), BuildErr> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| BuildErr::InvalidHeaderName(name.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|_| BuildErr::InvalidHeaderValue {
            name: name.to_string(),
        })?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Returns the header value as a string, if present and printable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_set_header_last_write_wins() {
        let mut req = OssRequest::builder().method(Method::PUT).build();
        req.set_header("Content-Type", "text/plain").unwrap();
        req.set_header("content-type", "text/html").unwrap();
        assert_eq!(req.headers.get_all("Content-Type").iter().count(), 1);
        assert_eq!(req.header("Content-Type"), Some("text/html"));
    }

    #[test]
    fn test_set_header_rejects_invalid() {
        let mut req = OssRequest::builder().method(Method::GET).build();
        assert!(matches!(
            req.set_header("bad header", "v"),
            Err(BuildErr::InvalidHeaderName(_))
        ));
        assert!(matches!(
            req.set_header("x-oss-meta-a", "line\nbreak"),
            Err(BuildErr::InvalidHeaderValue { .. })
        ));
    }

    #[test]
    fn test_buffer_file_body() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"file contents").unwrap();

        let mut body = RequestBody::File(file.path().to_path_buf());
        assert_eq!(body.buffer().unwrap(), Bytes::from_static(b"file contents"));
        assert!(matches!(body, RequestBody::Bytes(_)));

        assert!(matches!(
            RequestBody::Empty.buffer(),
            Err(BuildErr::MissingBody)
        ));
    }
}
