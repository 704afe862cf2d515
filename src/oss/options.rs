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

//! Request options.
//!
//! An option is a one-shot mutation of an [`OssRequest`]. Operations take a list of options,
//! apply them in order and stop at the first failure. Signing is not an option; the client
//! always performs it after every option has run.

use crate::oss::error::{BuildErr, Error};
use crate::oss::header_constants::*;
use crate::oss::multimap_ext::MultimapExt;
use crate::oss::request::{OssRequest, RequestBody};
use crate::oss::types::{Acl, CreateBucketConfiguration, MetadataDirective};
use crate::oss::utils::{UtcTime, md5sum_hash, to_http_header_value};
use bytes::Bytes;
use http::header::{
    CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE,
    EXPIRES, IF_MATCH, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_UNMODIFIED_SINCE, RANGE,
};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// XML declaration placed in front of serialized bodies.
pub const XML_PREAMBLE: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

type OptionFn = Box<dyn FnOnce(&mut OssRequest) -> Result<(), Error> + Send>;

/// A single mutation applied to a request before it is signed.
pub struct RequestOption(OptionFn);

impl RequestOption {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut OssRequest) -> Result<(), Error> + Send + 'static,
    {
        RequestOption(Box::new(f))
    }

    pub fn apply(self, req: &mut OssRequest) -> Result<(), Error> {
        (self.0)(req)
    }
}

impl fmt::Debug for RequestOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequestOption")
    }
}

/// Applies options in list order. The first error aborts the remaining options.
pub fn apply_options(
    req: &mut OssRequest,
    options: impl IntoIterator<Item = RequestOption>,
) -> Result<(), Error> {
    for option in options {
        option.apply(req)?;
    }
    Ok(())
}

// region headers

/// Sets an arbitrary header. A later option for the same header wins.
pub fn header(name: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let (name, value) = (name.into(), value.into());
    RequestOption::new(move |req| Ok(req.set_header(&name, &value)?))
}

fn date_header(name: &'static str, time: UtcTime) -> RequestOption {
    header(name, to_http_header_value(time))
}

/// Sets the canned ACL of the bucket or object being written (`x-oss-acl`).
pub fn acl(acl: Acl) -> RequestOption {
    header(X_OSS_ACL, acl.as_str())
}

pub fn content_type(value: impl Into<String>) -> RequestOption {
    header(CONTENT_TYPE.as_str(), value)
}

pub fn cache_control(value: impl Into<String>) -> RequestOption {
    header(CACHE_CONTROL.as_str(), value)
}

/// Sets `Content-Disposition`, returned to readers of the object.
pub fn content_disposition(value: impl Into<String>) -> RequestOption {
    header(CONTENT_DISPOSITION.as_str(), value)
}

/// Sets `Content-Encoding`, returned to readers of the object.
pub fn content_encoding(value: impl Into<String>) -> RequestOption {
    header(CONTENT_ENCODING.as_str(), value)
}

/// Sets the `Expires` header stored with the object.
pub fn expires(time: UtcTime) -> RequestOption {
    date_header(EXPIRES.as_str(), time)
}

/// Sets user metadata, sent as `x-oss-meta-<key>`.
pub fn meta(key: impl AsRef<str>, value: impl Into<String>) -> RequestOption {
    header(format!("{X_OSS_META_PREFIX}{}", key.as_ref()), value)
}

/// Requests a byte range. `end` is inclusive; `None` reads to the end of the object.
pub fn range(start: u64, end: Option<u64>) -> RequestOption {
    let value = match end {
        Some(end) => format!("bytes={start}-{end}"),
        None => format!("bytes={start}-"),
    };
    header(RANGE.as_str(), value)
}

/// Only succeeds if the object changed after `time`.
pub fn if_modified_since(time: UtcTime) -> RequestOption {
    date_header(IF_MODIFIED_SINCE.as_str(), time)
}

/// Only succeeds if the object did not change after `time`.
pub fn if_unmodified_since(time: UtcTime) -> RequestOption {
    date_header(IF_UNMODIFIED_SINCE.as_str(), time)
}

/// Only succeeds if the object's ETag equals `etag`.
pub fn if_match(etag: impl Into<String>) -> RequestOption {
    header(IF_MATCH.as_str(), etag)
}

/// Only succeeds if the object's ETag differs from `etag`.
pub fn if_none_match(etag: impl Into<String>) -> RequestOption {
    header(IF_NONE_MATCH.as_str(), etag)
}

/// Overrides `Content-Type` on the response of a GET.
pub fn response_content_type(value: impl Into<String>) -> RequestOption {
    param(RESPONSE_CONTENT_TYPE, value)
}

/// Overrides `Content-Language` on the response of a GET.
pub fn response_content_language(value: impl Into<String>) -> RequestOption {
    param(RESPONSE_CONTENT_LANGUAGE, value)
}

/// Overrides `Cache-Control` on the response of a GET.
pub fn response_cache_control(value: impl Into<String>) -> RequestOption {
    param(RESPONSE_CACHE_CONTROL, value)
}

/// Overrides `Content-Disposition` on the response of a GET.
pub fn response_content_disposition(value: impl Into<String>) -> RequestOption {
    param(RESPONSE_CONTENT_DISPOSITION, value)
}

/// Overrides `Content-Encoding` on the response of a GET.
pub fn response_content_encoding(value: impl Into<String>) -> RequestOption {
    param(RESPONSE_CONTENT_ENCODING, value)
}

/// Overrides `Expires` on the response of a GET.
pub fn response_expires(time: UtcTime) -> RequestOption {
    param(RESPONSE_EXPIRES, to_http_header_value(time))
}

/// Chooses whether a copy keeps the source metadata or takes the request's.
pub fn metadata_directive(directive: MetadataDirective) -> RequestOption {
    header(X_OSS_METADATA_DIRECTIVE, directive.as_str())
}

/// Sets `x-oss-copy-source` to `/<bucket>/<object>`.
pub fn copy_source(bucket: impl AsRef<str>, object: impl AsRef<str>) -> RequestOption {
    header(
        X_OSS_COPY_SOURCE,
        format!("/{}/{}", bucket.as_ref(), object.as_ref()),
    )
}

/// Copies only if the source changed after `time`.
pub fn copy_source_if_modified_since(time: UtcTime) -> RequestOption {
    date_header(X_OSS_COPY_SOURCE_IF_MODIFIED_SINCE, time)
}

/// Copies only if the source did not change after `time`.
pub fn copy_source_if_unmodified_since(time: UtcTime) -> RequestOption {
    date_header(X_OSS_COPY_SOURCE_IF_UNMODIFIED_SINCE, time)
}

/// Copies only if the source's ETag equals `etag`.
pub fn copy_source_if_match(etag: impl Into<String>) -> RequestOption {
    header(X_OSS_COPY_SOURCE_IF_MATCH, etag)
}

/// Copies only if the source's ETag differs from `etag`.
pub fn copy_source_if_none_match(etag: impl Into<String>) -> RequestOption {
    header(X_OSS_COPY_SOURCE_IF_NONE_MATCH, etag)
}

/// Asks the service to encrypt the object at rest, e.g. with `AES256`.
pub fn server_side_encryption(algorithm: impl Into<String>) -> RequestOption {
    header(X_OSS_SERVER_SIDE_ENCRYPTION, algorithm)
}

/// Sets the ACL of the object written by a copy (`x-oss-object-acl`).
pub fn object_acl(acl: Acl) -> RequestOption {
    header(X_OSS_OBJECT_ACL, acl.as_str())
}

/// Origin of a CORS preflight.
pub fn origin(value: impl Into<String>) -> RequestOption {
    header(ORIGIN, value)
}

/// Method the preflighted request will use.
pub fn access_control_request_method(method: impl Into<String>) -> RequestOption {
    header(ACCESS_CONTROL_REQUEST_METHOD, method)
}

/// Comma separated headers the preflighted request will send.
pub fn access_control_request_headers(headers: impl Into<String>) -> RequestOption {
    header(ACCESS_CONTROL_REQUEST_HEADERS, headers)
}

// endregion

// region query parameters

/// Adds a query parameter. Parameters accumulate; an empty value is sent as the bare key.
pub fn param(key: impl Into<String>, value: impl Into<String>) -> RequestOption {
    let (key, value) = (key.into(), value.into());
    RequestOption::new(move |req| {
        req.query.add(key, value);
        Ok(())
    })
}

/// Selects a valueless sub-resource such as `acl`, `uploads` or `cors`.
pub fn sub_resource(name: impl Into<String>) -> RequestOption {
    let name = name.into();
    RequestOption::new(move |req| {
        req.query.add_flag(name);
        Ok(())
    })
}

/// Groups keys sharing a prefix up to `value` into common prefixes.
pub fn delimiter(value: impl Into<String>) -> RequestOption {
    param("delimiter", value)
}

/// Starts a listing after the key `value`.
pub fn marker(value: impl Into<String>) -> RequestOption {
    param("marker", value)
}

/// Caps the number of entries in one listing page.
pub fn max_keys(value: u32) -> RequestOption {
    param("max-keys", value.to_string())
}

/// Restricts a listing to keys starting with `value`.
pub fn prefix(value: impl Into<String>) -> RequestOption {
    param("prefix", value)
}

/// Asks the service to encode keys in a listing, e.g. with `url`.
pub fn encoding_type(value: impl Into<String>) -> RequestOption {
    param("encoding-type", value)
}

// endregion

// region bodies

fn set_content_length(req: &mut OssRequest, len: u64) -> Result<(), Error> {
    Ok(req.set_header(CONTENT_LENGTH.as_str(), &len.to_string())?)
}

/// Sends `data` as the body. Content-Length follows the data; Content-Type is left alone.
pub fn body(data: impl Into<Bytes>) -> RequestOption {
    let data = data.into();
    RequestOption::new(move |req| {
        set_content_length(req, data.len() as u64)?;
        req.body = RequestBody::Bytes(data);
        Ok(())
    })
}

/// Sends the file at `path` as the body.
///
/// Content-Length comes from the file size and Content-Type from the file extension,
/// falling back to `application/octet-stream`.
pub fn file_body(path: impl Into<PathBuf>) -> RequestOption {
    let path = path.into();
    RequestOption::new(move |req| {
        let meta = std::fs::metadata(&path).map_err(|source| BuildErr::BodyIo {
            path: path.clone(),
            source,
        })?;
        let mime = mime_guess::from_path(&path).first_or_octet_stream();
        set_content_length(req, meta.len())?;
        req.set_header(CONTENT_TYPE.as_str(), mime.essence_str())?;
        req.body = RequestBody::File(path);
        Ok(())
    })
}

/// Serializes `value` to XML and sends it as the body.
///
/// The document starts with an XML declaration unless the client disables it.
pub fn xml_body<T: Serialize>(value: &T) -> RequestOption {
    let xml = quick_xml::se::to_string(value).map_err(|e| BuildErr::XmlSerialize(e.to_string()));
    RequestOption::new(move |req| {
        let xml = xml?;
        let data = if req.xml_preamble {
            format!("{XML_PREAMBLE}{xml}")
        } else {
            xml
        };
        body(data).apply(req)
    })
}

/// Sends a `CreateBucketConfiguration` body naming the bucket's region.
pub fn bucket_location(location: impl Into<String>) -> RequestOption {
    xml_body(&CreateBucketConfiguration {
        location_constraint: location.into(),
    })
}

/// Computes Content-MD5 over the body that will be sent.
///
/// Fails if Content-MD5 is already set or the request has no body. A file body is read into
/// memory so the digest and the transmitted bytes agree.
pub fn content_md5() -> RequestOption {
    RequestOption::new(|req| {
        if req.headers.contains_key(CONTENT_MD5) {
            return Err(BuildErr::ContentMd5AlreadySet.into());
        }
        if req.body.is_empty() {
            return Err(BuildErr::MissingBody.into());
        }
        let data = req.body.buffer()?;
        req.set_header(CONTENT_MD5.as_str(), &md5sum_hash(&data))?;
        Ok(())
    })
}

// endregion

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oss::types::{DeleteObjects, ObjectToDelete};
    use chrono::{TimeZone, Utc};
    use http::Method;
    use std::io::Write;

    fn request() -> OssRequest {
        OssRequest::builder().method(Method::PUT).build()
    }

    #[test]
    fn test_body_sets_length_only() {
        let mut req = request();
        apply_options(&mut req, vec![body("sfweruewpinbeewa")]).unwrap();
        assert_eq!(req.header("Content-Length"), Some("16"));
        assert!(req.header("Content-Type").is_none());
        assert!(matches!(req.body, RequestBody::Bytes(ref b) if b.len() == 16));
    }

    #[test]
    fn test_header_last_write_wins() {
        let mut req = request();
        apply_options(
            &mut req,
            vec![
                content_type("application/octet-stream"),
                content_type("text/plain"),
            ],
        )
        .unwrap();
        assert_eq!(req.header("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn test_params_accumulate() {
        let mut req = request();
        apply_options(&mut req, vec![param("acl", ""), prefix("a/"), max_keys(10)]).unwrap();
        assert_eq!(req.query.to_query_string(), "acl&max-keys=10&prefix=a%2F");
    }

    #[test]
    fn test_first_error_aborts() {
        let mut req = request();
        let result = apply_options(
            &mut req,
            vec![
                header("bad header", "x"),
                header("x-oss-meta-after", "never"),
            ],
        );
        assert!(matches!(
            result,
            Err(Error::Build(BuildErr::InvalidHeaderName(_)))
        ));
        assert!(req.header("x-oss-meta-after").is_none());
    }

    #[test]
    fn test_content_md5() {
        let mut req = request();
        apply_options(&mut req, vec![body(""), content_md5()]).unwrap();
        assert_eq!(req.header("Content-MD5"), Some("1B2M2Y8AsgTpgAmY7PhCfg=="));
    }

    #[test]
    fn test_content_md5_twice_conflicts() {
        let mut req = request();
        let result = apply_options(&mut req, vec![body("abc"), content_md5(), content_md5()]);
        assert!(matches!(
            result,
            Err(Error::Build(BuildErr::ContentMd5AlreadySet))
        ));

        let mut req = request();
        let result = apply_options(
            &mut req,
            vec![
                body("abc"),
                header("Content-MD5", "ODBGOERFMDMzQTczRUY3NUE3NzA5QzdFNUYzMDQxNEM="),
                content_md5(),
            ],
        );
        assert!(matches!(
            result,
            Err(Error::Build(BuildErr::ContentMd5AlreadySet))
        ));
    }

    #[test]
    fn test_content_md5_without_body() {
        let mut req = request();
        assert!(matches!(
            apply_options(&mut req, vec![content_md5()]),
            Err(Error::Build(BuildErr::MissingBody))
        ));
    }

    #[test]
    fn test_file_body_and_md5() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"wefpofjwefew").unwrap();

        let mut req = request();
        apply_options(&mut req, vec![file_body(file.path()), content_md5()]).unwrap();

        assert_eq!(req.header("Content-Length"), Some("12"));
        assert_eq!(req.header("Content-Type"), Some("text/plain"));
        assert_eq!(
            req.header("Content-MD5").map(str::to_string),
            Some(md5sum_hash(b"wefpofjwefew"))
        );
        assert!(matches!(req.body, RequestBody::Bytes(_)));
    }

    #[test]
    fn test_file_body_missing_file() {
        let mut req = request();
        let result = apply_options(&mut req, vec![file_body("/nonexistent/oss/file")]);
        assert!(matches!(
            result,
            Err(Error::Build(BuildErr::BodyIo { .. }))
        ));
    }

    #[test]
    fn test_xml_body_preamble() {
        let delete = DeleteObjects {
            quiet: false,
            objects: vec![ObjectToDelete { key: "obj1".into() }],
        };
        let expected = "<Delete><Quiet>false</Quiet><Object><Key>obj1</Key></Object></Delete>";

        let mut req = request();
        apply_options(&mut req, vec![xml_body(&delete)]).unwrap();
        let RequestBody::Bytes(data) = &req.body else {
            panic!("expected buffered body");
        };
        assert_eq!(data.as_ref(), format!("{XML_PREAMBLE}{expected}").as_bytes());

        let mut req = OssRequest::builder()
            .method(Method::POST)
            .xml_preamble(false)
            .build();
        apply_options(&mut req, vec![xml_body(&delete)]).unwrap();
        let RequestBody::Bytes(data) = &req.body else {
            panic!("expected buffered body");
        };
        assert_eq!(data.as_ref(), expected.as_bytes());
        assert_eq!(req.header("Content-Length"), Some(expected.len().to_string().as_str()));
    }

    #[test]
    fn test_header_helpers() {
        let t = Utc.with_ymd_and_hms(2015, 10, 21, 15, 56, 35).unwrap();
        let mut req = request();
        apply_options(
            &mut req,
            vec![
                acl(Acl::PublicRead),
                meta("author", "foo@bar.com"),
                range(0, Some(99)),
                if_modified_since(t),
                copy_source("source-bucket", "source-object"),
                copy_source_if_modified_since(t),
                copy_source_if_unmodified_since(t),
                copy_source_if_match("xyzzy"),
                copy_source_if_none_match("xyzzy"),
                metadata_directive(MetadataDirective::Replace),
                server_side_encryption("AES256"),
                object_acl(Acl::Private),
            ],
        )
        .unwrap();
        assert_eq!(req.header("x-oss-acl"), Some("public-read"));
        assert_eq!(req.header("x-oss-meta-author"), Some("foo@bar.com"));
        assert_eq!(req.header("Range"), Some("bytes=0-99"));
        assert_eq!(
            req.header("If-Modified-Since"),
            Some("Wed, 21 Oct 2015 15:56:35 GMT")
        );
        assert_eq!(
            req.header("x-oss-copy-source"),
            Some("/source-bucket/source-object")
        );
        assert_eq!(req.header("x-oss-metadata-directive"), Some("REPLACE"));
        assert_eq!(
            req.header("X-Oss-Copy-Source-If-Modified-Since"),
            Some("Wed, 21 Oct 2015 15:56:35 GMT")
        );
        assert_eq!(
            req.header("X-Oss-Copy-Source-If-Unmodified-Since"),
            Some("Wed, 21 Oct 2015 15:56:35 GMT")
        );
        assert_eq!(req.header("X-Oss-Copy-Source-If-Match"), Some("xyzzy"));
        assert_eq!(req.header("X-Oss-Copy-Source-If-None-Match"), Some("xyzzy"));
        assert_eq!(req.header("X-Oss-Server-Side-Encryption"), Some("AES256"));
        assert_eq!(req.header("X-Oss-Object-Acl"), Some("private"));
    }

    #[test]
    fn test_sub_resource_renders_bare_key() {
        let mut req = request();
        apply_options(&mut req, vec![sub_resource("uploads"), prefix("a")]).unwrap();
        assert_eq!(req.query.to_query_string(), "prefix=a&uploads");
    }
}
