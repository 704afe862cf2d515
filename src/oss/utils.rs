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

//! Various utility and helper functions

use crate::oss::error::ValidationErr;
use base64::engine::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use md5::compute as md5compute;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use xmltree::Element;

pub use urlencoding::encode as urlencode;

/// Date and time with UTC timezone
pub type UtcTime = DateTime<Utc>;

/// Longest accepted object key, in bytes.
pub const MAX_OBJECT_KEY_LENGTH: usize = 1023;

/// Encodes data using base64 algorithm
pub fn b64encode<T: AsRef<[u8]>>(input: T) -> String {
    BASE64.encode(input)
}

/// Gets base64 encoded MD5 hash of given data
pub fn md5sum_hash(data: &[u8]) -> String {
    b64encode(md5compute(data).as_slice())
}

/// Gets current UTC time
pub fn utc_now() -> UtcTime {
    chrono::offset::Utc::now()
}

/// Formats time as an RFC 1123 HTTP date, e.g. `Wed, 21 Oct 2015 15:56:35 GMT`.
pub fn to_http_header_value(time: UtcTime) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

const OBJECT_KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Percent-encodes an object key for use as a URL path, keeping `/` separators.
pub fn urlencode_object_key(key: &str) -> String {
    utf8_percent_encode(key, OBJECT_KEY_ENCODE_SET).collect()
}

/// Validates given bucket name.
pub fn check_bucket_name(bucket_name: impl AsRef<str>) -> Result<(), ValidationErr> {
    lazy_static! {
        static ref VALID_BUCKET_NAME_REGEX: Regex =
            Regex::new("^[a-z0-9][a-z0-9-]{2,62}$").unwrap();
    }

    let name = bucket_name.as_ref();
    let invalid = |reason: &str| ValidationErr::InvalidBucketName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.len() < 3 {
        return Err(invalid("bucket name cannot be less than 3 characters"));
    }
    if name.len() > 63 {
        return Err(invalid("bucket name cannot be greater than 63 characters"));
    }
    if !VALID_BUCKET_NAME_REGEX.is_match(name) {
        return Err(invalid(
            "bucket name may only contain lowercase letters, digits and hyphens, and must not start with a hyphen",
        ));
    }

    Ok(())
}

/// Validates given object key.
pub fn check_object_name(object_name: impl AsRef<str>) -> Result<(), ValidationErr> {
    let name = object_name.as_ref();
    if name.is_empty() {
        return Err(ValidationErr::InvalidObjectName(
            "object name cannot be empty".into(),
        ));
    }
    if name.starts_with('/') || name.starts_with('\\') {
        return Err(ValidationErr::InvalidObjectName(format!(
            "object name '{name}' cannot start with '/' or '\\'"
        )));
    }
    if name.contains('\r') || name.contains('\n') {
        return Err(ValidationErr::InvalidObjectName(
            "object name cannot contain CR or LF".into(),
        ));
    }
    if name.len() > MAX_OBJECT_KEY_LENGTH {
        return Err(ValidationErr::InvalidObjectName(format!(
            "object name cannot be greater than {MAX_OBJECT_KEY_LENGTH} bytes, got {}",
            name.len()
        )));
    }
    Ok(())
}

/// Gets trimmed text value of given XML element for given tag, or empty string.
pub fn get_text_default(element: &Element, tag: &str) -> String {
    element
        .get_child(tag)
        .and_then(|v| v.get_text())
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}
