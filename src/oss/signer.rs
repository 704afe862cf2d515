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

//! OSS header signature (version 1)
//!
//! ```text
//! Signature = base64(HMAC-SHA1(AccessKeySecret,
//!     VERB + "\n"
//!     + Content-MD5 + "\n"
//!     + Content-Type + "\n"
//!     + Date + "\n"
//!     + CanonicalizedOSSHeaders
//!     + CanonicalizedResource))
//! ```

use crate::oss::error::BuildErr;
use crate::oss::header_constants::{CONTENT_MD5, X_OSS_PREFIX};
use crate::oss::multimap_ext::{Multimap, MultimapExt};
use crate::oss::utils::b64encode;
use hmac::{Hmac, Mac};
use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use http::{HeaderMap, HeaderValue, Method};
use sha1::Sha1;

/// Returns HMAC-SHA1 hash for given key and data
pub fn hmac_hash(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut hasher = Hmac::<Sha1>::new_from_slice(key).expect("HMAC can take key of any size");
    hasher.update(data);
    hasher.finalize().into_bytes().to_vec()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &http::HeaderName) -> std::borrow::Cow<'a, str> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .unwrap_or_default()
}

/// Returns the `x-oss-` headers as newline terminated `key:value` lines sorted by key.
///
/// Repeated values of one header stay in their original order.
pub fn get_canonicalized_oss_headers(headers: &HeaderMap) -> String {
    let mut lines: Vec<(&str, std::borrow::Cow<'_, str>)> = headers
        .iter()
        .filter(|(name, _)| name.as_str().starts_with(X_OSS_PREFIX))
        .map(|(name, value)| (name.as_str(), String::from_utf8_lossy(value.as_bytes())))
        .collect();
    lines.sort_by(|a, b| a.0.cmp(b.0));

    let mut canonical = String::new();
    for (name, value) in lines {
        canonical.push_str(name);
        canonical.push(':');
        canonical.push_str(&value);
        canonical.push('\n');
    }
    canonical
}

/// Returns the resource part of the string to sign.
///
/// The resource is always path style (`/bucket/object`) whatever style the URL uses.
pub fn get_canonicalized_resource(bucket: &str, object: &str, query: &Multimap) -> String {
    let mut resource = String::from("/");
    if !bucket.is_empty() {
        resource.push_str(bucket);
        resource.push('/');
        resource.push_str(object);
    }
    if !query.is_empty() {
        resource.push('?');
        resource.push_str(&query.to_query_string());
    }
    resource
}

/// Returns string-to-sign value of given request parts
pub fn get_string_to_sign(
    method: &Method,
    headers: &HeaderMap,
    canonicalized_resource: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}{}",
        method,
        header_str(headers, &CONTENT_MD5),
        header_str(headers, &CONTENT_TYPE),
        header_str(headers, &DATE),
        get_canonicalized_oss_headers(headers),
        canonicalized_resource
    )
}

/// Returns base64 encoded signature of given string-to-sign
pub fn get_signature(secret_key: &str, string_to_sign: &str) -> String {
    b64encode(hmac_hash(secret_key.as_bytes(), string_to_sign.as_bytes()))
}

/// Returns authorization value for given access key and signature
pub fn get_authorization(access_key: &str, signature: &str) -> String {
    format!("OSS {access_key}:{signature}")
}

/// Signs the request and inserts the `Authorization` header.
///
/// Must run after every other header has been set.
pub fn sign_v1(
    method: &Method,
    headers: &mut HeaderMap,
    bucket: &str,
    object: &str,
    query: &Multimap,
    access_key: &str,
    secret_key: &str,
) -> Result<(), BuildErr> {
    let resource = get_canonicalized_resource(bucket, object, query);
    let string_to_sign = get_string_to_sign(method, headers, &resource);
    log::debug!("string to sign: {string_to_sign:?}");

    let signature = get_signature(secret_key, &string_to_sign);
    let authorization = get_authorization(access_key, &signature);
    let value =
        HeaderValue::from_str(&authorization).map_err(|_| BuildErr::InvalidHeaderValue {
            name: AUTHORIZATION.to_string(),
        })?;
    headers.insert(AUTHORIZATION, value);
    Ok(())
}
