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

//! HTTP URL definitions

use crate::oss::error::ValidationErr;
use crate::oss::multimap_ext::{Multimap, MultimapExt};
use crate::oss::utils::{check_bucket_name, check_object_name, urlencode_object_key};
use http::Uri;
use std::fmt;
use std::str::FromStr;

/// Domains served by the provider; their endpoints address buckets virtual-hosted style.
pub const PROVIDER_DOMAINS: [&str; 2] = ["aliyuncs.com", "aliyun-inc.com"];

#[derive(Clone, Debug, Default)]
/// Represents HTTP URL
pub struct Url {
    pub https: bool,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub query: Multimap,
}

impl Url {
    pub fn host_header_value(&self) -> String {
        if self.port > 0 {
            return format!("{}:{}", self.host, self.port);
        }
        self.host.clone()
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.host.is_empty() {
            return Err(fmt::Error);
        }

        f.write_str(if self.https { "https://" } else { "http://" })?;
        f.write_str(&self.host_header_value())?;

        if !self.path.starts_with('/') {
            f.write_str("/")?;
        }
        f.write_str(&self.path)?;

        if !self.query.is_empty() {
            f.write_str("?")?;
            f.write_str(&self.query.to_query_string())?;
        }

        Ok(())
    }
}

/// Returns true when `host` belongs to one of [`PROVIDER_DOMAINS`].
pub fn match_provider_domain(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    PROVIDER_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}

#[derive(Clone, Debug)]
/// Represents the base URL of an OSS endpoint
pub struct BaseUrl {
    pub https: bool,
    host: String,
    port: u16,
    pub virtual_style: bool,
}

impl FromStr for BaseUrl {
    type Err = ValidationErr;

    /// Convert a string to a BaseUrl.
    ///
    /// An endpoint without a scheme is treated as plain `http`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aliyun_oss::oss::http::BaseUrl;
    ///
    /// // Public endpoint, addressed virtual-hosted style
    /// let base_url: BaseUrl = "oss-cn-hangzhou.aliyuncs.com".parse().unwrap();
    /// assert!(base_url.virtual_style);
    /// // Private host with port, addressed path style
    /// let base_url: BaseUrl = "http://127.0.0.1:9000".parse().unwrap();
    /// assert!(!base_url.virtual_style);
    /// ```
    fn from_str(s: &str) -> Result<Self, ValidationErr> {
        let url = s.parse::<Uri>()?;

        let https = match url.scheme() {
            None => false,
            Some(scheme) => match scheme.as_str() {
                "http" => false,
                "https" => true,
                _ => {
                    return Err(ValidationErr::InvalidBaseUrl(
                        "scheme must be http or https".into(),
                    ));
                }
            },
        };

        let host = match url.host() {
            Some(h) if !h.is_empty() => h,
            _ => {
                return Err(ValidationErr::InvalidBaseUrl(
                    "valid host must be provided".into(),
                ));
            }
        };

        let host = if host.parse::<std::net::Ipv6Addr>().is_ok() {
            format!("[{host}]")
        } else {
            host.to_string()
        };

        let mut port = url.port_u16().unwrap_or(0);
        if (https && port == 443) || (!https && port == 80) {
            port = 0;
        }

        if url.path() != "/" && !url.path().is_empty() {
            return Err(ValidationErr::InvalidBaseUrl(
                "path must be empty for base URL".into(),
            ));
        }

        if url.query().is_some() {
            return Err(ValidationErr::InvalidBaseUrl(
                "query must be none for base URL".into(),
            ));
        }

        let virtual_style = match_provider_domain(&host);

        Ok(BaseUrl {
            https,
            host,
            port,
            virtual_style,
        })
    }
}

impl BaseUrl {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Builds URL for given bucket and object.
    ///
    /// Names are validated first; an empty object addresses the bucket itself and an empty
    /// bucket and object address the service.
    pub fn build_url(
        &self,
        bucket: &str,
        object: &str,
        query: &Multimap,
    ) -> Result<Url, ValidationErr> {
        let mut url = Url {
            https: self.https,
            host: self.host.clone(),
            port: self.port,
            path: "/".to_string(),
            query: query.clone(),
        };

        if bucket.is_empty() {
            if !object.is_empty() {
                return Err(ValidationErr::InvalidBucketName {
                    name: String::new(),
                    reason: "bucket name cannot be empty when an object is given".into(),
                });
            }
            return Ok(url);
        }

        check_bucket_name(bucket)?;
        if !object.is_empty() {
            check_object_name(object)?;
        }

        let encoded = urlencode_object_key(object);
        if self.virtual_style {
            url.host = format!("{bucket}.{}", self.host);
            url.path = format!("/{encoded}");
        } else {
            url.path = format!("/{bucket}/{encoded}");
        }

        Ok(url)
    }
}
