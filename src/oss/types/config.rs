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

//! Bucket sub-resource configurations: logging, website, referer, lifecycle and CORS.
//!
//! Each document is both sent by the `put_bucket_*` operations and returned by the
//! matching `get_bucket_*` operations.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "BucketLoggingStatus", rename_all = "PascalCase")]
pub struct BucketLoggingStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging_enabled: Option<LoggingEnabled>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoggingEnabled {
    pub target_bucket: String,
    pub target_prefix: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "WebsiteConfiguration", rename_all = "PascalCase")]
pub struct WebsiteConfiguration {
    pub index_document: IndexDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_document: Option<ErrorDocument>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct IndexDocument {
    pub suffix: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ErrorDocument {
    pub key: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "RefererConfiguration", rename_all = "PascalCase")]
pub struct RefererConfiguration {
    pub allow_empty_referer: bool,
    pub referer_list: RefererList,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefererList {
    #[serde(rename = "Referer")]
    pub referer: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "LifecycleConfiguration")]
pub struct LifecycleConfiguration {
    #[serde(rename = "Rule")]
    pub rules: Vec<LifecycleRule>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LifecycleRule {
    #[serde(rename = "ID")]
    pub id: String,
    pub prefix: String,
    /// `Enabled` or `Disabled`
    pub status: String,
    pub expiration: Expiration,
}

/// When objects matched by a rule expire. Set exactly one field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Expiration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    /// ISO 8601 timestamp, sent as given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename = "CORSConfiguration")]
pub struct CorsConfiguration {
    #[serde(rename = "CORSRule")]
    pub rules: Vec<CorsRule>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CorsRule {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_origin: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_method: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_header: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expose_header: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age_seconds: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_logging() {
        let status = BucketLoggingStatus {
            logging_enabled: Some(LoggingEnabled {
                target_bucket: "doc-log".into(),
                target_prefix: "MyLog-".into(),
            }),
        };
        assert_eq!(
            quick_xml::se::to_string(&status).unwrap(),
            "<BucketLoggingStatus><LoggingEnabled><TargetBucket>doc-log</TargetBucket>\
             <TargetPrefix>MyLog-</TargetPrefix></LoggingEnabled></BucketLoggingStatus>"
        );
    }

    #[test]
    fn test_serialize_lifecycle() {
        let config = LifecycleConfiguration {
            rules: vec![
                LifecycleRule {
                    id: "delete obsoleted files".into(),
                    prefix: "obsoleted/".into(),
                    status: "Enabled".into(),
                    expiration: Expiration {
                        days: Some(3),
                        date: None,
                    },
                },
                LifecycleRule {
                    id: "delete temporary files".into(),
                    prefix: "temporary/".into(),
                    status: "Enabled".into(),
                    expiration: Expiration {
                        days: None,
                        date: Some("2022-10-12T00:00:00.001Z".into()),
                    },
                },
            ],
        };
        let xml = quick_xml::se::to_string(&config).unwrap();
        assert_eq!(xml.len(), 340);
        assert!(xml.contains("<Expiration><Days>3</Days></Expiration>"));
    }

    #[test]
    fn test_deserialize_website() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<WebsiteConfiguration xmlns="http://doc.oss-cn-hangzhou.aliyuncs.com">
<IndexDocument>
<Suffix>index.html</Suffix>
    </IndexDocument>
    <ErrorDocument>
        <Key>error.html</Key>
    </ErrorDocument>
</WebsiteConfiguration>"#;
        let config: WebsiteConfiguration = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(config.index_document.suffix, "index.html");
        assert_eq!(config.error_document.unwrap().key, "error.html");
    }

    #[test]
    fn test_deserialize_referer() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<RefererConfiguration>
<AllowEmptyReferer>true</AllowEmptyReferer>
<RefererList>
<Referer>http://www.aliyun.com</Referer>
<Referer>https://www.aliyun.com</Referer>
</RefererList>
</RefererConfiguration>"#;
        let config: RefererConfiguration = quick_xml::de::from_str(xml).unwrap();
        assert!(config.allow_empty_referer);
        assert_eq!(
            config.referer_list.referer,
            vec!["http://www.aliyun.com", "https://www.aliyun.com"]
        );
    }

    #[test]
    fn test_deserialize_cors() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<CORSConfiguration>
    <CORSRule>
      <AllowedOrigin>*</AllowedOrigin>
      <AllowedMethod>GET</AllowedMethod>
      <AllowedHeader>*</AllowedHeader>
      <ExposeHeader>x-oss-test</ExposeHeader>
      <MaxAgeSeconds>100</MaxAgeSeconds>
    </CORSRule>
</CORSConfiguration>"#;
        let config: CorsConfiguration = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(
            config.rules,
            vec![CorsRule {
                allowed_origin: vec!["*".into()],
                allowed_method: vec!["GET".into()],
                allowed_header: vec!["*".into()],
                expose_header: vec!["x-oss-test".into()],
                max_age_seconds: Some(100),
            }]
        );
    }
}
