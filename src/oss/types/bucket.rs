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

use super::Owner;
use crate::oss::utils::UtcTime;
use serde::{Deserialize, Serialize};

/// Body of a bucket creation request that names the region
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename = "CreateBucketConfiguration")]
pub struct CreateBucketConfiguration {
    #[serde(rename = "LocationConstraint")]
    pub location_constraint: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListAllMyBucketsResult {
    pub prefix: Option<String>,
    pub marker: Option<String>,
    pub max_keys: Option<u32>,
    pub is_truncated: Option<bool>,
    pub next_marker: Option<String>,
    pub owner: Owner,
    pub buckets: Buckets,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Buckets {
    #[serde(rename = "Bucket")]
    pub bucket: Vec<BucketInfo>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketInfo {
    #[serde(default)]
    pub location: String,
    pub name: String,
    pub creation_date: UtcTime,
    #[serde(default)]
    pub storage_class: Option<String>,
}

/// Result of listing the objects of a bucket
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ListBucketResult {
    pub name: String,
    pub prefix: String,
    pub marker: String,
    pub max_keys: u32,
    pub delimiter: String,
    pub is_truncated: bool,
    pub next_marker: Option<String>,
    pub encoding_type: Option<String>,
    pub contents: Vec<ObjectInfo>,
    pub common_prefixes: Vec<CommonPrefix>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectInfo {
    pub key: String,
    pub last_modified: UtcTime,
    #[serde(rename = "ETag")]
    pub etag: String,
    #[serde(default, rename = "Type")]
    pub object_type: String,
    pub size: u64,
    #[serde(default)]
    pub storage_class: String,
    #[serde(default)]
    pub owner: Owner,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CommonPrefix {
    pub prefix: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccessControlPolicy {
    pub owner: Owner,
    pub access_control_list: AccessControlList,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccessControlList {
    pub grant: String,
}

/// Region of a bucket, e.g. `oss-cn-hangzhou`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LocationConstraint {
    #[serde(rename = "$text")]
    pub location: String,
}
