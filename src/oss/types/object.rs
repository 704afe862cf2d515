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

use crate::oss::utils::UtcTime;
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::str::FromStr;

/// Result of a server-side copy
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CopyObjectResult {
    /// Kept as sent; the service uses an HTTP date here rather than ISO 8601
    pub last_modified: String,
    #[serde(rename = "ETag")]
    pub etag: String,
}

/// Body of a multi-object delete
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename = "Delete", rename_all = "PascalCase")]
pub struct DeleteObjects {
    /// When true the response only lists keys that failed
    pub quiet: bool,
    #[serde(rename = "Object")]
    pub objects: Vec<ObjectToDelete>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectToDelete {
    pub key: String,
}

impl DeleteObjects {
    pub fn new<I, S>(quiet: bool, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DeleteObjects {
            quiet,
            objects: keys
                .into_iter()
                .map(|key| ObjectToDelete { key: key.into() })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeleteResult {
    #[serde(rename = "Deleted")]
    pub deleted: Vec<Deleted>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Deleted {
    pub key: String,
}

/// Offset at which the next append to an appendable object must start
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct AppendPosition(pub u64);

impl FromStr for AppendPosition {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(AppendPosition)
    }
}

/// Result of a part copy
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CopyPartResult {
    pub last_modified: UtcTime,
    #[serde(rename = "ETag")]
    pub etag: String,
}
