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

use crate::oss::utils::urlencode;
use std::collections::BTreeMap;

/// Multimap for string key and string value
pub type Multimap = multimap::MultiMap<String, String>;

pub trait MultimapExt {
    /// Adds a key-value pair to the multimap
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V);

    /// Adds a valueless sub-resource such as `acl` or `uploads`
    fn add_flag<K: Into<String>>(&mut self, key: K);

    /// Converts multimap to HTTP query string.
    ///
    /// Keys are sorted and values keep their insertion order. An empty value renders as the
    /// bare key, so `{append: "", position: "0"}` becomes `append&position=0`.
    fn to_query_string(&self) -> String;
}

impl MultimapExt for Multimap {
    fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.insert(key.into(), value.into());
    }

    fn add_flag<K: Into<String>>(&mut self, key: K) {
        self.insert(key.into(), String::new());
    }

    fn to_query_string(&self) -> String {
        let sorted: BTreeMap<&str, &Vec<String>> = self
            .iter_all()
            .map(|(k, vs)| (k.as_str(), vs))
            .collect();

        let mut query = String::new();
        for (key, values) in sorted {
            for value in values {
                if !query.is_empty() {
                    query.push('&');
                }
                query.push_str(&urlencode(key));
                if !value.is_empty() {
                    query.push('=');
                    query.push_str(&urlencode(value));
                }
            }
        }
        query
    }
}
