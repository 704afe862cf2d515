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

//! Credential providers
//!
//! A [`Provider`] is asked for credentials once per request, just before signing.

/// Environment variable holding the access key id.
pub const ALIBABA_CLOUD_ACCESS_KEY_ID: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
/// Environment variable holding the access key secret.
pub const ALIBABA_CLOUD_ACCESS_KEY_SECRET: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";
/// Environment variable holding an optional STS security token.
pub const ALIBABA_CLOUD_SECURITY_TOKEN: &str = "ALIBABA_CLOUD_SECURITY_TOKEN";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Access key id, access key secret and an optional STS security token
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    /// Sent as `x-oss-security-token` when present
    pub security_token: Option<String>,
}

impl Credentials {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        security_token: Option<String>,
    ) -> Self {
        Credentials {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            security_token,
        }
    }
}

/// Source of the credentials used to sign requests.
pub trait Provider: std::fmt::Debug + Send + Sync {
    fn fetch(&self) -> Credentials;
}

#[derive(Clone, Debug)]
/// Always hands out the credentials it was created with
pub struct StaticProvider {
    creds: Credentials,
}

impl StaticProvider {
    /// Returns a static provider with given access key id, secret and optional security token
    ///
    /// # Examples
    ///
    /// ```
    /// use aliyun_oss::oss::creds::StaticProvider;
    /// let provider = StaticProvider::new("ayahghai0juiSie", "quitie*ph3Lah{F", None);
    /// ```
    pub fn new(access_key: &str, secret_key: &str, security_token: Option<&str>) -> StaticProvider {
        StaticProvider {
            creds: Credentials::new(
                access_key,
                secret_key,
                security_token.map(str::to_string),
            ),
        }
    }
}

impl Provider for StaticProvider {
    fn fetch(&self) -> Credentials {
        self.creds.clone()
    }
}

/// Credentials read from the `ALIBABA_CLOUD_*` environment variables.
///
/// The variables are read once, when the provider is created.
#[derive(Clone, Debug)]
pub struct EnvProvider {
    creds: Credentials,
}

impl EnvProvider {
    /// Returns `None` unless both the access key id and the secret are set.
    pub fn from_env() -> Option<EnvProvider> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<EnvProvider> {
        let access_key = lookup(ALIBABA_CLOUD_ACCESS_KEY_ID).filter(|v| !v.is_empty())?;
        let secret_key = lookup(ALIBABA_CLOUD_ACCESS_KEY_SECRET).filter(|v| !v.is_empty())?;
        let security_token = lookup(ALIBABA_CLOUD_SECURITY_TOKEN).filter(|v| !v.is_empty());
        log::debug!("loaded credentials for access key {access_key} from environment");
        Some(EnvProvider {
            creds: Credentials::new(access_key, secret_key, security_token),
        })
    }
}

impl Provider for EnvProvider {
    fn fetch(&self) -> Credentials {
        self.creds.clone()
    }
}
