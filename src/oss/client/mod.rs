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

//! OSS client to perform bucket and object operations

use crate::oss::clock::{Clock, SystemClock};
use crate::oss::creds::Provider;
use crate::oss::error::{BuildErr, Error};
use crate::oss::header_constants::X_OSS_SECURITY_TOKEN;
use crate::oss::http::BaseUrl;
use crate::oss::options::{RequestOption, apply_options};
use crate::oss::request::{OssRequest, RequestBody};
use crate::oss::response::{ResultSink, dispatch};
use crate::oss::signer::sign_v1;
use crate::oss::utils::{check_bucket_name, check_object_name, to_http_header_value};
use bytes::Bytes;
use http::Method;
use http::header::{ACCEPT_ENCODING, CONTENT_LENGTH, DATE, USER_AGENT};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod bucket;
mod bucket_config;
mod multipart;
mod object;
mod post_object;
mod service;

/// Client builder manufactures an [`OssClient`] using given parameters.
/// Creates a builder given a base URL for the OSS service.
#[derive(Debug)]
pub struct OssClientBuilder {
    base_url: BaseUrl,
    /// Set the credential provider. If not, requests are sent anonymously.
    provider: Option<Arc<dyn Provider>>,
    clock: Arc<dyn Clock>,
    /// Set file for loading CAs certs to trust. This is in addition to the system trust store. The file must contain PEM encoded certificates.
    ssl_cert_file: Option<PathBuf>,
    /// Set flag to ignore certificate check. This is insecure and should only be used for testing.
    ignore_cert_check: Option<bool>,
    /// Set the app info as an Option of (app_name, app_version) pair. This will show up in the client's user-agent.
    app_info: Option<(String, String)>,
    omit_xml_declaration: bool,
    http_client: Option<reqwest::Client>,
}

impl OssClientBuilder {
    /// Creates a builder given a base URL for the OSS service.
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            provider: None,
            clock: Arc::new(SystemClock),
            ssl_cert_file: None,
            ignore_cert_check: None,
            app_info: None,
            omit_xml_declaration: false,
            http_client: None,
        }
    }

    /// Set the credential provider. If not, requests are sent anonymously.
    pub fn provider<P: Provider + 'static>(mut self, provider: Option<P>) -> Self {
        self.provider = provider.map(|p| Arc::new(p) as Arc<dyn Provider>);
        self
    }

    /// Replace the time source used for the `Date` header.
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Set the app info as an Option of (app_name, app_version) pair. This will
    /// show up in the client's user-agent.
    pub fn app_info(mut self, app_info: Option<(String, String)>) -> Self {
        self.app_info = app_info;
        self
    }

    /// Set file for loading CAs certs to trust. This is in addition to the system
    /// trust store. The file must contain PEM encoded certificates.
    pub fn ssl_cert_file(mut self, ssl_cert_file: Option<&Path>) -> Self {
        self.ssl_cert_file = ssl_cert_file.map(PathBuf::from);
        self
    }

    /// Set flag to ignore certificate check. This is insecure and should only
    /// be used for testing.
    pub fn ignore_cert_check(mut self, ignore_cert_check: Option<bool>) -> Self {
        self.ignore_cert_check = ignore_cert_check;
        self
    }

    /// Send XML bodies without the leading `<?xml ...?>` declaration, for servers
    /// that compare bodies byte for byte.
    pub fn omit_xml_declaration(mut self, omit: bool) -> Self {
        self.omit_xml_declaration = omit;
        self
    }

    /// Use an existing HTTP client. TLS settings of this builder are then ignored.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Build the Client.
    pub fn build(self) -> Result<OssClient, Error> {
        let mut user_agent = String::from("aliyun-oss-rs/")
            + env!("CARGO_PKG_VERSION")
            + " ("
            + std::env::consts::OS
            + "; "
            + std::env::consts::ARCH
            + ")";
        if let Some((app_name, app_version)) = self.app_info {
            user_agent.push_str(format!(" {app_name}/{app_version}").as_str());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder()
                    .no_gzip()
                    .user_agent(user_agent.clone());

                #[cfg(any(
                    feature = "default-tls",
                    feature = "native-tls",
                    feature = "rustls-tls"
                ))]
                if let Some(v) = self.ignore_cert_check {
                    builder = builder.danger_accept_invalid_certs(v);
                }

                #[cfg(any(
                    feature = "default-tls",
                    feature = "native-tls",
                    feature = "rustls-tls"
                ))]
                if let Some(path) = self.ssl_cert_file {
                    let buf = std::fs::read(&path).map_err(|source| BuildErr::CertificateIo {
                            path: path.clone(),
                            source,
                        })?;
                    for cert in reqwest::Certificate::from_pem_bundle(&buf)? {
                        builder = builder.add_root_certificate(cert);
                    }
                }

                builder.build()?
            }
        };

        Ok(OssClient {
            http_client,
            shared: Arc::new(SharedClientItems {
                base_url: self.base_url,
                provider: self.provider,
                clock: self.clock,
                user_agent,
                xml_preamble: !self.omit_xml_declaration,
            }),
        })
    }
}

#[derive(Debug)]
pub(crate) struct SharedClientItems {
    pub(crate) base_url: BaseUrl,
    pub(crate) provider: Option<Arc<dyn Provider>>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) user_agent: String,
    pub(crate) xml_preamble: bool,
}

/// Object Storage Service (aka OSS) client to perform bucket and object operations.
///
/// If credential provider is passed, all requests are signed with the OSS header
/// signature; else they are performed anonymously. Cloning is cheap and clones share
/// the configuration and the connection pool.
#[derive(Clone, Debug)]
pub struct OssClient {
    http_client: reqwest::Client,
    pub(crate) shared: Arc<SharedClientItems>,
}

impl OssClient {
    /// Returns a client with given base URL and optional credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use aliyun_oss::oss::OssClient;
    /// use aliyun_oss::oss::creds::StaticProvider;
    /// use aliyun_oss::oss::http::BaseUrl;
    ///
    /// let base_url: BaseUrl = "oss-cn-hangzhou.aliyuncs.com".parse().unwrap();
    /// let static_provider = StaticProvider::new("ayahghai0juiSie", "quitie*ph3Lah{F", None);
    /// let client = OssClient::new(base_url, Some(static_provider)).unwrap();
    /// ```
    pub fn new<P: Provider + 'static>(base_url: BaseUrl, provider: Option<P>) -> Result<Self, Error> {
        OssClientBuilder::new(base_url).provider(provider).build()
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.shared.base_url
    }

    /// Builds a signed request.
    ///
    /// Names are validated first, then `options` are applied in order, then the common
    /// headers are set and the request is signed. A PUT or POST without a body is sent
    /// with `Content-Length: 0`.
    pub fn new_request(
        &self,
        method: Method,
        bucket: &str,
        object: &str,
        options: Vec<RequestOption>,
    ) -> Result<OssRequest, Error> {
        if !bucket.is_empty() {
            check_bucket_name(bucket)?;
        }
        if !object.is_empty() {
            check_object_name(object)?;
        }

        let mut req = OssRequest::builder()
            .method(method)
            .bucket(bucket)
            .object(object)
            .xml_preamble(self.shared.xml_preamble)
            .build();
        apply_options(&mut req, options)?;
        if req.body.is_empty()
            && (req.method == Method::PUT || req.method == Method::POST)
            && !req.headers.contains_key(CONTENT_LENGTH)
        {
            req.set_header(CONTENT_LENGTH.as_str(), "0")?;
        }

        req.url = self
            .shared
            .base_url
            .build_url(bucket, object, &req.query)?;
        self.set_common_headers(&mut req)?;

        Ok(req)
    }

    fn set_common_headers(&self, req: &mut OssRequest) -> Result<(), Error> {
        let creds = self.shared.provider.as_ref().map(|p| p.fetch());

        req.set_header(ACCEPT_ENCODING.as_str(), "identity")?;
        req.set_header(
            DATE.as_str(),
            &to_http_header_value(self.shared.clock.now()),
        )?;
        req.set_header(USER_AGENT.as_str(), &self.shared.user_agent)?;

        if let Some(creds) = creds {
            if let Some(token) = &creds.security_token {
                req.set_header(X_OSS_SECURITY_TOKEN, token)?;
            }
            sign_v1(
                &req.method,
                &mut req.headers,
                &req.bucket,
                &req.object,
                &req.query,
                &creds.access_key,
                &creds.secret_key,
            )?;
        }
        Ok(())
    }

    /// Sends a request built by [`OssClient::new_request`].
    pub async fn send(&self, req: OssRequest) -> Result<reqwest::Response, Error> {
        let OssRequest {
            method,
            url,
            headers,
            body,
            ..
        } = req;
        let url = url.to_string();
        log::debug!("{method} {url}");

        let body = match body {
            RequestBody::Empty if method == Method::PUT || method == Method::POST => {
                Some(Bytes::new())
            }
            RequestBody::Empty => None,
            RequestBody::Bytes(data) => Some(data),
            RequestBody::File(path) => {
                let data = tokio::fs::read(&path)
                    .await
                    .map_err(|source| BuildErr::BodyIo { path, source })?;
                Some(Bytes::from(data))
            }
        };

        let mut builder = self.http_client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Ok(builder.send().await?)
    }

    /// Builds, signs and sends a request, then routes the response into `sink`.
    pub async fn execute(
        &self,
        method: Method,
        bucket: &str,
        object: &str,
        options: Vec<RequestOption>,
        sink: ResultSink<'_>,
    ) -> Result<(), Error> {
        let req = self.new_request(method, bucket, object, options)?;
        let resp = self.send(req).await?;
        dispatch(resp, sink).await
    }
}

/// Puts `defaults` ahead of the caller's options so the caller's values win.
pub(crate) fn with_defaults(
    defaults: Vec<RequestOption>,
    options: Vec<RequestOption>,
) -> Vec<RequestOption> {
    let mut all = defaults;
    all.extend(options);
    all
}

/// Like [`with_defaults`], with `trailing` run after the caller's options.
///
/// Digest options go in `trailing` so they see the body that is actually sent.
pub(crate) fn with_defaults_then(
    defaults: Vec<RequestOption>,
    options: Vec<RequestOption>,
    trailing: Vec<RequestOption>,
) -> Vec<RequestOption> {
    let mut all = with_defaults(defaults, options);
    all.extend(trailing);
    all
}
