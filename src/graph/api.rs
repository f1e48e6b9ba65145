/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::graph::errors::{ErrorCode, GraphError};
use crate::graph::exception::{ErrorSource, normalize};
use crate::graph::paging::{ConnectionFetcher, Page};
use log::trace;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::time::Duration;

// Root Graph API
pub const API_ORIGIN: &str = "https://graph.facebook.com";

/// Graph API version used unless configured otherwise
pub const DEFAULT_API_VERSION: &str = "v20.0";

/// Largest page size the Graph API accepts
pub const MAX_PAGE_LIMIT: u32 = 100;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for talking to the Graph API.
///
/// Obtaining the access token is left up to the consumer of this library.
#[derive(Clone)]
pub struct GraphConfig {
    pub access_token: String,
    pub version: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GraphConfig {
    pub fn new(access_token: &str) -> Self {
        Self {
            access_token: access_token.into(),
            version: DEFAULT_API_VERSION.into(),
            base_url: API_ORIGIN.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads `FACEBOOK_ACCESS_TOKEN` and the optional `FACEBOOK_API_VERSION` and
    /// `FACEBOOK_BASE_URL` from the environment
    pub fn from_env() -> Result<Self, GraphError> {
        let access_token = std::env::var("FACEBOOK_ACCESS_TOKEN").map_err(|_| {
            GraphError::validation(
                ErrorCode::MissingParams,
                "Environment variable FACEBOOK_ACCESS_TOKEN is required",
            )
        })?;
        let mut config = Self::new(&access_token);
        if let Ok(version) = std::env::var("FACEBOOK_API_VERSION") {
            config = config.with_version(&version);
        }
        if let Ok(base_url) = std::env::var("FACEBOOK_BASE_URL") {
            config = config.with_base_url(&base_url);
        }
        Ok(config)
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.into();
        self
    }

    /// Points the client somewhere other than graph.facebook.com
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("access_token", &"xxx")
            .field("version", &self.version)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Directly communicates with the API.
#[derive(Clone)]
pub struct GraphApi {
    config: GraphConfig,
    https_client: reqwest::Client,
}

impl GraphApi {
    pub fn new(config: GraphConfig) -> Result<Self, GraphError> {
        let https_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            config,
            https_client,
        })
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Performs a get request against `{base_url}/{version}/{path}`
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, GraphError> {
        let base = format!(
            "{}/{}/{}",
            self.config.base_url,
            self.config.version,
            path.trim_start_matches('/')
        );
        trace!("GET {base} {params:?}");
        let mut req_url = url::Url::parse_with_params(&base, params)?;
        req_url
            .query_pairs_mut()
            .append_pair("access_token", &self.config.access_token);

        let resp = self
            .https_client
            .get(req_url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(GraphError::transport(format!("HTTP {status}: {text}")));
            }
            Err(err) => return Err(GraphError::Deserialization(err)),
        };

        if let Some(error) = body.get("error") {
            let err = match ErrorSource::try_from(error.clone()) {
                Ok(source) => normalize(source),
                // Still a failure reported by the API, just not in the documented shape
                Err(_) => {
                    let mut envelope = Map::new();
                    envelope.insert("message".to_string(), error.clone());
                    normalize(ErrorSource::Remote(envelope)).with_raw_data(body)
                }
            };
            return Err(GraphError::Api(err));
        }
        if !status.is_success() {
            return Err(GraphError::transport(format!("HTTP {status}: {text}")));
        }
        Ok(serde_json::from_value(body)?)
    }
}

impl ConnectionFetcher for GraphApi {
    async fn fetch(
        &self,
        object_id: &str,
        connection: &str,
        params: &[(String, String)],
    ) -> Result<Page, GraphError> {
        if let Some((_, limit)) = params.iter().find(|(k, _)| k == "limit") {
            match limit.parse::<u32>() {
                Ok(l) if (1..=MAX_PAGE_LIMIT).contains(&l) => (),
                _ => {
                    return Err(GraphError::validation(
                        ErrorCode::InvalidParams,
                        format!("Parameter (limit) must be between 1 and {MAX_PAGE_LIMIT}"),
                    ));
                }
            }
        }
        self.get::<Page>(&format!("{object_id}/{connection}"), params)
            .await
    }
}

impl std::fmt::Debug for GraphApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphApi")
            .field("config", &self.config)
            .finish()
    }
}
