/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::graph::errors::GraphError;
use crate::graph::paging::{ConnectionRequest, PagedResult, connection_stream, fetch_connection};
use crate::graph::params::Fields;
use crate::graph::{GraphApi, GraphConfig};
use futures::Stream;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Cheap to clone handle used by the resource types.
///
/// ```rust,no_run
/// use fbgraph::graph::{Client, ConnectionRequest, GraphConfig};
///
/// # async fn run() -> Result<(), fbgraph::graph::GraphError> {
/// let client = Client::new(GraphConfig::new("access-token"))?;
/// let request = ConnectionRequest::new("20531316728", "photos")
///     .fields(["id", "name"])
///     .count(Some(25));
/// let result = client.get_full_connections(&request).await?;
/// println!("got {} photos", result.items.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api: Arc<GraphApi>,
}

impl Client {
    pub fn new(config: GraphConfig) -> Result<Self, GraphError> {
        Ok(Self {
            api: Arc::new(GraphApi::new(config)?),
        })
    }

    /// Creates a client from the `FACEBOOK_*` environment variables
    pub fn from_env() -> Result<Self, GraphError> {
        Self::new(GraphConfig::from_env()?)
    }

    /// Lower level access to the API
    pub fn api(&self) -> &GraphApi {
        &self.api
    }

    /// Returns a single object
    pub async fn get_object<T: DeserializeOwned>(
        &self,
        object_id: &str,
        fields: impl Into<Fields>,
    ) -> Result<T, GraphError> {
        let fields: Fields = fields.into();
        let params: Vec<(String, String)> = fields
            .to_param()
            .map(|f| ("fields".to_string(), f))
            .into_iter()
            .collect();
        self.api.get::<T>(object_id, &params).await
    }

    /// Reads a connection up to the requested count, see [`fetch_connection`]
    pub async fn get_full_connections(
        &self,
        request: &ConnectionRequest,
    ) -> Result<PagedResult, GraphError> {
        fetch_connection(self.api.as_ref(), request).await
    }

    /// Streams the raw items of a connection, see [`connection_stream`]
    pub fn stream_connections<'a>(
        &'a self,
        request: &'a ConnectionRequest,
    ) -> impl Stream<Item = Result<Value, GraphError>> + 'a {
        connection_stream(self.api.as_ref(), request)
    }
}
