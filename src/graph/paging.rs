/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Cursor based traversal of connection edges.
//!
//! A connection such as `/{object-id}/photos` is returned one page at a time. Each page
//! carries a `paging` block and the next page is requested by passing back its `after`
//! cursor. [`fetch_connection`] collects pages until the requested count is met or the
//! server stops offering a `next` page. [`connection_stream`] does the same lazily.

use crate::graph::errors::{ErrorCode, GraphError};
use crate::graph::params::Fields;
use async_stream::try_stream;
use futures::Stream;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;

/// Number of items collected when the caller does not say otherwise
pub const DEFAULT_COUNT: u64 = 10;

/// Page size used when the caller does not say otherwise
pub const DEFAULT_LIMIT: u32 = 10;

// Query parameter carrying the cursor of the page to read
const CURSOR_PARAM: &str = "after";

/// Query parameters handed to the fetcher
pub type QueryParams = Vec<(String, String)>;

/// Fetches a single page of a connection.
///
/// [`GraphApi`](crate::graph::GraphApi) is the HTTP implementation. Failures should already be
/// normalized into a [`GraphError`] carrying a [`FacebookError`](crate::graph::FacebookError).
pub trait ConnectionFetcher {
    fn fetch(
        &self,
        object_id: &str,
        connection: &str,
        params: &[(String, String)],
    ) -> impl Future<Output = Result<Page, GraphError>> + Send;
}

/// Describes which connection to read and how much of it.
#[derive(Clone, Debug)]
pub struct ConnectionRequest {
    pub object_id: String,
    pub connection: String,
    pub fields: Fields,
    /// Unix timestamp or strtotime value, passed through untouched
    pub since: Option<String>,
    /// Unix timestamp or strtotime value, passed through untouched
    pub until: Option<String>,
    /// Total items wanted. None reads every page
    pub count: Option<u64>,
    /// Items per request. None leaves the page size to the API
    pub limit: Option<u32>,
    pub extra_params: QueryParams,
}

impl ConnectionRequest {
    pub fn new(object_id: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            connection: connection.into(),
            fields: Fields::new(),
            since: None,
            until: None,
            count: Some(DEFAULT_COUNT),
            limit: Some(DEFAULT_LIMIT),
            extra_params: Vec::new(),
        }
    }

    pub fn fields(mut self, fields: impl Into<Fields>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    pub fn until(mut self, until: impl Into<String>) -> Self {
        self.until = Some(until.into());
        self
    }

    pub fn count(mut self, count: Option<u64>) -> Self {
        self.count = count;
        self
    }

    pub fn limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Adds a parameter the API understands for this connection.
    ///
    /// `fields`, `since`, `until` and `limit` set through their own setters take precedence over
    /// the same names given here. An `after` value is used as the cursor of the first request.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.push((key.into(), value.into()));
        self
    }

    pub fn validate(&self) -> Result<(), GraphError> {
        if self.object_id.trim().is_empty() {
            return Err(GraphError::validation(
                ErrorCode::MissingParams,
                "Parameter (object_id) is required",
            ));
        }
        if self.connection.trim().is_empty() {
            return Err(GraphError::validation(
                ErrorCode::MissingParams,
                "Parameter (connection) is required",
            ));
        }
        Ok(())
    }

    /// Query parameters shared by every page request, without the cursor
    pub fn query_params(&self) -> QueryParams {
        let mut params = Vec::new();
        if let Some(fields) = self.fields.to_param() {
            params.push(("fields".to_string(), fields));
        }
        if let Some(since) = &self.since {
            params.push(("since".to_string(), since.clone()));
        }
        if let Some(until) = &self.until {
            params.push(("until".to_string(), until.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        let typed = params.len();
        for (key, value) in &self.extra_params {
            if key == CURSOR_PARAM || params[..typed].iter().any(|(k, _)| k == key) {
                continue;
            }
            // A repeated extra parameter replaces the earlier one
            match params[typed..].iter_mut().find(|(k, _)| k == key) {
                Some(existing) => existing.1 = value.clone(),
                None => params.push((key.clone(), value.clone())),
            }
        }
        params
    }

    /// Cursor to start reading from, given with `.param("after", ..)` to resume a read
    pub fn initial_cursor(&self) -> Option<String> {
        self.extra_params
            .iter()
            .rev()
            .find(|(k, _)| k == CURSOR_PARAM)
            .map(|(_, v)| v.clone())
    }

    fn page_params(&self, base: &[(String, String)], cursor: Option<&str>) -> QueryParams {
        let mut params: QueryParams = base
            .iter()
            .filter(|(k, _)| k != CURSOR_PARAM)
            .cloned()
            .collect();
        if let Some(after) = cursor {
            params.push((CURSOR_PARAM.to_string(), after.to_string()));
        }
        params
    }

    fn is_satisfied(&self, collected: usize) -> bool {
        self.count.is_some_and(|count| collected as u64 >= count)
    }
}

/// One response from a connection edge
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Page {
    #[serde(default)]
    pub data: Vec<Value>,

    #[serde(default)]
    pub paging: Paging,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Paging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursors: Option<Cursors>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Cursors {
    #[serde(default)]
    pub before: Option<String>,

    #[serde(default)]
    pub after: Option<String>,
}

impl Paging {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Cursor for the following page, None when this is the last one
    pub fn next_cursor(&self) -> Option<String> {
        let next = self.next.as_deref()?;
        if let Some(after) = self.cursors.as_ref().and_then(|c| c.after.clone()) {
            return Some(after);
        }
        // Some edges only return the next link
        url::Url::parse(next)
            .ok()?
            .query_pairs()
            .find(|(k, _)| k == "after")
            .map(|(_, v)| v.into_owned())
    }
}

/// Items collected across all pages together with the last page's paging block
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PagedResult {
    pub items: Vec<Value>,
    pub paging: Paging,
}

/// Reads pages of a connection until `request.count` items are collected or no pages remain.
///
/// Pages are never cut short, so the result may hold more than `count` items. Any failure
/// aborts the whole read and nothing collected so far is returned.
pub async fn fetch_connection<F>(
    fetcher: &F,
    request: &ConnectionRequest,
) -> Result<PagedResult, GraphError>
where
    F: ConnectionFetcher,
{
    request.validate()?;
    let base = request.query_params();
    let mut items = Vec::new();
    let mut cursor = request.initial_cursor();
    let mut round_trips = 0;

    loop {
        let params = request.page_params(&base, cursor.as_deref());
        let Page { data, paging } = fetcher
            .fetch(&request.object_id, &request.connection, &params)
            .await?;
        round_trips += 1;
        debug!(
            "{}/{} page {} returned {} items",
            request.object_id,
            request.connection,
            round_trips,
            data.len()
        );
        items.extend(data);

        if !paging.has_next() || request.is_satisfied(items.len()) {
            debug!(
                "{}/{} done after {} requests with {} items",
                request.object_id,
                request.connection,
                round_trips,
                items.len()
            );
            return Ok(PagedResult { items, paging });
        }

        match paging.next_cursor() {
            Some(next) => cursor = Some(next),
            None => {
                warn!(
                    "{}/{} advertised a next page without a cursor, stopping",
                    request.object_id, request.connection
                );
                return Ok(PagedResult { items, paging });
            }
        }
    }
}

/// Streams the items of a connection, requesting pages as they are needed.
///
/// Stops on the same conditions as [`fetch_connection`]. Items already yielded stay with the
/// caller if a later page fails.
pub fn connection_stream<'a, F>(
    fetcher: &'a F,
    request: &'a ConnectionRequest,
) -> impl Stream<Item = Result<Value, GraphError>> + 'a
where
    F: ConnectionFetcher,
{
    try_stream! {
        request.validate()?;
        let base = request.query_params();
        let mut cursor = request.initial_cursor();
        let mut yielded = 0;

        loop {
            let params = request.page_params(&base, cursor.as_deref());
            let Page { data, paging } = fetcher
                .fetch(&request.object_id, &request.connection, &params)
                .await?;

            for item in data {
                yielded += 1;
                yield item;
            }

            if !paging.has_next() || request.is_satisfied(yielded) {
                break;
            }
            match paging.next_cursor() {
                Some(next) => cursor = Some(next),
                None => {
                    warn!(
                        "{}/{} advertised a next page without a cursor, stopping",
                        request.object_id, request.connection
                    );
                    break;
                }
            }
        }
    }
}
