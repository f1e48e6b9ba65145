/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # fbgraph
//!
//! This library was created for working with the Facebook Graph API.
//!
//! For further details on the API refer to the [Graph API Docs](https://developers.facebook.com/docs/graph-api)
//!
//! ## Features
//!
//! - Reading connections (e.g. an object's photos) across pages with cursor based paging
//!     - Collect up to a count with [`graph::fetch_connection`]
//!     - Or stream items as pages arrive with [`graph::connection_stream`]
//! - One error type for both library and API failures, see [`graph::FacebookError`]
//! - Photo information
//! - Lower level interface for handling the raw communication
//!
//! *Getting the access token is left up to the consumer of this library*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! fbgraph = "0.1.0"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fbgraph::graph::{Client, GraphConfig, GraphError, Photo};
//!
//! async fn print_photos(access_token: &str, page_id: &str) -> Result<(), GraphError> {
//!     let client = Client::new(GraphConfig::new(access_token))?;
//!
//!     // Read the first 50 or so photos, 25 per request
//!     let request = Photo::connection(page_id).count(Some(50)).limit(Some(25));
//!     match Photo::list(&client, &request).await {
//!         Ok((photos, _paging)) => {
//!             for photo in photos {
//!                 println!("{photo}");
//!             }
//!         }
//!         Err(err) => {
//!             if let Some(fb) = err.facebook_error() {
//!                 println!("code: {:?} message: {:?}", fb.code(), fb.message());
//!             }
//!             return Err(err);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod graph;
