/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::graph::errors::GraphError;
use crate::graph::paging::{ConnectionRequest, Paging};
use crate::graph::parsers::from_graph_time;
use crate::graph::Client;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Fields requested when the caller does not pick any
pub const PHOTO_PUBLIC_FIELDS: &[&str] = &[
    "id",
    "album",
    "alt_text",
    "created_time",
    "from",
    "height",
    "link",
    "name",
    "picture",
    "updated_time",
    "width",
];

/// Which photos of a user to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum PhotoType {
    Uploaded,
    Tagged,
}

/// Holds information returned from the Photo node.
///
/// See [Graph API Docs](https://developers.facebook.com/docs/graph-api/reference/photo) for more
/// details on the individual fields.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Photo {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub alt_text: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default, deserialize_with = "from_graph_time")]
    pub created_time: Option<DateTime<FixedOffset>>,

    #[serde(default, deserialize_with = "from_graph_time")]
    pub updated_time: Option<DateTime<FixedOffset>>,

    #[serde(default)]
    pub album: Option<ObjectRef>,

    #[serde(default)]
    pub from: Option<ObjectRef>,
}

/// Minimal reference to another Graph object
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,
}

impl Photo {
    /// Request for the photos of an object using [`PHOTO_PUBLIC_FIELDS`]
    pub fn connection(object_id: &str) -> ConnectionRequest {
        ConnectionRequest::new(object_id, "photos").fields(PHOTO_PUBLIC_FIELDS)
    }

    /// Request for a user's uploaded or tagged photos
    pub fn connection_of_type(object_id: &str, photo_type: PhotoType) -> ConnectionRequest {
        let photo_type: &'static str = photo_type.into();
        Self::connection(object_id).param("type", photo_type)
    }

    /// Returns information for the specified photo id
    pub async fn from_id(client: &Client, id: &str) -> Result<Self, GraphError> {
        client.get_object::<Photo>(id, PHOTO_PUBLIC_FIELDS).await
    }

    /// Lists photos along with the paging block of the last page read
    pub async fn list(
        client: &Client,
        request: &ConnectionRequest,
    ) -> Result<(Vec<Photo>, Paging), GraphError> {
        let (items, paging) = Self::list_json(client, request).await?;
        let photos = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Photo>, _>>()?;
        Ok((photos, paging))
    }

    /// Same as [`Photo::list`] but leaves the items as returned by the API
    pub async fn list_json(
        client: &Client,
        request: &ConnectionRequest,
    ) -> Result<(Vec<Value>, Paging), GraphError> {
        let result = client.get_full_connections(request).await?;
        Ok((result.items, result.paging))
    }
}

impl std::fmt::Display for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "name: {}, id: {}",
            self.name.as_deref().unwrap_or(""),
            self.id
        )
    }
}
