/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate fbgraph;

use anyhow::Result;
use dotenvy::dotenv;
use fbgraph::graph::{Client, Photo, PhotoType};
use futures::{StreamExt, pin_mut};

// Lists the first photos of an object in one go then streams the rest lazily.
// Set FACEBOOK_ACCESS_TOKEN and FACEBOOK_OBJECT_ID (defaults to "me").
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let client = Client::from_env()?;
    let object_id = std::env::var("FACEBOOK_OBJECT_ID").unwrap_or_else(|_| "me".to_string());

    // Collects at least 20 photos, 10 per request
    let request = Photo::connection_of_type(&object_id, PhotoType::Uploaded)
        .count(Some(20))
        .limit(Some(10));
    let (photos, paging) = Photo::list(&client, &request).await?;
    for photo in &photos {
        println!("Found photo: {photo}");
    }
    println!("Has more pages: {}", paging.next.is_some());

    // Streams every photo. Stop early once 100 are seen.
    let request = Photo::connection(&object_id).count(None).limit(Some(100));
    let items = client.stream_connections(&request);
    pin_mut!(items);
    let mut seen = 0;
    while let Some(item) = items.next().await {
        let item = item?;
        seen += 1;
        println!("{}: {}", seen, item["id"]);
        if seen >= 100 {
            break;
        }
    }
    Ok(())
}
