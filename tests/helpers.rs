/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use fbgraph::graph::{Client, GraphConfig};
use serde_json::{Value, json};
use wiremock::MockServer;

pub(crate) const TEST_TOKEN: &str = "test-token";

#[allow(dead_code)]
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Client pointed at the mock server
#[allow(dead_code)]
pub(crate) fn mock_client(server: &MockServer) -> Client {
    init_logging();
    Client::new(GraphConfig::new(TEST_TOKEN).with_base_url(&server.uri())).unwrap()
}

// Builds a connection page of photos with ids first_id..first_id+size
#[allow(dead_code)]
pub(crate) fn photo_page(first_id: usize, size: usize, after: Option<&str>) -> Value {
    let data: Vec<Value> = (first_id..first_id + size)
        .map(|id| {
            json!({
                "id": id.to_string(),
                "name": format!("photo {id}"),
                "created_time": "2021-06-08T03:38:50+0000"
            })
        })
        .collect();
    let mut paging = json!({
        "cursors": {"before": format!("b{first_id}"), "after": after.unwrap_or("end")}
    });
    if let Some(after) = after {
        paging["next"] = json!(format!(
            "https://graph.facebook.com/v20.0/1/photos?limit={size}&after={after}"
        ));
    }
    json!({ "data": data, "paging": paging })
}

#[allow(dead_code)]
pub(crate) fn live_client() -> anyhow::Result<Client> {
    Ok(Client::new(GraphConfig::from_env()?)?)
}
