use crate::client::ChatPptClient;
use futures::future::BoxFuture;
use serde_json::{Value, json};

pub fn handler<'a>(client: &'a ChatPptClient, args: &'a Value) -> BoxFuture<'a, Value> {
    Box::pin(async move { call(client, args) })
}

/// Reports the configured token as-is. Never touches the network.
pub fn call(client: &ChatPptClient, _args: &Value) -> Value {
    let api_key = client.credential();
    let text = api_key.unwrap_or("null").to_string();

    json!({
        "content": [{"type": "text", "text": text}],
        "structuredContent": {"api_key": api_key},
        "isError": false
    })
}
