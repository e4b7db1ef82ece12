use crate::client::ChatPptClient;
use crate::mcp::{self, errors};
use crate::tools;
use serde_json::{Value, json};

pub mod sse;
pub mod stdio;

/// Answers one JSON-RPC message. Notifications and responses yield `None`.
pub async fn handle_message(client: &ChatPptClient, request: &Value) -> Option<Value> {
    let method = request.get("method").and_then(|value| value.as_str());
    let id = request.get("id").cloned();

    let response = match (method, id) {
        (Some("initialize"), Some(id)) => success(id, initialize_result(request)),
        (Some("ping"), Some(id)) => success(id, json!({})),
        (Some("tools/list"), Some(id)) => success(
            id,
            json!({
                "tools": mcp::tool_definitions()
            }),
        ),
        (Some("tools/call"), Some(id)) => {
            let result = handle_tool_call(client, request).await;
            success(id, result)
        }
        (Some(method), Some(id)) => failure(
            id,
            errors::METHOD_NOT_FOUND,
            format!("method not found: {method}"),
        ),
        (None, Some(id)) if request.get("result").is_none() && request.get("error").is_none() => {
            failure(id, errors::INVALID_REQUEST, "method is required".to_string())
        }
        _ => return None,
    };

    Some(response)
}

fn initialize_result(request: &Value) -> Value {
    let requested = request
        .get("params")
        .and_then(|params| params.get("protocolVersion"))
        .and_then(|value| value.as_str());

    json!({
        "protocolVersion": mcp::negotiate_protocol_version(requested),
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

async fn handle_tool_call(client: &ChatPptClient, request: &Value) -> Value {
    let params = request.get("params");
    let Some(params) = params.and_then(|value| value.as_object()) else {
        return tools::error_result(errors::INVALID_INPUT, "params must be an object", None);
    };

    let name = params.get("name").and_then(|value| value.as_str());
    let Some(name) = name else {
        return tools::error_result(
            errors::INVALID_INPUT,
            "params.name must be a string",
            None,
        );
    };

    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| json!({}));

    tools::call(client, name, &args).await
}

fn success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

fn failure(id: Value, code: i64, message: String) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
}
