use crate::client::{ApiError, ChatPptClient};
use crate::mcp::contracts;
use crate::mcp::errors;
use futures::future::BoxFuture;
use serde_json::{Value, json};
use tracing::{debug, warn};

pub mod build_ppt;
pub mod check;
pub mod download_ppt;
pub mod editor_ppt;
pub mod query_ppt;
pub mod replace_template_ppt;

pub type Handler = for<'a> fn(&'a ChatPptClient, &'a Value) -> BoxFuture<'a, Value>;

/// A named operation the host can list and invoke.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: fn() -> Value,
    pub handler: Handler,
}

static REGISTRY: [ToolSpec; 6] = [
    ToolSpec {
        name: contracts::TOOL_CHECK,
        description: "Show the API token this server is currently configured with.",
        input_schema: contracts::check_schema,
        handler: check::handler,
    },
    ToolSpec {
        name: contracts::TOOL_BUILD_PPT,
        description: "Generate a PPT from descriptive text or markdown. Call this when the user \
            asks for a presentation. Returns a PPT-ID on success; use query_ppt with that ID to \
            follow generation progress.",
        input_schema: contracts::build_ppt_schema,
        handler: build_ppt::handler,
    },
    ToolSpec {
        name: contracts::TOOL_QUERY_PPT,
        description: "Query the asynchronous generation result for a PPT-ID. status=1 means \
            still generating and the query should be repeated, status=2 means succeeded, \
            status=3 means failed. process_url is the preview address. Poll every 5 seconds \
            until success or failure, showing only images not shown by the previous poll. On \
            success, open the preview, then download the PPT and create an editor link.",
        input_schema: contracts::ppt_id_schema,
        handler: query_ppt::handler,
    },
    ToolSpec {
        name: contracts::TOOL_REPLACE_TEMPLATE_PPT,
        description: "Replace the template of an existing PPT. Starts a new generation task \
            and returns the new PPT-ID.",
        input_schema: contracts::ppt_id_schema,
        handler: replace_template_ppt::handler,
    },
    ToolSpec {
        name: contracts::TOOL_DOWNLOAD_PPT,
        description: "Once generation has finished, create a download URL for the PPT.",
        input_schema: contracts::ppt_id_schema,
        handler: download_ppt::handler,
    },
    ToolSpec {
        name: contracts::TOOL_EDITOR_PPT,
        description: "Create the URL of the online PPT editor for a PPT-ID.",
        input_schema: contracts::ppt_id_schema,
        handler: editor_ppt::handler,
    },
];

pub fn registry() -> &'static [ToolSpec] {
    &REGISTRY
}

pub fn find(name: &str) -> Option<&'static ToolSpec> {
    REGISTRY.iter().find(|tool| tool.name == name)
}

pub async fn call(client: &ChatPptClient, name: &str, args: &Value) -> Value {
    let Some(tool) = find(name) else {
        return error_result(
            errors::UNKNOWN_TOOL,
            format!("Unknown tool: {name}"),
            Some(name),
        );
    };
    debug!(tool = name, "tool call");
    (tool.handler)(client, args).await
}

pub fn success_result(body: Value) -> Value {
    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
    let mut result = json!({
        "content": [{"type": "text", "text": text}],
        "isError": false
    });
    if body.is_object()
        && let Some(obj) = result.as_object_mut()
    {
        obj.insert("structuredContent".to_string(), body);
    }
    result
}

pub fn error_result(
    kind: &'static str,
    message: impl Into<String>,
    cause: Option<&str>,
) -> Value {
    let message = message.into();
    let mut error = json!({
        "kind": kind,
        "message": message,
    });

    if let Some(cause) = cause
        && let Some(obj) = error.as_object_mut()
    {
        obj.insert("cause".to_string(), json!(cause));
    }

    json!({
        "content": [{"type": "text", "text": format!("Error: {message}")}],
        "structuredContent": {"error": error},
        "isError": true
    })
}

/// Converts a remote call outcome into a tool result, passing the body through.
pub(crate) fn api_result(tool: &str, result: Result<Value, ApiError>) -> Value {
    match result {
        Ok(body) => success_result(body),
        Err(err) => {
            warn!(tool, error = %err, "remote call failed");
            error_result(err.kind(), err.to_string(), err.cause().as_deref())
        }
    }
}

pub(crate) struct ToolError {
    pub kind: &'static str,
    pub message: String,
}

pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    let Some(obj) = args.as_object() else {
        return Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: "arguments must be an object".to_string(),
        });
    };
    match obj.get(key) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: format!("{key} must be a string"),
        }),
        None => Err(ToolError {
            kind: errors::INVALID_INPUT,
            message: format!("{key} is required"),
        }),
    }
}
