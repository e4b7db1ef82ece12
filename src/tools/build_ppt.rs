use crate::client::{ApiError, ChatPptClient};
use crate::mcp::contracts::TOOL_BUILD_PPT;
use crate::tools::{api_result, error_result, required_str, success_result};
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::warn;

pub fn handler<'a>(client: &'a ChatPptClient, args: &'a Value) -> BoxFuture<'a, Value> {
    Box::pin(call(client, args))
}

pub async fn call(client: &ChatPptClient, args: &Value) -> Value {
    let text = match required_str(args, "text") {
        Ok(text) => text,
        Err(err) => return error_result(err.kind, err.message, None),
    };

    match client.create_ppt(text).await {
        Ok(body) => success_result(body),
        Err(err @ ApiError::MissingCredential) => {
            warn!(tool = TOOL_BUILD_PPT, "API_KEY is not configured");
            error_result(err.kind(), err.to_string(), None)
        }
        Err(err @ ApiError::Status(_)) => {
            warn!(tool = TOOL_BUILD_PPT, error = %err, "remote call rejected");
            error_result(err.kind(), format!("PPT build failed: {err}"), None)
        }
        Err(err) => api_result(TOOL_BUILD_PPT, Err(err)),
    }
}
