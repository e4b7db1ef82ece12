use crate::client::ChatPptClient;
use crate::mcp::contracts::TOOL_REPLACE_TEMPLATE_PPT;
use crate::tools::{api_result, error_result, required_str};
use futures::future::BoxFuture;
use serde_json::Value;

pub fn handler<'a>(client: &'a ChatPptClient, args: &'a Value) -> BoxFuture<'a, Value> {
    Box::pin(call(client, args))
}

pub async fn call(client: &ChatPptClient, args: &Value) -> Value {
    let ppt_id = match required_str(args, "ppt_id") {
        Ok(ppt_id) => ppt_id,
        Err(err) => return error_result(err.kind, err.message, None),
    };
    api_result(TOOL_REPLACE_TEMPLATE_PPT, client.create_task(ppt_id).await)
}
