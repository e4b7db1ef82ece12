use serde_json::json;

pub const TOOL_CHECK: &str = "check";
pub const TOOL_BUILD_PPT: &str = "build_ppt";
pub const TOOL_QUERY_PPT: &str = "query_ppt";
pub const TOOL_REPLACE_TEMPLATE_PPT: &str = "replace_template_ppt";
pub const TOOL_DOWNLOAD_PPT: &str = "download_ppt";
pub const TOOL_EDITOR_PPT: &str = "editor_ppt";

pub const PROTOCOL_VERSION: &str = "2025-11-25";

pub const DEFAULT_API_BASE: &str = "https://saas.api.yoo-ai.com";
pub const DEFAULT_SSE_ADDR: &str = "127.0.0.1:8000";

pub const PATH_CREATE: &str = "/apps/ppt-create";
pub const PATH_RESULT: &str = "/apps/ppt-result";
pub const PATH_CREATE_TASK: &str = "/apps/ppt-create-task";
pub const PATH_DOWNLOAD: &str = "/apps/ppt-download";
pub const PATH_EDITOR: &str = "/apps/ppt-editor";

pub fn check_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false
    })
}

pub fn build_ppt_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "text": {
                "type": "string",
                "description": "Free text or markdown describing the presentation"
            }
        },
        "required": ["text"],
        "additionalProperties": false
    })
}

/// Shared by every tool that only needs a task identifier.
pub fn ppt_id_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "ppt_id": {
                "type": "string",
                "description": "PPT-ID"
            }
        },
        "required": ["ppt_id"],
        "additionalProperties": false
    })
}
