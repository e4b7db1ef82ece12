pub const INVALID_INPUT: &str = "invalid_input";
pub const CONFIGURATION: &str = "configuration";
pub const TRANSPORT: &str = "transport";
pub const HTTP_STATUS: &str = "http_status";
pub const DECODE_FAILED: &str = "decode_failed";
pub const UNKNOWN_TOOL: &str = "unknown_tool";

// JSON-RPC codes
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_REQUEST: i64 = -32600;
