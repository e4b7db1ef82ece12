use crate::tools;
use serde_json::json;

pub mod contracts;
pub mod errors;

pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] =
    &["2024-11-05", "2025-03-26", "2025-06-18", contracts::PROTOCOL_VERSION];

pub fn tool_definitions() -> Vec<serde_json::Value> {
    tools::registry()
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "description": tool.description,
                "inputSchema": (tool.input_schema)()
            })
        })
        .collect()
}

/// Echoes the client's version when we speak it, otherwise offers our latest.
pub fn negotiate_protocol_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|requested| {
            SUPPORTED_PROTOCOL_VERSIONS
                .iter()
                .copied()
                .find(|supported| *supported == requested)
        })
        .unwrap_or(contracts::PROTOCOL_VERSION)
}
