use crate::display::types::DisplayPayload;

/// JSON formatter for device payloads
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format payload as pretty-printed JSON (static files)
    pub fn format(payload: &DisplayPayload) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(payload)
    }

    /// Format payload as compact JSON (no whitespace)
    pub fn format_compact(payload: &DisplayPayload) -> Result<String, serde_json::Error> {
        serde_json::to_string(payload)
    }
}
