/// Centralized helper for WebSocket error responses.
///
/// Use this helper to ensure all error messages are consistent, explicit, and include a code and context.

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_MESSAGE").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. a client id).
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    let context_str = context.unwrap_or("");
    format!(
        r#"{{"action":"error","data":{{"code":"{}","message":"{}","context":"{}"}}}}"#,
        code, message, context_str
    )
}
