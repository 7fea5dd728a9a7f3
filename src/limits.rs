use serde_json::Value;
use tracing::debug;

/// Token-limit fields providers accept in a completion payload.
const TOKEN_LIMIT_FIELDS: [&str; 3] =
    ["max_tokens", "max_output_tokens", "max_completion_tokens"];

/// Rewrite outbound token-limit fields so none exceeds `ceiling`.
///
/// Only fields already present on the payload are touched. Non-numeric
/// values and non-object payloads pass through unchanged.
pub fn clamp_token_limits(payload: &mut Value, ceiling: u32) {
    let Some(map) = payload.as_object_mut() else {
        return;
    };

    for field in TOKEN_LIMIT_FIELDS {
        if let Some(value) = map.get_mut(field) {
            if let Some(requested) = value.as_u64() {
                if requested > u64::from(ceiling) {
                    debug!(field, requested, ceiling, "clamping token limit");
                    *value = Value::from(ceiling);
                }
            }
        }
    }
}
