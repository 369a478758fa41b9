//! Shared helpers for integration tests

use serde_json::{json, Value};

/// Build a Play Store `batchexecute` response body carrying the given review
/// contents and continuation token
pub fn batchexecute_body(contents: &[&str], next_token: Option<&str>) -> String {
    let reviews: Vec<Value> = contents
        .iter()
        .map(|content| json!(["gp:review-id", ["Pengguna", []], 5, null, content, 3]))
        .collect();
    let token = match next_token {
        Some(t) => json!([null, t]),
        None => json!([null, null]),
    };
    let payload = json!([reviews, token]);

    let outer = json!([
        ["wrb.fr", "UsvDTd", payload.to_string(), null, null, null, "generic"],
        ["di", 42],
    ]);
    format!(")]}}'\n\n123\n{outer}\n25\n[[\"e\",4]]")
}

/// Build a `translate_a/single` response body for one translated text
pub fn translate_body(translated: &str, original: &str) -> String {
    json!([[[translated, original, null, null, 3]], null, "id"]).to_string()
}
