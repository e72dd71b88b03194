use serde_json::Value;

use crate::error::AppError;

/// One vacancy exactly as the search API returns it.
pub type RawPosting = Value;

/// `salary.currency` of a posting, if the posting carries one.
pub fn salary_currency(raw: &RawPosting) -> Option<&str> {
    raw.get("salary")
        .and_then(|s| s.get("currency"))
        .and_then(|c| c.as_str())
}

/// Extract the `items` array from one search results page.
pub fn page_items(page: Value) -> Result<Vec<RawPosting>, AppError> {
    match page {
        Value::Object(mut obj) => match obj.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(AppError::UnexpectedResponse(
                "Missing 'items' in response".to_string(),
            )),
        },
        _ => Err(AppError::UnexpectedResponse(
            "Response body is not an object".to_string(),
        )),
    }
}
