use serde_json::Value;

use crate::error_handler::{ApiError, ApiResult};

/// Candidate limit for `store` and `topK` for `search` when `numResults` is absent.
pub const DEFAULT_NUM_RESULTS: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoviesAction {
    Store,
    Search,
}

/// Validated body of `POST /api/movies`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoviesRequest {
    pub text: String,
    pub action: MoviesAction,
    pub num_results: usize,
}

impl MoviesRequest {
    /// Parses and validates the raw body.
    ///
    /// Checks run in this order: empty body, JSON syntax, `text`, `action`
    /// presence, `numResults`, `action` value. `numResults: null` counts as absent.
    pub fn parse(body: &[u8]) -> ApiResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::EmptyBody);
        }
        let json: Value =
            serde_json::from_slice(body).map_err(|e| ApiError::InvalidJson(e.to_string()))?;

        let text = match json.get("text") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => return Err(ApiError::MissingField("text")),
        };

        let action = match json.get("action") {
            None | Some(Value::Null) => return Err(ApiError::MissingField("action")),
            Some(Value::String(s)) if s.is_empty() => return Err(ApiError::MissingField("action")),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        let num_results = match json.get("numResults") {
            None | Some(Value::Null) => DEFAULT_NUM_RESULTS,
            Some(Value::Number(n)) => match n.as_u64() {
                Some(v) if v > 0 => usize::try_from(v).map_err(|_| ApiError::InvalidNumResults)?,
                _ => return Err(ApiError::InvalidNumResults),
            },
            Some(_) => return Err(ApiError::InvalidNumResults),
        };

        let action = match action.as_str() {
            "store" => MoviesAction::Store,
            "search" => MoviesAction::Search,
            _ => return Err(ApiError::InvalidAction(action)),
        };

        Ok(Self {
            text,
            action,
            num_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(body: &str) -> String {
        MoviesRequest::parse(body.as_bytes()).unwrap_err().to_string()
    }

    #[test]
    fn parses_with_default_num_results() {
        let r = MoviesRequest::parse(br#"{"text":"Inception","action":"search"}"#).unwrap();
        assert_eq!(r.action, MoviesAction::Search);
        assert_eq!(r.num_results, DEFAULT_NUM_RESULTS);

        let r = MoviesRequest::parse(br#"{"text":"Inception","action":"store","numResults":null}"#)
            .unwrap();
        assert_eq!(r.num_results, DEFAULT_NUM_RESULTS);
    }

    #[test]
    fn rejects_in_order() {
        assert_eq!(err("  "), "Request body is empty");
        assert_eq!(err("{nope"), "Invalid JSON in request body");
        assert_eq!(err(r#"{"action":"store"}"#), "Missing required field: text");
        assert_eq!(err(r#"{"text":""}"#), "Missing required field: text");
        assert_eq!(err(r#"{"text":"x"}"#), "Missing required field: action");
        assert_eq!(
            err(r#"{"text":"x","action":"bogus","numResults":0}"#),
            "numResults must be a positive integer"
        );
        assert_eq!(err(r#"{"text":"x","action":"delete"}"#), "Invalid action: delete");
    }

    #[test]
    fn num_results_must_be_positive_integer() {
        for bad in ["-1", "0", "2.5", "\"5\"", "true"] {
            let body = format!(r#"{{"text":"x","action":"search","numResults":{bad}}}"#);
            assert_eq!(err(&body), "numResults must be a positive integer", "input {bad}");
        }
    }
}
