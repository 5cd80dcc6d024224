//! Uniform response envelope.
//!
//! Every endpoint, success or failure, answers with
//! `{success, message, data?, meta?, error?}`.

use serde::Serialize;
use serde_json::Value;

use crate::domain::pagination::PageMeta;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success envelope with a payload.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta: None,
            error: None,
        }
    }

    /// Attaches page metadata to a success envelope.
    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl ApiResponse<Value> {
    /// Success envelope without a payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            meta: None,
            error: None,
        }
    }

    /// Failure envelope carrying the error detail.
    pub fn error(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            meta: None,
            error: Some(detail.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pagination::PageParams;

    #[test]
    fn test_success_envelope_omits_empty_fields() {
        let json = serde_json::to_value(ApiResponse::success("ok", vec![1, 2])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "ok");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("meta").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let json = serde_json::to_value(ApiResponse::error("Unauthorized", "Invalid API Key"))
            .unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid API Key");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_meta_round_trips() {
        let meta = PageParams::resolve(2, 10, None, None).meta(25);
        let json =
            serde_json::to_value(ApiResponse::success("ok", Vec::<i32>::new()).with_meta(meta))
                .unwrap();
        assert_eq!(json["meta"]["total_pages"], 3);
        assert_eq!(json["meta"]["has_prev"], true);
    }
}
