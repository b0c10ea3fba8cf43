//! The `{ success, data, message, error, pagination }` wrapper every endpoint returns.

use homeservice_api_types::{FieldErrors, Page, Pagination};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEnvelope {
    pub success: Option<bool>,
    pub data: Option<Value>,
    pub message: Option<String>,
    pub error: Option<ErrorDescriptor>,
    pub pagination: Option<Pagination>,
}

/// Error payload; older endpoints send a bare string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDescriptor {
    Text(String),
    Detailed {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        details: Vec<FieldIssue>,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageObject<T> {
    items: Vec<T>,
    #[serde(default)]
    pagination: Option<Pagination>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    total_pages: Option<u32>,
}

const FALLBACK_MESSAGE: &str = "request failed";

impl ErrorDescriptor {
    fn parts(&self) -> (Option<String>, Option<String>, FieldErrors) {
        match self {
            ErrorDescriptor::Text(message) => (None, Some(message.clone()), FieldErrors::new()),
            ErrorDescriptor::Detailed {
                code,
                message,
                details,
            } => {
                let mut fields = FieldErrors::new();
                for issue in details {
                    fields.insert(issue.field.clone(), issue.message.clone());
                }
                (code.clone(), message.clone(), fields)
            }
        }
    }
}

impl RawEnvelope {
    pub fn is_failure(&self) -> bool {
        self.error.is_some() || self.success == Some(false)
    }

    /// Error for a 2xx response whose body reported a failure.
    pub fn failure(&self) -> Option<ApiError> {
        if !self.is_failure() {
            return None;
        }
        let (code, message, field_errors) = self.error_parts();
        Some(ApiError::Envelope {
            code,
            message: message.unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            field_errors,
        })
    }

    /// Error for a non-2xx response; falls back to the status reason when the
    /// body carries no message.
    pub fn status_error(&self, status: u16, reason: Option<&str>) -> ApiError {
        let (code, message, field_errors) = self.error_parts();
        ApiError::Status {
            status,
            code,
            message: message
                .or_else(|| reason.map(str::to_string))
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            field_errors,
        }
    }

    fn error_parts(&self) -> (Option<String>, Option<String>, FieldErrors) {
        match &self.error {
            Some(descriptor) => {
                let (code, message, fields) = descriptor.parts();
                (code, message.or_else(|| self.message.clone()), fields)
            }
            None => (None, self.message.clone(), FieldErrors::new()),
        }
    }

    /// Unwraps `data`; a missing payload decodes as JSON `null`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if let Some(error) = self.failure() {
            return Err(error);
        }
        let data = self.data.unwrap_or(Value::Null);
        Ok(serde_json::from_value(data)?)
    }

    /// Unwraps a list payload: either a bare array next to a `pagination`
    /// block or an object carrying `items` plus its own metadata.
    pub fn into_page<T: DeserializeOwned>(self) -> Result<Page<T>, ApiError> {
        if let Some(error) = self.failure() {
            return Err(error);
        }
        match self.data.unwrap_or(Value::Null) {
            Value::Null => Ok(Page::from_parts(Vec::new(), self.pagination)),
            Value::Array(items) => {
                let items: Vec<T> = serde_json::from_value(Value::Array(items))?;
                Ok(Page::from_parts(items, self.pagination))
            }
            object @ Value::Object(_) => {
                let page: PageObject<T> = serde_json::from_value(object)?;
                let pagination = page.pagination.or(self.pagination).or_else(|| {
                    page.total.map(|total| Pagination {
                        total,
                        page: page.page.unwrap_or(1),
                        limit: page.limit.unwrap_or_default(),
                        total_pages: page.total_pages.unwrap_or(1),
                    })
                });
                Ok(Page::from_parts(page.items, pagination))
            }
            other => Err(ApiError::Decode(format!(
                "expected a list payload, found {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> RawEnvelope {
        serde_json::from_value(value).expect("envelope")
    }

    #[test]
    fn unwraps_data() {
        let value: Vec<u32> = envelope(json!({"success": true, "data": [1, 2]}))
            .into_data()
            .expect("data");
        assert_eq!(value, vec![1, 2]);
    }

    #[test]
    fn missing_data_decodes_as_null() {
        let value: Option<u32> = envelope(json!({"success": true}))
            .into_data()
            .expect("data");
        assert!(value.is_none());
    }

    #[test]
    fn detailed_error_carries_field_messages() {
        let err = envelope(json!({
            "success": false,
            "error": {
                "code": "VALIDATION",
                "message": "invalid input",
                "details": [{"field": "title", "message": "too long"}]
            }
        }))
        .into_data::<Value>()
        .expect_err("failure");

        assert_eq!(err.code(), Some("VALIDATION"));
        assert_eq!(err.user_message(), "invalid input");
        assert_eq!(
            err.field_errors().and_then(|f| f.get("title")),
            Some("too long")
        );
    }

    #[test]
    fn bare_string_error_is_accepted() {
        let err = envelope(json!({"error": "not allowed"}))
            .into_data::<Value>()
            .expect_err("failure");
        assert!(matches!(err, ApiError::Envelope { ref message, .. } if message == "not allowed"));
    }

    #[test]
    fn success_false_without_error_uses_message() {
        let err = envelope(json!({"success": false, "message": "closed"}))
            .into_data::<Value>()
            .expect_err("failure");
        assert_eq!(err.user_message(), "closed");
    }

    #[test]
    fn status_error_falls_back_to_reason() {
        let err = RawEnvelope::default().status_error(404, Some("Not Found"));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message(), "Not Found");
    }

    #[test]
    fn page_from_array_and_pagination() {
        let page: Page<u32> = envelope(json!({
            "data": [1, 2, 3],
            "pagination": {"total": 23, "page": 2, "limit": 3, "totalPages": 8}
        }))
        .into_page()
        .expect("page");
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages, 8);
        assert!(page.has_next());
    }

    #[test]
    fn page_from_items_object() {
        let page: Page<u32> = envelope(json!({
            "data": {"items": [4], "total": 1, "page": 1, "limit": 20, "totalPages": 1}
        }))
        .into_page()
        .expect("page");
        assert_eq!(page.items, vec![4]);
        assert_eq!(page.limit, 20);
        assert!(!page.has_next());
    }

    #[test]
    fn scalar_list_payload_is_a_decode_error() {
        let err = envelope(json!({"data": 5}))
            .into_page::<u32>()
            .expect_err("decode");
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
