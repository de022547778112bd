//! REST list response envelope

use serde::Deserialize;
use serde::Serialize;

use crate::error::ResponseError;
use crate::model::Row;

/// A list response from the REST API.
///
/// List endpoints answer with `{ success, data, total, page, pages }`; only
/// `data` feeds the table, the rest is kept for callers that page on the
/// server.
///
/// # Example
///
/// ```
/// use datagrid_lib::response::ApiResponse;
///
/// let body = r#"{"success": true, "data": [{"name": "Bob"}], "total": 1}"#;
/// let rows = ApiResponse::from_json(body).unwrap().into_rows().unwrap();
/// assert_eq!(rows.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Row>,
    /// Total records on the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    /// Server-side page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    /// Server-side page count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    /// Error or status message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl ApiResponse {
    /// Wrap rows in a successful response.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            success: true,
            total: Some(rows.len()),
            data: rows,
            page: None,
            pages: None,
            message: None,
        }
    }

    /// Parse a response body.
    ///
    /// Accepts the envelope object or a bare array of rows.
    pub fn from_json(body: &str) -> Result<Self, ResponseError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        if value.is_array() {
            Ok(Self::from_rows(serde_json::from_value(value)?))
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    /// Returns `true` if the API reported success.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Consumes the response and returns the rows.
    pub fn into_rows(self) -> Result<Vec<Row>, ResponseError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ResponseError::unsuccessful(self.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope() {
        let body = r#"{
            "success": true,
            "data": [{"id": 1, "name": "Bob"}, {"id": 2, "name": "alice"}],
            "total": 42,
            "page": 1,
            "pages": 5
        }"#;
        let response = ApiResponse::from_json(body).unwrap();
        assert_eq!(response.total, Some(42));
        assert_eq!(response.pages, Some(5));
        assert_eq!(response.into_rows().unwrap().len(), 2);
    }

    #[test]
    fn test_bare_array() {
        let response = ApiResponse::from_json(r#"[{"id": 1}]"#).unwrap();
        assert!(response.is_success());
        assert_eq!(response.total, Some(1));
    }

    #[test]
    fn test_unsuccessful() {
        let body = r#"{"success": false, "message": "Not authorized"}"#;
        let err = ApiResponse::from_json(body).unwrap().into_rows().unwrap_err();
        assert!(matches!(
            &err,
            ResponseError::Unsuccessful { message: Some(m) } if m == "Not authorized"
        ));
        assert_eq!(err.to_string(), "Request was not successful: Not authorized");
    }

    #[test]
    fn test_parse_error() {
        let err = ApiResponse::from_json("{not json").unwrap_err();
        assert!(matches!(err, ResponseError::Parse(_)));
    }
}
