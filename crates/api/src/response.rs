//! Shared response envelope types for API handlers.
//!
//! Every successful response is `{ "success": true, "data"?, "message"?,
//! "pagination"? }`. Errors use the same envelope with `success: false` and
//! an `error` object; see [`crate::error::AppError`]. Use [`ApiResponse`]
//! instead of ad-hoc `serde_json::json!` bodies.

use serde::Serialize;

/// Standard response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::ok(lead).with_message("Lead created successfully")))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::with_success(true, data)
    }

    /// A response whose success flag is decided by the caller (bulk results).
    pub fn with_success(success: bool, data: T) -> Self {
        Self {
            success,
            data: Some(data),
            message: None,
            pagination: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

impl ApiResponse<()> {
    /// A successful response with only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            pagination: None,
        }
    }
}

/// Page metadata for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
    }

    #[test]
    fn empty_fields_are_omitted() {
        let json = serde_json::to_value(ApiResponse::message("done")).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "message": "done" }));

        let json = serde_json::to_value(
            ApiResponse::ok(vec![1, 2]).with_pagination(Pagination::new(2, 2, 5)),
        )
        .unwrap();
        assert_eq!(json["pagination"]["totalPages"], 3);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }
}
