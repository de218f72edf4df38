//! Response Envelope
//!
//! Structured success shape produced by use cases:
//! `{ status, message, item? }`. The transport layer serializes it
//! directly and mirrors `status` in the HTTP status code.

use serde::Serialize;

/// Success envelope
#[derive(Debug, Clone, Serialize)]
pub struct Response<T> {
    /// Numeric status mirrored by the transport layer
    pub status: u16,
    /// Human-readable outcome message
    pub message: String,
    /// Payload, when the operation produces one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
}

impl<T> Response<T> {
    /// 200 with payload
    pub fn ok(message: impl Into<String>, item: T) -> Self {
        Self {
            status: 200,
            message: message.into(),
            item: Some(item),
        }
    }

    /// 201 with payload
    pub fn created(message: impl Into<String>, item: T) -> Self {
        Self {
            status: 201,
            message: message.into(),
            item: Some(item),
        }
    }

    /// 202 with payload
    pub fn accepted(message: impl Into<String>, item: T) -> Self {
        Self {
            status: 202,
            message: message.into(),
            item: Some(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        assert_eq!(Response::ok("done", 1).status, 200);
        assert_eq!(Response::created("made", 1).status, 201);
        assert_eq!(Response::accepted("pending", 1).status, 202);
    }

    #[test]
    fn test_serialization() {
        let resp = Response::ok("User logged in successfully", serde_json::json!({"a": 1}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], 200);
        assert_eq!(json["message"], "User logged in successfully");
        assert_eq!(json["item"]["a"], 1);
    }
}
