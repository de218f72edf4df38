//! Error Kind - Classification of errors
//!
//! Defines the closed [`ErrorKind`] taxonomy shared by every layer.

use serde::Serialize;

/// Closed set of failure kinds.
///
/// Every condition raised by the identity core is one of these five.
/// Each kind maps to a stable numeric code and a machine-usable reason
/// string that callers can serialize directly.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Validation;
/// assert_eq!(kind.code(), 400);
/// assert_eq!(kind.reason(), "VALIDATION_ERROR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A mandatory input field is absent
    PropertyRequired,
    /// Input failed a format or business rule
    Validation,
    /// Operation logically failed without a system fault (e.g. bad credentials)
    Response,
    /// Authorization denied
    Permission,
    /// Persistence-layer fault
    Database,
}

impl ErrorKind {
    /// Stable numeric code for the external error envelope
    #[inline]
    pub const fn code(&self) -> u16 {
        match self {
            ErrorKind::PropertyRequired => 400,
            ErrorKind::Validation => 400,
            ErrorKind::Response => 400,
            ErrorKind::Permission => 403,
            ErrorKind::Database => 500,
        }
    }

    /// Machine-usable reason string
    #[inline]
    pub const fn reason(&self) -> &'static str {
        match self {
            ErrorKind::PropertyRequired => "PROPERTY_REQUIRED",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Response => "RESPONSE_ERROR",
            ErrorKind::Permission => "PERMISSION_ERROR",
            ErrorKind::Database => "DATABASE_ERROR",
        }
    }

    /// Human-readable label
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::PropertyRequired => "Property Required",
            ErrorKind::Validation => "Validation",
            ErrorKind::Response => "Response",
            ErrorKind::Permission => "Permission",
            ErrorKind::Database => "Database",
        }
    }

    /// Whether this kind signals a system fault (5xx class).
    ///
    /// These should be logged at error level.
    #[inline]
    pub const fn is_system_fault(&self) -> bool {
        self.code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
