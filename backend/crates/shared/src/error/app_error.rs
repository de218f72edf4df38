//! Application Error - Unified error type for the identity core
//!
//! Defines [`AppError`], the [`AppResult<T>`] alias, and the external
//! [`ErrorBody`] envelope.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::Serialize;

use super::kind::ErrorKind;

/// Unified application error.
///
/// Carries one of the five taxonomy kinds plus a user-facing message.
/// `PropertyRequired` errors additionally name the missing property so
/// callers can point at the offending field.
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::AppError;
///
/// let err = AppError::property_required("Email address is required", "email");
/// assert_eq!(err.code(), 400);
/// assert_eq!(err.property(), Some("email"));
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    /// Missing property name (PropertyRequired only)
    property: Option<Cow<'static, str>>,
    /// Original error, kept for logs and never serialized
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// Result alias used throughout the core
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an error of the given kind
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            property: None,
            source: None,
        }
    }

    /// Mandatory field absent; names the missing property
    #[inline]
    pub fn property_required(
        message: impl Into<Cow<'static, str>>,
        property: impl Into<Cow<'static, str>>,
    ) -> Self {
        let mut err = Self::new(ErrorKind::PropertyRequired, message);
        err.property = Some(property.into());
        err
    }

    /// Input failed a format or business rule
    #[inline]
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Operation logically failed, no system fault
    #[inline]
    pub fn response(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Response, message)
    }

    /// Authorization denied
    #[inline]
    pub fn permission(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Permission, message)
    }

    /// Persistence-layer fault
    #[inline]
    pub fn database(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Attach the original error (kept for logging)
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn code(&self) -> u16 {
        self.kind.code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Map to the externally-facing envelope.
    ///
    /// `path` and `method` are supplied by the transport layer when it
    /// knows them; internal detail (`source`) is never exposed.
    pub fn to_body(&self, path: Option<&str>, method: Option<&str>) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            reason: self.kind.reason(),
            message: self.message.to_string(),
            property: self.property.as_ref().map(|p| p.to_string()),
            path: path.map(str::to_string),
            method: method.map(str::to_string),
        }
    }
}

/// Externally-facing error shape, safe for direct serialization
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub reason: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl ErrorBody {
    /// Envelope for errors that escaped the taxonomy (unknown faults).
    ///
    /// The message is deliberately generic; the caller logs the detail.
    pub fn unknown() -> Self {
        Self {
            code: 500,
            reason: "UNKNOWN_ERROR",
            message: "An unexpected error occurred".to_string(),
            property: None,
            path: None,
            method: None,
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(property) = &self.property {
            builder.field("property", property);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(property) = &self.property {
            write!(f, " (property: {})", property)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

// ============================================================================
// Result extension traits
// ============================================================================

/// Extension trait converting `Result<T, E>` into `AppResult<T>`
pub trait ResultExt<T, E> {
    /// Wrap the error with the given kind and message
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        self.map_err(|e| AppError::new(kind, message).with_source(e))
    }
}

/// Extension trait converting `Option<T>` into `AppResult<T>`
pub trait OptionExt<T> {
    /// `None` becomes an error of the given kind
    fn ok_or_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>;

    /// `None` becomes a `Response` kind error (logical failure)
    fn ok_or_response(self, message: impl Into<Cow<'static, str>>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T> {
        self.ok_or_else(|| AppError::new(kind, message))
    }

    fn ok_or_response(self, message: impl Into<Cow<'static, str>>) -> AppResult<T> {
        self.ok_or_app_err(ErrorKind::Response, message)
    }
}
