use std::any::Any;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

// Message returned to clients when a failure carries no usable text.
pub const FALLBACK_ERROR_MESSAGE: &str = "Internal server error";

pub const DEFAULT_SERVICE_ERROR_CODE: &str = "SERVICE_ERROR";

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// Typed failure raised by business logic.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
    pub code: String,
    pub details: Option<Value>,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: DEFAULT_SERVICE_ERROR_CODE.to_string(),
            details: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

// Any way a wrapped business operation can fail.
#[derive(Debug)]
pub enum OperationError {
    Service(ServiceError),
    Unexpected(BoxError),
    // Payload text is kept only when the panic carried a string.
    Panicked(Option<String>),
}

impl OperationError {
    pub fn unexpected<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Unexpected(err.into())
    }

    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(text) => Some(*text),
            Err(payload) => payload.downcast_ref::<&str>().map(|text| (*text).to_string()),
        };
        Self::Panicked(message)
    }

    // Raw failure text, if the failure carries any.
    pub fn message(&self) -> Option<String> {
        let text = match self {
            Self::Service(err) => err.message.clone(),
            Self::Unexpected(err) => err.to_string(),
            Self::Panicked(message) => message.clone()?,
        };
        (!text.trim().is_empty()).then_some(text)
    }

    // Message safe to put in the `error` field of a 500 envelope.
    pub fn client_message(&self) -> String {
        self.message()
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Service(err) => &err.code,
            Self::Unexpected(_) => "UNEXPECTED_ERROR",
            Self::Panicked(_) => "PANIC",
        }
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{} ({})", err.message, err.code),
            Self::Unexpected(err) => write!(f, "{err}"),
            Self::Panicked(Some(message)) => write!(f, "operation panicked: {message}"),
            Self::Panicked(None) => write!(f, "operation panicked"),
        }
    }
}

impl std::error::Error for OperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Unexpected(err) => Some(err.as_ref()),
            Self::Panicked(_) => None,
        }
    }
}

impl From<ServiceError> for OperationError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}
