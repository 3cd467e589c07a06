use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::domain::validation::ValidationError;

// Uniform response envelope. Exactly one payload per variant, so the
// `success` flag can never disagree with the populated field.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse<T> {
    Success { data: T },
    Failure { error: String },
    Invalid { errors: Vec<ValidationError> },
}

impl<T> ServiceResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            _ => None,
        }
    }

    pub fn errors(&self) -> Option<&[ValidationError]> {
        match self {
            Self::Invalid { errors } => Some(errors),
            _ => None,
        }
    }
}

// Wire shape: `success` plus whichever of data/error/errors applies.
// Absent fields are omitted rather than written as null.
impl<T> Serialize for ServiceResponse<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ServiceResponse", 2)?;
        match self {
            Self::Success { data } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
            Self::Invalid { errors } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}

// The only statuses the request wrapper produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    Ok,
    BadRequest,
    InternalError,
}

impl ReplyStatus {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::InternalError => 500,
        }
    }
}

// Status plus envelope, produced once per handled request.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply<T> {
    pub status: ReplyStatus,
    pub body: ServiceResponse<T>,
}

impl<T> ServiceReply<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: ReplyStatus::Ok,
            body: ServiceResponse::Success { data },
        }
    }

    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self {
            status: ReplyStatus::BadRequest,
            body: ServiceResponse::Invalid { errors },
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: ReplyStatus::InternalError,
            body: ServiceResponse::Failure {
                error: error.into(),
            },
        }
    }
}
