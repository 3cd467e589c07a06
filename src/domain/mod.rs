// Domain layer: response envelope, request view, failures and ports.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod ports;
pub mod request;
pub mod validation;

pub use envelope::{ReplyStatus, ServiceReply, ServiceResponse};
pub use errors::{OperationError, ServiceError};
pub use request::ServiceRequest;
pub use validation::{ValidationError, ValidationLocation, ValidationResult};
