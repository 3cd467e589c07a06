use async_trait::async_trait;

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::OperationError;
use crate::domain::request::ServiceRequest;
use crate::domain::validation::ValidationResult;

// Port for inspecting a request before business logic runs.
pub trait RequestValidator: Send + Sync {
    fn validate(&self, request: &ServiceRequest) -> ValidationResult;
}

impl<T> RequestValidator for std::sync::Arc<T>
where
    T: RequestValidator + ?Sized,
{
    fn validate(&self, request: &ServiceRequest) -> ValidationResult {
        (**self).validate(request)
    }
}

// Port for the logging capability injected into request handlers.
pub trait ServiceLogger: Send + Sync {
    fn error(&self, message: &str, failure: &OperationError);
    fn info(&self, message: &str, service: &str);
}

// Port for wrapping business work in a storage transaction.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    async fn begin(&self) -> Result<(), String>;
    async fn commit(&self) -> Result<(), String>;
    async fn rollback(&self) -> Result<(), String>;
}

// Port for the user records behind the example service.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, String>;
    async fn get(&self, id: u64) -> Result<Option<User>, String>;
    async fn insert(&self, user: NewUser) -> Result<User, String>;
}

// Port for handing a route failure to the centralized error pipeline.
pub trait ErrorForwarder<E>: Send + Sync {
    fn forward(&self, error: E);
}

impl<E, T> ErrorForwarder<E> for std::sync::Arc<T>
where
    T: ErrorForwarder<E> + ?Sized,
{
    fn forward(&self, error: E) {
        (**self).forward(error);
    }
}
