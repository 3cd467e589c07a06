use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::domain::envelope::ServiceReply;
use crate::domain::errors::OperationError;
use crate::domain::ports::{RequestValidator, ServiceLogger};
use crate::domain::request::ServiceRequest;

// Request wrapper with injected validator and logger. Every call yields
// exactly one reply: 400 on validation failure, 200 on success, 500 when
// the operation fails or panics.
pub struct RequestHandler<V, L> {
    pub validator: V,
    pub logger: L,
    pub service_name: String,
}

impl<V, L> RequestHandler<V, L>
where
    V: RequestValidator,
    L: ServiceLogger,
{
    pub fn new(validator: V, logger: L, service_name: impl Into<String>) -> Self {
        Self {
            validator,
            logger,
            service_name: service_name.into(),
        }
    }

    pub async fn handle<T, F, Fut>(&self, request: ServiceRequest, operation: F) -> ServiceReply<T>
    where
        F: FnOnce(ServiceRequest) -> Fut,
        Fut: Future<Output = Result<T, OperationError>>,
    {
        let validation = self.validator.validate(&request);
        if !validation.is_empty() {
            return ServiceReply::invalid(validation.into_errors());
        }

        self.logger
            .info("executing service operation", &self.service_name);

        // Building the future may panic too, so it happens inside the guard.
        let outcome = AssertUnwindSafe(async move { operation(request).await })
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(OperationError::from_panic(payload)));

        match outcome {
            Ok(data) => ServiceReply::ok(data),
            Err(failure) => {
                self.logger.error("Service error", &failure);
                ServiceReply::failed(failure.client_message())
            }
        }
    }
}
