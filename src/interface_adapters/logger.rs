use crate::domain::errors::OperationError;
use crate::domain::ports::ServiceLogger;

// Production logger adapter backed by `tracing`.
#[derive(Clone, Debug, Default)]
pub struct TracingLogger;

impl ServiceLogger for TracingLogger {
    fn error(&self, message: &str, failure: &OperationError) {
        match failure {
            OperationError::Service(err) => tracing::error!(
                code = %err.code,
                details = ?err.details,
                error = %err.message,
                "{message}"
            ),
            other => tracing::error!(code = other.code(), error = %other, "{message}"),
        }
    }

    fn info(&self, message: &str, service: &str) {
        tracing::info!(service, "{message}");
    }
}
