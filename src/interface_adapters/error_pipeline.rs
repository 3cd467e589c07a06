// Centralized error pipeline for routes bound through `async_handler`.
//
// A bound route receives a `ResponseSlot` to write its response into and a
// `PipelineNext` to hand failures to. After the route finishes, `dispatch`
// turns whichever of the two was used into the HTTP response.

use std::sync::{Arc, Mutex};

use axum::response::{IntoResponse, Response};
use futures::future::BoxFuture;

use crate::domain::envelope::ServiceReply;
use crate::domain::errors::OperationError;
use crate::domain::ports::{ErrorForwarder, ServiceLogger};
use crate::domain::request::ServiceRequest;

const NO_RESPONSE_MESSAGE: &str = "handler completed without responding";

// Response writer handed to bound routes.
#[derive(Clone, Default)]
pub struct ResponseSlot {
    inner: Arc<Mutex<Option<Response>>>,
}

impl ResponseSlot {
    pub fn new() -> Self {
        Self::default()
    }

    // The first response wins; later writes are ignored.
    pub fn send(&self, response: impl IntoResponse) -> bool {
        let Ok(mut guard) = self.inner.lock() else {
            return false;
        };
        if guard.is_some() {
            tracing::warn!("response already sent; ignoring second write");
            return false;
        }
        *guard = Some(response.into_response());
        true
    }

    pub fn is_sent(&self) -> bool {
        self.inner.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    fn take(&self) -> Option<Response> {
        self.inner.lock().ok().and_then(|mut guard| guard.take())
    }
}

// Forwarding handle that parks a route failure for the pipeline.
#[derive(Clone, Default)]
pub struct PipelineNext {
    failure: Arc<Mutex<Option<OperationError>>>,
}

impl PipelineNext {
    pub fn new() -> Self {
        Self::default()
    }

    fn take(&self) -> Option<OperationError> {
        self.failure.lock().ok().and_then(|mut guard| guard.take())
    }
}

impl ErrorForwarder<OperationError> for PipelineNext {
    fn forward(&self, error: OperationError) {
        if let Ok(mut guard) = self.failure.lock() {
            *guard = Some(error);
        }
    }
}

// Render a forwarded failure: log it once, then reply 500 with the envelope.
pub fn render_failure<L>(failure: OperationError, logger: &L) -> Response
where
    L: ServiceLogger + ?Sized,
{
    logger.error("Unhandled route error", &failure);
    ServiceReply::<()>::failed(failure.client_message()).into_response()
}

// Run a wrapped route and produce its single response.
pub async fn dispatch<W, L>(route: W, request: ServiceRequest, logger: &L) -> Response
where
    W: Fn(ServiceRequest, ResponseSlot, PipelineNext) -> BoxFuture<'static, ()>,
    L: ServiceLogger + ?Sized,
{
    let slot = ResponseSlot::new();
    let next = PipelineNext::new();

    route(request, slot.clone(), next.clone()).await;

    // A forwarded failure takes precedence over a partially written reply.
    if let Some(failure) = next.take() {
        return render_failure(failure, logger);
    }

    slot.take().unwrap_or_else(|| {
        tracing::warn!("{NO_RESPONSE_MESSAGE}");
        ServiceReply::<()>::failed(NO_RESPONSE_MESSAGE).into_response()
    })
}
