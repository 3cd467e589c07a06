use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domain::errors::OperationError;
use crate::domain::ports::ErrorForwarder;

// Wrap a route function so a failed or panicking future is handed to
// `next` exactly once instead of being dropped. The wrapper never writes
// a response itself; on success the route has already used `res`.
pub fn async_handler<F, Fut, Req, Res, N, T>(
    handler: F,
) -> impl Fn(Req, Res, N) -> BoxFuture<'static, ()> + Clone + Send + Sync + 'static
where
    F: Fn(Req, Res, N) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<T, OperationError>> + Send + 'static,
    Req: Send + 'static,
    Res: Send + 'static,
    N: ErrorForwarder<OperationError> + Clone + Send + 'static,
    T: Send + 'static,
{
    move |req, res, next: N| {
        let handler = handler.clone();
        let forward_to = next.clone();
        async move {
            let outcome = AssertUnwindSafe(async move { handler(req, res, next).await })
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(_)) => {}
                Ok(Err(err)) => forward_to.forward(err),
                Err(payload) => forward_to.forward(OperationError::from_panic(payload)),
            }
        }
        .boxed()
    }
}
