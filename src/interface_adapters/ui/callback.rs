use std::fmt;
use std::sync::Arc;

// Shared event handler. Clones share identity, compared with `ptr_eq`.
pub struct Callback<A> {
    inner: Arc<dyn Fn(A) + Send + Sync + 'static>,
}

impl<A> Callback<A> {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(handler),
        }
    }

    pub fn call(&self, arg: A) {
        (self.inner)(arg);
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

// Cache that hands back the same callback while its dependencies compare
// equal, and rebuilds it when they change.
pub struct MemoizedCallback<D, A> {
    cached: Option<(D, Callback<A>)>,
}

impl<D, A> Default for MemoizedCallback<D, A> {
    fn default() -> Self {
        Self { cached: None }
    }
}

impl<D, A> MemoizedCallback<D, A>
where
    D: PartialEq,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<F>(&mut self, deps: D, build: impl FnOnce() -> F) -> Callback<A>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        match &self.cached {
            Some((known, callback)) if *known == deps => callback.clone(),
            _ => {
                let callback = Callback::new(build());
                self.cached = Some((deps, callback.clone()));
                callback
            }
        }
    }
}
