use std::fmt;

// Teardown action returned by a mount effect. Consumed on run, so it can
// only ever execute once.
pub struct Cleanup(Option<Box<dyn FnOnce() + Send + 'static>>);

impl Cleanup {
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self(Some(Box::new(action)))
    }

    pub fn noop() -> Self {
        Self(None)
    }

    pub fn run(self) {
        if let Some(action) = self.0 {
            action();
        }
    }
}

impl Default for Cleanup {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Cleanup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cleanup")
            .field(&if self.0.is_some() { "action" } else { "noop" })
            .finish()
    }
}
