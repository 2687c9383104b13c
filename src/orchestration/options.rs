use std::fmt;
use std::sync::Arc;

/// Callback invoked as a member of the receiver `C`
pub type ReceiverCallback<C> = Box<dyn FnOnce(&C) + Send + 'static>;

/// Callback with its receiver already captured
pub type BoundCallback = Box<dyn FnOnce() + Send + 'static>;

/// Caller-supplied outcome callbacks for a publish.
///
/// `C` is the receiver the callbacks run against. Publishing without a context
/// uses `C = ()`, in which case the callbacks are effectively free functions.
pub struct PublishOptions<C = ()> {
    success: Option<ReceiverCallback<C>>,
    error: Option<ReceiverCallback<C>>,
}

impl<C> PublishOptions<C> {
    pub fn new() -> Self {
        Self {
            success: None,
            error: None,
        }
    }

    /// Runs after the store confirms the publish
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&C) + Send + 'static,
    {
        self.success = Some(Box::new(callback));
        self
    }

    /// Runs if readiness resolution or the save fails
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&C) + Send + 'static,
    {
        self.error = Some(Box::new(callback));
        self
    }

    pub fn has_success(&self) -> bool {
        self.success.is_some()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Capture the receiver in each callback
    pub fn bind(self, context: Arc<C>) -> BoundOptions
    where
        C: Send + Sync + 'static,
    {
        BoundOptions {
            success: self.success.map(|cb| bind_to(cb, Arc::clone(&context))),
            error: self.error.map(|cb| bind_to(cb, context)),
        }
    }
}

fn bind_to<C>(callback: ReceiverCallback<C>, context: Arc<C>) -> BoundCallback
where
    C: Send + Sync + 'static,
{
    Box::new(move || callback(&context))
}

impl<C> Default for PublishOptions<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for PublishOptions<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishOptions")
            .field("success", &self.has_success())
            .field("error", &self.has_error())
            .finish()
    }
}

/// Options after normalization
#[derive(Default)]
pub struct BoundOptions {
    pub success: Option<BoundCallback>,
    pub error: Option<BoundCallback>,
}

impl fmt::Debug for BoundOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundOptions")
            .field("success", &self.success.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}
