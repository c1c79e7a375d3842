use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Exclusive access to the single loaded model
///
/// The model is not safe for concurrent use and holds the compute device, so
/// every model interaction runs while holding this gate. Waiters queue without
/// bound or timeout. The lock is not reentrant.
pub struct ModelGate<M> {
    model: Arc<Mutex<M>>,
}

impl<M> ModelGate<M> {
    pub fn new(model: M) -> Self {
        Self {
            model: Arc::new(Mutex::new(model)),
        }
    }

    /// Wait for exclusive access to the model
    pub async fn lock(&self) -> MutexGuard<'_, M> {
        self.model.lock().await
    }

    /// Whether a caller currently holds the model
    #[cfg(test)]
    pub(crate) fn is_busy(&self) -> bool {
        self.model.try_lock().is_err()
    }
}

impl<M> Clone for ModelGate<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
        }
    }
}
