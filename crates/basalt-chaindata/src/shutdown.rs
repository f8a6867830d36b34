//! Cancellation plumbing for in-flight store operations.
//!
//! A [`Shutdown`] signal is cloned into the repository and index at
//! construction. Every store round trip races against it: if the signal
//! fires first the operation fails with `Cancelled` and a pending `put` is
//! never issued, so there are no partial writes.

use std::future::Future;

use basalt_store::StoreResult;
use tokio::sync::watch;

use crate::error::{ChainDataError, ChainDataResult};

/// Sender half: fires the shutdown signal.
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Trigger cancellation. All clones of the paired [`Shutdown`] observe
    /// it; triggering twice is harmless.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

/// Receiver half: observed by repository and index operations.
#[derive(Clone, Debug)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Create a connected handle/signal pair.
    pub fn channel() -> (ShutdownHandle, Shutdown) {
        let (tx, rx) = watch::channel(false);
        (ShutdownHandle { tx }, Shutdown { rx })
    }

    /// Returns `true` once the handle has triggered.
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Completes when the signal fires; pends forever otherwise, including
    /// when the handle is dropped without triggering.
    pub async fn triggered(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Run one store round trip, racing it against the optional signal.
pub(crate) async fn race_store<F, T>(
    shutdown: Option<&Shutdown>,
    op: F,
) -> ChainDataResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match shutdown {
        None => Ok(op.await?),
        Some(signal) => {
            if signal.is_triggered() {
                return Err(ChainDataError::Cancelled);
            }
            tokio::select! {
                biased;
                _ = signal.triggered() => Err(ChainDataError::Cancelled),
                result = op => Ok(result?),
            }
        }
    }
}
