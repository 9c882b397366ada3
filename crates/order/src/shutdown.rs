use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Stop flag shared by the servers. Once triggered it stays triggered, so a
/// server started after the signal still stops immediately.
#[derive(Clone)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger(&self) {
        if !self.tx.send_replace(true) {
            info!("🛑 Shutdown triggered");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // the sender lives as long as self, so this only returns once triggered
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn waiter_created_after_trigger_returns_immediately() {
        let signal = ShutdownSignal::new();
        signal.trigger();

        let late = signal.clone();
        timeout(Duration::from_millis(100), late.wait())
            .await
            .expect("late waiter sees the earlier trigger");
        assert!(late.is_triggered());
    }

    #[tokio::test]
    async fn waiter_blocks_until_triggered() {
        let signal = ShutdownSignal::new();

        assert!(
            timeout(Duration::from_millis(20), signal.wait())
                .await
                .is_err()
        );

        let waiter = tokio::spawn({
            let signal = signal.clone();
            async move { signal.wait().await }
        });
        signal.trigger();

        timeout(Duration::from_millis(100), waiter)
            .await
            .expect("waiter woke up")
            .expect("waiter task");
    }

    #[tokio::test]
    async fn triggering_twice_is_harmless() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.trigger();

        assert!(signal.is_triggered());
    }
}
