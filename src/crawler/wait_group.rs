use tokio::sync::watch;

/// Counter of outstanding units of work that can be awaited until it drops
/// back to zero.
///
/// `add` must happen before the work is handed out and `done` after it has
/// finished, otherwise `wait` can return while work is still in flight.
#[derive(Debug)]
pub struct WaitGroup {
    pending: watch::Sender<usize>,
}

impl WaitGroup {
    pub fn new() -> Self {
        let (pending, _) = watch::channel(0);
        Self { pending }
    }

    pub fn add(&self, n: usize) {
        self.pending.send_modify(|count| *count += n);
    }

    pub fn done(&self) {
        self.pending.send_modify(|count| {
            debug_assert!(*count > 0, "WaitGroup::done called more often than add");
            *count = count.saturating_sub(1);
        });
    }

    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    /// Resolves once the counter is zero.
    pub async fn wait(&self) {
        let mut rx = self.pending.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|count| *count == 0).await;
    }
}

impl Default for WaitGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::WaitGroup;
    use std::sync::Arc;
    use tokio::time::{Duration, timeout};

    #[tokio::test]
    async fn test_wait_returns_immediately_when_idle() {
        let wg = WaitGroup::new();
        timeout(Duration::from_millis(100), wg.wait())
            .await
            .expect("idle wait group must not block");
    }

    #[tokio::test]
    async fn test_wait_blocks_until_done() {
        let wg = Arc::new(WaitGroup::new());
        wg.add(2);

        assert!(timeout(Duration::from_millis(50), wg.wait()).await.is_err());

        let worker = {
            let wg = Arc::clone(&wg);
            tokio::spawn(async move {
                wg.done();
                // work discovered mid-flight is counted before this unit completes
                wg.add(1);
                wg.done();
                wg.done();
            })
        };

        timeout(Duration::from_secs(1), wg.wait())
            .await
            .expect("wait group should drain");
        worker.await.unwrap();
        assert_eq!(wg.pending(), 0);
    }
}
