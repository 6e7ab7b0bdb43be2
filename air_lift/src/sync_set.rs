use anyhow::Context;
use tokio::sync::Semaphore;

/// Counting rendezvous signal.
///
/// `signal` never blocks and pending signals accumulate; `wait` suspends until at least one
/// signal is pending and consumes exactly one. A wait fails only after [`Rendezvous::close`].
#[derive(Debug)]
pub struct Rendezvous {
    name: &'static str,
    permits: Semaphore,
}

impl Rendezvous {
    pub fn new(name: &'static str) -> Rendezvous {
        Rendezvous {
            name,
            permits: Semaphore::new(0),
        }
    }

    pub fn signal(&self) {
        self.permits.add_permits(1);
    }

    pub async fn wait(&self) -> anyhow::Result<()> {
        let permit = self
            .permits
            .acquire()
            .await
            .with_context(|| format!("error on the down operation for {}", self.name))?;
        permit.forget();
        Ok(())
    }

    /// Signals not consumed yet.
    pub fn pending(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn close(&self) {
        self.permits.close();
    }
}

/// Every handshake signal of the air lift. The state lock itself lives in
/// [`crate::airport::Airport`].
#[derive(Debug)]
pub struct SynchronizationSet {
    /// Passenger joined the queue. Awaited by the hostess.
    pub queue_has_passengers: Rendezvous,
    /// Hostess is serving the next queued passenger. Awaited by one passenger.
    pub hostess_ready_for_next: Rendezvous,
    /// Passenger handed over the identity document. Awaited by the hostess.
    pub identity_presented: Rendezvous,
    /// Pilot opened boarding. Awaited by the hostess.
    pub boarding_open: Rendezvous,
    /// Hostess closed boarding. Awaited by the pilot.
    pub boarding_complete: Rendezvous,
    /// One per seat after landing. Each awaited by one passenger on board.
    pub destination_reached: Rendezvous,
    /// Last passenger left the plane. Awaited by the pilot.
    pub plane_empty: Rendezvous,
}

impl SynchronizationSet {
    pub fn new() -> SynchronizationSet {
        SynchronizationSet {
            queue_has_passengers: Rendezvous::new("queue_has_passengers"),
            hostess_ready_for_next: Rendezvous::new("hostess_ready_for_next"),
            identity_presented: Rendezvous::new("identity_presented"),
            boarding_open: Rendezvous::new("boarding_open"),
            boarding_complete: Rendezvous::new("boarding_complete"),
            destination_reached: Rendezvous::new("destination_reached"),
            plane_empty: Rendezvous::new("plane_empty"),
        }
    }

    fn all(&self) -> [&Rendezvous; 7] {
        [
            &self.queue_has_passengers,
            &self.hostess_ready_for_next,
            &self.identity_presented,
            &self.boarding_open,
            &self.boarding_complete,
            &self.destination_reached,
            &self.plane_empty,
        ]
    }

    /// Fails every current and future wait.
    pub fn close_all(&self) {
        for rendezvous in self.all() {
            rendezvous.close();
        }
    }

    /// Total signals not consumed yet, over every rendezvous.
    pub fn pending(&self) -> usize {
        self.all().iter().map(|rendezvous| rendezvous.pending()).sum()
    }
}

impl Default for SynchronizationSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn signal_before_wait_is_kept() {
        let rendezvous = Rendezvous::new("test");
        rendezvous.signal();
        rendezvous.wait().await.unwrap();
        assert_eq!(rendezvous.pending(), 0);
    }

    #[tokio::test]
    async fn pending_signals_accumulate() {
        let rendezvous = Rendezvous::new("test");
        for _ in 0..3 {
            rendezvous.signal();
        }
        assert_eq!(rendezvous.pending(), 3);
        for _ in 0..3 {
            rendezvous.wait().await.unwrap();
        }
        let blocked = tokio::time::timeout(Duration::from_millis(20), rendezvous.wait()).await;
        assert!(blocked.is_err());
    }

    #[tokio::test]
    async fn wait_resumes_on_later_signal() {
        let rendezvous = Arc::new(Rendezvous::new("test"));
        let waiter = {
            let rendezvous = rendezvous.clone();
            tokio::spawn(async move { rendezvous.wait().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        rendezvous.signal();
        waiter.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn closed_wait_names_the_signal() {
        let sync = SynchronizationSet::new();
        sync.close_all();
        let err = sync.plane_empty.wait().await.unwrap_err();
        assert!(err.to_string().contains("plane_empty"));
    }
}
