use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::store::Key;

/// Tracks the callers blocked on an empty list, per key, in registration order.
///
/// Waiters never receive elements directly. A push wakes as many of them as there are elements,
/// oldest first, and each woken caller locks the key again to take its element. Elements therefore
/// never leave a list outside of its lock.
///
/// A waiter is registered while its caller still holds the key lock, and pushers wake waiters
/// while holding that same lock. A push can therefore never slip in between a caller finding the
/// list empty and the caller becoming visible as a waiter.
#[derive(Debug, Default)]
pub struct WaitCoordinator {
    queues: Mutex<HashMap<Key, VecDeque<Waiter>>>,
}

#[derive(Debug)]
struct Waiter {
    id: Uuid,
    tx: oneshot::Sender<()>,
}

/// A registered waiter. Dropping it unregisters the waiter, and hands a wake-up it received but
/// never acted on to the next waiter in line.
#[derive(Debug)]
pub struct Ticket<'a> {
    coordinator: &'a WaitCoordinator,
    key: Key,
    id: Uuid,
    rx: oneshot::Receiver<()>,
    settled: bool,
}

impl WaitCoordinator {
    pub fn new() -> WaitCoordinator {
        WaitCoordinator::default()
    }

    /// Queues a waiter on `key`. A caller woken before that lost its element to someone else
    /// registers again with `first`, keeping its turn.
    pub fn register(&self, key: &str, first: bool) -> Ticket<'_> {
        let (tx, rx) = oneshot::channel();
        let id = Uuid::new_v4();

        let mut queues = self.queues.lock();
        let queue = queues.entry(key.to_string()).or_default();
        match first {
            true => queue.push_front(Waiter { id, tx }),
            false => queue.push_back(Waiter { id, tx }),
        }
        debug!(key, %id, waiting = queue.len(), "waiter registered");

        Ticket {
            coordinator: self,
            key: key.to_string(),
            id,
            rx,
            settled: false,
        }
    }

    /// Wakes up to `available` waiters of `key`, oldest first. Returns the number of waiters woken.
    ///
    /// Pushers call this holding the lock of `key`, `available` being the length of its list.
    pub fn wake(&self, key: &str, available: usize) -> usize {
        let mut queues = self.queues.lock();
        let Some(queue) = queues.get_mut(key) else {
            return 0;
        };

        let mut woken = 0;
        while woken < available {
            let Some(waiter) = queue.pop_front() else {
                break;
            };

            // Gone already, its ticket is being dropped.
            if waiter.tx.send(()).is_ok() {
                debug!(key, id = %waiter.id, "waiter woken");
                woken += 1;
            }
        }

        if queue.is_empty() {
            queues.remove(key);
        }

        woken
    }

    /// Number of waiters currently queued on `key`.
    pub fn waiting(&self, key: &str) -> usize {
        self.queues.lock().get(key).map_or(0, VecDeque::len)
    }

    fn cancel(&self, key: &str, id: Uuid) {
        let mut queues = self.queues.lock();
        if let Some(queue) = queues.get_mut(key) {
            queue.retain(|waiter| waiter.id != id);
            if queue.is_empty() {
                queues.remove(key);
            }
        }
    }
}

impl Ticket<'_> {
    /// Waits to be woken, up to `deadline`. `None` waits forever.
    ///
    /// Returns `false` if the deadline passes first.
    pub async fn wait(mut self, deadline: Option<Instant>) -> bool {
        let woken = match deadline {
            None => (&mut self.rx).await.is_ok(),
            Some(deadline) => match tokio::time::timeout_at(deadline, &mut self.rx).await {
                Ok(res) => res.is_ok(),
                Err(_) => {
                    self.coordinator.cancel(&self.key, self.id);
                    debug!(key = %self.key, id = %self.id, "waiter timed out");

                    // A pusher may have woken this waiter right before it was cancelled.
                    self.rx.try_recv().is_ok()
                }
            },
        };

        self.settled = true;
        woken
    }
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        // Wake-ups are sent under the queue lock, so once cancelled nothing else can arrive.
        self.coordinator.cancel(&self.key, self.id);
        if self.rx.try_recv().is_ok() {
            debug!(key = %self.key, id = %self.id, "passing wake-up on");
            self.coordinator.wake(&self.key, 1);
        }
    }
}
