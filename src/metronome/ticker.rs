// Ticker - cancellable periodic timer thread
//
// Emits one tick immediately on spawn (visual feedback without waiting a
// full beat), then one per interval. Cancellation goes through a condvar so
// teardown never has to wait out the remainder of a beat.

use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ringbuf::traits::Producer;

use crate::messaging::channels::{Tick, TickProducer};

/// Owned handle over a spawned tick thread. Dropping the handle cancels the
/// thread and joins it, so a live ticker can never outlive its owner.
pub struct Ticker {
    cancel: Arc<(Mutex<bool>, Condvar)>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start a tick thread firing into `tick_tx` every `interval`.
    pub fn spawn(interval: Duration, mut tick_tx: TickProducer) -> Self {
        let cancel = Arc::new((Mutex::new(false), Condvar::new()));
        let shared = Arc::clone(&cancel);

        let handle = thread::spawn(move || {
            let (lock, cvar) = &*shared;
            loop {
                // A full channel means the consumer is far behind; dropping
                // the tick is better than stalling the beat.
                let _ = tick_tx.try_push(Tick::now());

                let cancelled = lock.lock().unwrap();
                let (cancelled, _) = cvar
                    .wait_timeout_while(cancelled, interval, |cancelled| !*cancelled)
                    .unwrap();
                if *cancelled {
                    break;
                }
            }
        });

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Stop the thread and wait for it to finish. Idempotent.
    pub fn cancel(&mut self) {
        let (lock, cvar) = &*self.cancel;
        *lock.lock().unwrap() = true;
        cvar.notify_all();

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
