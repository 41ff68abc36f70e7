//! Bridge pump worker.
//!
//! Producers (the gateway side) enqueue messages with non-blocking `try_send`;
//! a single named worker thread drains the queue into a [`LocalBridge`]. There is
//! therefore never more than one dispatch in flight.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde_json::Value;

use crate::error::{FeedError, FeedResult, TransportError};

use super::{LocalBridge, TransportMessage};

#[derive(Debug, Default)]
struct PumpCounters {
    delivered: AtomicU64,
    dropped: AtomicU64,
}

/// Single-worker queue in front of a [`LocalBridge`].
#[derive(Debug)]
pub struct BridgePump {
    capacity: usize,
    tx: Option<Sender<TransportMessage>>,
    counters: Arc<PumpCounters>,
    join: Option<JoinHandle<()>>,
}

impl BridgePump {
    /// Spawn the worker.
    ///
    /// # Errors
    /// Returns `FeedError::Internal` if the worker thread cannot be spawned.
    pub fn spawn(bridge: LocalBridge, capacity: usize) -> FeedResult<Self> {
        let capacity = capacity.max(1);
        let (tx, rx) = bounded::<TransportMessage>(capacity);
        let counters = Arc::new(PumpCounters::default());

        let thread_counters = Arc::clone(&counters);
        let join = thread::Builder::new()
            .name("livefeed-bridge".to_string())
            .spawn(move || worker_loop(&bridge, &thread_counters, &rx))
            .map_err(|e| FeedError::internal(format!("failed to spawn bridge worker: {e}")))?;

        tracing::info!(capacity, "bridge pump started");

        Ok(Self {
            capacity,
            tx: Some(tx),
            counters,
            join: Some(join),
        })
    }

    /// Non-blocking enqueue.
    ///
    /// # Errors
    /// - `TransportError::QueueFull` when the queue is at capacity (counted as dropped).
    /// - `TransportError::Disconnected` when the worker has stopped.
    pub fn push(&self, channel: &str, payload: Option<Value>) -> Result<(), TransportError> {
        let Some(tx) = self.tx.as_ref() else {
            return Err(disconnected());
        };
        match tx.try_send(TransportMessage::new(channel, payload)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                Err(TransportError::QueueFull {
                    capacity: self.capacity,
                })
            }
            Err(TrySendError::Disconnected(_)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                Err(disconnected())
            }
        }
    }

    /// Messages rejected by [`push`](Self::push).
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.counters.dropped.load(Ordering::Relaxed)
    }

    /// Messages handed to the bridge by the worker.
    #[must_use]
    pub fn delivered(&self) -> u64 {
        self.counters.delivered.load(Ordering::Relaxed)
    }

    /// Close the queue and wait until everything already enqueued is delivered.
    pub fn shutdown(mut self) {
        drop(self.tx.take());
        if let Some(handle) = self.join.take() {
            if handle.join().is_err() {
                tracing::warn!("bridge worker panicked");
            }
        }
        tracing::info!(delivered = self.delivered(), dropped = self.dropped(), "bridge pump stopped");
    }
}

impl Drop for BridgePump {
    fn drop(&mut self) {
        // Closing the sender lets the worker drain and exit on its own.
        drop(self.tx.take());
        // Detach; a handler may still hold a clone of the bridge.
        drop(self.join.take());
    }
}

fn disconnected() -> TransportError {
    TransportError::Disconnected {
        path: "bridge_pump".to_string(),
    }
}

fn worker_loop(bridge: &LocalBridge, counters: &PumpCounters, rx: &Receiver<TransportMessage>) {
    while let Ok(msg) = rx.recv() {
        bridge.emit_message(&msg);
        counters.delivered.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::transport::{MessageHandler, Transport};

    #[test]
    fn pump_delivers_in_order() {
        let bridge = LocalBridge::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        let handler: MessageHandler = Arc::new(move |msg: &TransportMessage| {
            s.lock().unwrap().push(msg.payload.clone());
        });
        let _sub = bridge.subscribe("log:stats", handler).unwrap();

        let pump = BridgePump::spawn(bridge.clone(), 16).unwrap();
        for i in 0..5 {
            pump.push("log:stats", Some(json!(i))).unwrap();
        }
        pump.shutdown();

        let seen = seen.lock().unwrap();
        let expected: Vec<_> = (0..5).map(|i| Some(json!(i))).collect();
        assert_eq!(*seen, expected);
    }

    #[test]
    fn full_queue_is_counted() {
        let bridge = LocalBridge::new();
        let (gate_tx, gate_rx) = bounded::<()>(0);
        let gate_rx = Mutex::new(gate_rx);
        // Block the worker inside the first dispatch so the queue fills up.
        let handler: MessageHandler = Arc::new(move |_msg: &TransportMessage| {
            let _ = gate_rx.lock().unwrap().recv();
        });
        let _sub = bridge.subscribe("log:chat", handler).unwrap();

        let pump = BridgePump::spawn(bridge, 1).unwrap();
        pump.push("log:chat", Some(json!(0))).unwrap();

        let mut saw_full = false;
        for i in 1..64 {
            if let Err(TransportError::QueueFull { capacity }) = pump.push("log:chat", Some(json!(i))) {
                assert_eq!(capacity, 1);
                saw_full = true;
                break;
            }
        }
        assert!(saw_full);
        assert!(pump.dropped() >= 1);

        drop(gate_tx);
        pump.shutdown();
    }
}
