//! Cancellable timers that post [`Event`]s.
//!
//! A [`TimerHandle`] is the only way to stop a pending timer: cancelling (or
//! dropping) it disconnects the channel the timer thread is waiting on.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::events::Event;

#[derive(Debug)]
pub struct TimerHandle {
    _cancel: mpsc::Sender<()>,
}

impl TimerHandle {
    pub fn new(cancel: mpsc::Sender<()>) -> Self {
        Self { _cancel: cancel }
    }

    pub fn cancel(self) {}
}

pub trait TimerDriver {
    /// Post `event` once after `delay`.
    fn once(&self, delay: Duration, event: Event) -> TimerHandle;

    /// Post `event` every `period` until cancelled.
    fn every(&self, period: Duration, event: Event) -> TimerHandle;
}

/// One sleeping thread per timer, posting into the main event channel.
pub struct ThreadTimers {
    tx: mpsc::Sender<Event>,
}

impl ThreadTimers {
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx }
    }
}

impl TimerDriver for ThreadTimers {
    fn once(&self, delay: Duration, event: Event) -> TimerHandle {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let tx = self.tx.clone();

        thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                let _ = tx.send(event);
            }
        });

        TimerHandle::new(cancel_tx)
    }

    fn every(&self, period: Duration, event: Event) -> TimerHandle {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let tx = self.tx.clone();

        thread::spawn(move || {
            while let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(period) {
                if tx.send(event.clone()).is_err() {
                    break;
                }
            }
        });

        TimerHandle::new(cancel_tx)
    }
}
