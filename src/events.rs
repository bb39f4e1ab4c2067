use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent};

use crate::notify::PrayerNotification;

/// Everything the main loop reacts to. Timers and the input thread only
/// post events; state is mutated on the loop thread alone.
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    NotificationDue {
        generation: u64,
        notification: PrayerNotification,
    },
}

pub struct EventHandler {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Sender handed to timer drivers.
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    /// Forward terminal key presses onto the event channel.
    pub fn spawn_input(&self, poll_ms: u64) {
        let tx = self.tx.clone();
        let poll = Duration::from_millis(poll_ms);

        thread::spawn(move || {
            loop {
                if event::poll(poll).unwrap_or(false) {
                    match event::read() {
                        Ok(CEvent::Key(key)) => {
                            if tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    }
                }
            }
        });
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
