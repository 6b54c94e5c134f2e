use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent};

use crate::bridge::{CityHit, GeoFix};
use crate::models::MonthlyCache;

/// Completion of a background bridge request. `seq` echoes the request
/// sequence number; the app ignores replies whose number is no longer
/// the one in flight. Errors travel as display strings.
#[derive(Debug)]
pub enum BridgeReply {
    Located {
        seq: u64,
        result: Result<GeoFix, String>,
    },
    MonthLoaded {
        seq: u64,
        result: Result<MonthlyCache, String>,
    },
    CitiesFound {
        seq: u64,
        result: Result<Vec<CityHit>, String>,
    },
}

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Bridge(BridgeReply),
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        let input_tx = tx.clone();
        thread::spawn(move || {
            let mut last_tick = std::time::Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(CEvent::Key(key)) => {
                            if input_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(_) => break,
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = std::time::Instant::now();
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender handle for bridge worker threads.
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }
}
