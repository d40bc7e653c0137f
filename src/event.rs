use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use crate::flight::FlightOutcome;

pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    /// Sent by the flight outcome handlers.
    Flight(FlightOutcome),
}

pub struct EventHandler {
    tx: mpsc::Sender<Event>,
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        let input_tx = tx.clone();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                // Ticks keep their cadence even while keys are held down.
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        // Repeat comes from the terminal's own key repeat.
                        Ok(crossterm::event::Event::Key(key))
                            if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                        {
                            input_tx.send(Event::Key(key))
                        }
                        // Only clicks; motion reports would flood the loop.
                        Ok(crossterm::event::Event::Mouse(mouse))
                            if matches!(mouse.kind, MouseEventKind::Down(_)) =>
                        {
                            input_tx.send(Event::Mouse(mouse))
                        }
                        _ => Ok(()),
                    };
                    if forwarded.is_err() {
                        return;
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { tx, rx }
    }

    /// Handle for posting events back into the loop.
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
