use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{Instant, timeout_at};

/// Fixed refresh cadence. A wait for input that runs this long becomes a tick.
pub const TICK_RATE: Duration = Duration::from_millis(2000);

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Tick,
    Resize,
}

/// Reads terminal events on the calling task. There is no background task:
/// the wait for the next key is the only place the loop suspends.
pub struct EventHandler {
    reader: EventStream,
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            reader: EventStream::new(),
            tick_rate,
        }
    }

    /// Next key press or resize, or `Tick` once the tick window closes.
    /// Returns `None` when the terminal event stream ends or fails.
    pub async fn next(&mut self) -> Option<Event> {
        let deadline = Instant::now() + self.tick_rate;
        loop {
            match timeout_at(deadline, self.reader.next()).await {
                Err(_) => return Some(Event::Tick),
                Ok(Some(Ok(evt))) => {
                    if let Some(e) = map_event(evt) {
                        return Some(e);
                    }
                }
                Ok(Some(Err(_))) | Ok(None) => return None,
            }
        }
    }

    /// Next key press or resize with no deadline. Used while a modal dialog
    /// is open, so the dialog can be re-centred without sampling.
    pub async fn next_input(&mut self) -> Option<Event> {
        loop {
            match self.reader.next().await {
                Some(Ok(evt)) => {
                    if let Some(e) = map_event(evt) {
                        return Some(e);
                    }
                }
                Some(Err(_)) | None => return None,
            }
        }
    }
}

fn map_event(evt: CrosstermEvent) -> Option<Event> {
    match evt {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
        _ => None,
    }
}
