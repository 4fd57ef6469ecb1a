//! Event Handling - terminal input, effect results and ticks
//!
//! The app loop consumes one [`Event`] at a time from [`EventSource`].

use std::time::Duration;

use crossterm::event::{self as term, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{interval, Interval, MissedTickBehavior};

use super::views::Message;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Message(Message),
    Tick,
}

/// Keep key presses and resizes, drop everything else (releases, mouse,
/// focus, paste)
pub fn translate(event: term::Event) -> Option<Event> {
    match event {
        term::Event::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        term::Event::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

/// Terminal events, effect results and a periodic tick, merged
pub struct EventSource {
    terminal: EventStream,
    messages: UnboundedReceiver<Message>,
    tick: Interval,
}

impl EventSource {
    pub fn new(messages: UnboundedReceiver<Message>, tick_rate: Duration) -> Self {
        let mut tick = interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            terminal: EventStream::new(),
            messages,
            tick,
        }
    }

    /// Next event, or `None` once the terminal stream has ended
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                maybe = self.terminal.next() => match maybe {
                    Some(Ok(ev)) => {
                        if let Some(ev) = translate(ev) {
                            return Some(ev);
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!("terminal event error: {}", e);
                    }
                    None => return None,
                },
                Some(msg) = self.messages.recv() => return Some(Event::Message(msg)),
                _ = self.tick.tick() => return Some(Event::Tick),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_translate_keeps_presses_only() {
        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(
            translate(term::Event::Key(press)),
            Some(Event::Key(k)) if k.code == KeyCode::Char('j')
        ));

        let release = KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(translate(term::Event::Key(release)).is_none());
    }

    #[test]
    fn test_translate_resize_and_ignore_focus() {
        assert!(matches!(
            translate(term::Event::Resize(120, 40)),
            Some(Event::Resize(120, 40))
        ));
        assert!(translate(term::Event::FocusGained).is_none());
    }
}
