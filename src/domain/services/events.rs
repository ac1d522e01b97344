use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    fn handle_crossterm(&self, event: CrosstermEvent) -> Option<Event> {
        match event {
            CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
            CrosstermEvent::Resize(_, _) => return Some(Event::UIResize()),
            CrosstermEvent::Key(keyevent) => {
                let input: Input = keyevent.into();
                let mapped = match (input.key, input.ctrl) {
                    (Key::Enter, _) => Event::KeyboardEnter(),
                    (Key::Up, _) => Event::UIScrollUp(),
                    (Key::Down, _) => Event::UIScrollDown(),
                    (Key::PageUp, _) | (Key::Char('u'), true) => Event::UIScrollPageUp(),
                    (Key::PageDown, _) | (Key::Char('d'), true) => Event::UIScrollPageDown(),
                    (Key::Char('c'), true) => Event::KeyboardCTRLC(),
                    _ => Event::KeyboardCharInput(input),
                };

                return Some(mapped);
            }
            _ => return None,
        }
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => self.handle_crossterm(input),
                    Some(Err(_)) => None,
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
