#[cfg(test)]
#[path = "panel_test.rs"]
mod tests;

use std::collections::HashMap;

use ratatui::prelude::Rect;

use super::BubbleList;
use super::Scroll;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageUpdate;

/// UI state for the chat view. Placeholders are correlated to store rows
/// through an explicit identifier map rather than by walking the rendered
/// widgets.
pub struct ChatPanel {
    pub bubble_list: BubbleList,
    pub gate_open: bool,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pending: HashMap<String, usize>,
    pub scroll: Scroll,
}

impl Default for ChatPanel {
    fn default() -> ChatPanel {
        return ChatPanel {
            bubble_list: BubbleList::new(),
            gate_open: false,
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            pending: HashMap::new(),
            scroll: Scroll::default(),
        };
    }
}

impl ChatPanel {
    pub fn new() -> ChatPanel {
        return ChatPanel::default();
    }

    /// Switches from the waiting view to the chat view and starts the
    /// conversation over with the provided greeting.
    pub fn begin_conversation(&mut self, greeting: Message) {
        self.messages.clear();
        self.pending.clear();
        self.gate_open = true;
        self.add_message(greeting);
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    /// Trims a submission and records the user bubble. Blank input adds
    /// nothing and returns nothing to send.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        self.add_message(Message::new(Author::User, text));
        return Some(text.to_string());
    }

    /// Adds a typing placeholder and remembers which row it belongs to. A
    /// placeholder without a record identifier is rendered but can never be
    /// resolved.
    pub fn track_pending(&mut self, placeholder: Message) {
        if let Some(record_id) = placeholder.record_id() {
            self.pending.insert(record_id.to_string(), self.messages.len());
        }
        self.add_message(placeholder);
    }

    pub fn pending_count(&self) -> usize {
        return self.pending.len();
    }

    /// Resolves the placeholder matching an update event. Each tracked row
    /// resolves at most once; events for unknown rows or without an answer
    /// are dropped.
    pub fn handle_update(&mut self, update: &MessageUpdate) {
        let answer = match &update.answer {
            Some(answer) => answer,
            None => return,
        };

        let idx = match self.pending.remove(&update.id) {
            Some(idx) => idx,
            None => return,
        };

        if let Some(message) = self.messages.get_mut(idx) {
            message.resolve(answer);
        }

        self.sync_dependants();
        self.scroll.last();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width.into());

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);
    }
}
