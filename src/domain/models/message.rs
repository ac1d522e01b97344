#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;

pub const TYPING_TEXT: &str = "Typing...";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Normal,
    Typing,
    Error,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub text: String,
    mtype: MessageType,
    record_id: Option<String>,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            author: author.clone(),
            text: text.to_string().replace('\t', "  "),
            mtype: MessageType::Normal,
            record_id: None,
        };
    }

    pub fn new_with_type(author: Author, mtype: MessageType, text: &str) -> Message {
        return Message {
            author: author.clone(),
            text: text.to_string().replace('\t', "  "),
            mtype,
            record_id: None,
        };
    }

    /// A placeholder bot bubble shown while an answer is outstanding. The
    /// record identifier ties the bubble back to the row the answer will
    /// arrive on.
    pub fn typing(record_id: &str) -> Message {
        return Message {
            author: Author::Bot,
            text: TYPING_TEXT.to_string(),
            mtype: MessageType::Typing,
            record_id: Some(record_id.to_string()),
        };
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn record_id(&self) -> Option<&str> {
        return self.record_id.as_deref();
    }

    /// Swaps placeholder text for the delivered answer.
    pub fn resolve(&mut self, text: &str) {
        self.text = text.to_string().replace('\t', "  ");
        self.mtype = MessageType::Normal;
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for full_line in self.text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut current_lines: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                if word.len() + char_count + 1 > line_max_width {
                    lines.push(current_lines.join(" ").trim_end().to_string());
                    current_lines = vec![word];
                    char_count = word.len() + 1;
                } else {
                    current_lines.push(word);
                    char_count += word.len() + 1;
                }
            }
            if !current_lines.is_empty() {
                lines.push(current_lines.join(" ").trim_end().to_string());
            }
        }

        return lines;
    }
}
