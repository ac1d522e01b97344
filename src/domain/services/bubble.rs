#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

impl<'a> Bubble<'_> {
    pub fn new(message: &'a Message, alignment: BubbleAlignment, window_max_width: usize) -> Bubble {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    fn style(&self) -> Style {
        match self.message.message_type() {
            MessageType::Error => return Style::default().fg(Color::Red),
            MessageType::Typing => {
                return Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC)
            }
            MessageType::Normal => {
                if self.message.author == Author::User {
                    return Style::default().fg(Color::LightBlue);
                }
                return Style::default();
            }
        }
    }

    fn max_line_length(&self) -> usize {
        // Borders, padding, and a margin so bubbles never span the full
        // window.
        let outer_padding = (self.window_max_width as f32 * 0.04) as usize;
        return self.window_max_width.saturating_sub(4 + outer_padding).max(8);
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let text_lines = self.message.as_string_lines(self.max_line_length());
        let title = self.message.author.to_string();

        let mut inner_width = text_lines
            .iter()
            .map(|line| {
                return line.chars().count();
            })
            .max()
            .unwrap_or(1);
        if inner_width < title.chars().count() + 2 {
            inner_width = title.chars().count() + 2;
        }

        let style = self.style();
        let bubble_width = inner_width + 4;
        let indent = match self.alignment {
            BubbleAlignment::Left => "".to_string(),
            BubbleAlignment::Right => {
                " ".repeat(self.window_max_width.saturating_sub(bubble_width))
            }
        };

        let mut lines: Vec<Line<'static>> = vec![];

        lines.push(Line::from(Span::styled(
            format!(
                "{indent}╭ {title} {}╮",
                "─".repeat(inner_width - title.chars().count())
            ),
            style,
        )));

        for text_line in text_lines {
            let fill = " ".repeat(inner_width - text_line.chars().count());
            lines.push(Line::from(Span::styled(
                format!("{indent}│ {text_line}{fill} │"),
                style,
            )));
        }

        lines.push(Line::from(Span::styled(
            format!("{indent}╰{}╯", "─".repeat(inner_width + 2)),
            style,
        )));

        return lines;
    }
}
