use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Rect;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// The screen shown while the session gate is closed. It stays up for the
/// life of the process when the gate never opens.
#[derive(Default)]
pub struct Waiting {}

impl Waiting {
    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Percentage(45),
                Constraint::Length(3),
                Constraint::Percentage(45),
            ])
            .split(rect);

        frame.render_widget(
            Paragraph::new("Checking session availability...")
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double),
                )
                .alignment(Alignment::Center),
            rows[1],
        );
    }
}
