use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::TextArea;
use crate::domain::models::Waiting;
use crate::domain::services::events::EventsService;
use crate::domain::services::ChatPanel;

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    panel: &mut ChatPanel,
    events: &mut EventsService,
    tx: mpsc::UnboundedSender<Action>,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let waiting = Waiting::default();

    loop {
        terminal.draw(|frame| {
            if !panel.gate_open {
                waiting.render(frame, frame.size());
                return;
            }

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
                .split(frame.size());

            if layout[0].width != panel.last_known_width
                || layout[0].height != panel.last_known_height
            {
                panel.set_rect(layout[0]);
            }

            panel
                .bubble_list
                .render(frame, layout[0], panel.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut panel.scroll.scrollbar_state,
            );

            frame.render_widget(textarea.widget(), layout[1]);
        })?;

        match events.next().await? {
            Event::AnswerPending(tag) => {
                panel.track_pending(Message::typing(&tag));
            }
            Event::AnswerReceived(update) => {
                panel.handle_update(&update);
            }
            Event::ConversationReady(greeting) => {
                panel.begin_conversation(greeting);
            }
            Event::GateDenied() => {
                // The waiting view simply stays up.
            }
            Event::GateOpened() => {
                panel.gate_open = true;
            }
            Event::KeyboardCharInput(input) => {
                if panel.gate_open {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if panel.gate_open {
                    textarea.insert_str(&text);
                }
            }
            Event::KeyboardEnter() => {
                if !panel.gate_open {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                let text = match panel.submit(&input_str) {
                    Some(text) => text,
                    None => continue,
                };

                textarea = TextArea::default();
                tx.send(Action::SubmitQuestion(text))?;
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::UIScrollDown() => {
                panel.scroll.down();
            }
            Event::UIScrollUp() => {
                panel.scroll.up();
            }
            Event::UIScrollPageDown() => {
                panel.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                panel.scroll.up_page();
            }
            Event::UIResize() | Event::UITick() => {}
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut panel = ChatPanel::new();
    let mut events = EventsService::new(rx);

    start_loop(&mut terminal, &mut panel, &mut events, tx).await?;

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    return Ok(());
}
